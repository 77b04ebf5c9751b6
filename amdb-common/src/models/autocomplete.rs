use serde::{Deserialize, Serialize};

/// Name pair attached to an autocomplete candidate
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateName {
    #[serde(default)]
    pub artist_name: Option<String>,
    #[serde(default)]
    pub original_artist_name: Option<String>,
}

impl CandidateName {
    /// Case-insensitive substring match on either name
    ///
    /// `needle` must already be lowercase.
    pub fn contains(&self, needle: &str) -> bool {
        [&self.artist_name, &self.original_artist_name]
            .into_iter()
            .flatten()
            .any(|name| name.to_lowercase().contains(needle))
    }
}

/// Artist returned by `/autocomplete/artists`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtistCandidate {
    pub id: i64,
    #[serde(default)]
    pub names: Vec<CandidateName>,
}

impl ArtistCandidate {
    /// First localized name, or empty when the artist has none
    pub fn primary_name(&self) -> &str {
        self.names
            .first()
            .and_then(|n| n.artist_name.as_deref())
            .unwrap_or("")
    }
}

/// Lineup member as nested in `/autocomplete/line_ups`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineUpMemberCandidate {
    #[serde(default)]
    pub names: Vec<CandidateName>,
}

/// Lineup returned by `/autocomplete/line_ups`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineUpCandidate {
    pub id: i64,
    #[serde(default)]
    pub members: Vec<LineUpMemberCandidate>,
}

impl LineUpCandidate {
    /// `"{id} ({first member names})"`
    pub fn label(&self) -> String {
        let members: Vec<&str> = self
            .members
            .iter()
            .map(|m| {
                m.names
                    .first()
                    .and_then(|n| n.artist_name.as_deref())
                    .unwrap_or("")
            })
            .collect();
        format!("{} ({})", self.id, members.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_candidate_name_matches_original() {
        let name = CandidateName {
            artist_name: Some("Yo-yo".into()),
            original_artist_name: Some("ヨーヨー".into()),
        };
        assert!(name.contains("yo"));
        assert!(name.contains("ヨー"));
        assert!(!name.contains("zz"));
    }

    #[test]
    fn test_line_up_label() {
        let line_up: LineUpCandidate = serde_json::from_value(json!({
            "id": 12,
            "members": [
                {"names": [{"artist_name": "Aimer"}]},
                {"names": [{"artist_name": "LiSA", "original_artist_name": "リサ"}]}
            ]
        }))
        .unwrap();
        assert_eq!(line_up.label(), "12 (Aimer, LiSA)");
    }

    #[test]
    fn test_primary_name_without_names() {
        let artist = ArtistCandidate { id: 1, names: vec![] };
        assert_eq!(artist.primary_name(), "");
    }
}
