use serde::{Deserialize, Serialize};

/// Lineup owned by an artist
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineUp {
    pub id: i64,
    pub id_artist: i64,
}

/// Response to lineup creation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineUpCreated {
    #[serde(default)]
    pub new_line_up: Option<LineUp>,
    #[serde(flatten)]
    pub feedback: ServerFeedback,
}

/// Envelope returned by lineup creation and deletion
///
/// The server fills `feedback` with an HTML summary of the links it moved,
/// or `error` when it refused the change.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerFeedback {
    #[serde(default)]
    pub feedback: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ServerFeedback {
    /// Message to display, preferring `feedback` over `error`
    ///
    /// Empty strings count as absent.
    pub fn message(&self) -> Option<&str> {
        self.feedback
            .as_deref()
            .filter(|m| !m.is_empty())
            .or_else(|| self.error.as_deref().filter(|m| !m.is_empty()))
    }
}

/// Selected role option: `id` is submitted, `label` is rendered
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleType {
    pub id: i64,
    pub label: String,
}

/// Body for adding an artist to a lineup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddLineUpMemberRequest {
    pub id_member: i64,
    pub id_member_line_up: Option<i64>,
    pub id_role_type: i64,
}

/// Lineup member link row (link_artist_line_up)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberLink {
    pub id: i64,
    pub id_member: i64,
    #[serde(default)]
    pub id_member_line_up: Option<i64>,
}

/// Body for crediting an artist on a song
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddSongArtistRequest {
    pub id_song: i64,
    pub id_artist: i64,
    pub id_artist_line_up: Option<i64>,
    pub id_role_type: i64,
}

/// Song credit link row (link_song_artist)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SongArtistLink {
    pub id: i64,
    pub id_artist: i64,
    #[serde(default)]
    pub id_artist_line_up: Option<i64>,
}

/// Artist appearance in a lineup or a song credit list
///
/// `link_id` identifies the association row and is the only removal key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineupMembership {
    pub link_id: i64,
    pub artist_id: i64,
    pub lineup_id: Option<i64>,
    pub role_type_id: i64,
}

impl LineupMembership {
    pub fn from_member_link(link: &MemberLink, role_type_id: i64) -> Self {
        Self {
            link_id: link.id,
            artist_id: link.id_member,
            lineup_id: link.id_member_line_up,
            role_type_id,
        }
    }

    pub fn from_song_link(link: &SongArtistLink, role_type_id: i64) -> Self {
        Self {
            link_id: link.id,
            artist_id: link.id_artist,
            lineup_id: link.id_artist_line_up,
            role_type_id,
        }
    }
}
