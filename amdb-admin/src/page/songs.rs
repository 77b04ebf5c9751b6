//! Song artist credit handlers

use amdb_common::models::{AddSongArtistRequest, LineupMembership, SongArtistLink};

use super::{ActionError, Page};
use crate::families::{RenderedRow, SONG_ARTISTS};
use crate::sync::ListSynchronizer;

impl Page {
    /// Song displayed by this page (`/songs/{id}/...`)
    pub fn song_id(&self) -> Option<i64> {
        self.client
            .page_url()
            .path_segments()?
            .nth(1)
            .and_then(|segment| segment.parse().ok())
    }

    /// Credit the artist selected in form `element` on the current song
    ///
    /// Returns the new link row id.
    pub async fn add_song_artist(&mut self, element: &str) -> Option<i64> {
        let result = self.try_add_song_artist(element).await;
        self.settle(result)
    }

    async fn try_add_song_artist(&mut self, element: &str) -> Result<i64, ActionError> {
        let form = self.membership_form(element)?;
        let song_id = self.song_id().ok_or_else(|| {
            ActionError::Validation(format!(
                "No song id in page URL {}",
                self.client.page_url()
            ))
        })?;

        let path = SONG_ARTISTS
            .create_path(element)
            .ok_or_else(|| ActionError::Validation("Song artists cannot be added".into()))?;
        let body = AddSongArtistRequest {
            id_song: song_id,
            id_artist: form.artist_id,
            id_artist_line_up: form.line_up_id,
            id_role_type: form.role.id,
        };
        let link: SongArtistLink = self.client.post_json(&path, &body).await?;
        tracing::debug!(?link, "Song artist link created");

        let row = RenderedRow::Membership {
            membership: LineupMembership::from_song_link(&link, form.role.id),
            artist_name: form.artist_name,
            role_label: form.role.label,
        };
        ListSynchronizer::new(&SONG_ARTISTS).insert(&mut self.document, element, &row)?;

        tracing::info!(song_id, link_id = link.id, "Song artist added");
        Ok(link.id)
    }

    /// Remove song credit link `link_id` and detach its row
    pub async fn remove_song_artist(&mut self, link_id: i64) -> bool {
        let result = self.try_remove_song_artist(link_id).await;
        self.settle(result).is_some()
    }

    async fn try_remove_song_artist(&mut self, link_id: i64) -> Result<(), ActionError> {
        let path = SONG_ARTISTS
            .remove_path(link_id)
            .ok_or_else(|| ActionError::Validation("Song artists cannot be removed".into()))?;
        self.client.delete(&path).await?;

        ListSynchronizer::new(&SONG_ARTISTS).remove(&mut self.document, link_id)?;

        tracing::info!(link_id, "Song artist removed");
        Ok(())
    }
}
