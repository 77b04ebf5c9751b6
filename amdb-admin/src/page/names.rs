//! Artist and anime name handlers

use amdb_common::models::{
    AnimeNameRequest, ArtistName, ArtistNameRequest, NamedEntity, ReorderRequest,
};

use super::{required, ActionError, Page};
use crate::document::DocumentError;
use crate::families::{RenderedRow, ANIME_NAMES, ARTIST_NAMES};
use crate::sync::ListSynchronizer;

/// Inputs of the "add name" form on the artist page
pub const NEW_NAME_INPUT: &str = "newNameInput";
pub const NEW_ORIGINAL_NAME_INPUT: &str = "newOriginalNameInput";

const EMPTY_NAME: &str = "Name cannot be empty";

impl Page {
    /// Create an artist name from the "add name" form
    ///
    /// On success the form is cleared and the new row is appended to the
    /// name list. Returns the new name id.
    pub async fn add_artist_name(&mut self) -> Option<i64> {
        let result = self.try_add_artist_name().await;
        self.settle(result)
    }

    async fn try_add_artist_name(&mut self) -> Result<i64, ActionError> {
        let name = self.document.input(NEW_NAME_INPUT)?.to_string();
        let original_name = self.document.input(NEW_ORIGINAL_NAME_INPUT)?.to_string();
        required(&name, EMPTY_NAME)?;

        let path = ARTIST_NAMES
            .create_path("")
            .ok_or_else(|| ActionError::Validation("Artist names cannot be created".into()))?;
        let body = ArtistNameRequest {
            artist_name: name,
            original_artist_name: original_name,
        };
        let created: ArtistName = self.client.post_json(&path, &body).await?;

        self.document.set_input(NEW_NAME_INPUT, "");
        self.document.set_input(NEW_ORIGINAL_NAME_INPUT, "");

        // New names rank last
        let order = self.document.list_len(&ARTIST_NAMES.list_id("")) as u32 + 1;
        let entity = NamedEntity::from_row(&created, order);
        ListSynchronizer::new(&ARTIST_NAMES).insert(
            &mut self.document,
            "",
            &RenderedRow::from(&entity),
        )?;

        tracing::info!(name_id = entity.id, order = entity.order, "Artist name added");
        Ok(created.id)
    }

    /// Save the inputs of artist name row `name_id`
    pub async fn edit_artist_name(&mut self, name_id: i64) -> bool {
        let result = self.try_edit_artist_name(name_id).await;
        self.settle(result).is_some()
    }

    async fn try_edit_artist_name(&mut self, name_id: i64) -> Result<(), ActionError> {
        let name = field_value(self, ARTIST_NAMES.name_field_id(name_id))?;
        let original_name = field_value(self, ARTIST_NAMES.original_field_id(name_id))?;
        required(&name, EMPTY_NAME)?;

        let path = update_path(ARTIST_NAMES.update_path(name_id))?;
        let body = ArtistNameRequest {
            artist_name: name,
            original_artist_name: original_name,
        };
        self.client.put(&path, &body).await?;

        tracing::info!(name_id, "Artist name updated");
        Ok(())
    }

    /// Delete artist name `name_id` and detach its row
    pub async fn remove_artist_name(&mut self, name_id: i64) -> bool {
        let result = self.try_remove_artist_name(name_id).await;
        self.settle(result).is_some()
    }

    async fn try_remove_artist_name(&mut self, name_id: i64) -> Result<(), ActionError> {
        let path = ARTIST_NAMES
            .remove_path(name_id)
            .ok_or_else(|| ActionError::Validation("Artist names cannot be removed".into()))?;
        self.client.delete(&path).await?;

        ListSynchronizer::new(&ARTIST_NAMES).remove(&mut self.document, name_id)?;

        tracing::info!(name_id, "Artist name removed");
        Ok(())
    }

    /// Save the original name of anime name row `name_id`
    pub async fn edit_anime_name(&mut self, name_id: i64) -> bool {
        let result = self.try_edit_anime_name(name_id).await;
        self.settle(result).is_some()
    }

    async fn try_edit_anime_name(&mut self, name_id: i64) -> Result<(), ActionError> {
        let original_name = field_value(self, ANIME_NAMES.original_field_id(name_id))?;

        let path = update_path(ANIME_NAMES.update_path(name_id))?;
        let body = AnimeNameRequest {
            original_anime_name: original_name,
        };
        self.client.put(&path, &body).await?;

        tracing::info!(name_id, "Anime name updated");
        Ok(())
    }

    /// Drop the name dragged from `from` at `to`, then submit the ranking
    pub async fn drop_name(&mut self, from: usize, to: usize) -> bool {
        let list_id = ARTIST_NAMES.list_id("");
        if let Err(e) = self.document.move_item(&list_id, from, to) {
            self.report(e.into());
            return false;
        }
        self.reorder_names().await
    }

    /// Submit the complete name ranking in current list order
    pub async fn reorder_names(&mut self) -> bool {
        let result = self.try_reorder_names().await;
        self.settle(result).is_some()
    }

    async fn try_reorder_names(&mut self) -> Result<(), ActionError> {
        let order = ListSynchronizer::new(&ARTIST_NAMES).ranking(&self.document, "")?;
        let path = ARTIST_NAMES
            .reorder_path()
            .ok_or_else(|| ActionError::Validation("Artist names cannot be reordered".into()))?;

        let count = order.len();
        self.client.put(&path, &ReorderRequest { order }).await?;

        tracing::info!(count, "Name order submitted");
        Ok(())
    }
}

/// Current value of the row input `field_id`
fn field_value(page: &Page, field_id: Option<String>) -> Result<String, ActionError> {
    let field_id = field_id.ok_or_else(|| ActionError::Validation("Field is not editable".into()))?;
    page.document
        .find_field(&field_id)
        .map(str::to_string)
        .ok_or(ActionError::Consistency(DocumentError::ElementNotFound(field_id)))
}

fn update_path(path: Option<String>) -> Result<String, ActionError> {
    path.ok_or_else(|| ActionError::Validation("Names cannot be updated".into()))
}
