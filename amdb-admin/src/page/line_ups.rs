//! Lineup and lineup member handlers

use amdb_common::models::{
    AddLineUpMemberRequest, LineUpCreated, LineupMembership, MemberLink, RoleType,
    ServerFeedback,
};

use super::{parse_id, parse_optional_id, required, ActionError, Page};
use crate::families::{RenderedRow, LINE_UP_MEMBERS};
use crate::feedback::FeedbackReport;
use crate::sync::ListSynchronizer;

/// Values of an "add artist" form (lineup member or song artist)
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct MembershipForm {
    pub artist_id: i64,
    pub line_up_id: Option<i64>,
    pub role: RoleType,
    pub artist_name: String,
}

pub fn artist_input_id(element: &str) -> String {
    format!("add-artist-{}", element)
}

pub fn hidden_artist_input_id(element: &str) -> String {
    format!("hidden-artist-{}", element)
}

pub fn line_up_input_id(element: &str) -> String {
    format!("add-line-up-{}", element)
}

pub fn role_type_select_id(element: &str) -> String {
    format!("add-role-type-{}", element)
}

impl Page {
    /// Read and validate the "add artist" form suffixed with `element`
    pub(super) fn membership_form(&self, element: &str) -> Result<MembershipForm, ActionError> {
        let hidden_artist = self.document.input(&hidden_artist_input_id(element))?;
        let line_up = self.document.input(&line_up_input_id(element))?;
        let role = self.document.selected_option(&role_type_select_id(element))?;
        let artist_name = self.document.input(&artist_input_id(element))?;

        let artist_id = parse_id(
            required(hidden_artist, "Artist must be specified")?,
            "artist id",
        )?;
        let line_up_id = parse_optional_id(line_up, "lineup id")?;
        let role = RoleType {
            id: parse_id(&role.value, "role type")?,
            label: role.text.clone(),
        };
        let artist_name = if artist_name.trim().is_empty() {
            "None".to_string()
        } else {
            artist_name.to_string()
        };

        Ok(MembershipForm {
            artist_id,
            line_up_id,
            role,
            artist_name,
        })
    }

    /// Create a lineup for `artist_id`
    ///
    /// The server answers with a summary of the links it moved to the new
    /// lineup, shown as a SUCCESS report. Without a summary the page reloads.
    pub async fn add_line_up(&mut self, artist_id: i64) -> bool {
        let result = self.try_add_line_up(artist_id).await;
        self.settle(result).is_some()
    }

    async fn try_add_line_up(&mut self, artist_id: i64) -> Result<(), ActionError> {
        let path = format!("/artists/{}/line_ups/", artist_id);
        let response: LineUpCreated = self.client.post_empty(&path).await?;
        let line_up_id = response.new_line_up.as_ref().map(|line_up| line_up.id);
        tracing::info!(artist_id, ?line_up_id, "Lineup added");
        self.show_server_feedback(&response.feedback);
        Ok(())
    }

    /// Delete lineup `line_up_id`
    pub async fn remove_line_up(&mut self, line_up_id: i64) -> bool {
        let result = self.try_remove_line_up(line_up_id).await;
        self.settle(result).is_some()
    }

    async fn try_remove_line_up(&mut self, line_up_id: i64) -> Result<(), ActionError> {
        let path = format!("/line_ups/{}", line_up_id);
        let response: ServerFeedback = self.client.delete_json(&path).await?;
        tracing::info!(line_up_id, "Lineup removed");
        self.show_server_feedback(&response);
        Ok(())
    }

    fn show_server_feedback(&mut self, response: &ServerFeedback) {
        match response.message() {
            Some(message) => self.feedback.show(FeedbackReport::success(message)),
            None => self.reload(),
        }
    }

    /// Add the artist selected in the lineup's form as a member
    ///
    /// Returns the new link row id.
    pub async fn add_line_up_member(&mut self, line_up_id: i64) -> Option<i64> {
        let result = self.try_add_line_up_member(line_up_id).await;
        self.settle(result)
    }

    async fn try_add_line_up_member(&mut self, line_up_id: i64) -> Result<i64, ActionError> {
        let element = line_up_id.to_string();
        let form = self.membership_form(&element)?;

        let path = LINE_UP_MEMBERS
            .create_path(&element)
            .ok_or_else(|| ActionError::Validation("Members cannot be added".into()))?;
        let body = AddLineUpMemberRequest {
            id_member: form.artist_id,
            id_member_line_up: form.line_up_id,
            id_role_type: form.role.id,
        };
        let link: MemberLink = self.client.post_json(&path, &body).await?;

        let row = RenderedRow::Membership {
            membership: LineupMembership::from_member_link(&link, form.role.id),
            artist_name: form.artist_name,
            role_label: form.role.label,
        };
        ListSynchronizer::new(&LINE_UP_MEMBERS).insert(&mut self.document, &element, &row)?;

        tracing::info!(line_up_id, link_id = link.id, "Lineup member added");
        Ok(link.id)
    }

    /// Remove lineup member link `link_id` and detach its row
    pub async fn remove_line_up_member(&mut self, link_id: i64) -> bool {
        let result = self.try_remove_line_up_member(link_id).await;
        self.settle(result).is_some()
    }

    async fn try_remove_line_up_member(&mut self, link_id: i64) -> Result<(), ActionError> {
        let path = LINE_UP_MEMBERS
            .remove_path(link_id)
            .ok_or_else(|| ActionError::Validation("Members cannot be removed".into()))?;
        self.client.delete(&path).await?;

        ListSynchronizer::new(&LINE_UP_MEMBERS).remove(&mut self.document, link_id)?;

        tracing::info!(link_id, "Lineup member removed");
        Ok(())
    }
}
