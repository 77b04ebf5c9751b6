//! Entity family configuration
//!
//! Artist names, anime names, lineup members and song artists all follow the
//! same associated-entity list pattern. Each family is described here as
//! data: element id templates, endpoint templates and handler names.
//! Templates use `{scope}` (the parent list key) and `{id}` (the link row id).

use amdb_common::models::{LineupMembership, NamedEntity};

/// How a family's list items are rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowLayout {
    /// Editable localized/original name inputs with Save and Delete
    Names,
    /// Disabled artist/lineup/role inputs with Remove and a link to the artist
    Membership,
}

/// Row content handed to the list synchronizer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderedRow {
    Name {
        id: i64,
        name: String,
        original_name: String,
    },
    Membership {
        membership: LineupMembership,
        artist_name: String,
        role_label: String,
    },
}

impl RenderedRow {
    /// Link row id, used as `data-id`
    pub fn key(&self) -> i64 {
        match self {
            RenderedRow::Name { id, .. } => *id,
            RenderedRow::Membership { membership, .. } => membership.link_id,
        }
    }
}

impl From<&NamedEntity> for RenderedRow {
    fn from(entity: &NamedEntity) -> Self {
        RenderedRow::Name {
            id: entity.id,
            name: entity.display_name.clone(),
            original_name: entity.original_name.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityFamily {
    pub name: &'static str,
    pub layout: RowLayout,
    pub list_template: &'static str,
    pub item_template: &'static str,
    pub item_class: &'static str,
    pub create_template: Option<&'static str>,
    pub update_template: Option<&'static str>,
    pub remove_template: Option<&'static str>,
    pub reorder_template: Option<&'static str>,
    /// Input holding the localized name of row `{id}`
    pub name_field: Option<&'static str>,
    /// Input holding the original name of row `{id}`
    pub original_field: Option<&'static str>,
    pub edit_handler: Option<&'static str>,
    pub remove_handler: Option<&'static str>,
}

pub const ARTIST_NAMES: EntityFamily = EntityFamily {
    name: "artist names",
    layout: RowLayout::Names,
    list_template: "nameList",
    item_template: "item_{id}",
    item_class: "sortable-item",
    create_template: Some("names/"),
    update_template: Some("names/{id}"),
    remove_template: Some("names/{id}"),
    reorder_template: Some("names/reorder/"),
    name_field: Some("nameInput_{id}"),
    original_field: Some("originalNameInput_{id}"),
    edit_handler: Some("editArtistName"),
    remove_handler: Some("removeArtistName"),
};

/// Anime names are rendered by the server and only edited in place
pub const ANIME_NAMES: EntityFamily = EntityFamily {
    name: "anime names",
    layout: RowLayout::Names,
    list_template: "nameList",
    item_template: "item_{id}",
    item_class: "sortable-item",
    create_template: None,
    update_template: Some("names/{id}"),
    remove_template: None,
    reorder_template: None,
    name_field: None,
    original_field: Some("original-name-{id}"),
    edit_handler: Some("editAnimeName"),
    remove_handler: None,
};

pub const LINE_UP_MEMBERS: EntityFamily = EntityFamily {
    name: "lineup members",
    layout: RowLayout::Membership,
    list_template: "member-list-{scope}",
    item_template: "artist-item-{id}",
    item_class: "artist-item",
    create_template: Some("/line_ups/{scope}"),
    update_template: None,
    remove_template: Some("/line_ups/members/{id}"),
    reorder_template: None,
    name_field: None,
    original_field: None,
    edit_handler: None,
    remove_handler: Some("removeLineUpMember"),
};

pub const SONG_ARTISTS: EntityFamily = EntityFamily {
    name: "song artists",
    layout: RowLayout::Membership,
    list_template: "song-artist-list-{scope}",
    item_template: "artist-item-{id}",
    item_class: "artist-item",
    create_template: Some("/songs/artist/add/"),
    update_template: None,
    remove_template: Some("/songs/artists/{id}"),
    reorder_template: None,
    name_field: None,
    original_field: None,
    edit_handler: None,
    remove_handler: Some("removeSongArtist"),
};

fn fill(template: &str, scope: &str, id: Option<i64>) -> String {
    let filled = template.replace("{scope}", scope);
    match id {
        Some(id) => filled.replace("{id}", &id.to_string()),
        None => filled,
    }
}

impl EntityFamily {
    pub fn list_id(&self, scope: &str) -> String {
        fill(self.list_template, scope, None)
    }

    pub fn item_dom_id(&self, id: i64) -> String {
        fill(self.item_template, "", Some(id))
    }

    pub fn create_path(&self, scope: &str) -> Option<String> {
        self.create_template.map(|t| fill(t, scope, None))
    }

    pub fn update_path(&self, id: i64) -> Option<String> {
        self.update_template.map(|t| fill(t, "", Some(id)))
    }

    pub fn remove_path(&self, id: i64) -> Option<String> {
        self.remove_template.map(|t| fill(t, "", Some(id)))
    }

    pub fn reorder_path(&self) -> Option<String> {
        self.reorder_template.map(str::to_string)
    }

    pub fn name_field_id(&self, id: i64) -> Option<String> {
        self.name_field.map(|t| fill(t, "", Some(id)))
    }

    pub fn original_field_id(&self, id: i64) -> Option<String> {
        self.original_field.map(|t| fill(t, "", Some(id)))
    }
}
