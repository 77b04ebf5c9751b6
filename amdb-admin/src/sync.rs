//! List synchronizer
//!
//! Applies a confirmed server mutation to the document without a reload:
//! append a rendered row, detach a row by id, or compute the ranking that a
//! reorder submits.

use crate::document::{ActionTarget, Document, DocumentError, ItemAction, ItemField, ListItem};
use crate::families::{EntityFamily, RenderedRow};
use amdb_common::models::NameOrder;

pub struct ListSynchronizer<'a> {
    family: &'a EntityFamily,
}

impl<'a> ListSynchronizer<'a> {
    pub fn new(family: &'a EntityFamily) -> Self {
        Self { family }
    }

    /// Build the list item for `row`
    pub fn render(&self, row: &RenderedRow) -> ListItem {
        let key = row.key();
        let mut actions = Vec::new();

        let fields = match row {
            RenderedRow::Name {
                id,
                name,
                original_name,
            } => {
                let mut fields = Vec::new();
                if let Some(field_id) = self.family.name_field_id(*id) {
                    fields.push(editable(field_id, name));
                }
                if let Some(field_id) = self.family.original_field_id(*id) {
                    fields.push(editable(field_id, original_name));
                }
                if let Some(handler) = self.family.edit_handler {
                    actions.push(handler_action("Save", handler, key));
                }
                if let Some(handler) = self.family.remove_handler {
                    actions.push(handler_action("Delete", handler, key));
                }
                fields
            }
            RenderedRow::Membership {
                membership,
                artist_name,
                role_label,
            } => {
                let suffix = format!("{}-{}", membership.link_id, membership.artist_id);
                let line_up = membership
                    .lineup_id
                    .map_or_else(|| "None".to_string(), |id| id.to_string());
                if let Some(handler) = self.family.remove_handler {
                    actions.push(handler_action("Remove", handler, key));
                }
                actions.push(ItemAction {
                    label: "See",
                    target: ActionTarget::Link {
                        href: format!("/artists/{}/", membership.artist_id),
                    },
                });
                vec![
                    disabled(format!("name-{}", suffix), artist_name),
                    disabled(format!("line-up-{}", suffix), &line_up),
                    disabled(format!("role-type-{}", suffix), role_label),
                ]
            }
        };

        ListItem {
            dom_id: self.family.item_dom_id(key),
            class: self.family.item_class,
            data_id: key,
            fields,
            actions,
        }
    }

    /// Append `row` at the end of the family list for `scope`
    ///
    /// Returns the DOM id of the new item.
    pub fn insert(
        &self,
        doc: &mut Document,
        scope: &str,
        row: &RenderedRow,
    ) -> Result<String, DocumentError> {
        let item = self.render(row);
        let dom_id = item.dom_id.clone();
        doc.append_item(&self.family.list_id(scope), item)?;
        tracing::debug!(family = self.family.name, dom_id = %dom_id, "Inserted list item");
        Ok(dom_id)
    }

    /// Detach the item for link row `id`
    ///
    /// A missing element means the document and the server disagree, so it is
    /// an error rather than a no-op.
    pub fn remove(&self, doc: &mut Document, id: i64) -> Result<ListItem, DocumentError> {
        let dom_id = self.family.item_dom_id(id);
        let item = doc.remove_item(&dom_id)?;
        tracing::debug!(family = self.family.name, dom_id = %dom_id, "Removed list item");
        Ok(item)
    }

    /// Dense 1..N ranking of the list in current child order
    pub fn ranking(&self, doc: &Document, scope: &str) -> Result<Vec<NameOrder>, DocumentError> {
        let list_id = self.family.list_id(scope);
        let items = doc
            .list(&list_id)
            .ok_or(DocumentError::ListNotFound(list_id))?;

        Ok(items
            .iter()
            .zip(1u32..)
            .map(|(item, order)| NameOrder {
                id: item.data_id,
                order,
            })
            .collect())
    }
}

fn editable(id: String, value: &str) -> ItemField {
    ItemField {
        id,
        value: value.to_string(),
        disabled: false,
    }
}

fn disabled(id: String, value: &str) -> ItemField {
    ItemField {
        id,
        value: value.to_string(),
        disabled: true,
    }
}

fn handler_action(label: &'static str, name: &'static str, arg: i64) -> ItemAction {
    ItemAction {
        label,
        target: ActionTarget::Handler { name, arg },
    }
}
