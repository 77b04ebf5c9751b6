//! In-memory projection of the page document
//!
//! Holds the pieces of the server-rendered page the handlers read and patch:
//! list containers with their items, form inputs, `<select>` controls and
//! autocomplete dropdowns. Element ids follow the page templates.

use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DocumentError {
    #[error("Element not found: {0}")]
    ElementNotFound(String),

    #[error("List container not found: {0}")]
    ListNotFound(String),

    #[error("Position {index} out of range for list {list} ({len} items)")]
    OutOfRange {
        list: String,
        index: usize,
        len: usize,
    },
}

/// Input rendered inside a list item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemField {
    pub id: String,
    pub value: String,
    pub disabled: bool,
}

/// What an item button does when clicked
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionTarget {
    /// Call a page handler with the item's key
    Handler { name: &'static str, arg: i64 },
    /// Open another admin page
    Link { href: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemAction {
    pub label: &'static str,
    pub target: ActionTarget,
}

/// One `<li>` of a list container
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListItem {
    pub dom_id: String,
    pub class: &'static str,
    /// `data-id`: the link row id
    pub data_id: i64,
    pub fields: Vec<ItemField>,
    pub actions: Vec<ItemAction>,
}

impl ListItem {
    pub fn field(&self, id: &str) -> Option<&ItemField> {
        self.fields.iter().find(|f| f.id == id)
    }

    /// Value of the field at `index`, in render order
    pub fn field_value(&self, index: usize) -> Option<&str> {
        self.fields.get(index).map(|f| f.value.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectField {
    pub options: Vec<SelectOption>,
    pub selected: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropdownOption {
    pub label: String,
    pub value: i64,
}

/// Autocomplete dropdown under a search input
///
/// Visibility on blur is decided by whether the pointer is over the
/// dropdown, so a click on an option always lands before the dropdown hides.
/// A blur deferred that way hides the dropdown once the pointer leaves.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dropdown {
    options: Vec<DropdownOption>,
    visible: bool,
    pointer_inside: bool,
    /// Input lost focus while the pointer was over the dropdown
    blurred: bool,
}

impl Dropdown {
    pub fn options(&self) -> &[DropdownOption] {
        &self.options
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Replace options; visible iff at least one option
    pub fn render(&mut self, options: Vec<DropdownOption>) {
        self.visible = !options.is_empty();
        self.options = options;
        self.blurred = false;
    }

    pub fn hide(&mut self) {
        self.visible = false;
        self.pointer_inside = false;
        self.blurred = false;
    }

    /// Hide and drop all options
    pub fn clear(&mut self) {
        self.options.clear();
        self.hide();
    }

    pub fn pointer_enter(&mut self) {
        self.pointer_inside = true;
    }

    pub fn pointer_leave(&mut self) {
        self.pointer_inside = false;
        if self.blurred {
            self.hide();
        }
    }

    /// Search input lost focus
    ///
    /// Returns true when the dropdown was hidden. With the pointer over the
    /// dropdown, hiding waits for the click or for the pointer to leave.
    pub fn blur(&mut self) -> bool {
        if self.pointer_inside {
            self.blurred = true;
            return false;
        }
        self.hide();
        true
    }

    /// Clicked option, or `None` when the dropdown is hidden
    pub fn option(&self, index: usize) -> Option<&DropdownOption> {
        if !self.visible {
            return None;
        }
        self.options.get(index)
    }
}

/// The page document
#[derive(Debug, Default)]
pub struct Document {
    lists: HashMap<String, Vec<ListItem>>,
    inputs: HashMap<String, String>,
    selects: HashMap<String, SelectField>,
    dropdowns: HashMap<String, Dropdown>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    // ---- lists ----

    /// Register an empty list container (no-op if it exists)
    pub fn add_list(&mut self, list_id: impl Into<String>) {
        self.lists.entry(list_id.into()).or_default();
    }

    pub fn list(&self, list_id: &str) -> Option<&[ListItem]> {
        self.lists.get(list_id).map(Vec::as_slice)
    }

    /// Ids of all list containers, sorted
    pub fn list_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.lists.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    pub fn list_len(&self, list_id: &str) -> usize {
        self.lists.get(list_id).map_or(0, Vec::len)
    }

    /// Append at the visual end of `list_id`
    pub fn append_item(&mut self, list_id: &str, item: ListItem) -> Result<(), DocumentError> {
        let list = self
            .lists
            .get_mut(list_id)
            .ok_or_else(|| DocumentError::ListNotFound(list_id.to_string()))?;
        list.push(item);
        Ok(())
    }

    /// Detach the element with `dom_id` from whichever list holds it
    pub fn remove_item(&mut self, dom_id: &str) -> Result<ListItem, DocumentError> {
        for list in self.lists.values_mut() {
            if let Some(pos) = list.iter().position(|item| item.dom_id == dom_id) {
                return Ok(list.remove(pos));
            }
        }
        Err(DocumentError::ElementNotFound(dom_id.to_string()))
    }

    pub fn find_item(&self, dom_id: &str) -> Option<&ListItem> {
        self.lists
            .values()
            .flat_map(|list| list.iter())
            .find(|item| item.dom_id == dom_id)
    }

    /// Drag the item at `from` to position `to`
    pub fn move_item(
        &mut self,
        list_id: &str,
        from: usize,
        to: usize,
    ) -> Result<(), DocumentError> {
        let list = self
            .lists
            .get_mut(list_id)
            .ok_or_else(|| DocumentError::ListNotFound(list_id.to_string()))?;
        let len = list.len();
        for index in [from, to] {
            if index >= len {
                return Err(DocumentError::OutOfRange {
                    list: list_id.to_string(),
                    index,
                    len,
                });
            }
        }
        let item = list.remove(from);
        list.insert(to, item);
        Ok(())
    }

    // ---- form inputs ----

    pub fn set_input(&mut self, id: impl Into<String>, value: impl Into<String>) {
        self.inputs.insert(id.into(), value.into());
    }

    pub fn input(&self, id: &str) -> Result<&str, DocumentError> {
        self.inputs
            .get(id)
            .map(String::as_str)
            .ok_or_else(|| DocumentError::ElementNotFound(id.to_string()))
    }

    /// Value of the input `id`, whether inside a list item or a form
    pub fn find_field(&self, id: &str) -> Option<&str> {
        self.lists
            .values()
            .flat_map(|list| list.iter())
            .find_map(|item| item.field(id))
            .map(|field| field.value.as_str())
            .or_else(|| self.inputs.get(id).map(String::as_str))
    }

    /// Type into the input `id`, whether inside a list item or a form
    pub fn set_field(&mut self, id: &str, value: impl Into<String>) -> Result<(), DocumentError> {
        let value = value.into();
        for item in self.lists.values_mut().flat_map(|list| list.iter_mut()) {
            if let Some(field) = item.fields.iter_mut().find(|f| f.id == id) {
                field.value = value;
                return Ok(());
            }
        }
        match self.inputs.get_mut(id) {
            Some(input) => {
                *input = value;
                Ok(())
            }
            None => Err(DocumentError::ElementNotFound(id.to_string())),
        }
    }

    pub fn add_select(&mut self, id: impl Into<String>, options: Vec<SelectOption>) {
        self.selects.insert(id.into(), SelectField { options, selected: 0 });
    }

    pub fn choose(&mut self, id: &str, index: usize) -> Result<(), DocumentError> {
        let select = self
            .selects
            .get_mut(id)
            .ok_or_else(|| DocumentError::ElementNotFound(id.to_string()))?;
        if index >= select.options.len() {
            return Err(DocumentError::OutOfRange {
                list: id.to_string(),
                index,
                len: select.options.len(),
            });
        }
        select.selected = index;
        Ok(())
    }

    pub fn selected_option(&self, id: &str) -> Result<&SelectOption, DocumentError> {
        self.selects
            .get(id)
            .and_then(|s| s.options.get(s.selected))
            .ok_or_else(|| DocumentError::ElementNotFound(id.to_string()))
    }

    // ---- dropdowns ----

    pub fn dropdown(&self, id: &str) -> Option<&Dropdown> {
        self.dropdowns.get(id)
    }

    /// Dropdown `id`, created empty and hidden on first use
    pub fn dropdown_mut(&mut self, id: &str) -> &mut Dropdown {
        self.dropdowns.entry(id.to_string()).or_default()
    }

    /// Drop state that does not survive a reload
    pub fn reset_transient(&mut self) {
        for dropdown in self.dropdowns.values_mut() {
            dropdown.clear();
        }
    }
}
