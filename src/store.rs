// Shopping list store: in-memory collection mirrored to key-value storage

use crate::error::StoreError;
use crate::models::{AppSettings, Item, ItemUpdate, NewItem, SettingsUpdate, ShoppingList, Theme, new_id, now_iso};
use crate::record::{find_by_id, find_by_id_mut, remove_by_id};
use crate::storage::{KeyValueStore, load_document, save_document};
use eyre::Result;
use tracing::{debug, info};

/// Suffix appended to a duplicated list's title
pub const COPY_SUFFIX: &str = " (copy)";

/// Outcome of an operation that silently ignores unknown ids
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    /// State changed and was persisted
    Applied,
    /// Nothing matched; nothing was written
    Unchanged,
}

impl Mutation {
    pub fn is_applied(self) -> bool {
        self == Mutation::Applied
    }
}

/// Single source of truth for lists, items and settings.
///
/// Every mutation works on a copy of the collection, persists it, and only
/// then replaces the in-memory state, so a failed write leaves the store as
/// it was.
pub struct ShoppingStore<S: KeyValueStore> {
    storage: S,
    lists: Vec<ShoppingList>,
    settings: AppSettings,
}

impl<S: KeyValueStore> ShoppingStore<S> {
    /// Load lists and settings from `storage`.
    ///
    /// Missing or corrupt documents start the store empty with default settings.
    /// Fails only when the storage itself cannot be read.
    pub fn open(storage: S) -> Result<Self> {
        let lists: Vec<ShoppingList> = load_document(&storage)?;
        let settings: AppSettings = load_document(&storage)?;
        info!(lists = lists.len(), "Opened shopping store");
        Ok(Self {
            storage,
            lists,
            settings,
        })
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Every list, most recently created first
    pub fn lists(&self) -> &[ShoppingList] {
        &self.lists
    }

    pub fn active_lists(&self) -> Vec<&ShoppingList> {
        self.lists.iter().filter(|l| !l.archived).collect()
    }

    pub fn archived_lists(&self) -> Vec<&ShoppingList> {
        self.lists.iter().filter(|l| l.archived).collect()
    }

    pub fn get_list(&self, list_id: &str) -> Option<&ShoppingList> {
        find_by_id(&self.lists, list_id)
    }

    pub fn settings(&self) -> &AppSettings {
        &self.settings
    }

    // ========================================================================
    // Lists
    // ========================================================================

    pub fn create_list(&mut self, title: impl Into<String>) -> Result<ShoppingList> {
        let list = ShoppingList::new(title);
        let mut next = Vec::with_capacity(self.lists.len() + 1);
        next.push(list.clone());
        next.extend(self.lists.iter().cloned());
        self.commit(next)?;

        debug!(list_id = %list.id, title = %list.title, "Created list");
        Ok(list)
    }

    pub fn update_list_title(&mut self, list_id: &str, title: impl Into<String>) -> Result<Mutation> {
        let title = title.into();
        self.modify_list(list_id, |list| {
            list.title = title;
            Mutation::Applied
        })
    }

    pub fn delete_list(&mut self, list_id: &str) -> Result<Mutation> {
        let mut next = self.lists.clone();
        if remove_by_id(&mut next, list_id).is_none() {
            debug!(list_id, "delete_list: no such list");
            return Ok(Mutation::Unchanged);
        }
        self.commit(next)?;
        debug!(list_id, "Deleted list");
        Ok(Mutation::Applied)
    }

    pub fn archive_list(&mut self, list_id: &str) -> Result<Mutation> {
        self.set_archived(list_id, true)
    }

    pub fn restore_list(&mut self, list_id: &str) -> Result<Mutation> {
        self.set_archived(list_id, false)
    }

    fn set_archived(&mut self, list_id: &str, archived: bool) -> Result<Mutation> {
        self.modify_list(list_id, |list| {
            list.archived = archived;
            Mutation::Applied
        })
    }

    /// Copy a list with fresh ids, keeping item `order` and `bought` values.
    ///
    /// Fails with [`StoreError::ListNotFound`] when the list does not exist.
    pub fn duplicate_list(&mut self, list_id: &str) -> Result<ShoppingList> {
        let original = self
            .get_list(list_id)
            .ok_or_else(|| StoreError::ListNotFound(list_id.to_string()))?;

        let now = now_iso();
        let copy = ShoppingList {
            id: new_id(),
            title: format!("{}{}", original.title, COPY_SUFFIX),
            created_at: now.clone(),
            updated_at: now,
            items: original
                .items
                .iter()
                .map(|item| Item {
                    id: new_id(),
                    ..item.clone()
                })
                .collect(),
            archived: false,
        };

        let mut next = Vec::with_capacity(self.lists.len() + 1);
        next.push(copy.clone());
        next.extend(self.lists.iter().cloned());
        self.commit(next)?;

        debug!(list_id, copy_id = %copy.id, items = copy.items.len(), "Duplicated list");
        Ok(copy)
    }

    // ========================================================================
    // Items
    // ========================================================================

    /// Append an item with the next `order` value.
    ///
    /// Fails with [`StoreError::ListNotFound`] when the list does not exist.
    pub fn add_item(&mut self, list_id: &str, fields: NewItem) -> Result<Item> {
        let mut next = self.lists.clone();
        let list =
            find_by_id_mut(&mut next, list_id).ok_or_else(|| StoreError::ListNotFound(list_id.to_string()))?;

        let item = fields.into_item(new_id(), list.next_order());
        list.items.push(item.clone());
        list.touch();
        self.commit(next)?;

        debug!(list_id, item_id = %item.id, order = item.order, "Added item");
        Ok(item)
    }

    pub fn update_item(&mut self, list_id: &str, item_id: &str, update: &ItemUpdate) -> Result<Mutation> {
        self.modify_item(list_id, item_id, |item| update.apply_to(item))
    }

    pub fn delete_item(&mut self, list_id: &str, item_id: &str) -> Result<Mutation> {
        self.modify_list(list_id, |list| match remove_by_id(&mut list.items, item_id) {
            Some(_) => Mutation::Applied,
            None => Mutation::Unchanged,
        })
    }

    pub fn toggle_item_bought(&mut self, list_id: &str, item_id: &str) -> Result<Mutation> {
        self.modify_item(list_id, item_id, |item| item.bought = !item.bought)
    }

    /// Replace the list's items wholesale. The caller supplies the permutation.
    pub fn reorder_items(&mut self, list_id: &str, items: Vec<Item>) -> Result<Mutation> {
        self.modify_list(list_id, |list| {
            list.items = items;
            Mutation::Applied
        })
    }

    pub fn mark_all_bought(&mut self, list_id: &str, bought: bool) -> Result<Mutation> {
        self.modify_list(list_id, |list| {
            for item in &mut list.items {
                item.bought = bought;
            }
            Mutation::Applied
        })
    }

    /// Remove every bought item. Unchanged when nothing was bought.
    pub fn clear_bought_items(&mut self, list_id: &str) -> Result<Mutation> {
        self.modify_list(list_id, |list| {
            let before = list.items.len();
            list.items.retain(|i| !i.bought);
            if list.items.len() < before {
                Mutation::Applied
            } else {
                Mutation::Unchanged
            }
        })
    }

    // ========================================================================
    // Settings
    // ========================================================================

    pub fn update_settings(&mut self, update: SettingsUpdate) -> Result<&AppSettings> {
        let mut next = self.settings.clone();
        update.apply_to(&mut next);
        save_document(&mut self.storage, &next)?;
        self.settings = next;

        debug!(settings = ?self.settings, "Updated settings");
        Ok(&self.settings)
    }

    /// Dark becomes light; light and system become dark
    pub fn toggle_theme(&mut self) -> Result<&AppSettings> {
        let theme = match self.settings.theme {
            Theme::Dark => Theme::Light,
            Theme::Light | Theme::System => Theme::Dark,
        };
        self.update_settings(SettingsUpdate {
            theme: Some(theme),
            ..SettingsUpdate::default()
        })
    }

    // ========================================================================
    // Helper methods
    // ========================================================================

    /// Run `change` on a copy of the list; persist and refresh `updated_at`
    /// only when it reports `Applied`.
    fn modify_list<F>(&mut self, list_id: &str, change: F) -> Result<Mutation>
    where
        F: FnOnce(&mut ShoppingList) -> Mutation,
    {
        let mut next = self.lists.clone();
        let Some(list) = find_by_id_mut(&mut next, list_id) else {
            debug!(list_id, "No such list, leaving store unchanged");
            return Ok(Mutation::Unchanged);
        };

        if change(&mut *list) == Mutation::Unchanged {
            return Ok(Mutation::Unchanged);
        }
        list.touch();
        self.commit(next)?;
        Ok(Mutation::Applied)
    }

    fn modify_item<F>(&mut self, list_id: &str, item_id: &str, change: F) -> Result<Mutation>
    where
        F: FnOnce(&mut Item),
    {
        self.modify_list(list_id, |list| match find_by_id_mut(&mut list.items, item_id) {
            Some(item) => {
                change(item);
                Mutation::Applied
            }
            None => {
                debug!(item_id, "No such item, leaving list unchanged");
                Mutation::Unchanged
            }
        })
    }

    fn commit(&mut self, next: Vec<ShoppingList>) -> Result<()> {
        ensure_finite_amounts(&next)?;
        save_document(&mut self.storage, &next)?;
        self.lists = next;
        Ok(())
    }
}

/// Reject collections that would not survive a JSON round trip
fn ensure_finite_amounts(lists: &[ShoppingList]) -> Result<(), StoreError> {
    for item in lists.iter().flat_map(|l| &l.items) {
        let field = if !item.quantity.is_finite() {
            "quantity"
        } else if !item.unit_price.is_finite() {
            "unit price"
        } else {
            continue;
        };
        return Err(StoreError::NonFiniteAmount {
            item_id: item.id.clone(),
            field,
        });
    }
    Ok(())
}
