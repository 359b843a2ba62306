// Swipe bindings for rows and the store operations they trigger

use crate::gesture::SwipeBindings;
use crate::models::ShoppingList;
use crate::storage::KeyValueStore;
use crate::store::{Mutation, ShoppingStore};
use eyre::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemRowAction {
    Delete,
    ToggleBought,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListRowAction {
    Delete,
    Duplicate,
}

/// Item rows: swipe left deletes, swipe right toggles bought
pub fn item_row_bindings() -> SwipeBindings<ItemRowAction> {
    SwipeBindings::new(Some(ItemRowAction::Delete), Some(ItemRowAction::ToggleBought))
}

/// List rows: swipe left deletes, swipe right duplicates
pub fn list_row_bindings() -> SwipeBindings<ListRowAction> {
    SwipeBindings::new(Some(ListRowAction::Delete), Some(ListRowAction::Duplicate))
}

#[derive(Debug, Clone, PartialEq)]
pub enum ListActionOutcome {
    Deleted(Mutation),
    Duplicated(ShoppingList),
}

pub fn apply_item_action<S: KeyValueStore>(
    store: &mut ShoppingStore<S>,
    list_id: &str,
    item_id: &str,
    action: ItemRowAction,
) -> Result<Mutation> {
    match action {
        ItemRowAction::Delete => store.delete_item(list_id, item_id),
        ItemRowAction::ToggleBought => store.toggle_item_bought(list_id, item_id),
    }
}

pub fn apply_list_action<S: KeyValueStore>(
    store: &mut ShoppingStore<S>,
    list_id: &str,
    action: ListRowAction,
) -> Result<ListActionOutcome> {
    match action {
        ListRowAction::Delete => store.delete_list(list_id).map(ListActionOutcome::Deleted),
        ListRowAction::Duplicate => store.duplicate_list(list_id).map(ListActionOutcome::Duplicated),
    }
}
