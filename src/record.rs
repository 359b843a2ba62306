// Id-addressable records and lookup helpers

use crate::models::{Item, ShoppingList};

/// Anything the store addresses by id
pub trait Record {
    /// Unique identifier for this record
    fn id(&self) -> &str;
}

impl Record for ShoppingList {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for Item {
    fn id(&self) -> &str {
        &self.id
    }
}

pub fn find_by_id<'a, T: Record>(records: &'a [T], id: &str) -> Option<&'a T> {
    records.iter().find(|r| r.id() == id)
}

pub fn find_by_id_mut<'a, T: Record>(records: &'a mut [T], id: &str) -> Option<&'a mut T> {
    records.iter_mut().find(|r| r.id() == id)
}

/// Remove the record with `id`, returning it if it was present
pub fn remove_by_id<T: Record>(records: &mut Vec<T>, id: &str) -> Option<T> {
    let index = records.iter().position(|r| r.id() == id)?;
    Some(records.remove(index))
}
