// Shoplist - local shopping lists with derived views and swipe gestures

pub mod actions;
pub mod config;
pub mod currency;
pub mod error;
pub mod export;
pub mod filter;
pub mod gesture;
pub mod models;
pub mod record;
pub mod storage;
pub mod store;
pub mod suggestions;
pub mod view;

// Re-export main types for convenience
pub use error::StoreError;
pub use export::list_to_text;
pub use filter::{ItemFilter, ListFilter, ListView};
pub use gesture::{PointerEvent, SwipeBindings, SwipeDirection, SwipeRecognizer};
pub use models::{
    AppSettings, Category, Item, ItemUpdate, NewItem, SettingsUpdate, ShoppingList, SortDirection, SortField, Theme,
};
pub use storage::{FileStorage, KeyValueStore, MemoryStorage};
pub use store::{Mutation, ShoppingStore};
pub use view::{list_progress, list_total_value};
