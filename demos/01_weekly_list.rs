//! Demo 01: A weekly shopping list
//!
//! Creates a list, adds items, shops with swipe gestures, and exports the
//! result as text.
//!
//! Run with: cargo run --example 01_weekly_list

use eyre::{Result, eyre};
use shoplist::actions::{apply_item_action, item_row_bindings};
use shoplist::gesture::{SwipeRecognizer, drag_script};
use shoplist::{Category, FileStorage, NewItem, ShoppingStore, list_progress, list_to_text, list_total_value};

fn main() -> Result<()> {
    // Create a temporary directory for this demo
    let temp_dir = tempfile::tempdir()?;

    println!("Shoplist Weekly List Demo");
    println!("=========================\n");

    let mut store = ShoppingStore::open(FileStorage::open(temp_dir.path())?)?;

    // 1. Create a list and add items
    let list = store.create_list("Weekly")?;
    let rice = store.add_item(&list.id, NewItem::new("Rice", 2.0, Category::Grocery, 5.0))?;
    store.add_item(&list.id, NewItem::new("Milk", 3.0, Category::Dairy, 4.5))?;
    store.add_item(&list.id, NewItem::new("Bananas", 1.5, Category::Produce, 6.0))?;

    let current = store.get_list(&list.id).ok_or_else(|| eyre!("list was just created"))?;
    println!("1. Created '{}' with {} items", current.title, current.items.len());
    println!("   Total: {:.2}, progress: {:.0}%\n", list_total_value(current), list_progress(current));

    // 2. Swipe the rice row to the right to mark it bought
    let mut row = SwipeRecognizer::new(item_row_bindings());
    if let Some(action) = row.run(drag_script(72.0, 4.0)) {
        apply_item_action(&mut store, &list.id, &rice.id, action)?;
    }
    let current = store.get_list(&list.id).ok_or_else(|| eyre!("list disappeared"))?;
    println!("2. After swiping Rice right: progress {:.0}%\n", list_progress(current));

    // 3. A vertical drag scrolls instead of swiping
    let committed = row.run(drag_script(10.0, 70.0));
    println!("3. Vertical drag committed: {:?}\n", committed);

    // 4. Reopen from disk and export
    let reopened = ShoppingStore::open(FileStorage::open(temp_dir.path())?)?;
    let saved = reopened.get_list(&list.id).ok_or_else(|| eyre!("list was not persisted"))?;
    println!("4. Export after reload:\n");
    println!("{}", list_to_text(saved));

    Ok(())
}
