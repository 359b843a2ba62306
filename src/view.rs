// Derived aggregates and display ordering. Nothing here mutates or persists.

use crate::filter::ItemFilter;
use crate::models::{Category, Item, ShoppingList, SortDirection, SortField};
use std::cmp::Ordering;

/// quantity × unit price
pub fn item_line_total(item: &Item) -> f64 {
    item.quantity * item.unit_price
}

pub fn list_total_value(list: &ShoppingList) -> f64 {
    list.items.iter().map(item_line_total).sum()
}

pub fn bought_count(list: &ShoppingList) -> usize {
    list.items.iter().filter(|i| i.bought).count()
}

/// Percentage of bought items, 0 for an empty list
pub fn list_progress(list: &ShoppingList) -> f64 {
    if list.items.is_empty() {
        return 0.0;
    }
    100.0 * bought_count(list) as f64 / list.items.len() as f64
}

/// Items by ascending stored `order`
pub fn items_in_order(list: &ShoppingList) -> Vec<&Item> {
    let mut items: Vec<&Item> = list.items.iter().collect();
    items.sort_by_key(|i| i.order);
    items
}

/// Compare two items for display. Ties fall back to stored `order`, which
/// is never reversed by the direction.
pub fn compare_items(a: &Item, b: &Item, field: SortField, direction: SortDirection) -> Ordering {
    let primary = match field {
        SortField::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
        // Most expensive line first
        SortField::Price => item_line_total(b).total_cmp(&item_line_total(a)),
        SortField::Category => a.category.name().cmp(b.category.name()),
        // Unbought first
        SortField::Status => a.bought.cmp(&b.bought),
    };
    let primary = match direction {
        SortDirection::Asc => primary,
        SortDirection::Desc => primary.reverse(),
    };
    primary.then_with(|| a.order.cmp(&b.order))
}

/// Filter then sort a list's items for display
pub fn process_items<'a>(
    list: &'a ShoppingList,
    filter: &ItemFilter,
    field: SortField,
    direction: SortDirection,
) -> Vec<&'a Item> {
    let mut items: Vec<&Item> = list.items.iter().filter(|i| filter.matches(i)).collect();
    items.sort_by(|a, b| compare_items(a, b, field, direction));
    items
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryGroup<'a> {
    pub category: Category,
    pub items: Vec<&'a Item>,
}

/// Group items by category, groups in first-seen order, items keeping their
/// relative order
pub fn group_by_category<'a, I>(items: I) -> Vec<CategoryGroup<'a>>
where
    I: IntoIterator<Item = &'a Item>,
{
    let mut groups: Vec<CategoryGroup<'a>> = Vec::new();
    for item in items {
        match groups.iter_mut().find(|g| g.category == item.category) {
            Some(group) => group.items.push(item),
            None => groups.push(CategoryGroup {
                category: item.category,
                items: vec![item],
            }),
        }
    }
    groups
}

/// Item count for every category, in the canonical category order
pub fn category_counts(list: &ShoppingList) -> Vec<(Category, usize)> {
    Category::ALL
        .into_iter()
        .map(|c| (c, list.items.iter().filter(|i| i.category == c).count()))
        .collect()
}

/// New item sequence with `item_id` moved to `position` (clamped) in stored
/// order, renumbered 1..=n. `None` when the item is not in the list.
pub fn move_item(list: &ShoppingList, item_id: &str, position: usize) -> Option<Vec<Item>> {
    let mut items: Vec<Item> = items_in_order(list).into_iter().cloned().collect();
    let from = items.iter().position(|i| i.id == item_id)?;
    let item = items.remove(from);
    items.insert(position.min(items.len()), item);
    for (index, item) in items.iter_mut().enumerate() {
        item.order = index as i64 + 1;
    }
    Some(items)
}
