// Plain-text export for sharing a list

use crate::currency::{format_currency, format_date};
use crate::models::ShoppingList;
use crate::view::{group_by_category, list_total_value};

const CART: &str = "🛒";
const CALENDAR: &str = "📅";
const PACKAGE: &str = "📦";
const CHECKED: &str = "✅";
const UNCHECKED: &str = "⬜";
const MONEY: &str = "💰";

/// Render a list as shareable text.
///
/// Items are grouped by category in first-seen order. Each group ends with a
/// blank line and the total line is left out when the total is zero.
pub fn list_to_text(list: &ShoppingList) -> String {
    let mut lines = vec![
        format!("{} {}", CART, list.title),
        format!("{} {}", CALENDAR, format_date(&list.created_at)),
        String::new(),
    ];

    for group in group_by_category(&list.items) {
        lines.push(format!("{} {}", PACKAGE, group.category));
        for item in group.items {
            let status = if item.bought { CHECKED } else { UNCHECKED };
            let price = if item.unit_price > 0.0 {
                format!(" — {}/un", format_currency(item.unit_price))
            } else {
                String::new()
            };
            lines.push(format!("  {} {} ({}{})", status, item.name, item.quantity, price));
        }
        lines.push(String::new());
    }

    let total = list_total_value(list);
    if total > 0.0 {
        lines.push(format!("{} Total: {}", MONEY, format_currency(total)));
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, NewItem};

    fn list_with(items: Vec<NewItem>) -> ShoppingList {
        let mut list = ShoppingList::new("Weekly");
        list.created_at = "2024-03-07T15:04:05.000Z".to_string();
        for (i, item) in items.into_iter().enumerate() {
            list.items.push(item.into_item(format!("item-{}", i), i as i64 + 1));
        }
        list
    }

    #[test]
    fn test_export_groups_and_total() {
        let mut milk = NewItem::new("Milk", 2.0, Category::Dairy, 4.5);
        milk.bought = true;
        let list = list_with(vec![
            NewItem::new("Rice", 2.0, Category::Grocery, 5.0),
            milk,
            NewItem::new("Beans", 1.5, Category::Grocery, 0.0),
        ]);

        let expected = [
            "🛒 Weekly",
            "📅 07/03/2024",
            "",
            "📦 Grocery",
            "  ⬜ Rice (2 — R$ 5,00/un)",
            "  ⬜ Beans (1.5)",
            "",
            "📦 Dairy",
            "  ✅ Milk (2 — R$ 4,50/un)",
            "",
            "💰 Total: R$ 19,00",
        ]
        .join("\n");

        assert_eq!(list_to_text(&list), expected);
    }

    #[test]
    fn test_export_omits_zero_total() {
        let list = list_with(vec![NewItem::new("Napkins", 1.0, Category::Household, 0.0)]);
        let text = list_to_text(&list);
        assert!(!text.contains("Total"));
        assert!(text.ends_with("  ⬜ Napkins (1)\n"));
    }

    #[test]
    fn test_export_empty_list() {
        let list = list_with(vec![]);
        assert_eq!(list_to_text(&list), "🛒 Weekly\n📅 07/03/2024\n");
    }
}
