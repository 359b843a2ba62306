// Filtering for the list overview and the item view

use crate::models::{Category, Item, ShoppingList};

/// Which side of the archive the overview shows
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ListView {
    #[default]
    Active,
    Archived,
}

/// Overview filter: archive side plus a case-insensitive title search
#[derive(Debug, Clone, Default)]
pub struct ListFilter {
    pub view: ListView,
    pub search: Option<String>,
}

impl ListFilter {
    pub fn archived() -> Self {
        Self {
            view: ListView::Archived,
            search: None,
        }
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn matches(&self, list: &ShoppingList) -> bool {
        let on_side = match self.view {
            ListView::Active => !list.archived,
            ListView::Archived => list.archived,
        };
        on_side && contains_query(&list.title, self.search.as_deref())
    }

    /// Matching lists in store order
    pub fn apply<'a>(&self, lists: &'a [ShoppingList]) -> Vec<&'a ShoppingList> {
        lists.iter().filter(|l| self.matches(l)).collect()
    }
}

/// Item filter: name search and an optional single category
#[derive(Debug, Clone, Default)]
pub struct ItemFilter {
    pub search: Option<String>,
    pub category: Option<Category>,
}

impl ItemFilter {
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    /// True when the filter narrows anything down
    pub fn is_active(&self) -> bool {
        self.category.is_some() || self.search.as_deref().is_some_and(|s| !s.trim().is_empty())
    }

    pub fn matches(&self, item: &Item) -> bool {
        self.category.is_none_or(|c| item.category == c) && contains_query(&item.name, self.search.as_deref())
    }
}

fn contains_query(haystack: &str, query: Option<&str>) -> bool {
    match query.map(str::trim) {
        None | Some("") => true,
        Some(q) => haystack.to_lowercase().contains(&q.to_lowercase()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewItem;

    fn list(title: &str, archived: bool) -> ShoppingList {
        let mut list = ShoppingList::new(title);
        list.archived = archived;
        list
    }

    fn item(name: &str, category: Category) -> Item {
        NewItem::new(name, 1.0, category, 0.0).into_item(name.to_lowercase(), 1)
    }

    #[test]
    fn test_list_filter_splits_archive() {
        let lists = vec![list("Weekly", false), list("Party", true), list("Monthly", false)];

        let active = ListFilter::default().apply(&lists);
        assert_eq!(active.len(), 2);

        let archived = ListFilter::archived().apply(&lists);
        assert_eq!(archived.len(), 1);
        assert_eq!(archived[0].title, "Party");
    }

    #[test]
    fn test_list_filter_search_is_case_insensitive() {
        let lists = vec![list("Weekly groceries", false), list("BBQ", false)];

        let found = ListFilter::default().with_search("WEEK").apply(&lists);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].title, "Weekly groceries");

        // Blank search matches everything
        assert_eq!(ListFilter::default().with_search("   ").apply(&lists).len(), 2);
    }

    #[test]
    fn test_item_filter() {
        let milk = item("Milk", Category::Dairy);
        let rice = item("Rice", Category::Grocery);

        let by_category = ItemFilter::default().with_category(Category::Dairy);
        assert!(by_category.is_active());
        assert!(by_category.matches(&milk));
        assert!(!by_category.matches(&rice));

        let by_name = ItemFilter::default().with_search("ric");
        assert!(by_name.matches(&rice));
        assert!(!by_name.matches(&milk));

        let both = ItemFilter::default().with_search("ric").with_category(Category::Dairy);
        assert!(!both.matches(&rice));

        assert!(!ItemFilter::default().is_active());
        assert!(ItemFilter::default().matches(&milk));
    }
}
