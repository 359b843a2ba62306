// Data models for shopping lists

use crate::error::ParseEnumError;
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Product category. The set is closed; serialized as the display name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Produce,
    Butcher,
    Dairy,
    Bakery,
    Grocery,
    Beverages,
    Frozen,
    Cleaning,
    #[serde(rename = "Personal Care")]
    PersonalCare,
    #[serde(rename = "Pet Shop")]
    PetShop,
    Confectionery,
    Household,
}

impl Category {
    pub const ALL: [Category; 12] = [
        Category::Produce,
        Category::Butcher,
        Category::Dairy,
        Category::Bakery,
        Category::Grocery,
        Category::Beverages,
        Category::Frozen,
        Category::Cleaning,
        Category::PersonalCare,
        Category::PetShop,
        Category::Confectionery,
        Category::Household,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Category::Produce => "Produce",
            Category::Butcher => "Butcher",
            Category::Dairy => "Dairy",
            Category::Bakery => "Bakery",
            Category::Grocery => "Grocery",
            Category::Beverages => "Beverages",
            Category::Frozen => "Frozen",
            Category::Cleaning => "Cleaning",
            Category::PersonalCare => "Personal Care",
            Category::PetShop => "Pet Shop",
            Category::Confectionery => "Confectionery",
            Category::Household => "Household",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Accepts the display name in any case, with spaces, hyphens or underscores
/// between words ("pet-shop", "Personal Care", "personal_care").
impl FromStr for Category {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize_word(s);
        Category::ALL
            .into_iter()
            .find(|c| normalize_word(c.name()) == wanted)
            .ok_or_else(|| ParseEnumError::new("category", s))
    }
}

fn normalize_word(s: &str) -> String {
    s.chars()
        .filter(|c| !matches!(c, ' ' | '-' | '_'))
        .flat_map(char::to_lowercase)
        .collect()
}

/// A single product entry within a list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: String,
    pub name: String,
    pub quantity: f64,
    pub category: Category,
    pub unit_price: f64,
    pub bought: bool,
    pub order: i64,
}

/// Caller-supplied fields for a new item; the store assigns `id` and `order`.
#[derive(Debug, Clone, PartialEq)]
pub struct NewItem {
    pub name: String,
    pub quantity: f64,
    pub category: Category,
    pub unit_price: f64,
    pub bought: bool,
}

impl NewItem {
    pub fn new(name: impl Into<String>, quantity: f64, category: Category, unit_price: f64) -> Self {
        Self {
            name: name.into(),
            quantity,
            category,
            unit_price,
            bought: false,
        }
    }

    pub(crate) fn into_item(self, id: String, order: i64) -> Item {
        Item {
            id,
            name: self.name,
            quantity: self.quantity,
            category: self.category,
            unit_price: self.unit_price,
            bought: self.bought,
            order,
        }
    }
}

/// Structured partial update for an item. Only the fields that are `Some`
/// are written; `id` can never change.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemUpdate {
    pub name: Option<String>,
    pub quantity: Option<f64>,
    pub category: Option<Category>,
    pub unit_price: Option<f64>,
    pub bought: Option<bool>,
    pub order: Option<i64>,
}

impl ItemUpdate {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn quantity(mut self, quantity: f64) -> Self {
        self.quantity = Some(quantity);
        self
    }

    pub fn category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    pub fn unit_price(mut self, unit_price: f64) -> Self {
        self.unit_price = Some(unit_price);
        self
    }

    pub fn bought(mut self, bought: bool) -> Self {
        self.bought = Some(bought);
        self
    }

    pub fn order(mut self, order: i64) -> Self {
        self.order = Some(order);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.quantity.is_none()
            && self.category.is_none()
            && self.unit_price.is_none()
            && self.bought.is_none()
            && self.order.is_none()
    }

    /// Merge the set fields over `item`
    pub fn apply_to(&self, item: &mut Item) {
        if let Some(name) = &self.name {
            item.name = name.clone();
        }
        if let Some(quantity) = self.quantity {
            item.quantity = quantity;
        }
        if let Some(category) = self.category {
            item.category = category;
        }
        if let Some(unit_price) = self.unit_price {
            item.unit_price = unit_price;
        }
        if let Some(bought) = self.bought {
            item.bought = bought;
        }
        if let Some(order) = self.order {
            item.order = order;
        }
    }
}

/// A named shopping list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingList {
    pub id: String,
    pub title: String,
    pub created_at: String,
    pub updated_at: String,
    pub items: Vec<Item>,
    pub archived: bool,
}

impl ShoppingList {
    pub(crate) fn new(title: impl Into<String>) -> Self {
        let now = now_iso();
        Self {
            id: new_id(),
            title: title.into(),
            created_at: now.clone(),
            updated_at: now,
            items: Vec::new(),
            archived: false,
        }
    }

    /// Order value for the next appended item
    pub fn next_order(&self) -> i64 {
        self.items.iter().map(|i| i.order).max().unwrap_or(0) + 1
    }

    pub(crate) fn touch(&mut self) {
        self.updated_at = now_iso();
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
    #[default]
    System,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortField {
    Name,
    Price,
    #[default]
    Category,
    Status,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

macro_rules! lowercase_enum_str {
    ($ty:ident, $kind:literal, { $($variant:ident => $text:literal),+ $(,)? }) => {
        impl $ty {
            pub fn as_str(self) -> &'static str {
                match self {
                    $($ty::$variant => $text,)+
                }
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = ParseEnumError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_ascii_lowercase().as_str() {
                    $($text => Ok($ty::$variant),)+
                    _ => Err(ParseEnumError::new($kind, s)),
                }
            }
        }
    };
}

lowercase_enum_str!(Theme, "theme", { Light => "light", Dark => "dark", System => "system" });
lowercase_enum_str!(SortField, "sort field", {
    Name => "name",
    Price => "price",
    Category => "category",
    Status => "status",
});
lowercase_enum_str!(SortDirection, "sort direction", { Asc => "asc", Desc => "desc" });

/// User preferences. Missing fields in a stored document fall back to defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppSettings {
    pub theme: Theme,
    pub default_sort: SortField,
    pub default_sort_direction: SortDirection,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SettingsUpdate {
    pub theme: Option<Theme>,
    pub default_sort: Option<SortField>,
    pub default_sort_direction: Option<SortDirection>,
}

impl SettingsUpdate {
    pub fn apply_to(&self, settings: &mut AppSettings) {
        if let Some(theme) = self.theme {
            settings.theme = theme;
        }
        if let Some(sort) = self.default_sort {
            settings.default_sort = sort;
        }
        if let Some(direction) = self.default_sort_direction {
            settings.default_sort_direction = direction;
        }
    }
}

/// Quantity stepper used by the item form: rounds to a tenth, floor 0.5
pub fn step_quantity(current: f64, delta: f64) -> f64 {
    let next = ((current + delta) * 10.0).round() / 10.0;
    next.max(0.5)
}

/// Fresh identifier, time-ordered and unique within the process
pub fn new_id() -> String {
    Uuid::now_v7().to_string()
}

/// Current time as RFC 3339 text with millisecond precision
pub fn now_iso() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
