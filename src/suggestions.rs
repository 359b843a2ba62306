// Product name suggestions for the add-item form

pub const PRODUCT_SUGGESTIONS: &[&str] = &[
    "Rice",
    "Beans",
    "Pasta",
    "Wheat flour",
    "Sugar",
    "Salt",
    "Soybean oil",
    "Olive oil",
    "Milk",
    "Butter",
    "Margarine",
    "Mozzarella cheese",
    "Cheddar cheese",
    "Yogurt",
    "Cream",
    "Sliced bread",
    "French bread",
    "Cream crackers",
    "Sandwich cookies",
    "Coffee",
    "Chocolate milk powder",
    "Orange juice",
    "Soda",
    "Mineral water",
    "Beer",
    "Wine",
    "Boxed juice",
    "Chicken",
    "Beef",
    "Sausage",
    "Bacon",
    "Ham",
    "Mortadella",
    "Eggs",
    "Tomato",
    "Onion",
    "Garlic",
    "Potato",
    "Carrot",
    "Lettuce",
    "Banana",
    "Apple",
    "Orange",
    "Papaya",
    "Watermelon",
    "Avocado",
    "Dish soap",
    "Laundry detergent",
    "Fabric softener",
    "Disinfectant",
    "Bleach",
    "Shampoo",
    "Conditioner",
    "Bar soap",
    "Toothpaste",
    "Dental floss",
    "Toilet paper",
    "Paper towels",
    "Napkins",
    "Plastic bags",
    "Mayonnaise",
    "Ketchup",
    "Mustard",
    "Tomato sauce",
    "Tomato paste",
    "Sardines",
    "Canned tuna",
    "Canned corn",
    "Canned peas",
    "Ice cream",
    "Frozen pizza",
    "Frozen lasagna",
    "Frozen burgers",
    "Dog food",
    "Cat food",
    "Cat litter",
    "Chocolate",
    "Bonbons",
    "Candy",
    "Popcorn",
    "Broom",
    "Squeegee",
    "Sponge",
    "Rubber gloves",
];

/// Case-insensitive matches for `query`: prefix matches first, then other
/// substring matches, each in catalogue order. A blank query yields nothing.
pub fn suggest(query: &str, limit: usize) -> Vec<&'static str> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return Vec::new();
    }

    let (prefix, inner): (Vec<&'static str>, Vec<&'static str>) = PRODUCT_SUGGESTIONS
        .iter()
        .copied()
        .filter(|name| name.to_lowercase().contains(&query))
        .partition(|name| name.to_lowercase().starts_with(&query));

    prefix.into_iter().chain(inner).take(limit).collect()
}
