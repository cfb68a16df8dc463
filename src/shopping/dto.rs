use serde::{Deserialize, Serialize};

/// Net requirement for one (ingredient, unit) after pantry stock is deducted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShoppingListItem {
    pub name: String,
    pub category: String,
    pub quantity: f64,
    pub unit: String,
}

#[derive(Debug, Deserialize)]
pub struct ShoppingQuery {
    pub date_from: Option<String>,
    pub date_to: Option<String>,
}
