use std::collections::{BTreeMap, HashMap};

use sqlx::SqlitePool;

use crate::catalog;
use crate::catalog::dto::{Dish, PantryItem};
use crate::error::ApiError;
use crate::plan;
use crate::plan::dto::PlanEntryWithDish;

use super::dto::ShoppingListItem;

struct Demand {
    name: String,
    category: String,
    unit: String,
    quantity: f64,
}

/// Pure consolidation: explode the planned dishes' ingredient lists, group by
/// case-folded (name, unit), then net out pantry stock. Only positive
/// requirements are emitted, ordered by (category, name); an ingredient's
/// display name and category come from its first occurrence. Reads nothing
/// and mutates nothing, so identical inputs give identical output.
pub fn consolidate(dishes: &[Dish], pantry: &[PantryItem]) -> Vec<ShoppingListItem> {
    let mut demand: BTreeMap<(String, String), Demand> = BTreeMap::new();
    for dish in dishes {
        for ingredient in &dish.ingredients {
            let name = ingredient.name.trim();
            if name.is_empty() {
                continue;
            }
            let unit = ingredient.unit.trim();
            let key = (name.to_lowercase(), unit.to_lowercase());
            let entry = demand.entry(key).or_insert_with(|| Demand {
                name: name.to_string(),
                category: ingredient.category.clone(),
                unit: unit.to_string(),
                quantity: 0.0,
            });
            entry.quantity += ingredient.quantity;
        }
    }

    // Missing pantry item counts as zero on hand.
    let mut on_hand: HashMap<(String, String), f64> = HashMap::new();
    for item in pantry {
        let key = (
            item.name.trim().to_lowercase(),
            item.unit.trim().to_lowercase(),
        );
        *on_hand.entry(key).or_insert(0.0) += item.quantity;
    }

    let mut items: Vec<ShoppingListItem> = demand
        .into_iter()
        .filter_map(|(key, d)| {
            let have = on_hand.get(&key).copied().unwrap_or(0.0);
            let net = d.quantity - have;
            if net > 0.0 {
                Some(ShoppingListItem {
                    name: d.name,
                    category: d.category,
                    quantity: net,
                    unit: d.unit,
                })
            } else {
                None
            }
        })
        .collect();
    items.sort_by(|a, b| {
        (a.category.to_lowercase(), a.name.to_lowercase())
            .cmp(&(b.category.to_lowercase(), b.name.to_lowercase()))
    });
    items
}

/// Shopping list over the closed plan horizon [date_from, date_to].
pub async fn shopping_list(
    db: &SqlitePool,
    date_from: &str,
    date_to: &str,
) -> Result<Vec<ShoppingListItem>, ApiError> {
    let dishes: Vec<Dish> = plan::repo::list_between(db, date_from, date_to)
        .await?
        .into_iter()
        .map(|row| PlanEntryWithDish::from(row).dish)
        .collect();
    let pantry: Vec<PantryItem> = catalog::repo::list_pantry(db)
        .await?
        .into_iter()
        .map(PantryItem::from)
        .collect();
    Ok(consolidate(&dishes, &pantry))
}
