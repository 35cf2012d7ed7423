// 📊 Aggregation - group forages by item or by item category
//
// Callers pass forages already narrowed to one date. Result maps have no
// meaningful iteration order.

use std::collections::HashMap;

use crate::models::{Category, Forage, Item};

/// Total kilograms per item id
pub fn kilograms_by_item(forages: &[Forage]) -> HashMap<String, f64> {
    let mut totals = HashMap::new();
    for forage in forages {
        *totals.entry(forage.item_id.clone()).or_insert(0.0) += forage.kilograms;
    }
    totals
}

/// Total dollar value (kilograms × $/kg) per category.
///
/// Forages whose item is not in `items` are left out.
pub fn value_by_category(forages: &[Forage], items: &[Item]) -> HashMap<Category, f64> {
    let by_id: HashMap<String, &Item> = items
        .iter()
        .map(|item| (item.id.to_ascii_lowercase(), item))
        .collect();

    let mut totals = HashMap::new();
    for forage in forages {
        match by_id.get(&forage.item_id.to_ascii_lowercase()) {
            Some(item) => {
                *totals.entry(item.category).or_insert(0.0) += item.value_of(forage.kilograms);
            }
            None => {
                tracing::warn!(forage = %forage.id, item = %forage.item_id, "forage references unknown item");
            }
        }
    }
    totals
}
