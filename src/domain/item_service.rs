// 🍄 Item Service - names, prices, duplicate names, sequential ids

use crate::data::{codec::has_line_break, Repository, Result};
use crate::models::{Category, Item};

use super::result::ServiceResult;

/// Highest accepted price per kilogram
pub const MAX_DOLLARS_PER_KILOGRAM: f64 = 7500.0;

pub struct ItemService<R: Repository<Item>> {
    repository: R,
}

impl<R: Repository<Item>> ItemService<R> {
    pub fn new(repository: R) -> Self {
        ItemService { repository }
    }

    pub fn find_all(&self) -> Vec<Item> {
        self.repository.find_all()
    }

    pub fn find_by_id(&self, id: &str) -> Option<Item> {
        self.repository.find_by_id(id)
    }

    pub fn find_by_category(&self, category: Category) -> Vec<Item> {
        self.repository.find_by_field(category.as_str())
    }

    /// Validate and store an item; an empty id becomes the next free number
    pub fn add(&self, mut item: Item) -> Result<ServiceResult<Item>> {
        let existing = self.repository.find_all();
        let mut result = validate(&item, &existing);

        if !result.is_success() {
            tracing::warn!(errors = ?result.messages(), "item rejected");
            return Ok(result);
        }

        if item.id.trim().is_empty() {
            item.id = next_id(&existing).to_string();
        }

        let stored = self.repository.add(item)?;
        result.set_payload(stored);
        Ok(result)
    }
}

fn validate(item: &Item, existing: &[Item]) -> ServiceResult<Item> {
    let mut result = ServiceResult::new();

    if item.name.trim().is_empty() {
        result.add_error_message("Item name is required.");
    } else if has_line_break(&item.name) {
        result.add_error_message("Item name cannot contain line breaks.");
    } else if existing
        .iter()
        .any(|i| i.name.trim().eq_ignore_ascii_case(item.name.trim()))
    {
        result.add_error_message(format!("Item '{}' is a duplicate.", item.name));
    }

    let price = item.dollars_per_kilogram;
    if !price.is_finite() || !(0.0..=MAX_DOLLARS_PER_KILOGRAM).contains(&price) {
        result.add_error_message("$/Kg must be between 0.00 and 7500.00.");
    }

    result
}

/// One past the largest numeric id; non-numeric ids are ignored
fn next_id(existing: &[Item]) -> u64 {
    existing
        .iter()
        .filter_map(|i| i.id.trim().parse::<u64>().ok())
        .max()
        .unwrap_or(0)
        + 1
}
