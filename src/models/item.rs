// 🍄 Item Entity - something worth collecting, priced per kilogram

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// CATEGORY
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Fungi,
    Nuts,
    Plants,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Fungi, Category::Nuts, Category::Plants];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Fungi => "Fungi",
            Category::Nuts => "Nuts",
            Category::Plants => "Plants",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// ITEM ENTITY
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Numeric id stored as text (assigned by the service when empty)
    pub id: String,
    pub name: String,
    pub category: Category,
    pub dollars_per_kilogram: f64,
}

impl Item {
    pub fn new(name: &str, category: Category, dollars_per_kilogram: f64) -> Self {
        Item {
            id: String::new(),
            name: name.to_string(),
            category,
            dollars_per_kilogram,
        }
    }

    /// Dollar value of `kilograms` of this item
    pub fn value_of(&self, kilograms: f64) -> f64 {
        kilograms * self.dollars_per_kilogram
    }
}
