// 🧺 Forager Entity - a person who collects items

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Forager {
    /// Stable identity (UUID once stored)
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    /// Two-letter state abbreviation (e.g., "CA")
    pub state: String,
}

impl Forager {
    /// Create a forager without an id (the service assigns one on add)
    pub fn new(first_name: &str, last_name: &str, state: &str) -> Self {
        Forager {
            id: String::new(),
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            state: state.to_string(),
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Same person in the same state (names compared exactly)
    pub fn is_same_person(&self, other: &Forager) -> bool {
        self.first_name == other.first_name
            && self.last_name == other.last_name
            && self.state.eq_ignore_ascii_case(&other.state)
    }
}
