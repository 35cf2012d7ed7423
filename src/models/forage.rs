// 📅 Forage Entity - one forager collecting some kilograms of one item on a date

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
// Field order is the column order in the forages file
pub struct Forage {
    pub id: String,
    pub date: NaiveDate,
    /// Reference to a Forager by id
    pub forager_id: String,
    /// Reference to an Item by id
    pub item_id: String,
    pub kilograms: f64,
}

impl Forage {
    pub fn new(forager_id: &str, item_id: &str, date: NaiveDate, kilograms: f64) -> Self {
        Forage {
            id: String::new(),
            date,
            forager_id: forager_id.to_string(),
            item_id: item_id.to_string(),
            kilograms,
        }
    }

    /// Same forager, same item, same day
    pub fn collides_with(&self, other: &Forage) -> bool {
        self.date == other.date
            && self.forager_id.eq_ignore_ascii_case(&other.forager_id)
            && self.item_id.eq_ignore_ascii_case(&other.item_id)
    }
}
