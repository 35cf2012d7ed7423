// Entity Models
//
// Each entity is a plain value:
// - Identity is a string id, compared case-insensitively by the stores
// - References between entities are ids, never owned copies
// - Nothing is updated in place once stored

pub mod forager;
pub mod item;
pub mod forage;

pub use forager::Forager;
pub use item::{Category, Item};
pub use forage::Forage;
