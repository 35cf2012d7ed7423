// Sustainable Foraging - Core Library
// Flat-file stores, validation services and reports for foraging records

pub mod config;
pub mod data;
pub mod domain;
pub mod models;
pub mod ui;

// Re-export commonly used types
pub use config::AppConfig;
pub use data::{
    DataError, FileRepository, Record, Repository,
    DATE_FORMAT, DELIMITER, DELIMITER_REPLACEMENT,
};
pub use domain::{
    ForageService, ForagerService, ItemService, ServiceResult,
    report::{kilograms_by_item, value_by_category},
};
pub use models::{Category, Forage, Forager, Item};
pub use ui::{Controller, MenuOption, Services};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
