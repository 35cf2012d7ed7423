// Validation & Query Services
//
// Business rules live here, layered over the record stores. Validation
// problems come back as messages inside a ServiceResult; storage problems
// come back as Err(DataError).

pub mod result;
pub mod forager_service;
pub mod item_service;
pub mod forage_service;
pub mod report;

pub use result::ServiceResult;
pub use forager_service::ForagerService;
pub use item_service::ItemService;
pub use forage_service::ForageService;
