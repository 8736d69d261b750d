//! Version 1 endpoint groups.

pub mod actions;
pub mod categories;
pub mod chat;
pub mod product;
pub mod warehouse;

pub use actions::ActionsService;
pub use categories::CategoriesService;
pub use chat::ChatService;
pub use product::ProductService;
pub use warehouse::WarehouseService;
