pub mod catalog_store;
pub mod session_store;

pub use catalog_store::CatalogStore;
pub use session_store::SessionStore;
