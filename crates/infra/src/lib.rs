//! Infrastructure adapters: storage behind the product catalog.

pub mod store;

pub use store::{InMemoryProductStore, ProductRepository};
