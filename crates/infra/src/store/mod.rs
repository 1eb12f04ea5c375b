//! Product storage abstractions.

pub mod in_memory;
pub mod repository;

pub use in_memory::InMemoryProductStore;
pub use repository::ProductRepository;
