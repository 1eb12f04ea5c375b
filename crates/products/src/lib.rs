//! Products domain module.
//!
//! Business rules for the price-gated catalog, implemented purely as
//! deterministic domain logic (no IO, no HTTP, no storage, no clock reads).

pub mod policy;
pub mod product;
pub mod search;

pub use policy::{ApprovalPolicy, DELETE_REQUEST_REASON};
pub use product::{Approval, ApprovalStatus, Product, ProductDraft, ProductId, ProductState};
pub use search::ProductSearch;
