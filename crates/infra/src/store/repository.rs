use std::sync::Arc;

use pricegate_core::DomainResult;
use pricegate_products::{Product, ProductDraft, ProductId, ProductSearch};

/// Authoritative product collection.
///
/// Every call is atomic with respect to the approval invariants: the lookup,
/// the rule checks and the mutation happen as one step. Mutations return the
/// resulting product as their acknowledgment; a failed call changes nothing.
pub trait ProductRepository: Send + Sync {
    /// Active products, most recently created first.
    fn list_active(&self) -> Vec<Product>;

    /// Products matching every supplied filter, in collection order.
    ///
    /// Unlike `list_active`, this scans the whole collection.
    fn search(&self, query: &ProductSearch) -> Vec<Product>;

    /// Products awaiting a decision, oldest request first.
    fn approval_queue(&self) -> Vec<Product>;

    fn get(&self, id: ProductId) -> Option<Product>;

    fn create(&self, draft: ProductDraft) -> DomainResult<Product>;

    fn update(&self, id: ProductId, draft: ProductDraft) -> DomainResult<Product>;

    /// Queue a deletion for sign-off. The record is never removed.
    fn delete(&self, id: ProductId) -> DomainResult<Product>;

    fn approve(&self, id: ProductId) -> DomainResult<Product>;

    fn reject(&self, id: ProductId) -> DomainResult<Product>;
}

impl<S> ProductRepository for Arc<S>
where
    S: ProductRepository + ?Sized,
{
    fn list_active(&self) -> Vec<Product> {
        (**self).list_active()
    }

    fn search(&self, query: &ProductSearch) -> Vec<Product> {
        (**self).search(query)
    }

    fn approval_queue(&self) -> Vec<Product> {
        (**self).approval_queue()
    }

    fn get(&self, id: ProductId) -> Option<Product> {
        (**self).get(id)
    }

    fn create(&self, draft: ProductDraft) -> DomainResult<Product> {
        (**self).create(draft)
    }

    fn update(&self, id: ProductId, draft: ProductDraft) -> DomainResult<Product> {
        (**self).update(id, draft)
    }

    fn delete(&self, id: ProductId) -> DomainResult<Product> {
        (**self).delete(id)
    }

    fn approve(&self, id: ProductId) -> DomainResult<Product> {
        (**self).approve(id)
    }

    fn reject(&self, id: ProductId) -> DomainResult<Product> {
        (**self).reject(id)
    }
}
