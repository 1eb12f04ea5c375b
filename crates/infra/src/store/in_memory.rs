use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;

use pricegate_core::{Clock, DomainError, DomainResult, Entity, SystemClock};
use pricegate_products::{ApprovalPolicy, Product, ProductDraft, ProductId, ProductSearch};

use super::repository::ProductRepository;

const ENTITY: &str = "Product";

/// First id handed out by the demo catalog once its seeded entries are in place.
const DEMO_NEXT_ID: u64 = 103;

#[derive(Debug)]
struct CatalogState {
    products: Vec<Product>,
    next_id: u64,
}

impl CatalogState {
    fn find_mut(&mut self, id: ProductId) -> DomainResult<&mut Product> {
        self.products
            .iter_mut()
            .find(|p| p.id() == id)
            .ok_or_else(|| DomainError::not_found(ENTITY))
    }

    fn allocate_id(&mut self) -> ProductId {
        let id = ProductId::new(self.next_id);
        self.next_id += 1;
        id
    }
}

/// In-memory product store.
///
/// One lock guards both the collection and the id counter, so every
/// operation is serialized against every other mutation.
#[derive(Debug)]
pub struct InMemoryProductStore {
    state: RwLock<CatalogState>,
    policy: ApprovalPolicy,
    clock: Arc<dyn Clock>,
}

impl Default for InMemoryProductStore {
    fn default() -> Self {
        Self::new(ApprovalPolicy::default(), Arc::new(SystemClock))
    }
}

impl InMemoryProductStore {
    /// Empty store; ids start at 1.
    pub fn new(policy: ApprovalPolicy, clock: Arc<dyn Clock>) -> Self {
        Self {
            state: RwLock::new(CatalogState {
                products: Vec::new(),
                next_id: 1,
            }),
            policy,
            clock,
        }
    }

    /// Store pre-populated with three approved products (ids 100 to 102),
    /// posted and created a few days before now. New ids continue at 103.
    pub fn with_demo_catalog(policy: ApprovalPolicy, clock: Arc<dyn Clock>) -> Self {
        let now = clock.now();
        let seed: [(u64, &str, i64, i64); 3] = [
            (100, "Laptop", 2_500, 6),
            (101, "iPhone", 1_300, 5),
            (102, "HP Laser Printer", 500, 4),
        ];
        let products = seed
            .into_iter()
            .map(|(id, name, price, days_ago)| {
                let at = now - Duration::days(days_ago);
                Product::restore_approved(ProductId::new(id), name, Decimal::from(price), at, at)
            })
            .collect();

        tracing::debug!(count = 3, "seeded demo catalog");

        Self {
            state: RwLock::new(CatalogState {
                products,
                next_id: DEMO_NEXT_ID,
            }),
            policy,
            clock,
        }
    }

    pub fn policy(&self) -> &ApprovalPolicy {
        &self.policy
    }

    pub fn len(&self) -> usize {
        self.read().products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // Transitions write only after their checks pass, so data behind a
    // poisoned lock is still consistent.
    fn read(&self) -> RwLockReadGuard<'_, CatalogState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, CatalogState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn mutate(
        &self,
        id: ProductId,
        op: &'static str,
        f: impl FnOnce(&mut Product, DateTime<Utc>) -> DomainResult<()>,
    ) -> DomainResult<Product> {
        let mut state = self.write();
        let now = self.clock.now();
        let result = state.find_mut(id).and_then(|product| {
            f(product, now)?;
            Ok(product.clone())
        });

        match &result {
            Ok(product) => tracing::info!(
                product_id = %id,
                op,
                approval_status = product.approval_status().as_str(),
                "product {op} applied"
            ),
            Err(e) => tracing::warn!(product_id = %id, op, "product {op} refused: {e}"),
        }
        result
    }
}

impl ProductRepository for InMemoryProductStore {
    fn list_active(&self) -> Vec<Product> {
        let mut products: Vec<Product> = self
            .read()
            .products
            .iter()
            .filter(|p| p.is_active())
            .cloned()
            .collect();
        products.sort_by(|a, b| {
            b.created_at()
                .cmp(&a.created_at())
                .then_with(|| b.id().cmp(&a.id()))
        });
        tracing::debug!(count = products.len(), "listed active products");
        products
    }

    fn search(&self, query: &ProductSearch) -> Vec<Product> {
        let products: Vec<Product> = self
            .read()
            .products
            .iter()
            .filter(|p| query.matches(p))
            .cloned()
            .collect();
        tracing::debug!(count = products.len(), ?query, "searched products");
        products
    }

    fn approval_queue(&self) -> Vec<Product> {
        let mut queued: Vec<Product> = self
            .read()
            .products
            .iter()
            .filter(|p| p.approval().is_pending())
            .cloned()
            .collect();
        // stable: equal request dates keep collection order
        queued.sort_by_key(|p| p.approval().requested_at());
        tracing::debug!(count = queued.len(), "listed approval queue");
        queued
    }

    fn get(&self, id: ProductId) -> Option<Product> {
        self.read().products.iter().find(|p| p.id() == id).cloned()
    }

    fn create(&self, draft: ProductDraft) -> DomainResult<Product> {
        let mut state = self.write();
        let now = self.clock.now();

        // Validate before allocating so a refused draft does not burn an id.
        let product = match Product::create(ProductId::new(state.next_id), draft, &self.policy, now) {
            Ok(product) => product,
            Err(e) => {
                tracing::warn!(op = "create", "product create refused: {e}");
                return Err(e);
            }
        };
        let id = state.allocate_id();
        debug_assert_eq!(id, product.id());

        state.products.push(product.clone());
        tracing::info!(
            product_id = %id,
            op = "create",
            approval_status = product.approval_status().as_str(),
            "product create applied"
        );
        Ok(product)
    }

    fn update(&self, id: ProductId, draft: ProductDraft) -> DomainResult<Product> {
        self.mutate(id, "update", |product, now| product.revise(draft, &self.policy, now))
    }

    fn delete(&self, id: ProductId) -> DomainResult<Product> {
        self.mutate(id, "delete", |product, now| {
            product.request_deletion(now);
            Ok(())
        })
    }

    fn approve(&self, id: ProductId) -> DomainResult<Product> {
        self.mutate(id, "approve", |product, _| {
            product.approve();
            Ok(())
        })
    }

    fn reject(&self, id: ProductId) -> DomainResult<Product> {
        self.mutate(id, "reject", |product, _| {
            product.reject();
            Ok(())
        })
    }
}
