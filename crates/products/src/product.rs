use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use pricegate_core::{DomainResult, Entity};

use crate::policy::{ApprovalPolicy, DELETE_REQUEST_REASON};

/// Product identifier, assigned by the store and never reused.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub u64);

impl ProductId {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl core::fmt::Display for ProductId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Where a product stands in the manual approval workflow.
///
/// `Approved` is the explicit starting point for anything that was not gated
/// on creation. Neither `Approved` nor `Rejected` is terminal: a later update
/// or delete request puts the product back into `PendingApproval`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ApprovalStatus {
    PendingApproval,
    #[default]
    Approved,
    Rejected,
}

impl ApprovalStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ApprovalStatus::PendingApproval => "pending_approval",
            ApprovalStatus::Approved => "approved",
            ApprovalStatus::Rejected => "rejected",
        }
    }
}

/// Kind of the most recent mutation. Informational only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductState {
    Created,
    Updated,
    Deleted,
}

impl ProductState {
    pub fn as_str(self) -> &'static str {
        match self {
            ProductState::Created => "created",
            ProductState::Updated => "updated",
            ProductState::Deleted => "deleted",
        }
    }
}

/// Approval fields of a product.
///
/// The only constructors are [`Approval::pending`] and [`Approval::decided`],
/// so `requested_at` is set exactly when the status is `PendingApproval`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Approval {
    status: ApprovalStatus,
    reason: String,
    requested_at: Option<DateTime<Utc>>,
}

impl Default for Approval {
    fn default() -> Self {
        Self::decided(ApprovalStatus::default())
    }
}

impl Approval {
    pub fn pending(reason: impl Into<String>, requested_at: DateTime<Utc>) -> Self {
        Self {
            status: ApprovalStatus::PendingApproval,
            reason: reason.into(),
            requested_at: Some(requested_at),
        }
    }

    /// A settled approval state. Asking for `PendingApproval` here yields the
    /// default instead, since a pending state needs a reason and a date.
    pub fn decided(status: ApprovalStatus) -> Self {
        let status = match status {
            ApprovalStatus::PendingApproval => ApprovalStatus::default(),
            other => other,
        };
        Self {
            status,
            reason: String::new(),
            requested_at: None,
        }
    }

    pub fn status(&self) -> ApprovalStatus {
        self.status
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }

    pub fn requested_at(&self) -> Option<DateTime<Utc>> {
        self.requested_at
    }

    pub fn is_pending(&self) -> bool {
        self.status == ApprovalStatus::PendingApproval
    }
}

/// Caller-supplied product descriptor used by create and update.
///
/// Approval state is deliberately absent: the store decides it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductDraft {
    pub name: String,
    pub price: Decimal,
    pub posted_date: Option<DateTime<Utc>>,
}

impl ProductDraft {
    pub fn new(name: impl Into<String>, price: Decimal) -> Self {
        Self {
            name: name.into(),
            price,
            posted_date: None,
        }
    }

    pub fn posted_on(mut self, posted_date: DateTime<Utc>) -> Self {
        self.posted_date = Some(posted_date);
        self
    }
}

/// Catalog entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    id: ProductId,
    name: String,
    price: Decimal,
    previous_price: Option<Decimal>,
    posted_date: DateTime<Utc>,
    is_active: bool,
    state: ProductState,
    approval: Approval,
    created_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
}

impl Product {
    /// Build a new product from a draft.
    ///
    /// Fails if the price is outside what the policy allows at all. Prices
    /// above the pending threshold start in the approval queue; everything
    /// else starts approved.
    pub fn create(
        id: ProductId,
        draft: ProductDraft,
        policy: &ApprovalPolicy,
        now: DateTime<Utc>,
    ) -> DomainResult<Self> {
        policy.check_price(draft.price)?;

        let approval = match policy.creation_reason(draft.price) {
            Some(reason) => Approval::pending(reason, now),
            None => Approval::default(),
        };

        Ok(Self {
            id,
            name: draft.name,
            price: draft.price,
            previous_price: None,
            posted_date: draft.posted_date.unwrap_or(now),
            is_active: true,
            state: ProductState::Created,
            approval,
            created_at: now,
            updated_at: None,
        })
    }

    /// Rebuild a product that is already approved, e.g. a seeded catalog entry.
    pub fn restore_approved(
        id: ProductId,
        name: impl Into<String>,
        price: Decimal,
        posted_date: DateTime<Utc>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            price,
            previous_price: None,
            posted_date,
            is_active: true,
            state: ProductState::Created,
            approval: Approval::decided(ApprovalStatus::Approved),
            created_at,
            updated_at: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> Decimal {
        self.price
    }

    pub fn previous_price(&self) -> Option<Decimal> {
        self.previous_price
    }

    pub fn posted_date(&self) -> DateTime<Utc> {
        self.posted_date
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn state(&self) -> ProductState {
        self.state
    }

    pub fn approval(&self) -> &Approval {
        &self.approval
    }

    pub fn approval_status(&self) -> ApprovalStatus {
        self.approval.status()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }

    /// Apply a new name and price.
    ///
    /// A price above the pending threshold, or more than the escalation factor
    /// over the current price, sends the product back to the approval queue.
    /// Otherwise the approval state is left as it was. Nothing changes when
    /// the price is refused.
    ///
    /// The posted date is fixed at creation; `draft.posted_date` is ignored.
    pub fn revise(
        &mut self,
        draft: ProductDraft,
        policy: &ApprovalPolicy,
        now: DateTime<Utc>,
    ) -> DomainResult<()> {
        policy.check_price(draft.price)?;

        if let Some(reason) = policy.revision_reason(self.price, draft.price) {
            self.approval = Approval::pending(reason, now);
        }

        self.previous_price = Some(self.price);
        self.name = draft.name;
        self.price = draft.price;
        self.state = ProductState::Updated;
        self.updated_at = Some(now);
        Ok(())
    }

    /// Deleting only asks for sign-off: the record stays, and stays active.
    pub fn request_deletion(&mut self, now: DateTime<Utc>) {
        self.approval = Approval::pending(DELETE_REQUEST_REASON, now);
        self.state = ProductState::Deleted;
    }

    pub fn approve(&mut self) {
        self.approval = Approval::decided(ApprovalStatus::Approved);
    }

    pub fn reject(&mut self) {
        self.approval = Approval::decided(ApprovalStatus::Rejected);
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> Self::Id {
        self.id
    }
}
