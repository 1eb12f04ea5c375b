//! Price gates: when a mutation must wait for manual approval, and when it is
//! refused outright.

use rust_decimal::Decimal;

use pricegate_core::{DomainError, DomainResult};

/// Reason recorded when a product is queued because someone asked to delete it.
pub const DELETE_REQUEST_REASON: &str = "Delete request";

/// Thresholds that gate product prices.
///
/// - `pending_threshold`: prices strictly above it queue the product for approval.
/// - `hard_cap`: prices strictly above it are rejected.
/// - `escalation_factor`: an update whose new price is strictly above
///   `previous * escalation_factor` is queued even below the pending threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApprovalPolicy {
    pending_threshold: Decimal,
    hard_cap: Decimal,
    escalation_factor: Decimal,
}

impl Default for ApprovalPolicy {
    fn default() -> Self {
        Self {
            pending_threshold: Decimal::from(5_000),
            hard_cap: Decimal::from(10_000),
            escalation_factor: Decimal::new(15, 1),
        }
    }
}

impl ApprovalPolicy {
    pub fn new(
        pending_threshold: Decimal,
        hard_cap: Decimal,
        escalation_factor: Decimal,
    ) -> DomainResult<Self> {
        if pending_threshold.is_sign_negative() || hard_cap.is_sign_negative() {
            return Err(DomainError::validation("price thresholds cannot be negative"));
        }
        if pending_threshold > hard_cap {
            return Err(DomainError::validation(
                "pending threshold cannot exceed the hard cap",
            ));
        }
        if escalation_factor < Decimal::ONE {
            return Err(DomainError::validation(
                "escalation factor must be at least 1",
            ));
        }
        let representable = hard_cap.checked_mul(escalation_factor).is_some()
            && (escalation_factor - Decimal::ONE)
                .checked_mul(Decimal::ONE_HUNDRED)
                .is_some();
        if !representable {
            return Err(DomainError::validation(
                "escalation factor is too large for the hard cap",
            ));
        }

        Ok(Self {
            pending_threshold,
            hard_cap,
            escalation_factor,
        })
    }

    pub fn pending_threshold(&self) -> Decimal {
        self.pending_threshold
    }

    pub fn hard_cap(&self) -> Decimal {
        self.hard_cap
    }

    pub fn escalation_factor(&self) -> Decimal {
        self.escalation_factor
    }

    /// Reject prices the catalog can never hold. The cap is checked first.
    pub fn check_price(&self, price: Decimal) -> DomainResult<()> {
        if price > self.hard_cap {
            return Err(DomainError::validation(format!(
                "Product price cannot exceed ${}.",
                grouped(self.hard_cap)
            )));
        }
        if price.is_sign_negative() && !price.is_zero() {
            return Err(DomainError::validation("Product price cannot be negative."));
        }
        Ok(())
    }

    /// Approval reason for a brand-new product, if it has to be queued.
    pub fn creation_reason(&self, price: Decimal) -> Option<String> {
        (price > self.pending_threshold)
            .then(|| format!("Price exceeds ${}", self.pending_threshold.normalize()))
    }

    /// Approval reason for a price change from `current` to `proposed`, if it
    /// has to be queued. A ceiling beyond the decimal range cannot be
    /// exceeded, so it never escalates.
    pub fn revision_reason(&self, current: Decimal, proposed: Decimal) -> Option<String> {
        let escalated = current
            .checked_mul(self.escalation_factor)
            .is_some_and(|ceiling| proposed > ceiling);
        (proposed > self.pending_threshold || escalated).then(|| {
            let increase = (self.escalation_factor - Decimal::ONE)
                .checked_mul(Decimal::ONE_HUNDRED)
                .unwrap_or(Decimal::MAX)
                .normalize();
            format!(
                "Price exceeds ${} or {}% of previous price.",
                self.pending_threshold.normalize(),
                increase
            )
        })
    }
}

/// Render an amount with thousands separators ("10000" -> "10,000").
fn grouped(amount: Decimal) -> String {
    let rendered = amount.normalize().to_string();
    let (whole, fraction) = match rendered.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (rendered.as_str(), None),
    };

    let digits: Vec<char> = whole.chars().collect();
    let mut out = String::with_capacity(rendered.len() + digits.len() / 3);
    for (idx, ch) in digits.iter().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            out.push(',');
        }
        out.push(*ch);
    }
    if let Some(fraction) = fraction {
        out.push('.');
        out.push_str(fraction);
    }
    out
}
