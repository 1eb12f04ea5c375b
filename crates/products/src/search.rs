//! Catalog search filters.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::product::Product;

/// Conjunctive product filter. Absent fields match everything.
///
/// Price and posted-date bounds are inclusive. The name filter is a
/// case-insensitive substring match; an empty name counts as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductSearch {
    pub name: Option<String>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    pub posted_from: Option<DateTime<Utc>>,
    pub posted_to: Option<DateTime<Utc>>,
}

impl ProductSearch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn price_between(mut self, min: Option<Decimal>, max: Option<Decimal>) -> Self {
        self.min_price = min;
        self.max_price = max;
        self
    }

    pub fn posted_between(mut self, from: Option<DateTime<Utc>>, to: Option<DateTime<Utc>>) -> Self {
        self.posted_from = from;
        self.posted_to = to;
        self
    }

    pub fn matches(&self, product: &Product) -> bool {
        if let Some(name) = self.name.as_deref().filter(|n| !n.is_empty()) {
            if !product.name().to_lowercase().contains(&name.to_lowercase()) {
                return false;
            }
        }

        let price = product.price();
        if self.min_price.is_some_and(|min| price < min) {
            return false;
        }
        if self.max_price.is_some_and(|max| price > max) {
            return false;
        }

        let posted = product.posted_date();
        if self.posted_from.is_some_and(|from| posted < from) {
            return false;
        }
        if self.posted_to.is_some_and(|to| posted > to) {
            return false;
        }

        true
    }
}
