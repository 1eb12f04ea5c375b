use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;

use pricegate_core::Entity;
use pricegate_products::{Product, ProductDraft, ProductSearch};

// -------------------------
// Request DTOs
// -------------------------

/// Body of create and update calls.
#[derive(Debug, Deserialize)]
pub struct ProductRequest {
    pub name: String,
    pub price: Decimal,
    pub posted_date: Option<DateTime<Utc>>,
}

impl From<ProductRequest> for ProductDraft {
    fn from(body: ProductRequest) -> Self {
        ProductDraft {
            name: body.name,
            price: body.price,
            posted_date: body.posted_date,
        }
    }
}

/// Query string of the search endpoint.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchParams {
    pub name: Option<String>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    pub posted_date_start: Option<DateTime<Utc>>,
    pub posted_date_end: Option<DateTime<Utc>>,
}

impl From<SearchParams> for ProductSearch {
    fn from(q: SearchParams) -> Self {
        ProductSearch {
            name: q.name,
            min_price: q.min_price,
            max_price: q.max_price,
            posted_from: q.posted_date_start,
            posted_to: q.posted_date_end,
        }
    }
}

// -------------------------
// JSON mapping helpers
// -------------------------

pub fn product_to_json(p: &Product) -> serde_json::Value {
    let approval = p.approval();
    serde_json::json!({
        "id": p.id(),
        "name": p.name(),
        "price": p.price(),
        "previous_price": p.previous_price(),
        "posted_date": p.posted_date(),
        "is_active": p.is_active(),
        "state": p.state().as_str(),
        "approval_status": approval.status().as_str(),
        "approval_reason": approval.reason(),
        "approval_request_date": approval.requested_at(),
        "created_at": p.created_at(),
        "updated_at": p.updated_at(),
    })
}

pub fn products_to_json(products: &[Product]) -> serde_json::Value {
    serde_json::json!({
        "items": products.iter().map(product_to_json).collect::<Vec<_>>(),
    })
}

pub fn acknowledgment(message: &str, p: &Product) -> serde_json::Value {
    serde_json::json!({
        "message": message,
        "product": product_to_json(p),
    })
}
