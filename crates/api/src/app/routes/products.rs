use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Extension, Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};

use pricegate_core::DomainResult;
use pricegate_products::{Product, ProductId, ProductSearch};

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_products).post(create_product))
        .route("/search", get(search_products))
        .route("/queue", get(approval_queue))
        .route(
            "/:id",
            get(get_product).put(update_product).delete(delete_product),
        )
        .route("/approve/:id", post(approve_product))
        .route("/reject/:id", post(reject_product))
}

fn parse_id(id: &str) -> Result<ProductId, axum::response::Response> {
    id.parse::<u64>().map(ProductId::new).map_err(|_| {
        errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid product id")
    })
}

fn parse_body(
    payload: Result<Json<dto::ProductRequest>, JsonRejection>,
) -> Result<dto::ProductRequest, axum::response::Response> {
    payload
        .map(|Json(body)| body)
        .map_err(errors::json_rejection_to_response)
}

fn acknowledge(
    status: StatusCode,
    message: &str,
    result: DomainResult<Product>,
) -> axum::response::Response {
    match result {
        Ok(product) => (status, Json(dto::acknowledgment(message, &product))).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn list_products(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    let items = services.products.list_active();
    (StatusCode::OK, Json(dto::products_to_json(&items))).into_response()
}

pub async fn search_products(
    Extension(services): Extension<Arc<AppServices>>,
    Query(params): Query<dto::SearchParams>,
) -> axum::response::Response {
    let query = ProductSearch::from(params);
    let items = services.products.search(&query);
    (StatusCode::OK, Json(dto::products_to_json(&items))).into_response()
}

pub async fn approval_queue(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    let items = services.products.approval_queue();
    (StatusCode::OK, Json(dto::products_to_json(&items))).into_response()
}

pub async fn get_product(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match parse_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    match services.products.get(id) {
        Some(product) => (StatusCode::OK, Json(dto::product_to_json(&product))).into_response(),
        None => errors::json_error(StatusCode::NOT_FOUND, "not_found", "Product not found."),
    }
}

pub async fn create_product(
    Extension(services): Extension<Arc<AppServices>>,
    payload: Result<Json<dto::ProductRequest>, JsonRejection>,
) -> axum::response::Response {
    let body = match parse_body(payload) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    acknowledge(
        StatusCode::CREATED,
        "Product created successfully.",
        services.products.create(body.into()),
    )
}

pub async fn update_product(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    payload: Result<Json<dto::ProductRequest>, JsonRejection>,
) -> axum::response::Response {
    let id = match parse_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let body = match parse_body(payload) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    acknowledge(
        StatusCode::OK,
        "Product updated successfully.",
        services.products.update(id, body.into()),
    )
}

pub async fn delete_product(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match parse_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    acknowledge(
        StatusCode::OK,
        "Product delete request submitted.",
        services.products.delete(id),
    )
}

pub async fn approve_product(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match parse_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    acknowledge(
        StatusCode::OK,
        "Product approved successfully.",
        services.products.approve(id),
    )
}

pub async fn reject_product(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match parse_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    acknowledge(
        StatusCode::OK,
        "Product rejected successfully.",
        services.products.reject(id),
    )
}
