//! `/products` handlers.

use std::sync::Arc;

use tracing::{debug, info};

use super::{ApiError, deleted, parse_id};
use crate::model::Product;
use crate::request::Request;
use crate::response::Response;
use crate::status::Status;
use crate::store::Store;

pub async fn list(store: Arc<Store>, _req: Request) -> Response {
    Response::json(&store.list_products())
}

/// Creates the product and links a snapshot of it into its owner, if the
/// owner exists.
pub async fn create(store: Arc<Store>, req: Request) -> Result<Response, ApiError> {
    let product: Product = req.json().map_err(|e| {
        debug!(error = %e, "rejecting product payload");
        ApiError::invalid_payload()
    })?;

    let product = store.create_product(product)?;
    info!(id = product.id, owner = ?product.owner, "product created");

    Ok(Response::builder()
        .status(Status::Created)
        .header("location", &format!("/products/{}", product.id))
        .json(&product))
}

pub async fn get(store: Arc<Store>, req: Request) -> Result<Response, ApiError> {
    let id = parse_id::<Product>(&req)?;
    Ok(Response::json(&store.get_product(id)?))
}

pub async fn update(store: Arc<Store>, req: Request) -> Result<Response, ApiError> {
    let id = parse_id::<Product>(&req)?;
    let product: Product = req.json().map_err(|e| {
        debug!(error = %e, id, "rejecting product payload");
        ApiError::invalid_payload()
    })?;

    let product = store.update_product(id, product)?;
    info!(id, "product updated");
    Ok(Response::json(&product))
}

pub async fn delete(store: Arc<Store>, req: Request) -> Result<Response, ApiError> {
    let id = parse_id::<Product>(&req)?;
    store.delete_product(id)?;
    info!(id, "product deleted");
    Ok(deleted::<Product>())
}
