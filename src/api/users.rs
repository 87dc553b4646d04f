//! `/users` handlers.

use std::sync::Arc;

use tracing::{debug, info};

use super::{ApiError, deleted, parse_id};
use crate::model::User;
use crate::request::Request;
use crate::response::Response;
use crate::status::Status;
use crate::store::Store;

pub async fn list(store: Arc<Store>, _req: Request) -> Response {
    Response::json(&store.list_users())
}

pub async fn create(store: Arc<Store>, req: Request) -> Result<Response, ApiError> {
    let user: User = req.json().map_err(|e| {
        debug!(error = %e, "rejecting user payload");
        ApiError::invalid_payload()
    })?;

    let user = store.create_user(user)?;
    info!(id = user.id, "user created");

    Ok(Response::builder()
        .status(Status::Created)
        .header("location", &format!("/users/{}", user.id))
        .json(&user))
}

pub async fn get(store: Arc<Store>, req: Request) -> Result<Response, ApiError> {
    let id = parse_id::<User>(&req)?;
    Ok(Response::json(&store.get_user(id)?))
}

/// Full replace. The embedded `products` list is taken from the payload too.
pub async fn update(store: Arc<Store>, req: Request) -> Result<Response, ApiError> {
    let id = parse_id::<User>(&req)?;
    let user: User = req.json().map_err(|e| {
        debug!(error = %e, id, "rejecting user payload");
        ApiError::invalid_payload()
    })?;

    let user = store.update_user(id, user)?;
    info!(id, "user updated");
    Ok(Response::json(&user))
}

pub async fn delete(store: Arc<Store>, req: Request) -> Result<Response, ApiError> {
    let id = parse_id::<User>(&req)?;
    store.delete_user(id)?;
    info!(id, "user deleted");
    Ok(deleted::<User>())
}
