//! Route table and handlers for the users and products API.
//!
//! | Method | Path | Handler |
//! |---|---|---|
//! | GET | `/` | [`greeting`] |
//! | GET, POST | `/users`, `/users/` | [`users::list`], [`users::create`] |
//! | GET, PUT, DELETE | `/users/{id}` | [`users::get`], [`users::update`], [`users::delete`] |
//! | GET, POST | `/products`, `/products/` | [`products::list`], [`products::create`] |
//! | GET, PUT, DELETE | `/products/{id}` | [`products::get`], [`products::update`], [`products::delete`] |
//! | GET | `/healthz`, `/readyz` | [`health`](crate::health) probes |

mod error;
pub mod products;
pub mod users;

use std::sync::Arc;

use crate::health;
use crate::method::Method;
use crate::model::{Id, Record};
use crate::request::Request;
use crate::response::Response;
use crate::router::Router;
use crate::store::Store;

pub use error::ApiError;

/// Builds the full application router around `store`.
pub fn router(store: Arc<Store>) -> Router<Arc<Store>> {
    Router::new(store)
        .on(Method::Get,    "/",              greeting)
        .on(Method::Get,    "/healthz",       health::liveness::<Arc<Store>>)
        .on(Method::Get,    "/readyz",        health::readiness::<Arc<Store>>)
        .on(Method::Get,    "/users",         users::list)
        .on(Method::Post,   "/users",         users::create)
        .on(Method::Get,    "/users/",        users::list)
        .on(Method::Post,   "/users/",        users::create)
        .on(Method::Get,    "/users/{id}",    users::get)
        .on(Method::Put,    "/users/{id}",    users::update)
        .on(Method::Delete, "/users/{id}",    users::delete)
        .on(Method::Get,    "/products",      products::list)
        .on(Method::Post,   "/products",      products::create)
        .on(Method::Get,    "/products/",     products::list)
        .on(Method::Post,   "/products/",     products::create)
        .on(Method::Get,    "/products/{id}", products::get)
        .on(Method::Put,    "/products/{id}", products::update)
        .on(Method::Delete, "/products/{id}", products::delete)
}

/// `GET /`
pub async fn greeting(_store: Arc<Store>, _req: Request) -> Response {
    Response::json(&serde_json::json!({ "message": "Hello World" }))
}

/// Reads the `{id}` path parameter as an identifier of a `T`. Only plain
/// decimal digits are accepted; `str::parse` alone would also take a sign.
fn parse_id<T: Record>(req: &Request) -> Result<Id, ApiError> {
    req.param("id")
        .filter(|raw| raw.bytes().next().is_some_and(|b| b.is_ascii_digit()))
        .and_then(|raw| raw.parse::<Id>().ok())
        .ok_or_else(|| ApiError::invalid_id(T::KIND))
}

fn deleted<T: Record>() -> Response {
    Response::json(&serde_json::json!({ "message": format!("{} deleted", T::KIND) }))
}
