//! # storefront
//!
//! A small HTTP service that keeps users and products in memory and exposes
//! CRUD endpoints for both as JSON.
//!
//! A product may name an owning user by id. When it does, a snapshot of the
//! product is appended to that user's `products` list at creation time.
//!
//! ## Pieces
//!
//! - [`store`]: the record store. Both collections behind one lock,
//!   identifiers from monotonic counters.
//! - [`api`]: route table and handlers mapping verbs and paths to store
//!   operations.
//! - [`Router`] and [`Server`]: radix-tree routing via [`matchit`], hyper
//!   connections on tokio, graceful shutdown on SIGTERM / Ctrl-C.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use storefront::{Config, Server, api, store::Store};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), storefront::Error> {
//!     let config = Config::from_env()?;
//!     let app = api::router(Arc::new(Store::new()));
//!     Server::bind(config.addr).await?.serve(app).await
//! }
//! ```

mod error;
mod handler;
mod method;
mod middleware;
mod request;
mod response;
mod router;
mod server;
mod status;

pub mod api;
pub mod config;
pub mod health;
pub mod model;
pub mod store;

pub use config::Config;
pub use error::Error;
pub use handler::Handler;
pub use method::Method;
pub use request::Request;
pub use response::{IntoResponse, Response, ResponseBuilder};
pub use router::Router;
pub use server::Server;
pub use status::Status;
