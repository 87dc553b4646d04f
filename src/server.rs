//! HTTP server and graceful shutdown.
//!
//! # Graceful shutdown
//!
//! On **SIGTERM** or **SIGINT** (Ctrl-C) the server:
//! 1. Stops `listener.accept()` immediately. No new connections are made.
//! 2. Tells every open connection to finish its in-flight request and close,
//!    so idle keep-alive connections do not hold shutdown open.
//! 3. Returns from [`Server::serve`], which lets `main` exit cleanly.

use std::convert::Infallible;
use std::error::Error as StdError;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use bytes::Bytes;
use http::HeaderMap;
use http_body_util::{BodyExt, LengthLimitError, Limited};
use hyper::body::{Body, Incoming};
use hyper::service::service_fn;
use hyper_util::rt::{TokioExecutor, TokioIo};
use hyper_util::server::conn::auto::Builder as ConnBuilder;
use hyper_util::server::graceful::GracefulShutdown;
use tokio::net::TcpListener;
use tracing::{Instrument, debug, error, info, warn};

use crate::api::ApiError;
use crate::error::Error;
use crate::method::Method;
use crate::middleware::{content_type, recover, trace};
use crate::request::Request;
use crate::response::{IntoResponse, Response};
use crate::router::{Route, Router};

/// Largest request body read into memory. Anything bigger is answered with
/// `413` without reading the rest.
pub(crate) const MAX_BODY_BYTES: usize = 1024 * 1024;

/// The HTTP server.
pub struct Server {
    listener: TcpListener,
}

impl Server {
    /// Binds the listening socket.
    pub async fn bind(addr: SocketAddr) -> Result<Self, Error> {
        let listener = TcpListener::bind(addr).await?;
        Ok(Self { listener })
    }

    /// Wraps an already-bound listener, e.g. one on an ephemeral port.
    pub fn from_listener(listener: TcpListener) -> Self {
        Self { listener }
    }

    /// The address actually bound, with the real port when `:0` was requested.
    pub fn local_addr(&self) -> Result<SocketAddr, Error> {
        Ok(self.listener.local_addr()?)
    }

    /// Serves `router` until SIGTERM or Ctrl-C, then drains in-flight
    /// connections before returning.
    pub async fn serve<S>(self, router: Router<S>) -> Result<(), Error>
    where
        S: Clone + Send + Sync + 'static,
    {
        self.serve_with_shutdown(router, shutdown_signal()).await
    }

    /// Like [`serve`](Server::serve), but stops when `shutdown` resolves.
    pub async fn serve_with_shutdown<S, F>(self, router: Router<S>, shutdown: F) -> Result<(), Error>
    where
        S: Clone + Send + Sync + 'static,
        F: Future<Output = ()>,
    {
        let addr = self.local_addr()?;
        let listener = self.listener;

        // Shared across connection tasks without copying the routing table.
        let router = Arc::new(router);

        // Serves HTTP/1.1 and HTTP/2, whichever the client speaks.
        let builder = ConnBuilder::new(TokioExecutor::new());
        // Lets shutdown close idle keep-alive connections instead of waiting
        // for clients to hang up.
        let graceful = GracefulShutdown::new();

        info!(%addr, "storefront listening");

        let mut tasks = tokio::task::JoinSet::new();
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                // Check shutdown first so a signal stops accepting at once,
                // even if more connections are queued.
                biased;

                () = &mut shutdown => {
                    info!(in_flight = tasks.len(), "shutdown signal received, draining connections");
                    break;
                }

                res = listener.accept() => {
                    let (stream, remote_addr) = match res {
                        Ok(v) => v,
                        Err(e) => {
                            error!("accept error: {e}");
                            continue;
                        }
                    };

                    let router = Arc::clone(&router);

                    // Called once per request on the connection.
                    let svc = service_fn(move |req| {
                        let router = Arc::clone(&router);
                        async move { Ok::<_, Infallible>(dispatch(&*router, req).await.into_inner()) }
                    });

                    let conn = builder
                        .serve_connection_with_upgrades(TokioIo::new(stream), svc)
                        .into_owned();
                    let conn = graceful.watch(conn);

                    tasks.spawn(async move {
                        if let Err(e) = conn.await {
                            debug!(peer = %remote_addr, "connection error: {e}");
                        }
                    });
                }

                // Reap finished connection tasks so the JoinSet stays small.
                Some(_) = tasks.join_next(), if !tasks.is_empty() => {}
            }
        }

        drop(listener);
        graceful.shutdown().await;
        while tasks.join_next().await.is_some() {}

        info!("storefront stopped");
        Ok(())
    }
}

// ── Request dispatch ──────────────────────────────────────────────────────────

/// Reads the body, then routes the request inside its tracing span.
async fn dispatch<S>(router: &Router<S>, req: hyper::Request<Incoming>) -> Response
where
    S: Clone + Send + Sync + 'static,
{
    let started = Instant::now();
    let (parts, body) = req.into_parts();
    let path = parts.uri.path().to_owned();
    let span = trace::request_span(&parts.method, &path);

    async move {
        let response = match read_body(body).await {
            Ok(body) => {
                let method = Method::from_http(&parts.method);
                handle(router, method, &path, parts.headers, body).await
            }
            Err(e) => e.into_response(),
        };
        trace::on_response(response.status_code(), started.elapsed());
        response
    }
    .instrument(span)
    .await
}

/// Buffers `body`, stopping at [`MAX_BODY_BYTES`].
async fn read_body<B>(body: B) -> Result<Bytes, ApiError>
where
    B: Body<Data = Bytes>,
    B::Error: Into<Box<dyn StdError + Send + Sync>>,
{
    match Limited::new(body, MAX_BODY_BYTES).collect().await {
        Ok(collected) => Ok(collected.to_bytes()),
        Err(e) if e.downcast_ref::<LengthLimitError>().is_some() => {
            warn!(limit = MAX_BODY_BYTES, "request body too large");
            Err(ApiError::PayloadTooLarge)
        }
        Err(e) => {
            warn!(error = %e, "failed to read request body");
            Err(ApiError::invalid_payload())
        }
    }
}

/// Routes one fully-read request through the middleware and its handler.
///
/// `method` is `None` for methods outside RFC 9110.
pub(crate) async fn handle<S>(
    router: &Router<S>,
    method: Option<Method>,
    path: &str,
    headers: HeaderMap,
    body: Bytes,
) -> Response
where
    S: Clone + Send + Sync + 'static,
{
    let (handler, params) = match router.lookup(method, path) {
        Route::Found(handler, params) => (handler, params),
        Route::MethodNotAllowed(allowed) => return ApiError::MethodNotAllowed(allowed).into_response(),
        Route::NotFound => return ApiError::NotFound("Not found".to_owned()).into_response(),
    };

    if let Err(e) = content_type::require_json(&headers, &body) {
        return e.into_response();
    }

    let req = Request::new(body, params);
    recover::catch_panic(handler.call(router.state().clone(), req)).await
}

// ── Shutdown signal ───────────────────────────────────────────────────────────

/// Resolves on the first SIGTERM or SIGINT. If a handler cannot be
/// installed, that signal is logged and ignored.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "failed to install Ctrl-C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let sigterm = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let sigterm = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c   => {}
        () = sigterm  => {}
    }
}
