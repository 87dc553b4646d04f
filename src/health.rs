//! Kubernetes health-check handlers.
//!
//! | Probe | Path | Question |
//! |---|---|---|
//! | **Liveness** | `/healthz` | Is the process alive? Failure → restart. |
//! | **Readiness** | `/readyz` | Can the pod serve traffic? Failure → pulled from load-balancer. |
//!
//! Both are generic over the router state, so they can be registered on any
//! [`Router`](crate::Router).

use crate::{Request, Response};

/// Liveness probe. Always `200 OK` with body `"ok"`.
pub async fn liveness<S>(_state: S, _req: Request) -> Response {
    Response::text("ok")
}

/// Readiness probe. The store is in memory and ready as soon as the router
/// exists, so this is `200 OK` with body `"ready"`.
pub async fn readiness<S>(_state: S, _req: Request) -> Response {
    Response::text("ready")
}
