//! Radix-tree request router.
//!
//! One tree per HTTP method. O(path-length) lookup. The router also owns the
//! application state that every handler receives.

use std::collections::HashMap;
use std::sync::Arc;

use matchit::Router as MatchitRouter;

use crate::handler::{BoxedHandler, Handler};
use crate::method::Method;

/// Outcome of matching a method + path against the registered routes.
pub(crate) enum Route<S> {
    Found(BoxedHandler<S>, HashMap<String, String>),
    /// The path exists, but not for this method. Carries the methods that
    /// are registered for it.
    MethodNotAllowed(Vec<Method>),
    NotFound,
}

/// The application router.
///
/// Build it once at startup with the shared state `S`; pass it to
/// [`Server::serve`](crate::Server::serve). Each [`Router::on`] call returns
/// `self` so registrations chain naturally.
pub struct Router<S> {
    routes: HashMap<Method, MatchitRouter<BoxedHandler<S>>>,
    state: S,
}

impl<S: Clone + Send + Sync + 'static> Router<S> {
    pub fn new(state: S) -> Self {
        Self { routes: HashMap::new(), state }
    }

    /// Register a handler for a method + path pair. Returns `self` for chaining.
    ///
    /// Path parameters use `{name}` syntax. `req.param("name")` retrieves them.
    ///
    /// # Panics
    ///
    /// Panics if `path` is malformed or conflicts with a route already
    /// registered for `method`. Routes are fixed at startup, so this is a
    /// programming error.
    pub fn on(mut self, method: Method, path: &str, handler: impl Handler<S>) -> Self {
        self.routes
            .entry(method)
            .or_default()
            .insert(path, handler.into_boxed_handler())
            .unwrap_or_else(|e| panic!("invalid route `{path}`: {e}"));
        self
    }

    pub fn state(&self) -> &S { &self.state }

    pub(crate) fn lookup(&self, method: Option<Method>, path: &str) -> Route<S> {
        if let Some(method) = method
            && let Some(matched) = self.routes.get(&method).and_then(|tree| tree.at(path).ok())
        {
            let handler = Arc::clone(matched.value);
            let params = matched.params.iter()
                .map(|(k, v)| (k.to_owned(), v.to_owned()))
                .collect();
            return Route::Found(handler, params);
        }

        let allowed: Vec<Method> = Method::ALL
            .into_iter()
            .filter(|m| self.routes.get(m).is_some_and(|tree| tree.at(path).is_ok()))
            .collect();

        if allowed.is_empty() { Route::NotFound } else { Route::MethodNotAllowed(allowed) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Request, Response};

    async fn noop(_state: (), _req: Request) -> Response {
        Response::text("")
    }

    fn router() -> Router<()> {
        Router::new(())
            .on(Method::Get, "/users", noop)
            .on(Method::Post, "/users", noop)
            .on(Method::Get, "/users/{id}", noop)
            .on(Method::Delete, "/users/{id}", noop)
    }

    #[test]
    fn captures_path_params() {
        match router().lookup(Some(Method::Get), "/users/42") {
            Route::Found(_, params) => assert_eq!(params["id"], "42"),
            _ => panic!("expected a match"),
        }
    }

    #[test]
    fn wrong_method_lists_allowed_methods() {
        match router().lookup(Some(Method::Put), "/users") {
            Route::MethodNotAllowed(allowed) => assert_eq!(allowed, vec![Method::Get, Method::Post]),
            _ => panic!("expected 405"),
        }
    }

    #[test]
    fn unknown_method_on_known_path_is_not_allowed() {
        assert!(matches!(router().lookup(None, "/users/1"), Route::MethodNotAllowed(_)));
    }

    #[test]
    fn unknown_path_is_not_found() {
        assert!(matches!(router().lookup(Some(Method::Get), "/orders"), Route::NotFound));
        assert!(matches!(router().lookup(Some(Method::Get), "/users/1/extra"), Route::NotFound));
    }

    #[test]
    #[should_panic(expected = "invalid route")]
    fn conflicting_route_panics() {
        let _ = router().on(Method::Get, "/users/{name}", noop);
    }
}
