//! The ordered collection of built endpoints.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::debug;

use crate::endpoint::Endpoint;
use crate::method::RestMethod;

/// Append-only list of built endpoints.
///
/// A registry is created by whoever owns the API definition and passed to
/// [`EndpointBuilder::build`](crate::EndpointBuilder::build), then to the
/// components that enumerate endpoints (OpenAPI generation, adapters).
/// Registration is synchronized, so endpoints may be built from several
/// threads.
///
/// ```
/// use schematic::{get, Registry, RestMethod};
///
/// let registry = Registry::new();
/// get("/health").no_content().build(&registry)?;
///
/// assert_eq!(registry.len(), 1);
/// assert!(registry.find(RestMethod::Get, "/health").is_some());
/// # Ok::<(), schematic::ApiError>(())
/// ```
#[derive(Debug, Default)]
pub struct Registry {
    endpoints: Mutex<Vec<Arc<Endpoint>>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    // Critical sections are a single push, clone or take, so a poisoned
    // list is still whole.
    fn lock(&self) -> MutexGuard<'_, Vec<Arc<Endpoint>>> {
        self.endpoints.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Appends an endpoint and returns the shared handle to it.
    pub fn register(&self, endpoint: Endpoint) -> Arc<Endpoint> {
        let endpoint = Arc::new(endpoint);
        let mut endpoints = self.lock();
        endpoints.push(Arc::clone(&endpoint));
        debug!(route = %endpoint, total = endpoints.len(), "endpoint registered");
        endpoint
    }

    /// Snapshot of every endpoint in registration order.
    pub fn all(&self) -> Vec<Arc<Endpoint>> {
        self.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// The first endpoint registered for `method` and `path`.
    pub fn find(&self, method: RestMethod, path: &str) -> Option<Arc<Endpoint>> {
        self.lock()
            .iter()
            .find(|endpoint| endpoint.method() == method && endpoint.path() == path)
            .cloned()
    }

    /// Endpoints under `prefix`, in registration order.
    ///
    /// Matching is per path segment: `/users` covers `/users` and
    /// `/users/:id` but not `/usersettings`. An empty prefix or `/` covers
    /// every endpoint.
    pub fn with_prefix(&self, prefix: &str) -> Vec<Arc<Endpoint>> {
        self.lock()
            .iter()
            .filter(|endpoint| is_under(endpoint.path(), prefix))
            .cloned()
            .collect()
    }

    /// Swaps in an empty list and returns how many endpoints were dropped.
    ///
    /// Handles returned by earlier calls stay valid.
    pub fn reset(&self) -> usize {
        let dropped = std::mem::take(&mut *self.lock()).len();
        debug!(dropped, "endpoint registry reset");
        dropped
    }
}

fn is_under(path: &str, prefix: &str) -> bool {
    let prefix = prefix.trim_end_matches('/');
    prefix.is_empty()
        || path
            .strip_prefix(prefix)
            .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::{get, post};
    use std::thread;
    use tracing_test::traced_test;

    #[test]
    fn test_registration_order_is_kept() {
        let registry = Registry::new();
        get("/b").no_content().build(&registry).unwrap();
        post("/a").no_content().build(&registry).unwrap();
        let routes: Vec<String> = registry.all().iter().map(|e| e.route()).collect();
        assert_eq!(routes, ["GET /b", "POST /a"]);
    }

    #[test]
    fn test_find_and_prefix() {
        let registry = Registry::new();
        get("/users").no_content().build(&registry).unwrap();
        post("/users").no_content().build(&registry).unwrap();
        get("/orders").no_content().build(&registry).unwrap();

        assert!(registry.find(RestMethod::Post, "/users").is_some());
        assert!(registry.find(RestMethod::Delete, "/users").is_none());
        assert_eq!(registry.with_prefix("/users").len(), 2);
    }

    #[test]
    fn test_prefix_stops_at_segment_boundary() {
        let registry = Registry::new();
        get("/users").no_content().build(&registry).unwrap();
        get("/users/:id")
            .path_param("id", "integer")
            .unwrap()
            .no_content()
            .build(&registry)
            .unwrap();
        get("/usersettings").no_content().build(&registry).unwrap();

        let paths = |prefix: &str| -> Vec<String> {
            registry
                .with_prefix(prefix)
                .iter()
                .map(|e| e.path().to_string())
                .collect()
        };
        assert_eq!(paths("/users"), ["/users", "/users/:id"]);
        assert_eq!(paths("/users/"), ["/users", "/users/:id"]);
        assert_eq!(paths("/usersettings"), ["/usersettings"]);
        assert_eq!(paths("/").len(), 3);
        assert_eq!(paths("").len(), 3);
    }

    #[test]
    fn test_reset_keeps_existing_handles() {
        let registry = Registry::new();
        let endpoint = get("/x").no_content().build(&registry).unwrap();
        assert_eq!(registry.reset(), 1);
        assert!(registry.is_empty());
        assert_eq!(endpoint.path(), "/x");
    }

    #[test]
    fn test_failed_build_registers_nothing() {
        let registry = Registry::new();
        let result = get("/users/:id").no_content().build(&registry);
        assert!(result.is_err());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_concurrent_registration() {
        let registry = Arc::new(Registry::new());
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let registry = Arc::clone(&registry);
                thread::spawn(move || {
                    get(format!("/r{i}")).no_content().build(&registry).unwrap();
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(registry.len(), 8);
    }

    #[traced_test]
    #[test]
    fn test_lifecycle_is_logged() {
        let registry = Registry::new();
        get("/logged").no_content().build(&registry).unwrap();
        registry.reset();
        assert!(logs_contain("endpoint materialized"));
        assert!(logs_contain("endpoint registered"));
        assert!(logs_contain("endpoint registry reset"));
    }
}
