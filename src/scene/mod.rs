//! Boundary request model: what to spin and how.

/// JSON-loadable spin requests.
pub mod request;
