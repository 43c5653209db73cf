//! Per-request context threaded through the services.

/// Identifies the caller of a service operation.
///
/// Used to stamp `created_by` / `modified_by` audit fields. There is no
/// authentication layer; the name is taken from the request as-is.
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// Name recorded in audit fields.
    pub username: String,
}

impl RequestContext {
    /// Create a context for the given caller name.
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
        }
    }

    /// Context for operations with no identified caller.
    pub fn anonymous() -> Self {
        Self::new("anonymous")
    }
}
