//! Constants shared across the engines, backend and terminal UI
//!
//! This module defines chat roles, language identifiers and the values used
//! when composing canned replies.

/// Message role constants
pub mod role {
    /// User role identifier
    pub const USER: &str = "user";
}

/// Language identifiers
pub mod language {
    /// Reported when the input language cannot be detected
    pub const UNKNOWN: &str = "unknown";

    /// Default translation target
    pub const DEFAULT_TARGET: &str = "English";
}

/// Canned reply constants
pub mod reply {
    /// Name used when the customer did not give one
    pub const DEFAULT_CUSTOMER_NAME: &str = "Customer";

    /// Number of characters of the customer message quoted in a canned reply
    pub const EXCERPT_CHARS: usize = 120;
}

/// Backend route paths
pub mod route {
    pub const TRANSLATE: &str = "/translate";
    pub const RESPONSE: &str = "/response";
    pub const HEALTH: &str = "/health";
}
