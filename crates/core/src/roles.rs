//! Well-known user role name constants.

/// Full administrative access, including campaign/template management and
/// provider switching.
pub const ROLE_ADMIN: &str = "admin";

/// Regular storyteller account.
pub const ROLE_USER: &str = "user";
