//! Story sharing roles and validation.
//!
//! Shares live in the `story_shares` table; this module defines the valid
//! share roles and the checks applied before a share row is written.

use crate::types::DbId;

/// Known share roles.
pub mod share_roles {
    /// May read the story, its analysis, narrations, and videos.
    pub const VIEWER: &str = "viewer";
    /// May additionally edit the story body and trigger narration/rendering.
    pub const EDITOR: &str = "editor";
}

/// The set of all valid share roles.
pub const VALID_SHARE_ROLES: &[&str] = &[share_roles::VIEWER, share_roles::EDITOR];

/// Returns `true` if the given share role is valid.
pub fn is_valid_share_role(role: &str) -> bool {
    VALID_SHARE_ROLES.contains(&role)
}

/// Validate a share request before writing the row.
pub fn validate_share(owner_id: DbId, target_user_id: DbId, role: &str) -> Result<(), String> {
    if !is_valid_share_role(role) {
        return Err(format!(
            "Invalid share role '{role}'. Must be one of: {}",
            VALID_SHARE_ROLES.join(", ")
        ));
    }
    if owner_id == target_user_id {
        return Err("A story cannot be shared with its owner".to_string());
    }
    if target_user_id <= 0 {
        return Err(format!("user_id must be positive, got {target_user_id}"));
    }
    Ok(())
}
