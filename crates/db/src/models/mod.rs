//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches

pub mod event;
pub mod narration;
pub mod notification;
pub mod role;
pub mod session;
pub mod share;
pub mod story;
pub mod story_analysis;
pub mod user;
pub mod video_job;
pub mod voice_profile;
