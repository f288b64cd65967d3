//! Storyweave domain core.
//!
//! Zero-internal-dependency types, constants, and validation helpers shared
//! by the database, event, provider, and API crates.

pub mod analysis;
pub mod channels;
pub mod error;
pub mod esm;
pub mod roles;
pub mod sharing;
pub mod status;
pub mod template;
pub mod types;
