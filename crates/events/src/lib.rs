//! Storyweave event bus and notification infrastructure.
//!
//! This crate provides the building blocks for the platform-wide event
//! system:
//!
//! - [`EventBus`] — in-process publish/subscribe hub backed by
//!   `tokio::sync::broadcast`.
//! - [`DomainEvent`] — the canonical domain event envelope.
//! - [`EventPersistence`] — background service that durably writes every
//!   event to the `events` table.
//! - [`Dispatcher`] — campaign-driven notification dispatch (template
//!   rendering, per-channel send, delivery-record bookkeeping).
//! - [`delivery`] — external delivery channels (email, SMS).

pub mod bus;
pub mod delivery;
pub mod dispatcher;
pub mod persistence;

pub use bus::{DomainEvent, EventBus};
pub use delivery::email::{EmailConfig, EmailDelivery};
pub use delivery::sms::{SmsConfig, SmsDelivery};
pub use dispatcher::Dispatcher;
pub use persistence::EventPersistence;
