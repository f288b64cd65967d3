//! Request middleware: authentication extraction and role checks.

pub mod auth;
