//! Infrastructure layer - persistence backends
//!
//! This module contains the secret-store trait and its backends. The
//! production application is expected to provide a platform keystore
//! implementation; the backends here cover tests, development, and
//! plain-file deployments.

pub mod secret_store;

pub use secret_store::*;
