//! Cryptographic functionality for the wallet core
//!
//! This module provides master-key handling, hierarchical key derivation,
//! and password-based encryption of key material.
//!
//! SECURITY: all transient key material is held in zeroizing buffers and
//! dropped as soon as the owning operation completes. Nothing derived from
//! a decrypted key is ever logged.

pub mod encryption;
pub mod keys;

// Re-export all public items from submodules
pub use encryption::*;
pub use keys::*;
