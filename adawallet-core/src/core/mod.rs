//! Core wallet functionality
//!
//! This module contains the core wallet functionality: key management and
//! cryptography, address derivation, transaction authorization, and the
//! wallet lifecycle.

pub mod addresses;
pub mod authorization;
pub mod crypto;
pub mod wallet;
