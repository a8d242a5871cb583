//! Configuration for the wallet core
//!
//! Configuration is read from the environment (with `.env` support) so the
//! embedding application can select the network and debug behavior without
//! recompiling.

use std::env;

use crate::shared::constants::{DEFAULT_MNEMONIC_STRENGTH, SUPPORTED_MNEMONIC_STRENGTHS};
use crate::shared::error::WalletError;
use crate::shared::types::Network;
use crate::shared::WalletResult;

/// Runtime configuration consumed by the core
#[derive(Debug, Clone)]
pub struct WalletConfig {
    pub network: Network,
    /// Mnemonic entropy strength in bits
    pub mnemonic_strength: usize,
    /// Debug-only: prefill password fields. Must never affect
    /// encryption/decryption correctness.
    pub debug_prefill: bool,
    debug_password: String,
}

impl WalletConfig {
    /// Load configuration from environment variables, falling back to safe
    /// defaults. Reads `.env` if present.
    ///
    /// Keys: ADAWALLET_NETWORK, ADAWALLET_MNEMONIC_STRENGTH,
    ///       ADAWALLET_DEBUG_PREFILL, ADAWALLET_DEBUG_PASSWORD
    pub fn from_env() -> WalletResult<Self> {
        dotenv::dotenv().ok();

        let network = match env::var("ADAWALLET_NETWORK")
            .unwrap_or_else(|_| "mainnet".to_string())
            .to_lowercase()
            .as_str()
        {
            "mainnet" => Network::Mainnet,
            "testnet" => Network::Testnet,
            other => {
                return Err(WalletError::validation(format!(
                    "Unknown network: {}",
                    other
                )))
            }
        };

        let mnemonic_strength = match env::var("ADAWALLET_MNEMONIC_STRENGTH") {
            Ok(raw) => raw
                .parse::<usize>()
                .map_err(|_| WalletError::validation("Invalid mnemonic strength"))?,
            Err(_) => DEFAULT_MNEMONIC_STRENGTH,
        };
        if !SUPPORTED_MNEMONIC_STRENGTHS.contains(&mnemonic_strength) {
            return Err(WalletError::validation(format!(
                "Unsupported mnemonic strength: {}",
                mnemonic_strength
            )));
        }

        let debug_prefill = env::var("ADAWALLET_DEBUG_PREFILL")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);
        let debug_password = env::var("ADAWALLET_DEBUG_PASSWORD").unwrap_or_default();

        Ok(Self {
            network,
            mnemonic_strength,
            debug_prefill,
            debug_password,
        })
    }

    /// Password to prefill into the confirmation screen, debug builds only
    pub fn prefill_password(&self) -> Option<&str> {
        if self.debug_prefill && !self.debug_password.is_empty() {
            Some(&self.debug_password)
        } else {
            None
        }
    }
}

impl Default for WalletConfig {
    fn default() -> Self {
        Self {
            network: Network::Mainnet,
            mnemonic_strength: DEFAULT_MNEMONIC_STRENGTH,
            debug_prefill: false,
            debug_password: String::new(),
        }
    }
}
