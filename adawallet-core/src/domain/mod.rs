//! Domain layer - wallet entity
//!
//! The wallet entity is the explicit session handle passed to the
//! authorization coordinator and the wallet manager. It carries no key
//! material; secrets live only in the secret store as encrypted blobs.

use serde::{Deserialize, Serialize};

use crate::shared::error::WalletError;
use crate::shared::types::{AuthorizationMode, Network};
use crate::shared::utils;
use crate::shared::WalletResult;

/// Core wallet entity
#[derive(Debug, Clone, PartialEq)]
pub struct Wallet {
    pub id: String,
    pub name: String,
    pub network: Network,
    pub auth_mode: AuthorizationMode,
    pub created_at: u64,
}

impl Wallet {
    pub fn new(name: String, network: Network) -> WalletResult<Self> {
        utils::validate_wallet_name(&name)?;
        Ok(Self {
            id: utils::generate_id(),
            name,
            network,
            auth_mode: AuthorizationMode::PasswordRequired,
            created_at: utils::current_timestamp(),
        })
    }

    pub fn is_easy_confirmation(&self) -> bool {
        self.auth_mode == AuthorizationMode::EasyConfirmation
    }

    /// Serializable projection (no secret fields to begin with, but kept
    /// separate so the entity can grow without changing the persisted form)
    pub fn to_wallet_info(&self) -> WalletInfo {
        WalletInfo {
            id: self.id.clone(),
            name: self.name.clone(),
            network: self.network,
            auth_mode: self.auth_mode,
            created_at: self.created_at,
        }
    }
}

/// Persisted wallet metadata
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WalletInfo {
    pub id: String,
    pub name: String,
    pub network: Network,
    pub auth_mode: AuthorizationMode,
    pub created_at: u64,
}

impl From<WalletInfo> for Wallet {
    fn from(info: WalletInfo) -> Self {
        Self {
            id: info.id,
            name: info.name,
            network: info.network,
            auth_mode: info.auth_mode,
            created_at: info.created_at,
        }
    }
}

impl TryFrom<&str> for WalletInfo {
    type Error = WalletError;

    fn try_from(json: &str) -> WalletResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wallet_creation_defaults_to_password_mode() {
        let wallet = Wallet::new("Test Wallet".to_string(), Network::Mainnet)
            .expect("Failed to create wallet");
        assert_eq!(wallet.auth_mode, AuthorizationMode::PasswordRequired);
        assert!(!wallet.is_easy_confirmation());
    }

    #[test]
    fn test_wallet_name_validation() {
        assert!(Wallet::new("".to_string(), Network::Mainnet).is_err());
    }

    #[test]
    fn test_wallet_info_round_trip() {
        let wallet = Wallet::new("Test Wallet".to_string(), Network::Testnet)
            .expect("Failed to create wallet");
        let json = serde_json::to_string(&wallet.to_wallet_info())
            .expect("Failed to serialize wallet info");
        let info = WalletInfo::try_from(json.as_str()).expect("Failed to parse wallet info");
        assert_eq!(Wallet::from(info), wallet);
    }
}
