//! Utility functions for the wallet core

use std::time::{SystemTime, UNIX_EPOCH};

use bip39::Mnemonic;

use crate::shared::constants::{
    PASSWORD_MAX_LENGTH, PASSWORD_MIN_LENGTH, WALLET_NAME_MAX_LENGTH, WALLET_NAME_MIN_LENGTH,
};
use crate::shared::error::WalletError;
use crate::shared::WalletResult;

/// Generate a unique wallet ID
pub fn generate_id() -> String {
    format!("wallet_{}", uuid::Uuid::new_v4())
}

/// Get current timestamp in seconds
pub fn current_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_else(|_| std::time::Duration::from_secs(0))
        .as_secs()
}

/// Validate a BIP39 mnemonic phrase
pub fn validate_mnemonic(mnemonic: &str) -> WalletResult<()> {
    match Mnemonic::parse_in_normalized(bip39::Language::English, mnemonic) {
        Ok(_) => Ok(()),
        Err(e) => Err(WalletError::validation(format!(
            "Invalid BIP39 mnemonic: {}",
            e
        ))),
    }
}

/// Validate spending password length bounds
pub fn validate_password(password: &str) -> WalletResult<()> {
    if password.len() < PASSWORD_MIN_LENGTH {
        return Err(WalletError::validation(format!(
            "Password must be at least {} characters long",
            PASSWORD_MIN_LENGTH
        )));
    }
    if password.len() > PASSWORD_MAX_LENGTH {
        return Err(WalletError::validation(format!(
            "Password must be at most {} characters long",
            PASSWORD_MAX_LENGTH
        )));
    }
    Ok(())
}

/// Validate a wallet display name
pub fn validate_wallet_name(name: &str) -> WalletResult<()> {
    if name.len() < WALLET_NAME_MIN_LENGTH || name.len() > WALLET_NAME_MAX_LENGTH {
        return Err(WalletError::validation("Invalid wallet name length"));
    }
    Ok(())
}
