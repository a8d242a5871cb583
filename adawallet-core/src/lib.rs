//! ADA Wallet Core
//!
//! Secure wallet core for a mobile ADA wallet.
//! Handles key management, address derivation, and transaction
//! authorization in Rust.
//!
//! ## Architecture
//!
//! This library follows a simplified architecture focused on core
//! functionality:
//!
//! - **Core**: key crypto, address derivation, authorization, wallet lifecycle
//! - **Domain**: wallet entity and metadata
//! - **Infrastructure**: secret-store backends
//! - **Shared**: common types, constants, configuration, and errors
//!
//! ## Security Properties
//!
//! - The master key is persisted only as an encrypted blob
//! - Transient key material is zeroized on drop
//! - Wrong password and corrupted ciphertext are indistinguishable
//! - The confirmation flow hands the decrypted key to the submitter
//!   exactly once and never caches it
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use adawallet_core::{generate_mnemonic, MemorySecretStore, Network, WalletManager};
//!
//! # async fn demo() -> Result<(), adawallet_core::WalletError> {
//! let store = Arc::new(MemorySecretStore::new());
//! let manager = WalletManager::new(store);
//!
//! let mnemonic = generate_mnemonic(160)?;
//! let wallet = manager
//!     .create_wallet("My Wallet", &mnemonic, "Abc123!!", Network::Mainnet)
//!     .await?;
//! let account = manager.open_account(&wallet, "Abc123!!").await?;
//! # Ok(())
//! # }
//! ```

use std::env;
use std::sync::Arc;

// Re-export main modules for easy access
pub mod core;
pub mod domain;
pub mod infrastructure;
pub mod shared;

// Re-export specific components
pub use crate::core::addresses::{address_to_hex, is_valid_address, AddressDeriver};
pub use crate::core::authorization::{
    AuthorizationCoordinator, BiometricOutcome, BiometricUnlock, ConfirmOutcome, ConfirmState,
    TransactionSubmitter,
};
pub use crate::core::crypto::encryption::KeyCrypto;
pub use crate::core::crypto::keys::{
    generate_mnemonic, master_key_from_mnemonic, Account, Ed25519Engine, KeyDerivationEngine,
    MasterKey,
};
pub use crate::core::wallet::WalletManager;
pub use crate::domain::{Wallet, WalletInfo};
pub use crate::infrastructure::secret_store::{FileSecretStore, MemorySecretStore, SecretStore};
pub use crate::shared::config::WalletConfig;
pub use crate::shared::error::WalletError;
pub use crate::shared::types::{
    Address, AddressType, Amount, AuthorizationMode, KeyType, Network, TransactionDraft,
};
pub use crate::shared::WalletResult;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Initialize logging
pub fn init() {
    let _ = env_logger::try_init();
}

/// Initialize the wallet core with configuration from .env or safe defaults
pub async fn init_wallet_core() -> WalletResult<WalletCore> {
    let config = WalletConfig::from_env()?;

    let data_dir =
        env::var("ADAWALLET_DATA_DIR").unwrap_or_else(|_| "./adawallet_data".to_string());
    let store = Arc::new(FileSecretStore::new(data_dir)?);
    let manager = WalletManager::new(store);

    log::info!("Wallet core initialized for {}", config.network.name());
    Ok(WalletCore { config, manager })
}

/// Main wallet core struct that provides access to all functionality
pub struct WalletCore {
    pub config: WalletConfig,
    pub manager: WalletManager,
}

impl WalletCore {
    /// Generate a fresh mnemonic with the configured strength
    pub fn generate_mnemonic(&self) -> WalletResult<String> {
        generate_mnemonic(self.config.mnemonic_strength)
    }

    /// Create a wallet on the configured network
    pub async fn create_wallet(
        &self,
        name: &str,
        mnemonic: &str,
        password: &str,
    ) -> WalletResult<Wallet> {
        self.manager
            .create_wallet(name, mnemonic, password, self.config.network)
            .await
    }

    /// Load a previously created wallet
    pub async fn load_wallet(&self, wallet_id: &str) -> WalletResult<Wallet> {
        self.manager.load_wallet(wallet_id).await
    }
}
