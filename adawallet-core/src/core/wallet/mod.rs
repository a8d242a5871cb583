//! Wallet lifecycle management
//!
//! This module handles wallet creation and restore from a mnemonic,
//! password changes, authorization-mode configuration, and session
//! tracking. The manager is an explicit handle: callers pass the wallet
//! entity around instead of reaching for a global singleton.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::core::authorization::{AuthorizationCoordinator, BiometricUnlock, TransactionSubmitter};
use crate::core::crypto::encryption::KeyCrypto;
use crate::core::crypto::keys::{
    master_key_from_mnemonic, Account, Ed25519Engine, KeyDerivationEngine,
};
use crate::domain::{Wallet, WalletInfo};
use crate::infrastructure::secret_store::SecretStore;
use crate::shared::constants::{MASTER_PASSWORD_KEY_NAME, WALLET_META_KEY_NAME};
use crate::shared::error::WalletError;
use crate::shared::types::{AuthorizationMode, KeyType, Network};
use crate::shared::utils;
use crate::shared::WalletResult;

/// Wallet manager for handling wallet sessions
pub struct WalletManager {
    engine: Box<dyn KeyDerivationEngine>,
    crypto: KeyCrypto,
    store: Arc<dyn SecretStore>,
    sessions: Arc<RwLock<HashMap<String, Wallet>>>,
}

impl WalletManager {
    pub fn new(store: Arc<dyn SecretStore>) -> Self {
        Self::with_engine(Box::new(Ed25519Engine::new()), store)
    }

    pub fn with_engine(engine: Box<dyn KeyDerivationEngine>, store: Arc<dyn SecretStore>) -> Self {
        Self {
            engine,
            crypto: KeyCrypto::new(),
            store,
            sessions: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub fn engine(&self) -> &dyn KeyDerivationEngine {
        self.engine.as_ref()
    }

    /// Create (or restore) a wallet from a mnemonic.
    ///
    /// The mnemonic is consumed to derive the master key, the master key is
    /// encrypted under the password and persisted, and both are dropped
    /// before returning. Only the encrypted blob and non-secret metadata
    /// reach the store.
    pub async fn create_wallet(
        &self,
        name: &str,
        mnemonic: &str,
        password: &str,
        network: Network,
    ) -> WalletResult<Wallet> {
        utils::validate_password(password)?;
        utils::validate_mnemonic(mnemonic)?;

        let master_key = master_key_from_mnemonic(self.engine.as_ref(), mnemonic)?;
        let blob = self.crypto.encrypt(password, &master_key)?;
        drop(master_key);

        let wallet = Wallet::new(name.to_string(), network)?;
        self.store
            .put(&wallet.id, MASTER_PASSWORD_KEY_NAME, KeyType::MasterPassword, &blob)
            .await?;
        self.persist_meta(&wallet).await?;

        {
            let mut sessions = self.sessions.write().await;
            sessions.insert(wallet.id.clone(), wallet.clone());
        }

        log::info!("Created wallet {}", wallet.id);
        Ok(wallet)
    }

    /// Load a previously created wallet's metadata and open a session
    pub async fn load_wallet(&self, wallet_id: &str) -> WalletResult<Wallet> {
        let json = self
            .store
            .get(wallet_id, WALLET_META_KEY_NAME, KeyType::MasterPassword, "")
            .await?;
        let info = WalletInfo::try_from(json.as_str())?;
        let wallet = Wallet::from(info);

        let mut sessions = self.sessions.write().await;
        sessions.insert(wallet.id.clone(), wallet.clone());
        Ok(wallet)
    }

    /// Get an open session by wallet ID
    pub async fn get_wallet(&self, wallet_id: &str) -> WalletResult<Wallet> {
        let sessions = self.sessions.read().await;
        sessions
            .get(wallet_id)
            .cloned()
            .ok_or_else(|| WalletError::storage(format!("Wallet not open: {}", wallet_id)))
    }

    /// Decrypt the stored master key and derive the account for address
    /// derivation. The master key is dropped before returning.
    pub async fn open_account(&self, wallet: &Wallet, password: &str) -> WalletResult<Account> {
        let blob = self
            .store
            .get(&wallet.id, MASTER_PASSWORD_KEY_NAME, KeyType::MasterPassword, "")
            .await?;
        let master_key = self.crypto.decrypt(password, &blob)?;
        Account::from_master_key(
            self.engine.as_ref(),
            &master_key,
            wallet.network.protocol_magic(),
        )
    }

    /// Change the spending password: decrypt under the old password,
    /// re-encrypt under the new one, replace the stored blob.
    pub async fn change_password(
        &self,
        wallet: &Wallet,
        old_password: &str,
        new_password: &str,
    ) -> WalletResult<()> {
        utils::validate_password(new_password)?;
        let blob = self
            .store
            .get(&wallet.id, MASTER_PASSWORD_KEY_NAME, KeyType::MasterPassword, "")
            .await?;
        let master_key = self.crypto.decrypt(old_password, &blob)?;
        let new_blob = self.crypto.encrypt(new_password, &master_key)?;
        drop(master_key);

        self.store
            .put(&wallet.id, MASTER_PASSWORD_KEY_NAME, KeyType::MasterPassword, &new_blob)
            .await?;
        log::info!("Password changed for wallet {}", wallet.id);
        Ok(())
    }

    /// Toggle easy confirmation (biometric-backed quick unlock)
    pub async fn set_easy_confirmation(
        &self,
        wallet: &mut Wallet,
        enabled: bool,
    ) -> WalletResult<()> {
        wallet.auth_mode = if enabled {
            AuthorizationMode::EasyConfirmation
        } else {
            AuthorizationMode::PasswordRequired
        };
        self.persist_meta(wallet).await?;

        let mut sessions = self.sessions.write().await;
        sessions.insert(wallet.id.clone(), wallet.clone());
        Ok(())
    }

    /// Close a session (required on `SystemAuthDisabled`). The encrypted
    /// blob stays in the store; only the in-memory session is forgotten.
    pub async fn close_wallet(&self, wallet_id: &str) -> WalletResult<()> {
        let mut sessions = self.sessions.write().await;
        sessions.remove(wallet_id);
        log::info!("Closed wallet {}", wallet_id);
        Ok(())
    }

    /// Build a confirmation-flow coordinator for a wallet session
    pub fn coordinator(
        &self,
        wallet: &Wallet,
        biometric: Arc<dyn BiometricUnlock>,
        submitter: Arc<dyn TransactionSubmitter>,
    ) -> AuthorizationCoordinator {
        AuthorizationCoordinator::new(wallet, self.store.clone(), biometric, submitter)
    }

    async fn persist_meta(&self, wallet: &Wallet) -> WalletResult<()> {
        let json = serde_json::to_string(&wallet.to_wallet_info())?;
        self.store
            .put(&wallet.id, WALLET_META_KEY_NAME, KeyType::MasterPassword, &json)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::addresses::AddressDeriver;
    use crate::infrastructure::secret_store::MemorySecretStore;
    use crate::shared::types::AddressType;

    const MNEMONIC: &str = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";
    const PASSWORD: &str = "Abc123!!";

    fn manager() -> WalletManager {
        WalletManager::new(Arc::new(MemorySecretStore::new()))
    }

    #[tokio::test]
    async fn test_create_wallet_persists_blob_and_meta() {
        let manager = manager();
        let wallet = manager
            .create_wallet("Test Wallet", MNEMONIC, PASSWORD, Network::Mainnet)
            .await
            .expect("Failed to create wallet");

        let loaded = manager
            .load_wallet(&wallet.id)
            .await
            .expect("Failed to load wallet");
        assert_eq!(loaded, wallet);
    }

    #[tokio::test]
    async fn test_create_wallet_rejects_bad_inputs() {
        let manager = manager();
        assert!(manager
            .create_wallet("Test", "not a mnemonic", PASSWORD, Network::Mainnet)
            .await
            .is_err());
        assert!(manager
            .create_wallet("Test", MNEMONIC, "short", Network::Mainnet)
            .await
            .is_err());
    }

    #[tokio::test]
    async fn test_restore_yields_same_addresses() {
        let manager = manager();
        let first = manager
            .create_wallet("First", MNEMONIC, PASSWORD, Network::Mainnet)
            .await
            .expect("Failed to create wallet");
        let second = manager
            .create_wallet("Second", MNEMONIC, PASSWORD, Network::Mainnet)
            .await
            .expect("Failed to create wallet");

        let account_a = manager
            .open_account(&first, PASSWORD)
            .await
            .expect("Failed to open account");
        let account_b = manager
            .open_account(&second, PASSWORD)
            .await
            .expect("Failed to open account");

        let deriver = AddressDeriver::new(manager.engine());
        let a = deriver
            .derive_addresses(&account_a, AddressType::External, &[0, 1, 2])
            .expect("Failed to derive addresses");
        let b = deriver
            .derive_addresses(&account_b, AddressType::External, &[0, 1, 2])
            .expect("Failed to derive addresses");
        assert_eq!(a, b);
    }

    #[tokio::test]
    async fn test_open_account_with_wrong_password() {
        let manager = manager();
        let wallet = manager
            .create_wallet("Test Wallet", MNEMONIC, PASSWORD, Network::Mainnet)
            .await
            .expect("Failed to create wallet");

        let result = manager.open_account(&wallet, "wrong password").await;
        assert!(matches!(result, Err(WalletError::WrongPassword)));
    }

    #[tokio::test]
    async fn test_change_password() {
        let manager = manager();
        let wallet = manager
            .create_wallet("Test Wallet", MNEMONIC, PASSWORD, Network::Mainnet)
            .await
            .expect("Failed to create wallet");

        manager
            .change_password(&wallet, PASSWORD, "NewPass99!")
            .await
            .expect("Failed to change password");

        // Old password no longer decrypts, new one does
        assert!(matches!(
            manager.open_account(&wallet, PASSWORD).await,
            Err(WalletError::WrongPassword)
        ));
        assert!(manager.open_account(&wallet, "NewPass99!").await.is_ok());
    }

    #[tokio::test]
    async fn test_easy_confirmation_toggle_is_persisted() {
        let manager = manager();
        let mut wallet = manager
            .create_wallet("Test Wallet", MNEMONIC, PASSWORD, Network::Mainnet)
            .await
            .expect("Failed to create wallet");
        assert_eq!(wallet.auth_mode, AuthorizationMode::PasswordRequired);

        manager
            .set_easy_confirmation(&mut wallet, true)
            .await
            .expect("Failed to enable easy confirmation");

        let loaded = manager
            .load_wallet(&wallet.id)
            .await
            .expect("Failed to load wallet");
        assert_eq!(loaded.auth_mode, AuthorizationMode::EasyConfirmation);
    }

    #[tokio::test]
    async fn test_close_wallet_forgets_session_but_keeps_blob() {
        let manager = manager();
        let wallet = manager
            .create_wallet("Test Wallet", MNEMONIC, PASSWORD, Network::Mainnet)
            .await
            .expect("Failed to create wallet");

        manager
            .close_wallet(&wallet.id)
            .await
            .expect("Failed to close wallet");
        assert!(manager.get_wallet(&wallet.id).await.is_err());

        // Metadata and blob survive; the wallet can be reopened
        let reloaded = manager
            .load_wallet(&wallet.id)
            .await
            .expect("Failed to reload wallet");
        assert!(manager.open_account(&reloaded, PASSWORD).await.is_ok());
    }
}
