//! Secret store backends
//!
//! The secret store persists the encrypted master key blob (and other
//! opaque items) keyed by (wallet id, key name). Blobs arrive already
//! encrypted; the store adds no second encryption layer. Writes happen only
//! at wallet setup and on password change, never concurrently with reads.

use std::collections::HashMap;
use std::path::PathBuf;

use async_trait::async_trait;
use sha2::{Digest, Sha256};
use tokio::sync::RwLock;

use crate::shared::error::WalletError;
use crate::shared::types::KeyType;
use crate::shared::WalletResult;

/// Key-value persistence of opaque secret blobs.
///
/// `auth_secret` is empty for the password path (the password goes to
/// KeyCrypto separately) and must be populated for biometric- or PIN-backed
/// items.
#[async_trait]
pub trait SecretStore: Send + Sync {
    async fn get(
        &self,
        wallet_id: &str,
        key_name: &str,
        key_type: KeyType,
        auth_secret: &str,
    ) -> WalletResult<String>;

    async fn put(
        &self,
        wallet_id: &str,
        key_name: &str,
        key_type: KeyType,
        blob: &str,
    ) -> WalletResult<()>;

    async fn exists(&self, wallet_id: &str, key_name: &str) -> WalletResult<bool>;

    async fn delete(&self, wallet_id: &str, key_name: &str) -> WalletResult<()>;
}

fn check_auth_secret(key_type: KeyType, auth_secret: &str) -> WalletResult<()> {
    if key_type.requires_auth_secret() && auth_secret.is_empty() {
        return Err(WalletError::validation(format!(
            "Auth secret required for {} items",
            key_type.as_str()
        )));
    }
    Ok(())
}

/// In-memory secret store for tests and ephemeral sessions
pub struct MemorySecretStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemorySecretStore {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    fn entry_key(wallet_id: &str, key_name: &str) -> String {
        format!("{}/{}", wallet_id, key_name)
    }
}

impl Default for MemorySecretStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SecretStore for MemorySecretStore {
    async fn get(
        &self,
        wallet_id: &str,
        key_name: &str,
        key_type: KeyType,
        auth_secret: &str,
    ) -> WalletResult<String> {
        check_auth_secret(key_type, auth_secret)?;
        let entries = self.entries.read().await;
        entries
            .get(&Self::entry_key(wallet_id, key_name))
            .cloned()
            .ok_or_else(|| WalletError::storage(format!("Secret not found: {}", key_name)))
    }

    async fn put(
        &self,
        wallet_id: &str,
        key_name: &str,
        _key_type: KeyType,
        blob: &str,
    ) -> WalletResult<()> {
        let mut entries = self.entries.write().await;
        entries.insert(Self::entry_key(wallet_id, key_name), blob.to_string());
        Ok(())
    }

    async fn exists(&self, wallet_id: &str, key_name: &str) -> WalletResult<bool> {
        let entries = self.entries.read().await;
        Ok(entries.contains_key(&Self::entry_key(wallet_id, key_name)))
    }

    async fn delete(&self, wallet_id: &str, key_name: &str) -> WalletResult<()> {
        let mut entries = self.entries.write().await;
        entries.remove(&Self::entry_key(wallet_id, key_name));
        Ok(())
    }
}

/// File-backed secret store: one blob per file under a base directory.
/// Filenames are hashed from (wallet id, key name) to prevent enumeration.
pub struct FileSecretStore {
    base_dir: PathBuf,
}

impl FileSecretStore {
    pub fn new(base_dir: impl Into<PathBuf>) -> WalletResult<Self> {
        let base_dir = base_dir.into();
        std::fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    fn file_path(&self, wallet_id: &str, key_name: &str) -> PathBuf {
        let mut hasher = Sha256::new();
        hasher.update(wallet_id.as_bytes());
        hasher.update(b"/");
        hasher.update(key_name.as_bytes());
        let hash = hasher.finalize();
        self.base_dir.join(format!("{}.blob", hex::encode(&hash[..16])))
    }
}

#[async_trait]
impl SecretStore for FileSecretStore {
    async fn get(
        &self,
        wallet_id: &str,
        key_name: &str,
        key_type: KeyType,
        auth_secret: &str,
    ) -> WalletResult<String> {
        check_auth_secret(key_type, auth_secret)?;
        let path = self.file_path(wallet_id, key_name);
        match tokio::fs::read_to_string(&path).await {
            Ok(blob) => Ok(blob),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(WalletError::storage(
                format!("Secret not found: {}", key_name),
            )),
            Err(e) => Err(e.into()),
        }
    }

    async fn put(
        &self,
        wallet_id: &str,
        key_name: &str,
        _key_type: KeyType,
        blob: &str,
    ) -> WalletResult<()> {
        let path = self.file_path(wallet_id, key_name);
        tokio::fs::write(&path, blob).await?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let perms = std::fs::Permissions::from_mode(0o600);
            tokio::fs::set_permissions(&path, perms).await?;
        }
        Ok(())
    }

    async fn exists(&self, wallet_id: &str, key_name: &str) -> WalletResult<bool> {
        Ok(self.file_path(wallet_id, key_name).exists())
    }

    async fn delete(&self, wallet_id: &str, key_name: &str) -> WalletResult<()> {
        let path = self.file_path(wallet_id, key_name);
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_store_round_trip() {
        let store = MemorySecretStore::new();
        store
            .put("w1", "MASTER_PASSWORD", KeyType::MasterPassword, "deadbeef")
            .await
            .expect("Failed to store blob");

        let blob = store
            .get("w1", "MASTER_PASSWORD", KeyType::MasterPassword, "")
            .await
            .expect("Failed to read blob");
        assert_eq!(blob, "deadbeef");

        assert!(store.exists("w1", "MASTER_PASSWORD").await.expect("exists failed"));
        store.delete("w1", "MASTER_PASSWORD").await.expect("delete failed");
        assert!(!store.exists("w1", "MASTER_PASSWORD").await.expect("exists failed"));
    }

    #[tokio::test]
    async fn test_biometric_items_require_auth_secret() {
        let store = MemorySecretStore::new();
        store
            .put("w1", "BIOMETRICS", KeyType::Biometrics, "deadbeef")
            .await
            .expect("Failed to store blob");

        let denied = store.get("w1", "BIOMETRICS", KeyType::Biometrics, "").await;
        assert!(matches!(denied, Err(WalletError::Validation(_))));

        let granted = store
            .get("w1", "BIOMETRICS", KeyType::Biometrics, "platform-secret")
            .await
            .expect("Failed to read blob");
        assert_eq!(granted, "deadbeef");
    }

    #[tokio::test]
    async fn test_file_store_round_trip() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let store = FileSecretStore::new(dir.path()).expect("Failed to create store");

        store
            .put("w1", "MASTER_PASSWORD", KeyType::MasterPassword, "cafebabe")
            .await
            .expect("Failed to store blob");
        let blob = store
            .get("w1", "MASTER_PASSWORD", KeyType::MasterPassword, "")
            .await
            .expect("Failed to read blob");
        assert_eq!(blob, "cafebabe");

        // Missing items surface as storage errors
        let missing = store
            .get("w2", "MASTER_PASSWORD", KeyType::MasterPassword, "")
            .await;
        assert!(matches!(missing, Err(WalletError::Storage(_))));
    }

    #[tokio::test]
    async fn test_file_store_filenames_are_hashed() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let store = FileSecretStore::new(dir.path()).expect("Failed to create store");
        store
            .put("w1", "MASTER_PASSWORD", KeyType::MasterPassword, "00")
            .await
            .expect("Failed to store blob");

        for entry in std::fs::read_dir(dir.path()).expect("Failed to list dir") {
            let name = entry.expect("Failed to read entry").file_name();
            let name = name.to_string_lossy().into_owned();
            assert!(!name.contains("w1"));
            assert!(!name.contains("MASTER_PASSWORD"));
        }
    }
}
