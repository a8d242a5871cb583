//! Password-based encryption of the master key
//!
//! The persisted representation is hex(salt || nonce || ciphertext) as a
//! single opaque string. Salt is 32 bytes, nonce 12 bytes, both freshly
//! random per call; the layout must not change or previously created
//! wallets stop decrypting.

use chacha20poly1305::aead::Aead;
use chacha20poly1305::{ChaCha20Poly1305, Key, KeyInit, Nonce};
use pbkdf2::pbkdf2_hmac;
use rand_core::OsRng;
use rand_core::RngCore;
use sha2::Sha512;
use zeroize::Zeroizing;

use crate::core::crypto::keys::MasterKey;
use crate::shared::constants::{
    KEK_SIZE, MIN_BLOB_SIZE, NONCE_SIZE, PBKDF2_ITERATIONS, SALT_SIZE,
};
use crate::shared::error::WalletError;
use crate::shared::types::EncryptedKeyBlob;
use crate::shared::WalletResult;

/// Symmetric encryption of the raw master key under a user password
pub struct KeyCrypto;

impl KeyCrypto {
    pub fn new() -> Self {
        Self
    }

    /// Encrypt the master key under a password.
    ///
    /// Generates a fresh salt and nonce on every call; identical inputs
    /// therefore produce different blobs.
    pub fn encrypt(&self, password: &str, master_key: &MasterKey) -> WalletResult<EncryptedKeyBlob> {
        let mut salt = [0u8; SALT_SIZE];
        let mut nonce = [0u8; NONCE_SIZE];
        let mut rng = OsRng;
        rng.fill_bytes(&mut salt);
        rng.fill_bytes(&mut nonce);

        let kek = Self::derive_kek(password, &salt);
        let cipher = ChaCha20Poly1305::new(Key::from_slice(&*kek));
        let ciphertext = cipher
            .encrypt(Nonce::from_slice(&nonce), master_key.as_bytes())
            .map_err(|e| WalletError::cardano(format!("Encryption failed: {}", e)))?;

        let mut blob = Vec::with_capacity(SALT_SIZE + NONCE_SIZE + ciphertext.len());
        blob.extend_from_slice(&salt);
        blob.extend_from_slice(&nonce);
        blob.extend_from_slice(&ciphertext);
        Ok(hex::encode(blob))
    }

    /// Decrypt a previously encrypted master key blob.
    ///
    /// Authentication failure means wrong password or corrupted ciphertext;
    /// both collapse to [`WalletError::WrongPassword`] so the user-facing
    /// error path learns nothing about blob structure. Malformed blobs
    /// (bad hex, truncated layout) fail with a Cardano error instead.
    pub fn decrypt(&self, password: &str, blob: &EncryptedKeyBlob) -> WalletResult<MasterKey> {
        let bytes = hex::decode(blob)
            .map_err(|_| WalletError::cardano("Malformed encrypted key blob"))?;
        if bytes.len() < MIN_BLOB_SIZE {
            return Err(WalletError::cardano("Encrypted key blob too short"));
        }

        let (salt, rest) = bytes.split_at(SALT_SIZE);
        let (nonce, ciphertext) = rest.split_at(NONCE_SIZE);

        let kek = Self::derive_kek(password, salt);
        let cipher = ChaCha20Poly1305::new(Key::from_slice(&*kek));
        let plaintext = Zeroizing::new(
            cipher
                .decrypt(Nonce::from_slice(nonce), ciphertext)
                .map_err(|_| WalletError::WrongPassword)?,
        );

        MasterKey::from_bytes(&plaintext)
    }

    /// Derive the key-encryption key from the password and salt
    fn derive_kek(password: &str, salt: &[u8]) -> Zeroizing<[u8; KEK_SIZE]> {
        let mut kek = Zeroizing::new([0u8; KEK_SIZE]);
        pbkdf2_hmac::<Sha512>(password.as_bytes(), salt, PBKDF2_ITERATIONS, &mut *kek);
        kek
    }
}

impl Default for KeyCrypto {
    fn default() -> Self {
        Self::new()
    }
}
