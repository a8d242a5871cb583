//! Master key material and hierarchical key derivation
//!
//! The master key exists transiently in memory during wallet creation,
//! restore, and signing. It is never persisted unencrypted and is zeroized
//! on drop. Derivation of accounts and address keys goes through the
//! [`KeyDerivationEngine`] trait so the core logic can be tested without
//! linking a production cryptographic backend.

use bip39::Mnemonic;
use hmac::{Hmac, Mac};
use rand_core::OsRng;
use rand_core::RngCore;
use sha2::{Digest, Sha256, Sha512};
use zeroize::Zeroizing;

use crate::shared::constants::{
    ACCOUNT_KEY_SIZE, ADDRESS_PAYLOAD_SIZE, MASTER_KEY_SIZE, SUPPORTED_MNEMONIC_STRENGTHS,
};
use crate::shared::error::WalletError;
use crate::shared::types::AddressType;
use crate::shared::WalletResult;

type HmacSha512 = Hmac<Sha512>;

/// Raw master key material.
///
/// No `Debug`, `Clone`, or serde implementations: the bytes must not leak
/// into logs or serialized state. Ownership moves with the operation that
/// needs the key; memory is zeroized when the value drops.
pub struct MasterKey(Zeroizing<[u8; MASTER_KEY_SIZE]>);

impl MasterKey {
    pub fn from_bytes(bytes: &[u8]) -> WalletResult<Self> {
        if bytes.len() != MASTER_KEY_SIZE {
            return Err(WalletError::cardano("Invalid master key length"));
        }
        let mut key = Zeroizing::new([0u8; MASTER_KEY_SIZE]);
        key.copy_from_slice(bytes);
        Ok(Self(key))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &*self.0
    }
}

/// Generate a fresh BIP39 mnemonic with the given entropy strength in bits
pub fn generate_mnemonic(strength_bits: usize) -> WalletResult<String> {
    if !SUPPORTED_MNEMONIC_STRENGTHS.contains(&strength_bits) {
        return Err(WalletError::validation(format!(
            "Unsupported mnemonic strength: {}",
            strength_bits
        )));
    }
    let mut entropy = Zeroizing::new(vec![0u8; strength_bits / 8]);
    let mut rng = OsRng;
    rng.fill_bytes(&mut entropy);
    let mnemonic = Mnemonic::from_entropy_in(bip39::Language::English, &entropy)
        .map_err(|e| WalletError::cardano(format!("Mnemonic generation failed: {}", e)))?;
    Ok(mnemonic.to_string())
}

/// Derive the master key from a mnemonic. The mnemonic is consumed for its
/// entropy and not retained.
pub fn master_key_from_mnemonic(
    engine: &dyn KeyDerivationEngine,
    mnemonic: &str,
) -> WalletResult<MasterKey> {
    let mnemonic = Mnemonic::parse_in_normalized(bip39::Language::English, mnemonic)
        .map_err(|e| WalletError::validation(format!("Invalid BIP39 mnemonic: {}", e)))?;
    let entropy = Zeroizing::new(mnemonic.to_entropy());
    engine.master_key_from_entropy(&entropy)
}

/// Abstract capability interface over the hierarchical-deterministic
/// derivation primitives. All operations are pure and deterministic.
pub trait KeyDerivationEngine: Send + Sync {
    /// Stretch mnemonic entropy into a master key
    fn master_key_from_entropy(&self, entropy: &[u8]) -> WalletResult<MasterKey>;

    /// Derive the account-level key from the master key and protocol magic
    fn account_key(
        &self,
        master_key: &MasterKey,
        protocol_magic: u32,
    ) -> WalletResult<Zeroizing<[u8; ACCOUNT_KEY_SIZE]>>;

    /// Derive the per-address secret key for a branch and index
    fn address_key(
        &self,
        account_key: &[u8],
        address_type: AddressType,
        index: u32,
    ) -> WalletResult<Zeroizing<[u8; MASTER_KEY_SIZE]>>;

    /// Public address payload (digest of the branch public key)
    fn address_payload(&self, address_key: &[u8]) -> WalletResult<[u8; ADDRESS_PAYLOAD_SIZE]>;
}

/// Default derivation engine: HMAC-SHA-512 hierarchical derivation with
/// Ed25519 public keys.
pub struct Ed25519Engine;

impl Ed25519Engine {
    pub fn new() -> Self {
        Self
    }

    fn hmac_derive(key: &[u8], message: &[u8]) -> WalletResult<Zeroizing<[u8; 32]>> {
        let mut mac = HmacSha512::new_from_slice(key)?;
        mac.update(message);
        let digest = mac.finalize().into_bytes();
        let mut out = Zeroizing::new([0u8; 32]);
        out.copy_from_slice(&digest[..32]);
        Ok(out)
    }
}

impl Default for Ed25519Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyDerivationEngine for Ed25519Engine {
    fn master_key_from_entropy(&self, entropy: &[u8]) -> WalletResult<MasterKey> {
        if entropy.is_empty() {
            return Err(WalletError::cardano("Empty entropy"));
        }
        let key = Self::hmac_derive(b"adawallet/master", entropy)?;
        MasterKey::from_bytes(&*key)
    }

    fn account_key(
        &self,
        master_key: &MasterKey,
        protocol_magic: u32,
    ) -> WalletResult<Zeroizing<[u8; ACCOUNT_KEY_SIZE]>> {
        let mut message = Vec::with_capacity(12);
        message.extend_from_slice(b"account/");
        message.extend_from_slice(&protocol_magic.to_be_bytes());
        Self::hmac_derive(master_key.as_bytes(), &message)
    }

    fn address_key(
        &self,
        account_key: &[u8],
        address_type: AddressType,
        index: u32,
    ) -> WalletResult<Zeroizing<[u8; MASTER_KEY_SIZE]>> {
        let mut message = [0u8; 5];
        message[0] = address_type.branch();
        message[1..].copy_from_slice(&index.to_be_bytes());
        Self::hmac_derive(account_key, &message)
    }

    fn address_payload(&self, address_key: &[u8]) -> WalletResult<[u8; ADDRESS_PAYLOAD_SIZE]> {
        let key_bytes: [u8; 32] = address_key
            .try_into()
            .map_err(|_| WalletError::cardano("Invalid address key length"))?;
        let signing_key = ed25519_dalek::SigningKey::from_bytes(&key_bytes);
        let public_key = signing_key.verifying_key();

        let digest = Sha256::digest(public_key.as_bytes());
        let mut payload = [0u8; ADDRESS_PAYLOAD_SIZE];
        payload.copy_from_slice(&digest[..ADDRESS_PAYLOAD_SIZE]);
        Ok(payload)
    }
}

/// Account derived from a master key and a protocol magic. Holds the
/// derived account key internally; owns no other secret bytes.
pub struct Account {
    key: Zeroizing<[u8; ACCOUNT_KEY_SIZE]>,
    protocol_magic: u32,
}

impl Account {
    pub fn from_master_key(
        engine: &dyn KeyDerivationEngine,
        master_key: &MasterKey,
        protocol_magic: u32,
    ) -> WalletResult<Self> {
        let key = engine.account_key(master_key, protocol_magic)?;
        Ok(Self {
            key,
            protocol_magic,
        })
    }

    pub fn protocol_magic(&self) -> u32 {
        self.protocol_magic
    }

    pub(crate) fn key_bytes(&self) -> &[u8] {
        &*self.key
    }
}
