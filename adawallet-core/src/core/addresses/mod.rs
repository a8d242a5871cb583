//! Address derivation and validation
//!
//! Addresses are a pure function of (account, branch, index): the same
//! inputs always produce the same address. The textual encoding is base-58
//! with a 4-byte double-SHA-256 checksum over the version byte and the
//! 28-byte payload.

use sha2::{Digest, Sha256};

use crate::core::crypto::keys::{Account, KeyDerivationEngine};
use crate::shared::constants::{
    ADDRESS_CHECKSUM_SIZE, ADDRESS_PAYLOAD_SIZE, ADDRESS_VERSION_BYTE,
};
use crate::shared::error::WalletError;
use crate::shared::types::{Address, AddressType};
use crate::shared::WalletResult;

/// Deterministic derivation of external/internal addresses
pub struct AddressDeriver<'a> {
    engine: &'a dyn KeyDerivationEngine,
}

impl<'a> AddressDeriver<'a> {
    pub fn new(engine: &'a dyn KeyDerivationEngine) -> Self {
        Self { engine }
    }

    /// Derive one address per index. Output is length- and order-preserving:
    /// `output[i]` corresponds to `indexes[i]`.
    pub fn derive_addresses(
        &self,
        account: &Account,
        address_type: AddressType,
        indexes: &[u32],
    ) -> WalletResult<Vec<Address>> {
        let mut addresses = Vec::with_capacity(indexes.len());
        for &index in indexes {
            let address_key = self
                .engine
                .address_key(account.key_bytes(), address_type, index)?;
            let payload = self.engine.address_payload(&*address_key)?;
            addresses.push(encode_address(&payload));
        }
        Ok(addresses)
    }
}

/// Encode a payload as a checksummed base-58 address
fn encode_address(payload: &[u8; ADDRESS_PAYLOAD_SIZE]) -> Address {
    let mut bytes = Vec::with_capacity(1 + ADDRESS_PAYLOAD_SIZE + ADDRESS_CHECKSUM_SIZE);
    bytes.push(ADDRESS_VERSION_BYTE);
    bytes.extend_from_slice(payload);
    let checksum = checksum(&bytes);
    bytes.extend_from_slice(&checksum);
    bs58::encode(bytes).into_string()
}

fn checksum(data: &[u8]) -> [u8; ADDRESS_CHECKSUM_SIZE] {
    let digest = Sha256::digest(Sha256::digest(data));
    let mut out = [0u8; ADDRESS_CHECKSUM_SIZE];
    out.copy_from_slice(&digest[..ADDRESS_CHECKSUM_SIZE]);
    out
}

/// Structural validity check. Total over all strings: decoding errors are
/// reported as `false`, never propagated.
pub fn is_valid_address(address: &str) -> bool {
    let bytes = match bs58::decode(address).into_vec() {
        Ok(bytes) => bytes,
        Err(_) => return false,
    };
    if bytes.len() != 1 + ADDRESS_PAYLOAD_SIZE + ADDRESS_CHECKSUM_SIZE {
        return false;
    }
    if bytes[0] != ADDRESS_VERSION_BYTE {
        return false;
    }
    let (body, tail) = bytes.split_at(bytes.len() - ADDRESS_CHECKSUM_SIZE);
    tail == checksum(body)
}

/// Decode the textual address encoding to raw bytes
pub fn address_to_hex(address: &str) -> WalletResult<Vec<u8>> {
    bs58::decode(address)
        .into_vec()
        .map_err(WalletError::from)
}
