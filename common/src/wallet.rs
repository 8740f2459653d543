//! Credential loading and transaction signing.
//!
//! The keypair is read once at startup. Signing goes through a
//! [`SignerRegistry`] so every required signature is resolved by public key.

use crate::config::Config;
use crate::error::{Result, SwapError};
use log::debug;
use solana_sdk::{
    pubkey::Pubkey,
    signature::{Keypair, Signature, Signer},
    transaction::VersionedTransaction,
};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Load the wallet keypair: `SECRET_KEY` (base58) if configured, otherwise the
/// JSON byte-array file at `keypair_path`.
pub fn load_keypair(cfg: &Config) -> Result<Keypair> {
    match cfg.secret_key.as_deref() {
        Some(secret_b58) => keypair_from_base58(secret_b58),
        None => read_keypair_json(&cfg.keypair_path),
    }
}

/// Read a keypair file holding a JSON array of 64 byte values.
pub fn read_keypair_json(path: impl AsRef<Path>) -> Result<Keypair> {
    let path = path.as_ref();
    let data = fs::read_to_string(path).map_err(|e| {
        SwapError::Credential(format!("Failed to read keypair file {}: {}", path.display(), e))
    })?;

    let bytes: Vec<u8> = serde_json::from_str(&data)
        .map_err(|e| SwapError::Credential(format!("Failed to parse private key JSON: {}", e)))?;

    keypair_from_bytes(&bytes)
}

pub fn keypair_from_base58(secret_b58: &str) -> Result<Keypair> {
    let bytes = bs58::decode(secret_b58.trim())
        .into_vec()
        .map_err(|e| SwapError::Credential(format!("Invalid base58 secret key: {}", e)))?;

    keypair_from_bytes(&bytes)
}

fn keypair_from_bytes(bytes: &[u8]) -> Result<Keypair> {
    if bytes.len() != 64 {
        return Err(SwapError::Credential(format!(
            "Invalid keypair length: {}",
            bytes.len()
        )));
    }

    Keypair::from_bytes(bytes)
        .map_err(|e| SwapError::Credential(format!("Failed to create keypair from bytes: {}", e)))
}

// ─────────────────── Signing ───────────────────

/// Signers available to this process, keyed by public key.
#[derive(Default)]
pub struct SignerRegistry<'a> {
    signers: HashMap<Pubkey, &'a Keypair>,
}

impl<'a> SignerRegistry<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_keypair(keypair: &'a Keypair) -> Self {
        let mut registry = Self::new();
        registry.insert(keypair);
        registry
    }

    pub fn insert(&mut self, keypair: &'a Keypair) {
        self.signers.insert(keypair.pubkey(), keypair);
    }

    pub fn get(&self, pubkey: &Pubkey) -> Option<&'a Keypair> {
        self.signers.get(pubkey).copied()
    }

    /// Sign every required signature slot of `tx`.
    ///
    /// Fails with [`SwapError::MissingSigner`] on the first required key with
    /// no registered keypair, and with [`SwapError::Deserialize`] when the
    /// header asks for more signers than the message has keys. `tx` is left
    /// untouched on error.
    pub fn sign(&self, tx: &mut VersionedTransaction) -> Result<()> {
        let required = usize::from(tx.message.header().num_required_signatures);
        let keys = tx.message.static_account_keys();
        if keys.len() < required {
            return Err(SwapError::Deserialize(format!(
                "message requires {} signatures but has {} account keys",
                required,
                keys.len()
            )));
        }
        let message_bytes = tx.message.serialize();

        let mut signatures = tx.signatures.clone();
        signatures.resize(required, Signature::default());

        for (idx, key) in keys.iter().take(required).enumerate() {
            let keypair = self.get(key).ok_or(SwapError::MissingSigner(*key))?;
            signatures[idx] = keypair.sign_message(&message_bytes);
            debug!("Signed slot {} for {}", idx, key);
        }

        tx.signatures = signatures;
        Ok(())
    }
}
