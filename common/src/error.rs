//! Error types for the swap flow

use solana_sdk::pubkey::Pubkey;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SwapError {
    #[error("Credential error: {0}")]
    Credential(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Priority fee request failed: {0}")]
    PriorityFee(String),

    #[error("Failed to get quote: {0}")]
    Quote(String),

    #[error("Swap transaction request failed: {0}")]
    Build(String),

    #[error("Failed to deserialize transaction: {0}")]
    Deserialize(String),

    #[error("No signer available for required key {0}")]
    MissingSigner(Pubkey),

    #[error("Failed to send transaction: {0}")]
    Submit(String),
}

pub type Result<T> = std::result::Result<T, SwapError>;
