// common/src/lib.rs
pub mod config;
pub mod error;
pub mod flow;
pub mod raydium;
pub mod rpc;
pub mod wallet;

#[cfg(test)]
mod test_utils;

pub use config::{load_config, Config, FeeTier, SwapParams, TxVersion};
pub use error::{Result, SwapError};
pub use flow::{decode_transaction, run, swap_flow};
pub use raydium::{RaydiumClient, SwapApi};
pub use rpc::{RpcSender, TransactionSender};
pub use wallet::{load_keypair, read_keypair_json, SignerRegistry};
