use crate::config::Config;
use crate::error::{Result, SwapError};
use async_trait::async_trait;
use solana_client::{nonblocking::rpc_client::RpcClient, rpc_config::RpcSendTransactionConfig};
use solana_sdk::{
    commitment_config::CommitmentConfig, signature::Signature, transaction::VersionedTransaction,
};

/// Submits signed transactions to the network.
#[async_trait]
pub trait TransactionSender: Send + Sync {
    async fn send(&self, tx: &VersionedTransaction) -> Result<Signature>;
}

pub struct RpcSender {
    client: RpcClient,
    skip_preflight: bool,
}

impl RpcSender {
    pub fn new(cfg: &Config) -> Self {
        Self {
            client: RpcClient::new_with_commitment(cfg.rpc_url.clone(), CommitmentConfig::confirmed()),
            skip_preflight: cfg.skip_preflight,
        }
    }
}

#[async_trait]
impl TransactionSender for RpcSender {
    async fn send(&self, tx: &VersionedTransaction) -> Result<Signature> {
        let config = RpcSendTransactionConfig {
            skip_preflight: self.skip_preflight,
            ..Default::default()
        };

        self.client
            .send_transaction_with_config(tx, config)
            .await
            .map_err(|e| SwapError::Submit(e.to_string()))
    }
}
