// ─────────────────── Swap Flow (fee -> quote -> build -> sign & send) ───────────────────

use crate::config::Config;
use crate::error::{Result, SwapError};
use crate::raydium::{RaydiumClient, SwapApi, SwapTransactionRequest};
use crate::rpc::{RpcSender, TransactionSender};
use crate::wallet::{load_keypair, SignerRegistry};
use base64::decode;
use bincode::deserialize;
use log::info;
use reqwest::Client;
use solana_sdk::{
    pubkey::Pubkey,
    signature::{Signature, Signer},
    transaction::VersionedTransaction,
};

/// Decode one base64 payload from the build endpoint. `n` is the 1-based
/// position used in error messages.
pub fn decode_transaction(n: usize, payload: &str) -> Result<VersionedTransaction> {
    let bytes = decode(payload)
        .map_err(|e| SwapError::Decode(format!("failed to decode transaction {}: {}", n, e)))?;

    let tx: VersionedTransaction = deserialize(&bytes)
        .map_err(|e| SwapError::Deserialize(format!("transaction {}: {}", n, e)))?;
    tx.sanitize()
        .map_err(|e| SwapError::Deserialize(format!("transaction {}: {}", n, e)))?;

    Ok(tx)
}

/// Run a single swap and return the submitted signatures in order.
///
/// Any error aborts the remaining transactions; ones already submitted are
/// not rolled back.
pub async fn swap_flow<A, S>(
    cfg: &Config,
    api: &A,
    sender: &S,
    signers: &SignerRegistry<'_>,
    wallet: &Pubkey,
) -> Result<Vec<Signature>>
where
    A: SwapApi + ?Sized,
    S: TransactionSender + ?Sized,
{
    info!("Getting priority fee...");
    let fees = api.priority_fee().await?;
    let fee = fees.pick(cfg.swap.fee_tier);
    info!("Using compute unit price {} ({:?})", fee, cfg.swap.fee_tier);

    info!("Getting swap quote...");
    let quote = api.swap_quote(&cfg.swap).await?;
    info!(
        "Quote {}: in {} -> out {}",
        quote.id, quote.data["inputAmount"], quote.data["outputAmount"]
    );

    info!("Getting swap transactions...");
    let request = SwapTransactionRequest::new(&cfg.swap, fee, &quote, wallet);
    let built = api.swap_transactions(&request).await?;

    let mut signatures = Vec::with_capacity(built.data.len());
    for (idx, payload) in built.data.iter().enumerate() {
        let n = idx + 1;
        info!("Processing transaction {}...", n);
        let mut tx = decode_transaction(n, &payload.transaction)?;

        info!("Signing transaction {}...", n);
        signers.sign(&mut tx)?;

        info!("Sending transaction {}...", n);
        let sig = sender
            .send(&tx)
            .await
            .map_err(|e| match e {
                SwapError::Submit(msg) => SwapError::Submit(format!("transaction {}: {}", n, msg)),
                other => other,
            })?;

        println!("Transaction {} sent, signature: {}", n, sig);
        println!("🔍{}", cfg.explorer_link(&sig));
        signatures.push(sig);
    }

    Ok(signatures)
}

/// Wire the production clients from `cfg` and run the swap.
pub async fn run(cfg: &Config) -> Result<Vec<Signature>> {
    let kp = load_keypair(cfg)?;
    let wallet = kp.pubkey();
    info!("Using wallet: {}", wallet);

    let http = Client::builder().build()?;
    let api = RaydiumClient::new(http, cfg);
    let sender = RpcSender::new(cfg);
    let signers = SignerRegistry::with_keypair(&kp);

    swap_flow(cfg, &api, &sender, &signers, &wallet).await
}
