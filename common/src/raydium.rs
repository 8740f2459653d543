//! Raydium trade API: priority fee, quote and transaction build endpoints.

use crate::config::{Config, FeeTier, SwapParams, TxVersion};
use crate::error::{Result, SwapError};
use async_trait::async_trait;
use log::info;
use reqwest::{header::CONTENT_TYPE, Client, Request};
use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;
use solana_sdk::pubkey::Pubkey;

// ─────────────────── Response models ───────────────────

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriorityFeeTiers {
    pub vh: u64,
    pub h: u64,
    pub m: u64,
}

impl PriorityFeeTiers {
    /// Compute-unit price in micro-lamports for `tier`.
    pub fn pick(&self, tier: FeeTier) -> u64 {
        match tier {
            FeeTier::Medium => self.m,
            FeeTier::High => self.h,
            FeeTier::VeryHigh => self.vh,
        }
    }
}

#[derive(Deserialize, Debug)]
pub struct PriorityFeeData {
    pub default: PriorityFeeTiers,
}

#[derive(Deserialize, Debug)]
pub struct PriorityFeeResponse {
    #[serde(default)]
    pub id: String,
    pub success: bool,
    pub data: Option<PriorityFeeData>,
}

#[derive(Deserialize, Debug)]
struct QuoteEnvelope {
    #[serde(default)]
    id: String,
    success: bool,
    #[serde(default)]
    data: serde_json::Value,
}

/// A successful quote. `raw` is the response body exactly as received and is
/// what gets forwarded to the build endpoint.
#[derive(Debug)]
pub struct SwapQuote {
    pub id: String,
    pub data: serde_json::Value,
    pub raw: Box<RawValue>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct SwapTransactionPayload {
    /// Base64-encoded serialized transaction
    pub transaction: String,
}

#[derive(Deserialize, Debug)]
pub struct SwapTransactionResponse {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub version: String,
    pub success: bool,
    #[serde(default)]
    pub msg: Option<String>,
    #[serde(default)]
    pub data: Vec<SwapTransactionPayload>,
}

// ─────────────────── Request body ───────────────────

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct SwapTransactionRequest<'a> {
    pub compute_unit_price_micro_lamports: String,
    pub swap_response: &'a RawValue,
    pub tx_version: TxVersion,
    pub wallet: String,
    pub wrap_sol: bool,
    pub unwrap_sol: bool,
}

impl<'a> SwapTransactionRequest<'a> {
    pub fn new(params: &SwapParams, fee: u64, quote: &'a SwapQuote, wallet: &Pubkey) -> Self {
        Self {
            compute_unit_price_micro_lamports: fee.to_string(),
            swap_response: &quote.raw,
            tx_version: params.tx_version,
            wallet: wallet.to_string(),
            wrap_sol: params.wrap_sol,
            unwrap_sol: params.unwrap_sol,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self)
            .map_err(|e| SwapError::Build(format!("failed to marshal swap tx body: {}", e)))
    }
}

// ─────────────────── Response decoding ───────────────────

pub fn parse_priority_fee(body: &str) -> Result<PriorityFeeTiers> {
    let resp: PriorityFeeResponse = serde_json::from_str(body).map_err(|e| {
        SwapError::Decode(format!("failed to decode priority fee response: {}: {}", e, body))
    })?;

    match resp.data {
        Some(data) if resp.success => Ok(data.default),
        _ => Err(SwapError::PriorityFee(body.to_string())),
    }
}

pub fn parse_swap_quote(body: String) -> Result<SwapQuote> {
    let envelope: QuoteEnvelope = serde_json::from_str(&body)
        .map_err(|e| SwapError::Quote(format!("failed to decode swap quote: {}: {}", e, body)))?;

    if !envelope.success {
        return Err(SwapError::Quote(body));
    }

    let raw = RawValue::from_string(body)
        .map_err(|e| SwapError::Quote(format!("failed to keep raw swap quote: {}", e)))?;

    Ok(SwapQuote {
        id: envelope.id,
        data: envelope.data,
        raw,
    })
}

pub fn parse_swap_transactions(body: &str) -> Result<SwapTransactionResponse> {
    let resp: SwapTransactionResponse = serde_json::from_str(body).map_err(|e| {
        SwapError::Build(format!("failed to decode swap transactions: {}: {}", e, body))
    })?;

    if !resp.success {
        return Err(SwapError::Build(body.to_string()));
    }
    if resp.data.is_empty() {
        return Err(SwapError::Build(format!("no transactions returned: {}", body)));
    }

    Ok(resp)
}

// ─────────────────── Client ───────────────────

/// The three calls the swap flow makes against the trade API.
#[async_trait]
pub trait SwapApi: Send + Sync {
    async fn priority_fee(&self) -> Result<PriorityFeeTiers>;

    async fn swap_quote(&self, params: &SwapParams) -> Result<SwapQuote>;

    async fn swap_transactions(
        &self,
        request: &SwapTransactionRequest<'_>,
    ) -> Result<SwapTransactionResponse>;
}

pub struct RaydiumClient {
    http: Client,
    base_host: String,
    swap_host: String,
}

impl RaydiumClient {
    pub fn new(http: Client, cfg: &Config) -> Self {
        Self {
            http,
            base_host: cfg.base_host.clone(),
            swap_host: cfg.swap_host.clone(),
        }
    }

    fn priority_fee_request(&self) -> reqwest::Result<Request> {
        self.http
            .get(format!("{}/v2/main/priority-fee", self.base_host))
            .build()
    }

    fn quote_request(&self, params: &SwapParams) -> reqwest::Result<Request> {
        self.http
            .get(format!("{}/compute/swap-base-in", self.swap_host))
            .query(&[
                ("inputMint", params.input_mint.clone()),
                ("outputMint", params.output_mint.clone()),
                ("amount", params.amount.to_string()),
                ("slippageBps", params.slippage_bps.to_string()),
                ("txVersion", params.tx_version.as_str().to_string()),
            ])
            .build()
    }

    fn swap_transactions_request(&self, body: String) -> reqwest::Result<Request> {
        self.http
            .post(format!("{}/transaction/swap-base-in", self.swap_host))
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .build()
    }
}

#[async_trait]
impl SwapApi for RaydiumClient {
    async fn priority_fee(&self) -> Result<PriorityFeeTiers> {
        let request = self.priority_fee_request()?;
        let body = self.http.execute(request).await?.text().await?;
        info!("Priority fee response: {}", body);

        parse_priority_fee(&body)
    }

    async fn swap_quote(&self, params: &SwapParams) -> Result<SwapQuote> {
        let request = self.quote_request(params)?;
        info!("Swap URL: {}", request.url());

        let body = self.http.execute(request).await?.text().await?;
        info!("Swap quote response: {}", body);

        parse_swap_quote(body)
    }

    async fn swap_transactions(
        &self,
        request: &SwapTransactionRequest<'_>,
    ) -> Result<SwapTransactionResponse> {
        let body = request.to_json()?;
        info!("Swap transaction request: {}", body);

        let build_err =
            |e: reqwest::Error| SwapError::Build(format!("failed to get swap transactions: {}", e));
        let http_request = self.swap_transactions_request(body).map_err(build_err)?;
        let response = self.http.execute(http_request).await.map_err(build_err)?;
        let text = response
            .text()
            .await
            .map_err(|e| SwapError::Build(format!("failed to read swap transaction response: {}", e)))?;
        info!("Swap transaction response: {}", text);

        parse_swap_transactions(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::Method;

    const QUOTE_BODY: &str = r#"{"id":"q-1", "success":true,"version":"V1","data":{"swapType":"BaseIn","inputAmount":"100000","outputAmount":"1637","routePlan":[]}}"#;

    #[test]
    fn test_parse_priority_fee() {
        let tiers = parse_priority_fee(
            r#"{"id":"fee","success":true,"data":{"default":{"vh":1,"h":2,"m":3}}}"#,
        )
        .unwrap();

        assert_eq!(tiers, PriorityFeeTiers { vh: 1, h: 2, m: 3 });
        assert_eq!(tiers.pick(FeeTier::High), 2);
        assert_eq!(tiers.pick(FeeTier::Medium), 3);
        assert_eq!(tiers.pick(FeeTier::VeryHigh), 1);
    }

    #[test]
    fn test_parse_priority_fee_failure_carries_body() {
        let body = r#"{"id":"fee","success":false}"#;
        let err = parse_priority_fee(body).unwrap_err();
        assert!(matches!(err, SwapError::PriorityFee(ref msg) if msg == body));
    }

    #[test]
    fn test_parse_priority_fee_malformed() {
        let err = parse_priority_fee("<html>502</html>").unwrap_err();
        assert!(matches!(err, SwapError::Decode(ref msg) if msg.contains("<html>502</html>")));
    }

    #[test]
    fn test_parse_swap_quote_keeps_raw_body() {
        let quote = parse_swap_quote(QUOTE_BODY.to_string()).unwrap();

        assert_eq!(quote.id, "q-1");
        assert_eq!(quote.raw.get(), QUOTE_BODY);
        assert_eq!(quote.data["outputAmount"], "1637");
    }

    #[test]
    fn test_parse_swap_quote_failure_carries_body() {
        let body = r#"{"id":"q-2","success":false,"msg":"ROUTE_NOT_FOUND"}"#;
        let err = parse_swap_quote(body.to_string()).unwrap_err();
        assert!(matches!(err, SwapError::Quote(ref msg) if msg == body));
    }

    #[test]
    fn test_parse_swap_quote_malformed() {
        let err = parse_swap_quote("not json".to_string()).unwrap_err();
        assert!(matches!(err, SwapError::Quote(_)));
    }

    #[test]
    fn test_request_body_embeds_quote_verbatim() {
        let quote = parse_swap_quote(QUOTE_BODY.to_string()).unwrap();
        let wallet = Pubkey::new_unique();
        let params = SwapParams::default();

        let body = SwapTransactionRequest::new(&params, 2, &quote, &wallet)
            .to_json()
            .unwrap();

        assert!(body.contains(&format!("\"swapResponse\":{}", QUOTE_BODY)));

        let value: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(value["computeUnitPriceMicroLamports"], "2");
        assert_eq!(value["txVersion"], "V0");
        assert_eq!(value["wallet"], wallet.to_string());
        assert_eq!(value["wrapSol"], true);
        assert_eq!(value["unwrapSol"], false);
    }

    #[test]
    fn test_parse_swap_transactions() {
        let resp = parse_swap_transactions(
            r#"{"id":"tx","version":"V1","success":true,"data":[{"transaction":"AQID"},{"transaction":"BAUG"}]}"#,
        )
        .unwrap();

        assert_eq!(resp.version, "V1");
        let payloads: Vec<_> = resp.data.iter().map(|p| p.transaction.as_str()).collect();
        assert_eq!(payloads, vec!["AQID", "BAUG"]);
    }

    #[test]
    fn test_parse_swap_transactions_failure_carries_body() {
        let body = r#"{"id":"tx","version":"V1","success":false,"msg":"REQ_WALLET_ERROR"}"#;
        let err = parse_swap_transactions(body).unwrap_err();
        assert!(matches!(err, SwapError::Build(ref msg) if msg == body));
    }

    #[test]
    fn test_parse_swap_transactions_empty_list() {
        let err = parse_swap_transactions(r#"{"success":true,"data":[]}"#).unwrap_err();
        assert!(matches!(err, SwapError::Build(_)));
    }

    fn client_for(base_host: &str, swap_host: &str) -> RaydiumClient {
        let cfg = Config {
            base_host: base_host.to_string(),
            swap_host: swap_host.to_string(),
            ..Config::default()
        };
        RaydiumClient::new(Client::new(), &cfg)
    }

    #[test]
    fn test_priority_fee_request_shape() {
        let client = client_for("https://api.raydium.io", "https://transaction-v1.raydium.io");
        let request = client.priority_fee_request().unwrap();

        assert_eq!(request.method(), Method::GET);
        assert_eq!(request.url().as_str(), "https://api.raydium.io/v2/main/priority-fee");
    }

    #[test]
    fn test_quote_request_shape() {
        let client = client_for("https://api.raydium.io", "https://transaction-v1.raydium.io");
        let params = SwapParams {
            amount: 250_000,
            slippage_bps: 50,
            tx_version: TxVersion::Legacy,
            ..SwapParams::default()
        };

        let request = client.quote_request(&params).unwrap();
        let url = request.url();
        let query: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();

        assert_eq!(request.method(), Method::GET);
        assert_eq!(url.host_str(), Some("transaction-v1.raydium.io"));
        assert_eq!(url.path(), "/compute/swap-base-in");
        assert_eq!(
            query,
            vec![
                ("inputMint".to_string(), params.input_mint.clone()),
                ("outputMint".to_string(), params.output_mint.clone()),
                ("amount".to_string(), "250000".to_string()),
                ("slippageBps".to_string(), "50".to_string()),
                ("txVersion".to_string(), "LEGACY".to_string()),
            ]
        );
    }

    #[test]
    fn test_swap_transactions_request_shape() {
        let client = client_for("http://127.0.0.1:9000", "http://127.0.0.1:9001");
        let quote = parse_swap_quote(QUOTE_BODY.to_string()).unwrap();
        let body = SwapTransactionRequest::new(&SwapParams::default(), 7, &quote, &Pubkey::new_unique())
            .to_json()
            .unwrap();

        let request = client.swap_transactions_request(body.clone()).unwrap();

        assert_eq!(request.method(), Method::POST);
        assert_eq!(request.url().as_str(), "http://127.0.0.1:9001/transaction/swap-base-in");
        assert_eq!(request.headers()[CONTENT_TYPE], "application/json");
        let sent = request.body().and_then(|b| b.as_bytes()).unwrap();
        assert_eq!(sent, body.as_bytes());
    }
}
