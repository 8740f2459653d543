use dotenv::dotenv;
use serde::Serialize;
use std::env;
use std::fmt;

pub const WSOL_MINT: &str = "So11111111111111111111111111111111111111112";
pub const USDC_MINT: &str = "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v";

const DEFAULT_RPC_URL: &str = "https://api.mainnet-beta.solana.com";
const DEFAULT_KEYPAIR_PATH: &str = "wallet.json";
const DEFAULT_BASE_HOST: &str = "https://api.raydium.io";
const DEFAULT_SWAP_HOST: &str = "https://transaction-v1.raydium.io";
const DEFAULT_EXPLORER_URL: &str = "https://solscan.io/tx";

/// Transaction format requested from the build endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum TxVersion {
    #[default]
    #[serde(rename = "V0")]
    V0,
    #[serde(rename = "LEGACY")]
    Legacy,
}

impl TxVersion {
    pub fn as_str(&self) -> &'static str {
        match self {
            TxVersion::V0 => "V0",
            TxVersion::Legacy => "LEGACY",
        }
    }
}

/// Which of the estimated priority fee tiers to pay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FeeTier {
    Medium,
    #[default]
    High,
    VeryHigh,
}

/// Trade parameters for the single swap.
#[derive(Debug, Clone)]
pub struct SwapParams {
    pub input_mint: String,
    pub output_mint: String,
    /// Input amount in the smallest unit of the input mint
    pub amount: u64,
    pub slippage_bps: u16,
    pub tx_version: TxVersion,
    pub wrap_sol: bool,
    pub unwrap_sol: bool,
    pub fee_tier: FeeTier,
}

impl Default for SwapParams {
    fn default() -> Self {
        Self {
            input_mint: WSOL_MINT.to_string(),
            output_mint: USDC_MINT.to_string(),
            amount: 100_000,
            slippage_bps: 100,
            tx_version: TxVersion::V0,
            wrap_sol: true,
            unwrap_sol: false,
            fee_tier: FeeTier::High,
        }
    }
}

// ─────────────────── Configuration ───────────────────

#[derive(Clone)]
pub struct Config {
    pub rpc_url: String,
    pub keypair_path: String,
    /// Base58 secret key; takes precedence over `keypair_path` when set
    pub secret_key: Option<String>,
    pub base_host: String,
    pub swap_host: String,
    pub explorer_url: String,
    pub skip_preflight: bool,
    pub swap: SwapParams,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rpc_url: DEFAULT_RPC_URL.to_string(),
            keypair_path: DEFAULT_KEYPAIR_PATH.to_string(),
            secret_key: None,
            base_host: DEFAULT_BASE_HOST.to_string(),
            swap_host: DEFAULT_SWAP_HOST.to_string(),
            explorer_url: DEFAULT_EXPLORER_URL.to_string(),
            skip_preflight: true,
            swap: SwapParams::default(),
        }
    }
}

impl Config {
    /// Build a config from a variable lookup, falling back to defaults for
    /// anything unset or empty.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.is_empty());
        let defaults = Config::default();

        Self {
            rpc_url: var("RPC_URL").unwrap_or(defaults.rpc_url),
            keypair_path: var("KEYPAIR_PATH").unwrap_or(defaults.keypair_path),
            secret_key: var("SECRET_KEY"),
            base_host: var("RAYDIUM_BASE_HOST")
                .map(|h| h.trim_end_matches('/').to_string())
                .unwrap_or(defaults.base_host),
            swap_host: var("RAYDIUM_SWAP_HOST")
                .map(|h| h.trim_end_matches('/').to_string())
                .unwrap_or(defaults.swap_host),
            ..defaults
        }
    }

    pub fn explorer_link(&self, signature: &impl fmt::Display) -> String {
        format!("{}/{}", self.explorer_url, signature)
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("rpc_url", &self.rpc_url)
            .field("keypair_path", &self.keypair_path)
            .field("secret_key", &self.secret_key.as_ref().map(|_| "[REDACTED]"))
            .field("base_host", &self.base_host)
            .field("swap_host", &self.swap_host)
            .field("explorer_url", &self.explorer_url)
            .field("skip_preflight", &self.skip_preflight)
            .field("swap", &self.swap)
            .finish()
    }
}

/// Load `.env` and read the process environment.
pub fn load_config() -> Config {
    dotenv().ok();
    Config::from_lookup(|key| env::var(key).ok())
}
