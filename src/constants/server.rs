pub const DEFAULT_HOST: &str = "0.0.0.0";

pub const DEFAULT_PORT: u16 = 8080;

pub const DEFAULT_SOLANA_RPC_URL: &str = "http://127.0.0.1:8899";

/// Per-request timeout of the RPC client, in seconds.
pub const DEFAULT_RPC_TIMEOUT_SECONDS: u64 = 30;

/// Prefix for every API route.
pub const API_SCOPE: &str = "/api/v1";
