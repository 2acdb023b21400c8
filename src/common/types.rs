use alloy::primitives::Address;
use anyhow::{Context, anyhow, bail};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::time::Duration;
use tracing::warn;

use crate::constants::{
    DEFAULT_DEBOUNCE_MS, DEFAULT_TOKEN_DECIMALS, ENV_QUOTE_DEBOUNCE_MS, ENV_QUOTE_TOKEN_DECIMALS,
    ENV_QUOTER_BIN_ADDRESS, ENV_QUOTER_CL_ADDRESS, ENV_QUOTER_MIXED_ADDRESS, MAX_TOKEN_DECIMALS,
    MAX_UINT24,
};

/// Fee tier does not fit in `uint24`
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("fee tier {0} does not fit in uint24")]
pub struct InvalidFeeTier(pub u32);

/// Pool fee tier, in hundredths of a basis point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct PoolFee(u32);

impl PoolFee {
    /// 0.01%
    pub const LOWEST: PoolFee = PoolFee(100);
    /// 0.05%
    pub const LOW: PoolFee = PoolFee(500);
    /// 0.25%
    pub const MEDIUM: PoolFee = PoolFee(2_500);
    /// 1%
    pub const HIGH: PoolFee = PoolFee(10_000);

    pub fn new(fee: u32) -> Result<Self, InvalidFeeTier> {
        if fee > MAX_UINT24 {
            return Err(InvalidFeeTier(fee));
        }
        Ok(Self(fee))
    }

    pub fn as_u32(&self) -> u32 {
        self.0
    }
}

impl Default for PoolFee {
    fn default() -> Self {
        Self::MEDIUM
    }
}

impl TryFrom<u32> for PoolFee {
    type Error = InvalidFeeTier;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PoolFee> for u32 {
    fn from(value: PoolFee) -> Self {
        value.0
    }
}

/// Quoter contract family.
///
/// Declaration order is the fallback priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuoterBackend {
    Mixed,
    Bin,
    ConcentratedLiquidity,
}

impl QuoterBackend {
    pub const PRIORITY: [QuoterBackend; 3] =
        [QuoterBackend::Mixed, QuoterBackend::Bin, QuoterBackend::ConcentratedLiquidity];

    pub fn name(&self) -> &'static str {
        match self {
            QuoterBackend::Mixed => "Mixed",
            QuoterBackend::Bin => "Bin",
            QuoterBackend::ConcentratedLiquidity => "Concentrated-Liquidity",
        }
    }

    /// Environment variable holding this quoter's contract address
    pub fn env_key(&self) -> &'static str {
        match self {
            QuoterBackend::Mixed => ENV_QUOTER_MIXED_ADDRESS,
            QuoterBackend::Bin => ENV_QUOTER_BIN_ADDRESS,
            QuoterBackend::ConcentratedLiquidity => ENV_QUOTER_CL_ADDRESS,
        }
    }
}

impl fmt::Display for QuoterBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoterBackendConfig {
    pub backend: QuoterBackend,
    pub address: Address,
}

impl QuoterBackendConfig {
    pub fn new(backend: QuoterBackend, address: Address) -> Self {
        Self { backend, address }
    }
}

/// Quoting configuration (chain-independent apart from the address table)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoterConfig {
    /// Quoter contracts. Always tried in [`QuoterBackend::PRIORITY`] order,
    /// whatever order they are listed in.
    pub backends: Vec<QuoterBackendConfig>,
    /// Fixed-point scale applied to every token (default: 18)
    #[serde(default = "default_decimals")]
    pub decimals: u32,
    /// Fee tier used when a request does not name one
    #[serde(default)]
    pub default_fee_tier: PoolFee,
    /// Estimate debounce window (milliseconds)
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

fn default_decimals() -> u32 {
    DEFAULT_TOKEN_DECIMALS
}

fn default_debounce_ms() -> u64 {
    DEFAULT_DEBOUNCE_MS
}

/// Clamp a scale to [`MAX_TOKEN_DECIMALS`].
pub(crate) fn clamp_decimals(decimals: u32) -> u32 {
    if decimals > MAX_TOKEN_DECIMALS {
        warn!(decimals, max = MAX_TOKEN_DECIMALS, "clamping token decimals");
        return MAX_TOKEN_DECIMALS;
    }
    decimals
}

impl QuoterConfig {
    /// Configuration with all three quoters
    pub fn new(mixed: Address, bin: Address, concentrated_liquidity: Address) -> Self {
        Self {
            backends: vec![
                QuoterBackendConfig::new(QuoterBackend::Mixed, mixed),
                QuoterBackendConfig::new(QuoterBackend::Bin, bin),
                QuoterBackendConfig::new(QuoterBackend::ConcentratedLiquidity, concentrated_liquidity),
            ],
            decimals: DEFAULT_TOKEN_DECIMALS,
            default_fee_tier: PoolFee::default(),
            debounce_ms: DEFAULT_DEBOUNCE_MS,
        }
    }

    /// Set the fixed-point scale, clamped to [`MAX_TOKEN_DECIMALS`].
    pub fn with_decimals(mut self, decimals: u32) -> Self {
        self.decimals = clamp_decimals(decimals);
        self
    }

    pub fn with_default_fee_tier(mut self, fee: PoolFee) -> Self {
        self.default_fee_tier = fee;
        self
    }

    pub fn with_debounce_ms(mut self, debounce_ms: u64) -> Self {
        self.debounce_ms = debounce_ms;
        self
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// Backends in fallback order
    pub fn ordered_backends(&self) -> Vec<QuoterBackendConfig> {
        let mut backends = self.backends.clone();
        backends.sort_by_key(|b| b.backend);
        backends
    }

    /// Build from a key lookup (environment, `.env` map, ...).
    ///
    /// Each quoter address is optional, but at least one must be present.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut backends = Vec::new();
        for backend in QuoterBackend::PRIORITY {
            let Some(value) = lookup(backend.env_key()).filter(|v| !v.trim().is_empty()) else {
                continue;
            };
            let address = value
                .trim()
                .parse()
                .with_context(|| format!("{} is not an address: {value}", backend.env_key()))?;
            backends.push(QuoterBackendConfig::new(backend, address));
        }

        let decimals = match lookup(ENV_QUOTE_TOKEN_DECIMALS) {
            Some(v) => v
                .trim()
                .parse()
                .with_context(|| format!("{ENV_QUOTE_TOKEN_DECIMALS} is not an integer: {v}"))?,
            None => DEFAULT_TOKEN_DECIMALS,
        };

        let debounce_ms = match lookup(ENV_QUOTE_DEBOUNCE_MS) {
            Some(v) => v
                .trim()
                .parse()
                .with_context(|| format!("{ENV_QUOTE_DEBOUNCE_MS} is not an integer: {v}"))?,
            None => DEFAULT_DEBOUNCE_MS,
        };

        Self { backends, decimals, default_fee_tier: PoolFee::default(), debounce_ms }.validate()
    }

    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_json_str(json: &str) -> anyhow::Result<Self> {
        let config: Self = serde_json::from_str(json).context("invalid quoter config")?;
        config.validate()
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read quoter config {}", path.display()))?;
        Self::from_json_str(&content)
    }

    pub fn validate(self) -> anyhow::Result<Self> {
        if self.backends.is_empty() {
            bail!(
                "no quoter backends configured (set {}, {} or {})",
                ENV_QUOTER_MIXED_ADDRESS,
                ENV_QUOTER_BIN_ADDRESS,
                ENV_QUOTER_CL_ADDRESS
            );
        }
        for (i, b) in self.backends.iter().enumerate() {
            if b.address.is_zero() {
                return Err(anyhow!("{} quoter address is zero", b.backend));
            }
            if self.backends[..i].iter().any(|other| other.backend == b.backend) {
                return Err(anyhow!("{} quoter configured more than once", b.backend));
            }
        }
        if self.decimals > MAX_TOKEN_DECIMALS {
            bail!("decimals {} exceeds maximum {}", self.decimals, MAX_TOKEN_DECIMALS);
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::address;
    use std::collections::HashMap;

    const MIXED: Address = address!("0000000000000000000000000000000000000001");
    const BIN: Address = address!("0000000000000000000000000000000000000002");
    const CL: Address = address!("0000000000000000000000000000000000000003");

    #[test]
    fn test_ordered_backends() {
        let config = QuoterConfig {
            backends: vec![
                QuoterBackendConfig::new(QuoterBackend::ConcentratedLiquidity, CL),
                QuoterBackendConfig::new(QuoterBackend::Mixed, MIXED),
                QuoterBackendConfig::new(QuoterBackend::Bin, BIN),
            ],
            decimals: 18,
            default_fee_tier: PoolFee::MEDIUM,
            debounce_ms: 300,
        };
        let order: Vec<_> = config.ordered_backends().into_iter().map(|b| b.backend).collect();
        assert_eq!(order, QuoterBackend::PRIORITY.to_vec());
    }

    #[test]
    fn test_from_lookup() {
        let vars: HashMap<&str, &str> = HashMap::from([
            (ENV_QUOTER_MIXED_ADDRESS, "0x0000000000000000000000000000000000000001"),
            (ENV_QUOTER_CL_ADDRESS, " 0x0000000000000000000000000000000000000003 "),
            (ENV_QUOTE_TOKEN_DECIMALS, "6"),
        ]);
        let config = QuoterConfig::from_lookup(|k| vars.get(k).map(|v| v.to_string())).unwrap();

        assert_eq!(config.backends.len(), 2);
        assert_eq!(config.backends[1].backend, QuoterBackend::ConcentratedLiquidity);
        assert_eq!(config.backends[1].address, CL);
        assert_eq!(config.decimals, 6);
        assert_eq!(config.debounce(), Duration::from_millis(300));
        assert_eq!(config.default_fee_tier, PoolFee::MEDIUM);
    }

    #[test]
    fn test_from_lookup_requires_a_backend() {
        let err = QuoterConfig::from_lookup(|_| None).unwrap_err();
        assert!(err.to_string().contains("no quoter backends"));
    }

    #[test]
    fn test_from_lookup_rejects_bad_values() {
        let vars: HashMap<&str, &str> = HashMap::from([
            (ENV_QUOTER_BIN_ADDRESS, "0x0000000000000000000000000000000000000002"),
            (ENV_QUOTE_DEBOUNCE_MS, "soon"),
        ]);
        assert!(QuoterConfig::from_lookup(|k| vars.get(k).map(|v| v.to_string())).is_err());

        let vars: HashMap<&str, &str> = HashMap::from([(ENV_QUOTER_BIN_ADDRESS, "0x02")]);
        let err = QuoterConfig::from_lookup(|k| vars.get(k).map(|v| v.to_string())).unwrap_err();
        assert!(err.to_string().contains("is not an address"));
    }

    #[test]
    fn test_json_config() {
        let json = r#"{
            "backends": [
                { "backend": "bin", "address": "0x0000000000000000000000000000000000000002" },
                { "backend": "mixed", "address": "0x0000000000000000000000000000000000000001" }
            ],
            "default_fee_tier": 500
        }"#;
        let config = QuoterConfig::from_json_str(json).unwrap();
        assert_eq!(config.decimals, DEFAULT_TOKEN_DECIMALS);
        assert_eq!(config.debounce_ms, DEFAULT_DEBOUNCE_MS);
        assert_eq!(config.default_fee_tier, PoolFee::LOW);
        assert_eq!(config.ordered_backends()[0].backend, QuoterBackend::Mixed);
    }

    #[test]
    fn test_json_config_rejects_bad_entries() {
        let duplicate = r#"{ "backends": [
            { "backend": "bin", "address": "0x0000000000000000000000000000000000000002" },
            { "backend": "bin", "address": "0x0000000000000000000000000000000000000003" }
        ] }"#;
        assert!(QuoterConfig::from_json_str(duplicate).is_err());

        let zero = r#"{ "backends": [
            { "backend": "bin", "address": "0x0000000000000000000000000000000000000000" }
        ] }"#;
        assert!(QuoterConfig::from_json_str(zero).unwrap_err().to_string().contains("zero"));

        let big_fee = r#"{ "backends": [
            { "backend": "bin", "address": "0x0000000000000000000000000000000000000002" }
        ], "default_fee_tier": 16777216 }"#;
        assert!(QuoterConfig::from_json_str(big_fee).is_err());
    }

    #[test]
    fn test_with_decimals_clamps() {
        let config = QuoterConfig::new(MIXED, BIN, CL).with_decimals(400);
        assert_eq!(config.decimals, MAX_TOKEN_DECIMALS);
        assert_eq!(QuoterConfig::new(MIXED, BIN, CL).with_decimals(6).decimals, 6);
    }

    #[test]
    fn test_pool_fee_bounds() {
        assert_eq!(PoolFee::new(MAX_UINT24).unwrap().as_u32(), MAX_UINT24);
        assert_eq!(PoolFee::new(MAX_UINT24 + 1), Err(InvalidFeeTier(MAX_UINT24 + 1)));
        assert_eq!(PoolFee::default(), PoolFee::MEDIUM);
    }
}
