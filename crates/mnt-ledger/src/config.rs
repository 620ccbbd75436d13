//! # Ledger Configuration
//!
//! Deployment parameters loaded from TOML or the environment.
//!
//! ```toml
//! name = "Manul Token"
//! symbol = "MNT"
//! initial_supply = "111000000000000000000"   # or "0x..." or an integer
//! deployer = "0x7099797...79c8"
//!
//! [fee]
//! numerator = 2
//! denominator = 100
//! ```
//!
//! # Environment Variables
//!
//! - `MNT_NAME`, `MNT_SYMBOL`: metadata overrides
//! - `MNT_INITIAL_SUPPLY`: smallest units, decimal or `0x` hex
//! - `MNT_DEPLOYER`: hex address
//! - `MNT_FEE_NUMERATOR`, `MNT_FEE_DENOMINATOR`: fee rate

use crate::domain::{
    Address, FeeSchedule, Genesis, LedgerEngine, LedgerError, Receipt, TokenMetadata, U256,
};
use crate::units::to_base_units;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File could not be read.
    #[error("failed to read config {path}: {source}")]
    Io {
        /// Path that was read.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// TOML was malformed or had wrong types.
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// A single value could not be interpreted.
    #[error("invalid value for {key}: {reason}")]
    InvalidValue {
        /// Offending key or environment variable.
        key: String,
        /// What was wrong.
        reason: String,
    },

    /// Parsed, but not deployable.
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Failure to build a ledger from configuration.
#[derive(Debug, Error)]
pub enum DeployError {
    /// Configuration rejected.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Ledger construction rejected.
    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

/// Ledger deployment parameters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LedgerConfig {
    /// Token name.
    pub name: String,
    /// Token symbol.
    pub symbol: String,
    /// Initial supply in smallest units, credited to the deployer.
    #[serde(with = "amount")]
    pub initial_supply: U256,
    /// Receives the initial supply and the admin role. Must be set.
    pub deployer: Address,
    /// Transfer fee rate.
    pub fee: FeeSchedule,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        let metadata = TokenMetadata::default();
        Self {
            name: metadata.name,
            symbol: metadata.symbol,
            initial_supply: to_base_units(111),
            deployer: Address::ZERO,
            fee: FeeSchedule::REFERENCE,
        }
    }
}

impl LedgerConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&raw)?;
        info!(path = %path.display(), deployer = ?config.deployer, "Loaded ledger config");
        Ok(config)
    }

    /// Defaults overridden by `MNT_*` environment variables, validated.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each `MNT_*` key,
    /// validated.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(name) = lookup("MNT_NAME") {
            config.name = name;
        }
        if let Some(symbol) = lookup("MNT_SYMBOL") {
            config.symbol = symbol;
        }
        if let Some(raw) = lookup("MNT_INITIAL_SUPPLY") {
            config.initial_supply =
                amount::parse(&raw).map_err(|reason| invalid("MNT_INITIAL_SUPPLY", reason))?;
        }
        if let Some(raw) = lookup("MNT_DEPLOYER") {
            config.deployer = raw
                .trim()
                .parse()
                .map_err(|e| invalid("MNT_DEPLOYER", e))?;
        }

        let numerator = parse_u64(&lookup, "MNT_FEE_NUMERATOR")?;
        let denominator = parse_u64(&lookup, "MNT_FEE_DENOMINATOR")?;
        if numerator.is_some() || denominator.is_some() {
            config.fee = FeeSchedule::new(
                numerator.unwrap_or(config.fee.numerator()),
                denominator.unwrap_or(config.fee.denominator()),
            )
            .map_err(|e| invalid("MNT_FEE_*", e))?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Check that the configuration can be deployed.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.name.trim().is_empty() {
            return Err(ConfigError::Invalid("name must not be empty".into()));
        }
        if self.symbol.trim().is_empty() {
            return Err(ConfigError::Invalid("symbol must not be empty".into()));
        }
        if self.deployer.is_zero() {
            return Err(ConfigError::Invalid(
                "deployer must be a non-null address".into(),
            ));
        }
        // `fee` needs no check: every FeeSchedule passed `FeeSchedule::new`.
        Ok(())
    }

    /// Construction parameters for [`LedgerEngine::new`].
    #[must_use]
    pub fn genesis(&self) -> Genesis {
        Genesis::new(self.deployer, self.initial_supply)
            .with_metadata(TokenMetadata::new(self.name.clone(), self.symbol.clone()))
            .with_fees(self.fee)
    }
}

impl LedgerEngine {
    /// Validate `config` and construct a ledger from it.
    pub fn deploy(config: &LedgerConfig) -> Result<(Self, Receipt), DeployError> {
        config.validate()?;
        Ok(Self::new(config.genesis())?)
    }
}

fn invalid(key: &str, reason: impl ToString) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        reason: reason.to_string(),
    }
}

fn parse_u64<F>(lookup: &F, key: &str) -> Result<Option<u64>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|raw| raw.trim().parse::<u64>().map_err(|e| invalid(key, e)))
        .transpose()
}

/// Amounts as a decimal string, a `0x` hex string, or a plain integer.
/// Serialized as a decimal string.
mod amount {
    use crate::domain::U256;
    use serde::de::{self, Visitor};
    use serde::{Deserializer, Serializer};
    use std::fmt;

    pub(super) fn parse(raw: &str) -> Result<U256, String> {
        let raw = raw.trim().replace('_', "");
        let parsed = match raw.strip_prefix("0x").or_else(|| raw.strip_prefix("0X")) {
            Some(digits) if !digits.is_empty() => {
                U256::from_str_radix(digits, 16).map_err(|e| format!("{e:?}"))
            }
            Some(_) => Err("missing hex digits".to_string()),
            None if raw.is_empty() => Err("empty amount".to_string()),
            None => U256::from_dec_str(&raw).map_err(|e| format!("{e:?}")),
        };
        parsed.map_err(|e| format!("{raw:?} is not a 256-bit amount ({e})"))
    }

    pub(super) fn serialize<S: Serializer>(value: &U256, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_string())
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<U256, D::Error> {
        deserializer.deserialize_any(AmountVisitor)
    }

    struct AmountVisitor;

    impl<'de> Visitor<'de> for AmountVisitor {
        type Value = U256;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a non-negative integer or a decimal/0x-hex string")
        }

        fn visit_u64<E: de::Error>(self, value: u64) -> Result<U256, E> {
            Ok(U256::from(value))
        }

        fn visit_i64<E: de::Error>(self, value: i64) -> Result<U256, E> {
            u64::try_from(value)
                .map(U256::from)
                .map_err(|_| E::custom("amount must not be negative"))
        }

        fn visit_str<E: de::Error>(self, value: &str) -> Result<U256, E> {
            parse(value).map_err(E::custom)
        }
    }
}
