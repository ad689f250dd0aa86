//! # Harness Configuration
//!
//! Where the service lives and how the run is seeded. Values come from
//! built-in defaults, then environment variables, then CLI flags.

use std::time::Duration;

use crate::error::HarnessError;

/// Base URL of the hosted ad-listing service.
pub const DEFAULT_BASE_URL: &str = "https://qa-internship.avito.com/api/1";

/// Environment keys read by [`HarnessConfig::load`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HarnessEnv {
    /// Service base URL, without a trailing slash.
    BaseUrl,
    /// Seed for the seller-id generator (unsigned 64-bit integer).
    Seed,
    /// Client timeout in seconds (positive integer).
    TimeoutSeconds,
}

impl HarnessEnv {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BaseUrl => "AD_CONTRACT_BASE_URL",
            Self::Seed => "AD_CONTRACT_SEED",
            Self::TimeoutSeconds => "AD_CONTRACT_TIMEOUT_SEC",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarnessConfig {
    pub base_url: String,
    /// Fixed seed for reproducible seller ids. `None` draws one per run.
    pub seed: Option<u64>,
    /// `None` keeps the transport default (no timeout).
    pub timeout: Option<Duration>,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            seed: None,
            timeout: None,
        }
    }
}

impl HarnessConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Defaults overlaid with whatever the process environment sets.
    pub fn load() -> Result<Self, HarnessError> {
        Self::from_lookup(read_env_strict)
    }

    fn from_lookup(
        lookup: impl Fn(&str) -> Result<Option<String>, HarnessError>,
    ) -> Result<Self, HarnessError> {
        let read = |key: HarnessEnv| -> Result<Option<String>, HarnessError> {
            let name = key.as_str();
            match lookup(name)? {
                Some(value) if value.trim().is_empty() => {
                    Err(HarnessError::Config(format!("{name} must not be empty")))
                }
                Some(value) => Ok(Some(value.trim().to_string())),
                None => Ok(None),
            }
        };

        let mut config = Self::default();
        if let Some(base_url) = read(HarnessEnv::BaseUrl)? {
            config.base_url = base_url;
        }
        config.seed = read(HarnessEnv::Seed)?
            .map(|raw| parse_seed(HarnessEnv::Seed.as_str(), &raw))
            .transpose()?;
        config.timeout = read(HarnessEnv::TimeoutSeconds)?
            .map(|raw| parse_timeout_seconds(HarnessEnv::TimeoutSeconds.as_str(), &raw))
            .transpose()?;
        Ok(config)
    }
}

fn read_env_strict(name: &str) -> Result<Option<String>, HarnessError> {
    std::env::var_os(name).map_or(Ok(None), |raw| {
        raw.into_string()
            .map(Some)
            .map_err(|_| HarnessError::Config(format!("{name} must be valid UTF-8")))
    })
}

fn parse_seed(name: &str, raw: &str) -> Result<u64, HarnessError> {
    raw.trim()
        .parse()
        .map_err(|_| HarnessError::Config(format!("{name} must be an unsigned integer")))
}

fn parse_timeout_seconds(name: &str, raw: &str) -> Result<Duration, HarnessError> {
    let secs: u64 = raw.trim().parse().map_err(|_| {
        HarnessError::Config(format!("{name} must be a positive integer number of seconds"))
    })?;
    if secs == 0 {
        return Err(HarnessError::Config(format!("{name} must be greater than zero")));
    }
    Ok(Duration::from_secs(secs))
}
