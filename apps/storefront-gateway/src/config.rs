//! Gateway configuration module.
//!
//! Configuration is loaded from environment variables with fallback to
//! defaults. Every default reproduces the storefront's fixed behavior.
//!
//! | Variable                        | Default   | Meaning                         |
//! |---------------------------------|-----------|---------------------------------|
//! | `STOREFRONT_BIND`               | `0.0.0.0` | Listen address                  |
//! | `STOREFRONT_PORT`               | `3000`    | Listen port                     |
//! | `STOREFRONT_UNKNOWN_PATHS`      | `allow`   | `allow` or `deny` unlisted paths|
//! | `STOREFRONT_FREE_SHIPPING_CENTS`| `10000`   | Free shipping above this        |
//! | `STOREFRONT_SHIPPING_FEE_CENTS` | `1000`    | Flat shipping fee               |
//! | `STOREFRONT_TAX_BPS`            | `800`     | Tax rate in basis points        |
//! | `STOREFRONT_PROMO_CODE`         | `SAVE10`  | Accepted promo code             |
//! | `STOREFRONT_PROMO_BPS`          | `1000`    | Promo discount in basis points  |

use std::env;
use std::net::SocketAddr;
use std::str::FromStr;

use storefront_core::pricing::PricingPolicy;
use storefront_core::validation::validate_rate_bps;
use storefront_core::{Money, Rate, UnknownPathPolicy};

/// Gateway configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    /// Listen address
    pub bind: String,

    /// HTTP port
    pub port: u16,

    /// What the route gate does with paths that are neither public nor
    /// protected
    pub unknown_paths: UnknownPathPolicy,

    /// Cart pricing constants
    pub pricing: PricingPolicy,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        GatewayConfig {
            bind: "0.0.0.0".to_string(),
            port: 3000,
            unknown_paths: UnknownPathPolicy::Allow,
            pricing: PricingPolicy::default(),
        }
    }
}

impl GatewayConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through `lookup`, which returns the raw value of a
    /// variable if it is set.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = GatewayConfig::default();

        let unknown_paths = match lookup("STOREFRONT_UNKNOWN_PATHS").as_deref() {
            None | Some("allow") => UnknownPathPolicy::Allow,
            Some("deny") => UnknownPathPolicy::RequireAuth,
            Some(_) => {
                return Err(ConfigError::InvalidValue(
                    "STOREFRONT_UNKNOWN_PATHS".to_string(),
                ))
            }
        };

        let free_shipping_cents: i64 = parse_or(
            &lookup,
            "STOREFRONT_FREE_SHIPPING_CENTS",
            defaults.pricing.free_shipping_threshold.cents(),
        )?;
        let shipping_fee_cents: i64 = parse_or(
            &lookup,
            "STOREFRONT_SHIPPING_FEE_CENTS",
            defaults.pricing.shipping_fee.cents(),
        )?;
        for (key, cents) in [
            ("STOREFRONT_FREE_SHIPPING_CENTS", free_shipping_cents),
            ("STOREFRONT_SHIPPING_FEE_CENTS", shipping_fee_cents),
        ] {
            if cents < 0 {
                return Err(ConfigError::InvalidValue(key.to_string()));
            }
        }

        let tax_bps: u32 = parse_or(&lookup, "STOREFRONT_TAX_BPS", defaults.pricing.tax_rate.bps())?;
        let promo_bps: u32 =
            parse_or(&lookup, "STOREFRONT_PROMO_BPS", defaults.pricing.promo_rate.bps())?;
        validate_rate_bps("STOREFRONT_TAX_BPS", tax_bps)
            .map_err(|_| ConfigError::InvalidValue("STOREFRONT_TAX_BPS".to_string()))?;
        validate_rate_bps("STOREFRONT_PROMO_BPS", promo_bps)
            .map_err(|_| ConfigError::InvalidValue("STOREFRONT_PROMO_BPS".to_string()))?;

        // An empty code would match a blank promo field on every cart
        let promo_code = lookup("STOREFRONT_PROMO_CODE").unwrap_or(defaults.pricing.promo_code);
        if promo_code.is_empty() {
            return Err(ConfigError::InvalidValue("STOREFRONT_PROMO_CODE".to_string()));
        }

        let config = GatewayConfig {
            bind: lookup("STOREFRONT_BIND").unwrap_or(defaults.bind),
            port: parse_or(&lookup, "STOREFRONT_PORT", defaults.port)?,
            unknown_paths,
            pricing: PricingPolicy {
                free_shipping_threshold: Money::from_cents(free_shipping_cents),
                shipping_fee: Money::from_cents(shipping_fee_cents),
                tax_rate: Rate::from_bps(tax_bps),
                promo_code,
                promo_rate: Rate::from_bps(promo_bps),
            },
        };

        // Fail at startup rather than at bind time
        config.socket_addr()?;

        Ok(config)
    }

    /// The address to listen on.
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.bind, self.port)
            .parse()
            .map_err(|_| ConfigError::InvalidValue("STOREFRONT_BIND".to_string()))
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue(key.to_string())),
        None => Ok(default),
    }
}

/// Configuration error types.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}
