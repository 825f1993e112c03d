use std::env;

use log::*;
use tshirt_payment_engine::{gge4, ConfigurationError, GatewayCredentials};
use tsp_common::{parse_boolean_flag, Amount, Secret};

use crate::errors::ServerError;

const DEFAULT_TSP_HOST: &str = "127.0.0.1";
const DEFAULT_TSP_PORT: u16 = 8001;
const DEFAULT_DATABASE_URL: &str = "sqlite://data/tshirt_orders.db";
const DEFAULT_SHIRT_PRICE: &str = "35.00";

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    /// If true, the X-Forwarded-For header will be used to determine the client's IP address, rather than the
    /// connection's remote address.
    pub use_x_forwarded_for: bool,
    /// If true, the Forwarded header will be used to determine the client's IP address, rather than the
    /// connection's remote address.
    pub use_forwarded: bool,
    /// The price of a shirt. Every payment form is signed for this amount.
    pub shirt_price: Amount,
    pub gateway: GatewayConfig,
}

impl ServerConfig {
    pub fn new(host: &str, port: u16, shirt_price: Amount, gateway: GatewayConfig) -> Self {
        Self {
            host: host.to_string(),
            port,
            database_url: DEFAULT_DATABASE_URL.to_string(),
            use_x_forwarded_for: false,
            use_forwarded: false,
            shirt_price,
            gateway,
        }
    }

    /// Loads the configuration from the environment.
    ///
    /// Optional values fall back to their defaults with a log message. The gateway credentials and the shirt price
    /// have no safe fallback, so a missing or invalid value is an error and the server must not start.
    pub fn try_from_env() -> Result<Self, ServerError> {
        let host = env::var("TSP_HOST").ok().unwrap_or_else(|| DEFAULT_TSP_HOST.into());
        let port = env::var("TSP_PORT")
            .map(|s| {
                s.parse::<u16>().unwrap_or_else(|e| {
                    error!(
                        "🪛️ {s} is not a valid port for TSP_PORT. {e} Using the default, {DEFAULT_TSP_PORT}, instead."
                    );
                    DEFAULT_TSP_PORT
                })
            })
            .ok()
            .unwrap_or(DEFAULT_TSP_PORT);
        let database_url = env::var("TSP_DATABASE_URL").ok().unwrap_or_else(|| {
            info!("🪛️ TSP_DATABASE_URL is not set. Using {DEFAULT_DATABASE_URL}.");
            DEFAULT_DATABASE_URL.to_string()
        });
        let use_x_forwarded_for = parse_boolean_flag(env::var("TSP_USE_X_FORWARDED_FOR").ok(), false);
        let use_forwarded = parse_boolean_flag(env::var("TSP_USE_FORWARDED").ok(), false);
        let price = env::var("TSP_SHIRT_PRICE").ok().unwrap_or_else(|| {
            info!("🪛️ TSP_SHIRT_PRICE is not set. Using the default price of {DEFAULT_SHIRT_PRICE}.");
            DEFAULT_SHIRT_PRICE.to_string()
        });
        let shirt_price = price
            .parse::<Amount>()
            .map_err(|e| ServerError::from(ConfigurationError::InvalidValue("TSP_SHIRT_PRICE", e.to_string())))?;
        let gateway = GatewayConfig::try_from_env()?;
        Ok(Self { host, port, database_url, use_x_forwarded_for, use_forwarded, shirt_price, gateway })
    }
}

//-------------------------------------------------  GatewayConfig  ----------------------------------------------------
#[derive(Clone, Debug)]
pub struct GatewayConfig {
    pub credentials: GatewayCredentials,
    /// Where the customer's browser posts the signed payment form.
    pub payment_url: String,
}

impl GatewayConfig {
    pub fn new(credentials: GatewayCredentials, live: bool) -> Self {
        let payment_url = if live { gge4::LIVE_PAYMENT_URL } else { gge4::DEMO_PAYMENT_URL };
        Self { credentials, payment_url: payment_url.to_string() }
    }

    pub fn try_from_env() -> Result<Self, ServerError> {
        let login = required_env("TSP_GGE4_LOGIN")?;
        let transaction_key = Secret::new(required_env("TSP_GGE4_TRANSACTION_KEY")?);
        let response_key = Secret::new(required_env("TSP_GGE4_RESPONSE_KEY")?);
        let credentials = GatewayCredentials::new(login, transaction_key, response_key)?;
        let live = parse_boolean_flag(env::var("TSP_GGE4_LIVE").ok(), false);
        if live {
            warn!("🪛️ TSP_GGE4_LIVE is set. Payment forms will be posted to the LIVE gateway.");
        } else {
            info!("🪛️ Payment forms will be posted to the demo gateway. Set TSP_GGE4_LIVE to use the live one.");
        }
        Ok(Self::new(credentials, live))
    }
}

/// Reads an environment variable that has no default. Unset and empty are both configuration errors.
fn required_env(name: &'static str) -> Result<String, ServerError> {
    match env::var(name) {
        Ok(s) if !s.is_empty() => Ok(s),
        Ok(_) => Err(ConfigurationError::InvalidValue(name, "The value may not be empty.".into()).into()),
        Err(e) => Err(ConfigurationError::InvalidValue(name, e.to_string()).into()),
    }
}

//-------------------------------------------------  ServerOptions  ----------------------------------------------------
/// A subset of the server configuration that is used to configure the server's behaviour. Generally we try to keep this
/// as small as possible, and exclude secrets to avoid passing sensitive information around the system.
#[derive(Clone, Copy, Debug, Default)]
pub struct ServerOptions {
    pub use_x_forwarded_for: bool,
    pub use_forwarded: bool,
}

impl ServerOptions {
    pub fn from_config(config: &ServerConfig) -> Self {
        Self { use_x_forwarded_for: config.use_x_forwarded_for, use_forwarded: config.use_forwarded }
    }
}

//-------------------------------------------------  PaymentFormConfig  ------------------------------------------------
/// What the payment form handler needs to know, besides the signer itself.
#[derive(Clone, Debug)]
pub struct PaymentFormConfig {
    pub payment_url: String,
    pub price: Amount,
}

impl PaymentFormConfig {
    pub fn from_config(config: &ServerConfig) -> Self {
        Self { payment_url: config.gateway.payment_url.clone(), price: config.shirt_price.clone() }
    }
}
