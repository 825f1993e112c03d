use thiserror::Error;
use tsp_common::Secret;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("The gateway {0} has not been configured.")]
    MissingValue(&'static str),
    #[error("Invalid configuration value for {0}. {1}")]
    InvalidValue(&'static str, String),
}

/// The identity and shared keys this store holds with the payment gateway.
///
/// * `login` identifies the merchant account. It is sent to the browser, so it is not a secret.
/// * `transaction_key` keys the HMAC on outbound payment requests.
/// * `response_key` is mixed into the integrity hash the gateway attaches to each callback.
///
/// None of these may be empty. They are loaded once at startup and never change afterwards.
#[derive(Clone, Debug)]
pub struct GatewayCredentials {
    login: String,
    transaction_key: Secret<String>,
    response_key: Secret<String>,
}

impl GatewayCredentials {
    pub fn new<S: Into<String>>(
        login: S,
        transaction_key: Secret<String>,
        response_key: Secret<String>,
    ) -> Result<Self, ConfigurationError> {
        let login = login.into();
        if login.is_empty() {
            return Err(ConfigurationError::MissingValue("login id"));
        }
        if transaction_key.is_empty() {
            return Err(ConfigurationError::MissingValue("transaction key"));
        }
        if response_key.is_empty() {
            return Err(ConfigurationError::MissingValue("response key"));
        }
        Ok(Self { login, transaction_key, response_key })
    }

    pub fn login(&self) -> &str {
        self.login.as_str()
    }

    pub fn transaction_key(&self) -> &Secret<String> {
        &self.transaction_key
    }

    pub fn response_key(&self) -> &Secret<String> {
        &self.response_key
    }
}
