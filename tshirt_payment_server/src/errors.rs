use actix_web::{
    error::ResponseError,
    http::{
        header::{ContentType, LOCATION},
        StatusCode,
    },
    HttpResponse,
};
use thiserror::Error;
use tshirt_payment_engine::{CallbackError, ConfigurationError};

use crate::routes::DECLINED_REDIRECT;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Could not initialize server. {0}")]
    InitializeError(String),
    #[error("An error occurred on the backend of the server. {0}")]
    BackendError(String),
    #[error("An I/O error happened in the server. {0}")]
    IOError(#[from] std::io::Error),
    #[error("Invalid server configuration. {0}")]
    ConfigurationError(String),
    #[error("Malformed payment callback. {0}")]
    MalformedCallback(String),
    #[error("Payment callback failed the integrity check. {0}")]
    InvalidCallbackHash(String),
    #[error("The payment was declined. {0}")]
    PaymentDeclined(String),
    #[error("Replayed payment callback. {0}")]
    ReplayedTransaction(String),
    #[error("UnspecifiedError. {0}")]
    Unspecified(String),
}

impl ResponseError for ServerError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::MalformedCallback(_) => StatusCode::BAD_REQUEST,
            Self::InvalidCallbackHash(_) => StatusCode::UNAUTHORIZED,
            Self::PaymentDeclined(_) => StatusCode::FOUND,
            Self::ReplayedTransaction(_) => StatusCode::PRECONDITION_FAILED,
            Self::InitializeError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::BackendError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::IOError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::ConfigurationError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Unspecified(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            // A declined card is an everyday event: send the customer back to the purchase form.
            Self::PaymentDeclined(_) => {
                HttpResponse::build(self.status_code()).insert_header((LOCATION, DECLINED_REDIRECT)).finish()
            },
            _ => HttpResponse::build(self.status_code())
                .insert_header(ContentType::json())
                .body(serde_json::json!({ "error": self.to_string() }).to_string()),
        }
    }
}

impl From<CallbackError> for ServerError {
    fn from(e: CallbackError) -> Self {
        match e {
            CallbackError::MalformedRequest(_) => Self::MalformedCallback(e.to_string()),
            CallbackError::HashMismatch(_) => Self::InvalidCallbackHash(e.to_string()),
            CallbackError::Unauthorized { .. } => Self::PaymentDeclined(e.to_string()),
            CallbackError::Replay(_) => Self::ReplayedTransaction(e.to_string()),
            CallbackError::StoreError(_) => Self::BackendError(e.to_string()),
        }
    }
}

impl From<ConfigurationError> for ServerError {
    fn from(e: ConfigurationError) -> Self {
        Self::ConfigurationError(e.to_string())
    }
}
