//! Field names and constants of the First Data Global Gateway e4 (GGe4) hosted payment page protocol.
//!
//! The outbound form carries `x_login`, `x_amount`, `x_fp_sequence`, `x_fp_timestamp` and `x_fp_hash`. After payment
//! the gateway sends the browser back with the transaction outcome in `x_trans_id`, `x_amount`, `x_response_code`
//! and the integrity hash `x_MD5_Hash`, alongside whatever customer details the merchant asked for.

pub const LOGIN: &str = "x_login";
pub const AMOUNT: &str = "x_amount";
pub const FP_SEQUENCE: &str = "x_fp_sequence";
pub const FP_TIMESTAMP: &str = "x_fp_timestamp";
pub const FP_HASH: &str = "x_fp_hash";

pub const TRANSACTION_ID: &str = "x_trans_id";
pub const RESPONSE_CODE: &str = "x_response_code";
pub const MD5_HASH: &str = "x_MD5_Hash";

/// `x_response_code` for an approved transaction. Anything else is declined, held for review, or an error.
pub const RESPONSE_APPROVED: &str = "1";

pub const DEMO_PAYMENT_URL: &str = "https://demo.globalgatewaye4.firstdata.com/payment";
pub const LIVE_PAYMENT_URL: &str = "https://checkout.globalgatewaye4.firstdata.com/payment";
