use tshirt_payment_engine::{helpers::integrity_hash, CallbackPayload, GatewayCredentials};
use tsp_common::Secret;

pub const LOGIN: &str = "WSP-TEST-01";
pub const TRANSACTION_KEY: &str = "test-transaction-key";
pub const RESPONSE_KEY: &str = "test-response-key";

pub fn credentials() -> GatewayCredentials {
    GatewayCredentials::new(LOGIN, TRANSACTION_KEY.into(), RESPONSE_KEY.into()).expect("valid test credentials")
}

/// A genuine callback for an approved payment of 35.00
pub fn approved_callback(tid: &str) -> CallbackPayload {
    let hash = integrity_hash(&Secret::from(RESPONSE_KEY), LOGIN, tid, "35.00");
    CallbackPayload::from_pairs([
        ("x_trans_id", tid.to_string()),
        ("x_amount", "35.00".to_string()),
        ("x_response_code", "1".to_string()),
        ("x_MD5_Hash", hash),
        ("x_email", "ada@example.com".to_string()),
    ])
}
