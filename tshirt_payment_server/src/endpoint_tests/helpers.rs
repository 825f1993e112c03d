use actix_web::{
    http::{header::LOCATION, StatusCode},
    test,
    test::TestRequest,
    web,
    web::ServiceConfig,
    App,
};
use log::debug;
use tshirt_payment_engine::{helpers::integrity_hash, CallbackApi, GatewayCredentials, OrderStore};
use tsp_common::Secret;

use crate::{
    config::ServerOptions,
    routes::{CallbackFormRoute, CallbackQueryRoute},
};

// Test credentials for the gateway's demo environment. DO NOT re-use these anywhere.
pub const LOGIN: &str = "WSP-TEST-01";
pub const TRANSACTION_KEY: &str = "test-transaction-key";
pub const RESPONSE_KEY: &str = "test-response-key";

pub fn credentials() -> GatewayCredentials {
    GatewayCredentials::new(LOGIN, TRANSACTION_KEY.into(), RESPONSE_KEY.into()).unwrap()
}

/// The fields of a genuine callback for `transaction_id`, with the given response code.
pub fn callback_fields(transaction_id: &str, response_code: &str) -> Vec<(String, String)> {
    let hash = integrity_hash(&Secret::from(RESPONSE_KEY), LOGIN, transaction_id, "35.00");
    [
        ("x_trans_id", transaction_id.to_string()),
        ("x_amount", "35.00".to_string()),
        ("x_response_code", response_code.to_string()),
        ("x_MD5_Hash", hash),
        ("x_first_name", "Ada".to_string()),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v))
    .collect()
}

/// Builds a query string from callback fields. The test values never need percent-encoding.
pub fn query_string(fields: &[(String, String)]) -> String {
    fields.iter().map(|(k, v)| format!("{k}={v}")).collect::<Vec<_>>().join("&")
}

pub fn configure_callbacks<B: OrderStore + 'static>(store: B) -> impl FnOnce(&mut ServiceConfig) {
    move |cfg| {
        cfg.app_data(web::Data::new(CallbackApi::new(&credentials(), store)))
            .app_data(web::Data::new(ServerOptions::default()))
            .service(CallbackQueryRoute::<B>::new())
            .service(CallbackFormRoute::<B>::new());
    }
}

pub struct TestResponse {
    pub status: StatusCode,
    pub location: Option<String>,
    pub body: String,
}

impl TestResponse {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).expect("Response body is not JSON")
    }
}

pub async fn send_request<F: FnOnce(&mut ServiceConfig)>(configure: F, req: TestRequest) -> TestResponse {
    let app = test::init_service(App::new().configure(configure)).await;
    debug!("Making request");
    let res = test::call_service(&app, req.to_request()).await;
    let status = res.status();
    let location = res.headers().get(LOCATION).and_then(|v| v.to_str().ok()).map(String::from);
    let body = String::from_utf8_lossy(&test::read_body(res).await).into_owned();
    TestResponse { status, location, body }
}

pub fn get_callback(fields: &[(String, String)]) -> TestRequest {
    TestRequest::get().uri(&format!("/form/thanks/?{}", query_string(fields)))
}

pub fn post_callback(fields: &[(String, String)]) -> TestRequest {
    TestRequest::post().uri("/form/thanks/").set_form(fields)
}
