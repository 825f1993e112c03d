use actix_web::{http::StatusCode, test::TestRequest, web, web::ServiceConfig};
use tshirt_payment_engine::helpers::{keyed_signature, signature_message, Signer, SEQUENCE_RANGE};
use tsp_common::{Amount, Secret};

use super::helpers::{credentials, send_request, LOGIN, TRANSACTION_KEY};
use crate::{config::PaymentFormConfig, routes::payment_form};

fn configure(cfg: &mut ServiceConfig) {
    let form = PaymentFormConfig {
        payment_url: "https://demo.globalgatewaye4.firstdata.com/payment".into(),
        price: "35.00".parse().unwrap(),
    };
    cfg.app_data(web::Data::new(Signer::new(&credentials())))
        .app_data(web::Data::new(form))
        .service(payment_form);
}

#[actix_web::test]
async fn payment_form_is_signed() {
    let _ = env_logger::try_init().ok();
    let res = send_request(configure, TestRequest::get().uri("/form/buy/")).await;
    assert_eq!(res.status, StatusCode::OK);
    let form = res.json();
    assert_eq!(form["form_url"], "https://demo.globalgatewaye4.firstdata.com/payment");
    assert_eq!(form["x_login"], LOGIN);
    assert_eq!(form["x_amount"], "35.00");
    assert!(form.get("authorized").is_none());

    let sequence = form["x_fp_sequence"].as_u64().unwrap() as u32;
    assert!(SEQUENCE_RANGE.contains(&sequence));
    let timestamp = form["x_fp_timestamp"].as_i64().unwrap();
    let amount = "35.00".parse::<Amount>().unwrap();
    let expected = keyed_signature(
        &Secret::from(TRANSACTION_KEY),
        &signature_message(LOGIN, sequence, timestamp, &amount),
    );
    assert_eq!(form["x_fp_hash"], expected.as_str());
    assert_eq!(expected.len(), 32);
}

#[actix_web::test]
async fn declined_flag_is_echoed() {
    let _ = env_logger::try_init().ok();
    let res = send_request(configure, TestRequest::get().uri("/form/buy/?authorized=false")).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.json()["authorized"], "false");
}
