use actix_web::http::StatusCode;
use tshirt_payment_engine::{test_utils::prepare_env::prepare_test_db, MemoryOrderStore, OrderStore, OrderStoreError};

use super::{
    helpers::{callback_fields, configure_callbacks, get_callback, post_callback, send_request},
    mocks::MockStore,
};

#[actix_web::test]
async fn accepted_callback_via_query() {
    let _ = env_logger::try_init().ok();
    let store = MemoryOrderStore::new();
    let fields = callback_fields("T1", "1");
    let res = send_request(configure_callbacks(store.clone()), get_callback(&fields)).await;
    assert_eq!(res.status, StatusCode::CREATED);
    let order = res.json();
    assert_eq!(order["transaction_id"], "T1");
    assert_eq!(order["amount"], "35.00");
    assert_eq!(order["response_code"], "1");
    assert_eq!(order["fields"]["x_first_name"], "Ada");
    assert_eq!(store.fetch_orders().await.unwrap().len(), 1);
}

#[actix_web::test]
async fn accepted_callback_via_form() {
    let _ = env_logger::try_init().ok();
    let store = MemoryOrderStore::new();
    let fields = callback_fields("T7", "1");
    let res = send_request(configure_callbacks(store.clone()), post_callback(&fields)).await;
    assert_eq!(res.status, StatusCode::CREATED);
    assert_eq!(res.json()["transaction_id"], "T7");
    assert!(store.fetch_order(&"T7".into()).await.unwrap().is_some());
}

#[actix_web::test]
async fn missing_transaction_id_is_a_bad_request() {
    let _ = env_logger::try_init().ok();
    let store = MemoryOrderStore::new();
    let fields = callback_fields("T1", "1").into_iter().filter(|(k, _)| k != "x_trans_id").collect::<Vec<_>>();
    let res = send_request(configure_callbacks(store.clone()), get_callback(&fields)).await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.json()["error"], "Malformed payment callback. The callback is missing the required field x_trans_id.");
    assert!(store.fetch_orders().await.unwrap().is_empty());
}

#[actix_web::test]
async fn tampered_amount_is_unauthorized() {
    let _ = env_logger::try_init().ok();
    let store = MemoryOrderStore::new();
    let fields = callback_fields("T1", "1")
        .into_iter()
        .map(|(k, v)| if k == "x_amount" { (k, "1.00".to_string()) } else { (k, v) })
        .collect::<Vec<_>>();
    let res = send_request(configure_callbacks(store.clone()), post_callback(&fields)).await;
    assert_eq!(res.status, StatusCode::UNAUTHORIZED);
    assert_eq!(
        res.json()["error"],
        "Payment callback failed the integrity check. The integrity hash for transaction T1 is invalid."
    );
    assert!(store.fetch_orders().await.unwrap().is_empty());
}

#[actix_web::test]
async fn declined_payment_redirects_to_the_buy_form() {
    let _ = env_logger::try_init().ok();
    let store = MemoryOrderStore::new();
    let fields = callback_fields("T1", "2");
    let res = send_request(configure_callbacks(store.clone()), get_callback(&fields)).await;
    assert_eq!(res.status, StatusCode::FOUND);
    assert_eq!(res.location.as_deref(), Some("/form/buy/?authorized=false"));
    assert!(store.fetch_orders().await.unwrap().is_empty());
}

#[actix_web::test]
async fn replayed_callback_is_rejected() {
    let _ = env_logger::try_init().ok();
    let store = MemoryOrderStore::new();
    let fields = callback_fields("T1", "1");
    let res = send_request(configure_callbacks(store.clone()), get_callback(&fields)).await;
    assert_eq!(res.status, StatusCode::CREATED);
    // Same callback again, this time as a form post
    let res = send_request(configure_callbacks(store.clone()), post_callback(&fields)).await;
    assert_eq!(res.status, StatusCode::PRECONDITION_FAILED);
    assert_eq!(res.json()["error"], "Replayed payment callback. Transaction T1 has already been used for an order.");
    assert_eq!(store.fetch_orders().await.unwrap().len(), 1);
}

#[actix_web::test]
async fn first_of_repeated_fields_is_used() {
    let _ = env_logger::try_init().ok();
    let store = MemoryOrderStore::new();
    let mut fields = callback_fields("T1", "1");
    fields.push(("x_trans_id".to_string(), "T2".to_string()));
    let res = send_request(configure_callbacks(store.clone()), get_callback(&fields)).await;
    assert_eq!(res.status, StatusCode::CREATED);
    assert_eq!(res.json()["transaction_id"], "T1");
    assert!(store.fetch_order(&"T2".into()).await.unwrap().is_none());
}

#[actix_web::test]
async fn store_failure_is_a_server_error() {
    let _ = env_logger::try_init().ok();
    let mut store = MockStore::new();
    store.expect_exists().returning(|_| Err(OrderStoreError::DatabaseError("disk I/O error".into())));
    store.expect_insert().never();
    let fields = callback_fields("T1", "1");
    let res = send_request(configure_callbacks(store), get_callback(&fields)).await;
    assert_eq!(res.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(res.json()["error"].as_str().unwrap().contains("disk I/O error"));
}

#[actix_web::test]
async fn sqlite_backed_callbacks() {
    let (_dir, store) = prepare_test_db().await;
    let fields = callback_fields("T42", "1");
    let res = send_request(configure_callbacks(store.clone()), post_callback(&fields)).await;
    assert_eq!(res.status, StatusCode::CREATED);
    let res = send_request(configure_callbacks(store.clone()), get_callback(&fields)).await;
    assert_eq!(res.status, StatusCode::PRECONDITION_FAILED);
    let orders = store.fetch_orders().await.unwrap();
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].transaction_id.as_str(), "T42");
    assert_eq!(orders[0].fields["x_first_name"], "Ada");
}
