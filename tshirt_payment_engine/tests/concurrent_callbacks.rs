mod support;

use futures_util::future::join_all;
use log::*;
use tshirt_payment_engine::{
    test_utils::prepare_env::prepare_test_db,
    CallbackApi,
    CallbackError,
    MemoryOrderStore,
    Order,
    OrderStore,
};

use crate::support::{approved_callback, credentials};

const RACERS: usize = 16;

fn tally(results: Vec<Result<Order, CallbackError>>) -> (usize, usize) {
    results.into_iter().fold((0, 0), |(accepted, replays), r| match r {
        Ok(_) => (accepted + 1, replays),
        Err(CallbackError::Replay(tid)) => {
            assert_eq!(tid.as_str(), "T1");
            (accepted, replays + 1)
        },
        Err(e) => panic!("Unexpected rejection: {e}"),
    })
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn two_concurrent_callbacks_in_memory() {
    let _ = env_logger::try_init();
    let api = CallbackApi::new(&credentials(), MemoryOrderStore::new());
    let payload = approved_callback("T1");
    let (a, b) = tokio::join!(api.handle(&payload), api.handle(&payload));
    assert_eq!(tally(vec![a, b]), (1, 1));
    assert_eq!(api.store().fetch_orders().await.unwrap().len(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn racing_callbacks_in_memory() {
    let _ = env_logger::try_init();
    let api = CallbackApi::new(&credentials(), MemoryOrderStore::new());
    let payload = approved_callback("T1");
    let results = join_all((0..RACERS).map(|_| api.handle(&payload))).await;
    assert_eq!(tally(results), (1, RACERS - 1));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn two_concurrent_callbacks_in_sqlite() {
    let (_dir, store) = prepare_test_db().await;
    let api = CallbackApi::new(&credentials(), store);
    let payload = approved_callback("T1");
    let (a, b) = tokio::join!(api.handle(&payload), api.handle(&payload));
    assert_eq!(tally(vec![a, b]), (1, 1));
    assert_eq!(api.store().fetch_orders().await.unwrap().len(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn racing_callbacks_in_sqlite() {
    let (_dir, store) = prepare_test_db().await;
    let api = CallbackApi::new(&credentials(), store);
    let payload = approved_callback("T1");
    info!("🚀️ Racing {RACERS} identical callbacks");
    let results = join_all((0..RACERS).map(|_| api.handle(&payload))).await;
    assert_eq!(tally(results), (1, RACERS - 1));
    let orders = api.store().fetch_orders().await.unwrap();
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].fields["x_email"], "ada@example.com");
}
