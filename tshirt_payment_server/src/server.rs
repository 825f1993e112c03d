use std::time::Duration;

use actix_web::{dev::Server, http::KeepAlive, middleware::Logger, web, App, HttpServer};
use log::*;
use tshirt_payment_engine::{helpers::Signer, CallbackApi, OrderStore, SqliteOrderStore};

use crate::{
    config::{PaymentFormConfig, ServerConfig, ServerOptions},
    errors::ServerError,
    routes::{health, payment_form, CallbackFormRoute, CallbackQueryRoute},
};

pub async fn run_server(config: ServerConfig) -> Result<(), ServerError> {
    let store = SqliteOrderStore::new_with_url(&config.database_url, 25)
        .await
        .map_err(|e| ServerError::InitializeError(e.to_string()))?;
    store.migrate().await.map_err(|e| ServerError::InitializeError(e.to_string()))?;
    info!("🗃️ Order database is ready at {}", store.url());
    let srv = create_server_instance(config, store)?;
    srv.await.map_err(|e| ServerError::Unspecified(e.to_string()))
}

pub fn create_server_instance<B>(config: ServerConfig, store: B) -> Result<Server, ServerError>
where B: OrderStore + Clone + Send + 'static {
    let (host, port) = (config.host.clone(), config.port);
    let srv = HttpServer::new(move || {
        let callback_api = CallbackApi::new(&config.gateway.credentials, store.clone());
        let signer = Signer::new(&config.gateway.credentials);
        App::new()
            .wrap(Logger::new("%t (%D ms) %s %a %{Host}i %U").log_target("tsp::access_log"))
            .app_data(web::Data::new(callback_api))
            .app_data(web::Data::new(signer))
            .app_data(web::Data::new(PaymentFormConfig::from_config(&config)))
            .app_data(web::Data::new(ServerOptions::from_config(&config)))
            .service(health)
            .service(payment_form)
            .service(CallbackQueryRoute::<B>::new())
            .service(CallbackFormRoute::<B>::new())
    })
    .keep_alive(KeepAlive::Timeout(Duration::from_secs(600)))
    .bind((host.as_str(), port))?
    .run();
    Ok(srv)
}
