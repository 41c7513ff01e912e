use std::time::Duration;

use actix_web::{dev::Server, http::KeepAlive, middleware::Logger, web, App, HttpServer};
use order_relay_engine::{events::EventProducers, OrderFlowApi, SqliteDatabase};
use stripe_tools::{EventVerifier, StripeApi};

use crate::{
    config::ServerConfig,
    errors::ServerError,
    integrations::fulfillment::create_fulfillment_event_handlers,
    routes::{health, StripeWebhookRoute},
};

pub async fn run_server(config: ServerConfig) -> Result<(), ServerError> {
    let db = SqliteDatabase::new_with_url(&config.database_url, 25)
        .await
        .map_err(|e| ServerError::InitializeError(e.to_string()))?;
    let handlers = create_fulfillment_event_handlers(db.clone(), &config)?;
    let producers = handlers.producers();
    handlers.start_handlers().await;
    let srv = create_server_instance(config, db, producers)?;
    srv.await.map_err(|e| ServerError::Unspecified(e.to_string()))
}

pub fn create_server_instance(
    config: ServerConfig,
    db: SqliteDatabase,
    producers: EventProducers,
) -> Result<Server, ServerError> {
    let timeout = Duration::from_secs(config.call_timeout_secs);
    let stripe_api =
        StripeApi::new(config.stripe.clone(), timeout).map_err(|e| ServerError::InitializeError(e.to_string()))?;
    let verifier = EventVerifier::new(config.stripe.clone());
    let srv = HttpServer::new(move || {
        let orders_api = OrderFlowApi::new(db.clone(), producers.clone());
        App::new()
            .wrap(Logger::new("%t (%D ms) %s %a %{Host}i %U").log_target("ofr::access_log"))
            .app_data(web::Data::new(orders_api))
            .app_data(web::Data::new(stripe_api.clone()))
            .app_data(web::Data::new(verifier.clone()))
            .service(health)
            .service(StripeWebhookRoute::<SqliteDatabase, StripeApi>::new())
    })
    .keep_alive(KeepAlive::Timeout(Duration::from_secs(600)))
    .bind((config.host.as_str(), config.port))?
    .run();
    Ok(srv)
}
