use actix_web::{web, HttpServer};
use error_stack::{Result, ResultExt};
use std::process;
use thiserror::Error;
use tracing_actix_web::TracingLogger;

use roster::{config, http, App};

#[derive(Debug, Error)]
#[error("Failed to start the server")]
struct StartError;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    if let Err(error) = run().await {
        eprintln!("{error:?}");
        process::exit(1);
    }
}

async fn run() -> Result<(), StartError> {
    let config = config::Server::load().change_context(StartError)?;
    let bind_addr = (config.address, config.port);
    let app = App::new(config).await.change_context(StartError)?;

    tracing::info!("listening on {}:{}", bind_addr.0, bind_addr.1);

    HttpServer::new(move || {
        actix_web::App::new()
            .app_data(web::Data::new(app.clone()))
            .wrap(TracingLogger::default())
            .configure(http::controllers::configure)
    })
    .bind(bind_addr)
    .change_context(StartError)
    .attach_printable("could not bind to the configured address")?
    .run()
    .await
    .change_context(StartError)
}
