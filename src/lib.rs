use crate::relay::ContactRelay;
use crate::routes::StaticAssets;
use actix_web::{dev::Server, web, App, HttpServer};
use tracing_actix_web::TracingLogger;

pub mod client;
pub mod configuration;
pub mod domain;
pub mod email_client;
pub mod image_generation;
pub mod relay;
pub mod routes;
pub mod startup;
pub mod telemetry;
pub mod utils;

pub fn run(
    listener: std::net::TcpListener,
    relay: ContactRelay,
    assets: StaticAssets,
) -> Result<Server, std::io::Error> {
    let relay = web::Data::new(relay);
    let assets = web::Data::new(assets);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .route("/healthz", web::get().to(routes::ping))
            .service(
                web::resource("/api/contact")
                    .app_data(web::JsonConfig::default().error_handler(routes::json_error_handler))
                    .route(web::post().to(routes::contact)),
            )
            .default_service(web::to(routes::spa))
            .app_data(relay.clone())
            .app_data(assets.clone())
    })
    .listen(listener)?
    .run();

    Ok(server)
}
