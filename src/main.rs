use std::io;
use std::sync::Arc;

use actix_web::{App, HttpServer, web};
use actix_web::middleware::Logger;
use env_logger::Env;
use log::{error, info, warn};

use crate::api::distances::calculate_distances;
use crate::config::Settings;
use crate::data::geocode::GoogleGeocoder;
use crate::data::pipeline::Pipeline;

mod api;
mod config;
mod data;
mod error;
mod utils;

#[actix_rt::main]
async fn main() -> io::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let settings = Settings::from_env().map_err(|err| {
        error!("{}", err);
        io::Error::new(io::ErrorKind::InvalidInput, err)
    })?;
    if settings.api_key.is_none() {
        warn!("API_KEY is not set, every request will be rejected");
    }

    let geocoder = GoogleGeocoder::new(&settings).map_err(|err| {
        io::Error::new(io::ErrorKind::Other, err.to_string())
    })?;

    let bind_address = settings.bind_address.clone();
    let pipeline = web::Data::new(Pipeline::new(settings, Arc::new(geocoder)));

    info!("Listening on {}", bind_address);
    HttpServer::new(move || {
        App::new()
            .app_data(pipeline.clone())
            .wrap(Logger::default())
            .route("/calculateDistances", web::post().to(calculate_distances))
    })
    .bind(bind_address)?
    .run()
    .await
}
