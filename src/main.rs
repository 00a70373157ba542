mod errors;
mod handlers;
mod initialization;
mod manager_owm;
mod manager_view;
mod partition;
mod units;

use actix_web::{web, App, HttpServer};
use log::info;
use crate::errors::UnrecoverableError;
use crate::initialization::config;
use crate::manager_owm::OWM;

pub struct AppState {
    owm: OWM,
}

#[actix_web::main]
async fn main() -> Result<(), UnrecoverableError> {
    let config = config()?;
    initialization::logging(&config.general)?;

    let owm = OWM::new(&config.owm.api_key)?;

    info!("starting forecast server on {}:{}",
        config.web_server.bind_address, config.web_server.bind_port);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(AppState { owm: owm.clone() }))
            .service(handlers::forecast)
    })
        .bind((config.web_server.bind_address, config.web_server.bind_port))?
        .run()
        .await?;

    Ok(())
}
