use actix_web::{get, web, HttpResponse, Responder};
use log::{error, info};
use serde::Deserialize;
use crate::manager_view::{assemble, ViewState};
use crate::AppState;

#[derive(Deserialize, Debug)]
struct ForecastQuery {
    place: String,
}

/// One request is one full fetch and transform pass. A request for a new
/// place simply supersedes whatever came before it; nothing is shared
/// between passes.
#[get("/forecast")]
async fn forecast(params: web::Query<ForecastQuery>, data: web::Data<AppState>) -> impl Responder {
    info!("{:?}", params);

    match data.owm.fetch_forecast(&params.place).await {
        Ok(payload) => HttpResponse::Ok().json(ViewState::Ready(assemble(&payload))),
        Err(e) => {
            error!("failed to fetch forecast for {}: {}", params.place, e);
            HttpResponse::BadGateway().json(ViewState::Error { reason: e.to_string() })
        }
    }
}
