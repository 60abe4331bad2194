use std::process::exit;
use std::sync::Arc;

use actix_web::{App, HttpResponse, HttpServer, Responder, get, middleware::Logger, post, web};
use chart_model::SymbolOption;
use dashboard_core::Dashboard;
use fmp_api::{FmpAPI, MarketDataClient};
use log::{error, info, warn};
use serde::{Deserialize, Serialize};

mod config;
mod utils;

use config::Config;

#[derive(Serialize)]
struct HealthcheckResponse {
    status: String,
    chart: String,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

#[derive(Deserialize)]
struct InputEvent {
    text: String,
}

#[get("/healthcheck")]
async fn healthcheck(dashboard: web::Data<Dashboard>) -> impl Responder {
    web::Json(HealthcheckResponse {
        status: "ok".to_string(),
        chart: dashboard.chart_phase().name().to_string(),
    })
}

#[get("/state")]
async fn get_state(dashboard: web::Data<Dashboard>) -> impl Responder {
    web::Json(dashboard.view())
}

#[post("/input")]
async fn post_input(event: web::Json<InputEvent>, dashboard: web::Data<Dashboard>) -> impl Responder {
    dashboard.on_input_changed(&utils::sanitize_query(&event.text));
    web::Json(dashboard.view())
}

#[post("/select")]
async fn post_select(
    selection: web::Json<Option<SymbolOption>>,
    dashboard: web::Data<Dashboard>,
) -> HttpResponse {
    let selection = match selection.into_inner() {
        Some(option) => {
            let symbol = utils::sanitize_ticker(option.symbol);
            if symbol.is_empty() {
                return HttpResponse::BadRequest().json(ErrorResponse {
                    error: "invalid symbol".to_string(),
                });
            }
            Some(SymbolOption::new(symbol, option.label))
        }
        None => None,
    };

    dashboard.on_symbol_selected(selection);
    HttpResponse::Ok().json(dashboard.view())
}

#[get("/stock/{symbol}")]
async fn get_stock(symbol: web::Path<String>, api: web::Data<FmpAPI>) -> HttpResponse {
    let sanitized_symbol = utils::sanitize_ticker(symbol.into_inner());
    match api.fetch_stock_data(&sanitized_symbol).await {
        Ok(history) => HttpResponse::Ok().json(history),
        Err(e) => {
            warn!("get_stock | {}", e);
            HttpResponse::BadGateway().json(ErrorResponse {
                error: e.to_string(),
            })
        }
    }
}

async fn not_found() -> impl Responder {
    HttpResponse::NotFound().json(serde_json::json!({"status": "not found"}))
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    let config = match Config::new() {
        Ok(config) => config,
        Err(e) => {
            error!("Could not create config: {}", e);
            exit(1);
        }
    };

    info!(
        "Default symbol: {} | debounce: {:?} | stale responses: {}",
        config.dashboard.default_symbol,
        config.dashboard.debounce,
        config.dashboard.stale_responses
    );

    let fmp_api = FmpAPI::new(config.fmp.clone());
    let dashboard = Dashboard::new(Arc::new(fmp_api.clone()), config.dashboard.clone());
    dashboard.start();

    let dashboard = web::Data::new(dashboard);
    let fmp_api = web::Data::new(fmp_api);

    HttpServer::new(move || {
        App::new()
            .app_data(dashboard.clone())
            .app_data(fmp_api.clone())
            .service(healthcheck)
            .service(get_state)
            .service(post_input)
            .service(post_select)
            .service(get_stock)
            .default_service(web::to(not_found))
            .wrap(Logger::default())
    })
    .bind(config.bind.as_str())?
    .workers(config.workers)
    .run()
    .await
}
