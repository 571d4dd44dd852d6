//! Main web app module containing the airport routes.

use actix_web::{delete, get, post, put, web, HttpResponse, Responder};
use airport_api_shared::airports::{Airport, PageQuery};
use serde_json::{Map, Value};
use tokio::sync::RwLock;

use crate::api_docs;
use crate::directory::AirportDirectory;
use crate::error::ApiError;

pub type SharedDirectory = web::Data<RwLock<AirportDirectory>>;

/// Register every route and the JSON body handling on an app.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .service(list_airports)
        .service(create_airport)
        .service(update_airport)
        .service(get_airport)
        .service(delete_airport)
        .service(api_docs::openapi_json)
        .service(api_docs::swagger_page);
}

fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, req| {
        tracing::debug!(path = %req.path(), error = %err, "Rejected request body");
        ApiError::InvalidBody(err.to_string()).into()
    })
}

/// Page through the directory in insertion order
#[get("/airports")]
pub async fn list_airports(
    directory: SharedDirectory,
    query: web::Query<PageQuery>,
) -> impl Responder {
    let directory = directory.read().await;

    match query.window() {
        Some(window) => HttpResponse::Ok().json(directory.list(window)),
        None => {
            tracing::debug!(query = ?query, "Unusable page parameters, empty page");
            HttpResponse::Ok().json(Vec::<Airport>::new())
        }
    }
}

#[post("/airports")]
pub async fn create_airport(
    directory: SharedDirectory,
    json: web::Json<Airport>,
) -> impl Responder {
    let mut directory = directory.write().await;
    let airport = directory.create(json.into_inner());
    tracing::debug!(icao = ?airport.icao(), "Created airport");

    HttpResponse::Created().json(airport)
}

/// Merge the body onto the first airport with this code
#[put("/airports/{icao}")]
pub async fn update_airport(
    directory: SharedDirectory,
    path: web::Path<String>,
    json: web::Json<Map<String, Value>>,
) -> Result<HttpResponse, ApiError> {
    let icao = path.into_inner();
    let mut directory = directory.write().await;

    let airport = directory
        .update(&icao, json.into_inner())
        .inspect_err(|err| tracing::debug!(%icao, error = %err, "Update rejected"))?;
    tracing::debug!(%icao, "Updated airport");

    Ok(HttpResponse::Accepted().json(airport))
}

/// An unknown code still answers 200, with nothing in the body
#[get("/airports/{icao}")]
pub async fn get_airport(directory: SharedDirectory, path: web::Path<String>) -> impl Responder {
    let icao = path.into_inner();
    let directory = directory.read().await;

    match directory.get(&icao) {
        Some(airport) => HttpResponse::Ok().json(airport),
        None => {
            tracing::debug!(%icao, "No such airport");
            HttpResponse::Ok().finish()
        }
    }
}

/// Always answers 202, whether or not something was removed
#[delete("/airports/{icao}/delete")]
pub async fn delete_airport(directory: SharedDirectory, path: web::Path<String>) -> impl Responder {
    let icao = path.into_inner();
    let mut directory = directory.write().await;

    match directory.delete(&icao) {
        Some(_) => tracing::debug!(%icao, "Deleted airport"),
        None => tracing::debug!(%icao, "Nothing to delete"),
    }

    HttpResponse::Accepted().finish()
}
