mod doc;
mod dtos;
mod routes;
mod utils;

use axum::{
    Router,
    routing::{get, post},
};
use log::info;
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use tower_oauth2_resource_server::server::OAuth2ResourceServer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    env_logger::init();

    let issuer_url = std::env::var("OIDC_ISSUER_URL").expect("OIDC_ISSUER_URL is not set");

    let oauth2_resource_server = <OAuth2ResourceServer>::builder()
        .issuer_url(issuer_url.as_str())
        .build()
        .await
        .expect("Failed to build OAuth2ResourceServer");

    let protected = Router::new()
        .route("/me", get(routes::auth::me))
        .route(
            "/plans/{plan_id}/fulfillments",
            get(routes::plan::get_fulfillments),
        )
        .route(
            "/plans/{plan_id}/fulfillments/assign",
            post(routes::plan::assign_fulfillments),
        )
        .route(
            "/plans/{plan_id}/programs/{program_id}/progress",
            get(routes::progress::get_program_progress),
        )
        .layer(ServiceBuilder::new().layer(oauth2_resource_server.into_layer()));

    let app = Router::new()
        .route("/", get(routes::root::root))
        .route("/health", get(routes::health::health))
        .merge(protected)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", doc::ApiDoc::openapi()))
        .layer(CompressionLayer::new());

    let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await.unwrap();
    info!("Running axum on http://localhost:3000");

    axum::serve(listener, app)
        .with_graceful_shutdown(utils::shutdown::shutdown_signal())
        .await
        .unwrap();
}
