pub mod health;
pub mod meals;
pub mod menu;


use axum::{
    http::{header, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::AppState;

pub fn router(state: AppState) -> Router {
    let cors = cors_layer(state.config.app_base_url.clone());

    Router::new()
        .route("/health", get(health::health_check))
        .route("/getMenu", get(menu::get_menu))
        .route("/addMenu", post(menu::add_menu))
        .route("/changeMeal", post(menu::change_meal))
        .route("/getMeals", get(meals::get_meals))
        .route("/addMeal", post(meals::add_meal))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}

/// Localhost is always allowed; `base_url` is matched exactly.
/// Without a base URL every origin is accepted.
fn cors_layer(base_url: Option<String>) -> CorsLayer {
    let origin = match base_url {
        None => AllowOrigin::any(),
        Some(base) => AllowOrigin::predicate(move |origin: &HeaderValue, _| {
            let Ok(o) = origin.to_str() else {
                return false;
            };
            o.starts_with("http://localhost") || o.starts_with("http://127.0.0.1") || o == base
        }),
    };

    CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .allow_origin(origin)
}
