//! HTTP router

use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

use crate::state::AppState;
use crate::{admin, console, public};

/// Build the full application router
pub fn build_router(state: AppState) -> Router {
    let cors = if state.config.server.cors_permissive {
        CorsLayer::permissive()
    } else {
        CorsLayer::new()
    };
    let static_dir = state.config.site.static_dir.clone();

    let public_api = Router::new()
        .route("/health", get(public::health))
        .route("/categories", get(public::list_categories))
        .route("/categories/:category", get(public::category_tools))
        .route("/tools", get(public::list_tools))
        .route("/tools/popular", get(public::popular_tools))
        .route("/tools/:id", get(public::get_tool))
        .route("/tools/:id/process", post(public::process_tool))
        .route("/search", get(public::search));

    let admin_api = Router::new()
        .route("/login", post(admin::login))
        .route("/logout", post(admin::logout))
        .route("/dashboard", get(admin::dashboard))
        .route("/tools", get(admin::list_tools).post(admin::create_tool))
        .route(
            "/tools/:id",
            get(admin::get_tool).put(admin::update_tool).delete(admin::delete_tool),
        )
        .route("/tools/:id/toggle-status", post(admin::toggle_tool_status))
        .route("/selection", get(admin::get_selection).delete(admin::clear_selection))
        .route("/selection/toggle", post(admin::toggle_selection))
        .route("/selection/all", post(admin::select_all))
        .route("/selection/delete", post(admin::delete_selected))
        .route("/analytics", get(admin::analytics))
        .route("/adsense", get(admin::get_adsense))
        .route("/adsense/publisher", put(admin::set_publisher))
        .route("/adsense/units/:id", put(admin::update_ad_unit))
        .route("/adsense/units/:id/toggle", post(admin::toggle_ad_unit))
        .route("/settings", get(admin::get_settings).put(admin::update_settings));

    let mut app = Router::new()
        .route("/", get(console::console))
        .nest("/api", public_api)
        .nest("/api/admin", admin_api);

    if let Some(dir) = static_dir {
        app = app.nest_service("/static", ServeDir::new(dir));
    }

    app.layer(cors).layer(TraceLayer::new_for_http()).with_state(state)
}
