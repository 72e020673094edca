//! Demo routes: fixed text endpoints and a static file mount. They hold no
//! state and are only mounted when `DEMO_ROUTES` is enabled.

use axum::Router;
use tower_http::services::ServeDir;

mod handlers;

pub fn router<S>(static_dir: &str) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new()
        .merge(handlers::demo_routes())
        .nest_service("/static", ServeDir::new(static_dir))
}
