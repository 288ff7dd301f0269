pub mod handlers;
pub mod response;

use crate::core::projection::FieldProjection;
use crate::core::{RecordSource, ResumeField};
use axum::extract::State;
use axum::response::Redirect;
use axum::routing::get;
use axum::Router;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Immutable state shared by every request.
#[derive(Clone)]
pub struct AppState {
    projection: FieldProjection,
}

impl AppState {
    pub fn new(source: Arc<dyn RecordSource>) -> Self {
        Self {
            projection: FieldProjection::new(source),
        }
    }

    pub fn projection(&self) -> &FieldProjection {
        &self.projection
    }
}

/// One GET route per [`ResumeField`] (the slashless path redirects to it),
/// plus `/` and `/ping`.
pub fn create_router(state: AppState) -> Router {
    let mut router: Router<AppState> = Router::new()
        .route("/", get(handlers::root_handler))
        .route("/ping", get(handlers::ping_handler));

    for field in ResumeField::ALL {
        router = router.route(
            field.route_path(),
            get(move |state: State<AppState>| handlers::field_handler(state, field)),
        );
        // `/ResumeTech` → 307 → `/ResumeTech/`
        router = router.route(
            field.route_path().trim_end_matches('/'),
            get(move || async move { Redirect::temporary(field.route_path()) }),
        );
    }

    router.layer(TraceLayer::new_for_http()).with_state(state)
}
