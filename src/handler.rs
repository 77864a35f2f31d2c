use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use tracing::error;

use crate::{app::AppData, store::coerce_count};

#[derive(Debug, Serialize)]
struct CountBody {
    count: u64,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

/// Handle one counter invocation. Request content is ignored: the single
/// record is atomically incremented and its new value returned.
///
/// Any store failure is logged and mapped to a 500 here; nothing propagates
/// past this boundary. Failure responses intentionally carry no CORS
/// headers, only successes do.
pub async fn hit(State(data): State<AppData>) -> Response {
    let result = data
        .store
        .bump()
        .await
        .and_then(|raw| coerce_count(&raw));

    let count = match result {
        Ok(count) => count,
        Err(err) => {
            error!("fail to update view counter: {err:#}");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorBody {
                    error: format!("{err:#}"),
                }),
            )
                .into_response();
        }
    };

    (
        StatusCode::OK,
        [
            (
                header::ACCESS_CONTROL_ALLOW_ORIGIN,
                data.config.allowed_origin.clone(),
            ),
            (
                header::ACCESS_CONTROL_ALLOW_METHODS,
                "GET, OPTIONS".to_string(),
            ),
        ],
        Json(CountBody { count }),
    )
        .into_response()
}

/// Build the service router. OPTIONS preflight is the hosting layer's
/// concern and is not routed here.
pub fn router(data: AppData) -> Router {
    Router::new().route("/", get(hit)).with_state(data)
}
