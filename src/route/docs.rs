use std::sync::Arc;

use aide::{axum::ApiRouter, openapi::OpenApi};
use axum::{response::IntoResponse, routing::get, Extension};

use crate::extract::Json;

/// Serves the generated `OpenAPI` document.
///
/// The document is attached as an [`Extension`] once every route is registered.
pub fn routes<S>() -> ApiRouter<S>
where
	S: Clone + Send + Sync + 'static,
{
	ApiRouter::new().route("/api.json", get(serve_docs))
}

async fn serve_docs(Extension(api): Extension<Arc<OpenApi>>) -> impl IntoResponse {
	Json(api.as_ref()).into_response()
}
