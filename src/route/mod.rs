use std::sync::Arc;

use aide::{
	axum::{routing::get_with, ApiRouter},
	openapi::OpenApi,
};
use axum::{
	http::{header, StatusCode},
	middleware,
	response::{IntoResponse, Response},
	Extension, Router,
};
use macros::route;
use schemars::JsonSchema;
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::{
	cors::CorsLayer,
	request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
	trace::TraceLayer,
};

use crate::{error::AppError, extract::Json, openapi, openapi::tag, AppState};

pub mod docs;
pub mod model;
pub mod post;
pub mod user;

/// Builds the application router.
///
/// Routes are registered once here; requests are dispatched by path, then method.
pub fn app(state: AppState) -> Router {
	let mut api = OpenApi::default();

	let router = ApiRouter::new()
		.api_route("/", get_with(index, index_docs))
		.nest("/users", user::routes())
		.nest("/posts", post::routes())
		.nest("/docs", docs::routes())
		.finish_api_with(&mut api, openapi::docs);

	router
		.fallback(not_found)
		.layer(Extension(Arc::new(api)))
		.layer(middleware::map_response(method_not_allowed))
		.layer(
			ServiceBuilder::new()
				.layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
				.layer(TraceLayer::new_for_http())
				.layer(CorsLayer::permissive())
				.layer(PropagateRequestIdLayer::x_request_id()),
		)
		.with_state(state)
}

#[derive(Debug, Serialize, JsonSchema)]
pub struct Health {
	/// Always `ok` while the service is running.
	pub status: &'static str,
}

/// Health check
/// Reports that the service is up.
#[route(tag = tag::SERVICE)]
pub async fn index() -> Json<Health> {
	Json(Health { status: "ok" })
}

async fn not_found() -> AppError {
	AppError::NotFound
}

/// Gives the empty `405` responses produced by the router a JSON body,
/// keeping the `Allow` header.
async fn method_not_allowed(response: Response) -> Response {
	if response.status() != StatusCode::METHOD_NOT_ALLOWED {
		return response;
	}

	let allow = response.headers().get(header::ALLOW).cloned();
	let mut response = AppError::MethodNotAllowed.into_response();

	if let Some(allow) = allow {
		response.headers_mut().insert(header::ALLOW, allow);
	}

	response
}

#[cfg(test)]
mod test {
	use axum::http::{header, HeaderValue, Method};

	use crate::test::*;

	#[tokio::test]
	async fn test_index() {
		let response = app().get("/").await;

		assert_eq!(response.status_code(), 200);
		assert_eq!(response.json::<Value>()["status"], "ok");
	}

	#[tokio::test]
	async fn test_method_not_allowed() {
		let app = app();

		for response in [
			app.put("/").await,
			app.delete("/").await,
			app.get("/users").await,
			app.delete("/posts/users/alice").await,
		] {
			assert_eq!(response.status_code(), 405);
			assert!(response
				.header("content-type")
				.to_str()
				.unwrap()
				.starts_with("application/json"));
			assert_eq!(response.json::<Value>()["success"], false);
		}
	}

	#[tokio::test]
	async fn test_not_found() {
		let response = app().get("/comments").await;

		assert_eq!(response.status_code(), 404);
		assert_eq!(response.json::<Value>()["success"], false);
	}

	#[tokio::test]
	async fn test_request_id() {
		let response = app().get("/").await;

		assert!(!response.header("x-request-id").is_empty());
	}

	#[tokio::test]
	async fn test_cors() {
		let app = app();

		let response = app
			.get("/")
			.add_header(header::ORIGIN, HeaderValue::from_static("https://example.com"))
			.await;

		assert_eq!(response.status_code(), 200);
		assert_eq!(response.header("access-control-allow-origin"), "*");

		let response = app
			.method(Method::OPTIONS, "/users")
			.add_header(header::ORIGIN, HeaderValue::from_static("https://example.com"))
			.add_header(
				header::ACCESS_CONTROL_REQUEST_METHOD,
				HeaderValue::from_static("POST"),
			)
			.await;

		assert_eq!(response.status_code(), 200);
		assert!(!response
			.header("access-control-allow-methods")
			.is_empty());
	}

	#[tokio::test]
	async fn test_openapi_document() {
		let response = app().get("/docs/api.json").await;

		assert_eq!(response.status_code(), 200);

		let api = response.json::<Value>();

		assert!(api["paths"].get("/posts/users/{id}").is_some());
	}
}
