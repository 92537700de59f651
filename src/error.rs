use std::borrow::Cow;

use axum::{
	extract::rejection,
	http::StatusCode,
	response::{IntoResponse, Response},
};
use schemars::JsonSchema;
use serde::Serialize;

use crate::{extract::Json, store};

pub type Map = serde_json::Map<String, serde_json::Value>;

/// A single error message presented to the client.
#[derive(Debug, Serialize, JsonSchema)]
pub struct Message<'a> {
	/// Human readable description of the error.
	pub content: Cow<'a, str>,
	/// The input field the error refers to, if any.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub field: Option<Cow<'a, str>>,
	/// Additional machine readable context.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub details: Option<Map>,
}

impl<'a> Message<'a> {
	pub fn new(content: impl Into<Cow<'a, str>>) -> Self {
		Self {
			content: content.into(),
			field: None,
			details: None,
		}
	}

	#[must_use]
	pub fn field(mut self, field: impl Into<Cow<'a, str>>) -> Self {
		self.field = Some(field.into());
		self
	}

	#[must_use]
	pub fn detail(mut self, key: &str, value: impl Into<serde_json::Value>) -> Self {
		self.details
			.get_or_insert_with(Map::new)
			.insert(key.into(), value.into());
		self
	}

	pub fn into_vec(self) -> Vec<Self> {
		vec![self]
	}
}

/// The body of every error response.
#[derive(Debug, Serialize, JsonSchema)]
pub struct ErrorResponse<'a> {
	/// Always `false`.
	pub success: bool,
	pub errors: Vec<Message<'a>>,
}

/// Shape of a route-specific error: its status code and the messages sent to the client.
pub trait ErrorShape: std::error::Error {
	fn status(&self) -> StatusCode;

	fn into_errors(self) -> Vec<Message<'static>>;
}

/// Errors shared by every route.
///
/// The Display output is logged, not sent to the client, so it can
/// contain sensitive information.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
	#[error("validation error: {0}")]
	Validation(#[from] validator::ValidationErrors),
	#[error("json error: {0}")]
	Json(#[from] rejection::JsonRejection),
	#[error("query error: {0}")]
	Query(#[from] rejection::QueryRejection),
	#[error("path error: {0}")]
	Path(#[from] rejection::PathRejection),
	#[error("invalid id {0:?}")]
	InvalidId(String),
	#[error("store error: {0}")]
	Store(#[from] store::Error),
	#[error("password hashing error: {0}")]
	Argon(#[from] argon2::Error),
	#[error("method not allowed")]
	MethodNotAllowed,
	#[error("not found")]
	NotFound,
}

impl AppError {
	pub fn status(&self) -> StatusCode {
		match self {
			Self::Validation(..)
			| Self::Json(..)
			| Self::Query(..)
			| Self::Path(..)
			| Self::InvalidId(..) => StatusCode::BAD_REQUEST,
			Self::Store(store::Error::Timeout(..)) => StatusCode::GATEWAY_TIMEOUT,
			Self::Store(store::Error::Duplicate) => StatusCode::CONFLICT,
			Self::Store(..) | Self::Argon(..) => StatusCode::INTERNAL_SERVER_ERROR,
			Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
			Self::NotFound => StatusCode::NOT_FOUND,
		}
	}

	pub fn into_errors(self) -> Vec<Message<'static>> {
		match self {
			Self::Validation(errors) => errors
				.field_errors()
				.into_iter()
				.flat_map(|(field, errors)| {
					let field = field.to_string();

					errors.iter().map(move |error| {
						let content = error
							.message
							.clone()
							.unwrap_or_else(|| format!("invalid {field}").into());

						Message::new(content)
							.field(field.clone())
							.detail("code", error.code.to_string())
					})
				})
				.collect(),
			Self::Json(rejection) => Message::new(rejection.body_text()).into_vec(),
			Self::Query(rejection) => Message::new(rejection.body_text()).into_vec(),
			Self::Path(rejection) => Message::new(rejection.body_text()).into_vec(),
			Self::InvalidId(id) => Message::new("The id must be a 24 character hex string.")
				.detail("id", id)
				.into_vec(),
			Self::Store(store::Error::Timeout(..)) => {
				Message::new("The database did not respond in time.").into_vec()
			}
			Self::Store(store::Error::Duplicate) => {
				Message::new("A record with the same key already exists.").into_vec()
			}
			Self::Store(..) | Self::Argon(..) => Vec::new(),
			Self::MethodNotAllowed => {
				Message::new("Method not allowed, try again with a supported method.").into_vec()
			}
			Self::NotFound => Message::new("The requested resource does not exist.").into_vec(),
		}
	}
}

impl IntoResponse for AppError {
	fn into_response(self) -> Response {
		if self.status().is_server_error() {
			tracing::error!(error = %self, "request failed");
		}

		error_response(self.status(), self.into_errors())
	}
}

/// Error returned by a route, either shared or specific to the route module.
#[derive(Debug, thiserror::Error)]
pub enum RouteError<E> {
	#[error(transparent)]
	App(AppError),
	#[error(transparent)]
	Route(E),
}

impl<E: ErrorShape> From<E> for RouteError<E> {
	fn from(error: E) -> Self {
		Self::Route(error)
	}
}

impl<E> From<AppError> for RouteError<E> {
	fn from(error: AppError) -> Self {
		Self::App(error)
	}
}

impl<E> From<store::Error> for RouteError<E> {
	fn from(error: store::Error) -> Self {
		Self::App(error.into())
	}
}

impl<E> From<argon2::Error> for RouteError<E> {
	fn from(error: argon2::Error) -> Self {
		Self::App(error.into())
	}
}

impl<E: ErrorShape> IntoResponse for RouteError<E> {
	fn into_response(self) -> Response {
		match self {
			Self::App(error) => error.into_response(),
			Self::Route(error) => {
				let status = error.status();

				if status.is_server_error() {
					tracing::error!(%error, "request failed");
				}

				error_response(status, error.into_errors())
			}
		}
	}
}

impl<E> aide::OperationOutput for RouteError<E> {
	type Inner = ErrorResponse<'static>;
}

fn error_response(status: StatusCode, errors: Vec<Message<'static>>) -> Response {
	(
		status,
		Json(ErrorResponse {
			success: false,
			errors,
		}),
	)
		.into_response()
}
