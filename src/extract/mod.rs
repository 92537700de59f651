//! Validating wrappers around the axum extractors.
//!
//! Each wrapper deserializes with its axum counterpart, then runs
//! [`validator::Validate`], rejecting with [`AppError`] either way.

use aide::OperationIo;
use axum::{
	async_trait,
	extract::{FromRequest, FromRequestParts, Request},
	http::{request, StatusCode},
	response::{IntoResponse, Response},
};
use schemars::JsonSchema;
use serde::{de, Serialize};
use validator::Validate;

use crate::error::AppError;

fn validated<T: Validate>(value: T) -> Result<T, AppError> {
	value.validate()?;
	Ok(value)
}

/// A JSON request body or response.
///
/// ```rust
/// async fn route(Json(input): Json<CreateUserInput>) -> Json<User> {
///   // ...
/// }
/// ```
#[derive(OperationIo)]
#[aide(
	input_with = "axum_jsonschema::Json<T>",
	output_with = "axum_jsonschema::Json<T>",
	json_schema
)]
pub struct Json<T>(pub T);

impl<T: Serialize> IntoResponse for Json<T> {
	fn into_response(self) -> Response {
		axum::Json(self.0).into_response()
	}
}

#[async_trait]
impl<T, S> FromRequest<S> for Json<T>
where
	T: de::DeserializeOwned + Validate + JsonSchema + 'static,
	S: Send + Sync,
{
	type Rejection = AppError;

	async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
		let axum::Json(value) = axum::Json::<T>::from_request(req, state).await?;

		validated(value).map(Self)
	}
}

/// A JSON response sent with `201 Created`.
#[derive(OperationIo)]
#[aide(output_with = "axum_jsonschema::Json<T>", json_schema)]
pub struct Created<T>(pub T);

impl<T: Serialize> IntoResponse for Created<T> {
	fn into_response(self) -> Response {
		(StatusCode::CREATED, Json(self.0)).into_response()
	}
}

/// Declares a validating extractor over an axum extractor that reads the
/// request parts only, so it can be combined with a body extractor.
macro_rules! parts_extractor {
	($(#[$meta:meta])* $name:ident => $inner:ident, $input:tt) => {
		$(#[$meta])*
		#[derive(OperationIo)]
		#[aide(
			input_with = $input,
			output_with = "axum_jsonschema::Json<T>",
			json_schema
		)]
		pub struct $name<T>(pub T);

		#[async_trait]
		impl<T, S> FromRequestParts<S> for $name<T>
		where
			T: de::DeserializeOwned + Validate + Send,
			S: Send + Sync,
		{
			type Rejection = AppError;

			async fn from_request_parts(
				parts: &mut request::Parts,
				state: &S,
			) -> Result<Self, Self::Rejection> {
				let axum::extract::$inner(value) =
					axum::extract::$inner::<T>::from_request_parts(parts, state).await?;

				validated(value).map(Self)
			}
		}
	};
}

parts_extractor! {
	/// Query string parameters, e.g. `Query<Paginate>`.
	Query => Query, "axum::extract::Query<T>"
}

parts_extractor! {
	/// Path parameters, e.g. `Path<IdInput>`.
	Path => Path, "axum::extract::Path<T>"
}
