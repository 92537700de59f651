use axum::extract::State;
use bson::oid::ObjectId;
use macros::route;

use crate::{
	digest,
	extract::{Created, Json, Path},
	model as store_model,
	openapi::tag,
	store, AppState, Database,
};

use super::{model, Error, RouteError};

/// Create user
/// Registers a new user. The email must be valid and not used by another user.
#[route(
	tag = tag::USER,
	response(status = 201, description = "The user was created.", shape = "Json<model::InsertAck>"),
	response(status = 400, description = "The email is not a valid address."),
	response(status = 409, description = "The email is already in use."),
)]
pub async fn create_user(
	State(state): State<AppState>,
	Json(input): Json<model::CreateUserInput>,
) -> Result<Created<model::InsertAck>, RouteError> {
	// Fast path, the unique index below is what guarantees uniqueness
	if state
		.database
		.find_user_by_email(&input.email)
		.await?
		.is_some()
	{
		return Err(Error::EmailTaken(input.email).into());
	}

	let id = ObjectId::new();
	let user = store_model::User {
		id,
		password: digest::hash_password(&state.hasher, &input.password, &id)?,
		name: input.name,
		email: input.email,
	};

	let inserted = state
		.database
		.insert_user(&user)
		.await
		.map_err(|e| match e {
			store::Error::Duplicate => Error::EmailTaken(user.email.clone()).into(),
			e => RouteError::from(e),
		})?;

	tracing::info!(user = %inserted, "created user");

	Ok(Created(inserted.into()))
}

/// Get user
/// Returns a single user by its unique id. The password is never included.
#[route(
	tag = tag::USER,
	response(status = 400, description = "The id is malformed."),
	response(status = 404, description = "No user has this id."),
)]
pub async fn get_user(
	State(database): State<Database>,
	Path(path): Path<model::IdInput>,
) -> Result<Json<model::User>, RouteError> {
	let id = path.object_id()?;
	let user = database.find_user(id).await?;

	Ok(Json(user.ok_or(Error::UnknownUser(id))?.into()))
}
