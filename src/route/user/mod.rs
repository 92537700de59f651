use aide::axum::{
	routing::{get_with, post_with},
	ApiRouter,
};
use axum::http::StatusCode;
use bson::oid::ObjectId;

use crate::{error, AppState};

pub mod model;
pub mod route;

/// An error specific to the user routes.
///
/// The messages in [`error::ErrorShape::into_errors`] are presented to the client,
/// so they must not contain sensitive information.
#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("email {0} already taken")]
	EmailTaken(String),
	#[error("unknown user {0}")]
	UnknownUser(ObjectId),
}

pub type RouteError = error::RouteError<Error>;

pub fn routes() -> ApiRouter<AppState> {
	use route::*;

	ApiRouter::new()
		.api_route("/", post_with(create_user, create_user_docs))
		.api_route("/:id", get_with(get_user, get_user_docs))
}

impl error::ErrorShape for Error {
	fn status(&self) -> StatusCode {
		match self {
			Self::EmailTaken(..) => StatusCode::CONFLICT,
			Self::UnknownUser(..) => StatusCode::NOT_FOUND,
		}
	}

	fn into_errors(self) -> Vec<error::Message<'static>> {
		match self {
			Self::EmailTaken(email) => {
				error::Message::new("Email has already been used. Please use a different email.")
					.field("email")
					.detail("email", email)
					.into_vec()
			}
			Self::UnknownUser(user) => error::Message::new("User not found.")
				.detail("user", user.to_hex())
				.into_vec(),
		}
	}
}

#[cfg(test)]
mod test {
	use crate::test::*;

	async fn create(app: &TestServer, email: &str) -> TestResponse {
		app.post("/users")
			.json(&json!({
				"name": "john",
				"email": email,
				"password": "hunter2hunter",
			}))
			.await
	}

	#[tokio::test]
	async fn test_create_and_get_user() {
		let app = app();

		let response = create(&app, "john@smith.com").await;

		assert_eq!(response.status_code(), 201);
		assert!(response
			.header("content-type")
			.to_str()
			.unwrap()
			.starts_with("application/json"));

		let id = response.json::<Value>()["inserted_id"]
			.as_str()
			.unwrap()
			.to_owned();

		assert_eq!(id.len(), 24);

		let response = app.get(&format!("/users/{id}")).await;

		assert_eq!(response.status_code(), 200);

		let user = response.json::<Value>();

		assert_eq!(user["_id"], id);
		assert_eq!(user["name"], "john");
		assert_eq!(user["email"], "john@smith.com");
		assert!(user.get("password").is_none());
	}

	#[tokio::test]
	async fn test_password_is_stored_as_digest() {
		let database = memory_store();
		let app = app_with(database.clone());

		create(&app, "john@smith.com").await;

		let user = database
			.find_user_by_email("john@smith.com")
			.await
			.unwrap()
			.unwrap();

		assert_ne!(user.password, "hunter2hunter");
		assert_eq!(user.password.len(), 64);
	}

	#[tokio::test]
	async fn test_duplicate_email() {
		let app = app();

		assert_eq!(create(&app, "john@smith.com").await.status_code(), 201);

		let response = create(&app, "john@smith.com").await;

		assert_eq!(response.status_code(), 409);
		assert_eq!(response.json::<Value>()["success"], false);

		// comparison is exact
		assert_eq!(create(&app, "JOHN@smith.com").await.status_code(), 201);
	}

	#[tokio::test]
	async fn test_invalid_email() {
		let app = app();

		for email in [
			"",
			"john",
			"john@",
			"@smith.com",
			"john smith@smith.com",
			"john.@smith.com",
			"john@smith.com.",
			"\"\"@smith.com",
		] {
			let response = create(&app, email).await;

			assert_eq!(response.status_code(), 400, "{email:?} was accepted");
			assert_eq!(
				response.json::<Value>()["errors"][0]["field"],
				"email",
				"{email:?}"
			);
		}
	}

	#[tokio::test]
	async fn test_quoted_email() {
		let app = app();

		for email in ["\"john smith\"@smith.com", "\"john\\\"q\"@smith.com"] {
			let response = create(&app, email).await;

			assert_eq!(response.status_code(), 201, "{email:?} was rejected");

			let id = response.json::<Value>()["inserted_id"]
				.as_str()
				.unwrap()
				.to_owned();

			assert_eq!(
				app.get(&format!("/users/{id}")).await.json::<Value>()["email"],
				email
			);
		}
	}

	#[tokio::test]
	async fn test_missing_fields() {
		let app = app();

		// everything but the email may be omitted
		let response = app
			.post("/users")
			.json(&json!({ "email": "jane@smith.com" }))
			.await;

		assert_eq!(response.status_code(), 201);

		let response = app.post("/users").json(&json!({})).await;

		assert_eq!(response.status_code(), 400);
	}

	#[tokio::test]
	async fn test_malformed_body() {
		let app = app();

		let response = app
			.post("/users")
			.content_type("application/json")
			.text("{\"email\": ")
			.await;

		assert_eq!(response.status_code(), 400);
	}

	#[tokio::test]
	async fn test_unknown_user() {
		let app = app();

		let response = app
			.get(&format!("/users/{}", bson::oid::ObjectId::new().to_hex()))
			.await;

		assert_eq!(response.status_code(), 404);

		let body = response.json::<Value>();

		assert_eq!(body["success"], false);
		assert!(body.get("email").is_none());
		assert!(body.get("name").is_none());
	}

	#[tokio::test]
	async fn test_malformed_user_id() {
		let response = app().get("/users/not-an-id").await;

		assert_eq!(response.status_code(), 400);
	}

	#[tokio::test]
	async fn test_store_failures() {
		let id = bson::oid::ObjectId::new().to_hex();

		for (store, status) in [(FailingStore::Timeout, 504), (FailingStore::Unavailable, 500)] {
			let app = app_with(std::sync::Arc::new(store));

			assert_store_failure(&create(&app, "john@smith.com").await, status);
			assert_store_failure(&app.get(&format!("/users/{id}")).await, status);
		}

		let response = app_with(std::sync::Arc::new(FailingStore::Timeout))
			.get(&format!("/users/{id}"))
			.await;

		assert_eq!(
			response.json::<Value>()["errors"][0]["content"],
			"The database did not respond in time."
		);
	}
}
