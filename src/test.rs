//! Helpers shared by the route tests.

use std::{sync::Arc, time::Duration};

use argon2::Argon2;
use async_trait::async_trait;
use bson::oid::ObjectId;

pub use axum_test::{TestResponse, TestServer};
pub use serde_json::{json, Value};

pub use crate::store::{MemoryStore, Store};
use crate::{model, store, Database};

/// A fresh, empty in-memory store.
pub fn memory_store() -> Arc<MemoryStore> {
	Arc::new(MemoryStore::default())
}

/// A test server backed by a fresh in-memory store.
pub fn app() -> TestServer {
	app_with(memory_store())
}

/// A test server backed by `database`, so tests can inspect what was stored
/// or substitute a [`FailingStore`].
pub fn app_with(database: Database) -> TestServer {
	let state = crate::State {
		database,
		hasher: Argon2::default(),
	};

	TestServer::new(crate::route::app(state)).expect("failed to start test server")
}

/// A store where every operation fails the same way.
#[derive(Debug, Clone, Copy)]
pub enum FailingStore {
	/// Operations time out.
	Timeout,
	/// Operations fail with a driver error.
	Unavailable,
}

impl FailingStore {
	fn error(self) -> store::Error {
		match self {
			Self::Timeout => store::Error::Timeout(Duration::from_secs(10)),
			Self::Unavailable => store::Error::Mongo(mongodb::error::Error::from(
				std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "connection refused"),
			)),
		}
	}
}

#[async_trait]
impl Store for FailingStore {
	async fn insert_user(&self, _user: &model::User) -> store::Result<ObjectId> {
		Err(self.error())
	}

	async fn find_user(&self, _id: ObjectId) -> store::Result<Option<model::User>> {
		Err(self.error())
	}

	async fn find_user_by_email(&self, _email: &str) -> store::Result<Option<model::User>> {
		Err(self.error())
	}

	async fn insert_post(&self, _post: &model::Post) -> store::Result<ObjectId> {
		Err(self.error())
	}

	async fn find_post(&self, _id: ObjectId) -> store::Result<Option<model::Post>> {
		Err(self.error())
	}

	async fn count_posts_by_user(&self, _userid: &str) -> store::Result<u64> {
		Err(self.error())
	}

	async fn find_posts_by_user(
		&self,
		_userid: &str,
		_skip: u64,
		_limit: u64,
	) -> store::Result<Vec<model::Post>> {
		Err(self.error())
	}

	async fn ping(&self) -> store::Result<()> {
		Err(self.error())
	}
}

/// Asserts that `response` is a server error with the given status.
pub fn assert_store_failure(response: &TestResponse, status: u16) {
	assert_eq!(response.status_code(), status);

	let body = response.json::<Value>();

	assert_eq!(body["success"], false);
	assert!(body.get("_id").is_none());
	assert!(body.get("posts").is_none());
}
