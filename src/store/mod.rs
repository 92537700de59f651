//! Document store access.
//!
//! Handlers only see the [`Store`] trait, so the MongoDB backend can be swapped
//! for the in-memory one in tests and local runs.

mod memory;
mod mongo;

use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use bson::oid::ObjectId;

pub use memory::MemoryStore;
pub use mongo::MongoStore;

use crate::{config::Config, model};

/// Name of the collection holding [`model::User`] documents.
pub const USERS: &str = "users";
/// Name of the collection holding [`model::Post`] documents.
pub const POSTS: &str = "posts";

/// Scheme of `DATABASE_URL` selecting the in-memory store.
pub const MEMORY_SCHEME: &str = "memory://";

#[derive(Debug, thiserror::Error)]
pub enum Error {
	/// A unique index rejected the write.
	#[error("duplicate key")]
	Duplicate,
	#[error("store operation timed out after {0:?}")]
	Timeout(Duration),
	#[error("mongodb error: {0}")]
	Mongo(mongodb::error::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Operations over the `users` and `posts` collections.
///
/// Implementations must be safe to share between concurrent requests.
#[async_trait]
pub trait Store: Send + Sync {
	/// Inserts a user, failing with [`Error::Duplicate`] if the email is taken.
	async fn insert_user(&self, user: &model::User) -> Result<ObjectId>;

	async fn find_user(&self, id: ObjectId) -> Result<Option<model::User>>;

	/// Looks up a user by exact (case-sensitive) email.
	async fn find_user_by_email(&self, email: &str) -> Result<Option<model::User>>;

	async fn insert_post(&self, post: &model::Post) -> Result<ObjectId>;

	async fn find_post(&self, id: ObjectId) -> Result<Option<model::Post>>;

	/// Counts the posts owned by `userid`.
	async fn count_posts_by_user(&self, userid: &str) -> Result<u64>;

	/// Returns up to `limit` posts owned by `userid` after skipping `skip`,
	/// in insertion order.
	async fn find_posts_by_user(
		&self,
		userid: &str,
		skip: u64,
		limit: u64,
	) -> Result<Vec<model::Post>>;

	/// Checks that the store is reachable.
	async fn ping(&self) -> Result<()>;
}

/// Connects to the store named by the configuration.
///
/// A `DATABASE_URL` starting with `memory://` selects [`MemoryStore`],
/// anything else is handed to the MongoDB driver.
pub async fn connect(config: &Config) -> Result<Arc<dyn Store>> {
	let store: Arc<dyn Store> = if config.database_url.starts_with(MEMORY_SCHEME) {
		tracing::warn!("using the in-memory store, data will not be persisted");

		Arc::new(MemoryStore::default())
	} else {
		Arc::new(
			MongoStore::connect(
				&config.database_url,
				&config.database_name,
				config.store_timeout,
			)
			.await?,
		)
	};

	store.ping().await?;

	Ok(store)
}
