use std::{future::Future, time::Duration};

use async_trait::async_trait;
use bson::{doc, oid::ObjectId};
use futures::TryStreamExt;
use mongodb::{
	error::{ErrorKind, WriteFailure},
	options::{ClientOptions, FindOptions, IndexOptions},
	Client, Collection, Database, IndexModel,
};

use super::{Error, Result, Store, POSTS, USERS};
use crate::model;

/// Server error code for a unique index violation.
const DUPLICATE_KEY: i32 = 11000;

impl From<mongodb::error::Error> for Error {
	fn from(error: mongodb::error::Error) -> Self {
		match error.kind.as_ref() {
			ErrorKind::Write(WriteFailure::WriteError(write)) if write.code == DUPLICATE_KEY => {
				Self::Duplicate
			}
			_ => Self::Mongo(error),
		}
	}
}

/// [`Store`] backed by a MongoDB database.
///
/// The driver pools connections internally, so a single instance is shared
/// by every request.
#[derive(Debug, Clone)]
pub struct MongoStore {
	database: Database,
	users: Collection<model::User>,
	posts: Collection<model::Post>,
	timeout: Duration,
}

impl MongoStore {
	/// Connects to `url`, using the database `name`, and creates the indexes
	/// the service relies on. Every operation is bounded by `timeout`.
	pub async fn connect(url: &str, name: &str, timeout: Duration) -> Result<Self> {
		let mut options = ClientOptions::parse(url).await?;

		options.app_name = Some(env!("CARGO_PKG_NAME").into());
		options.server_selection_timeout = Some(timeout);
		options.connect_timeout = Some(timeout);

		let database = Client::with_options(options)?.database(name);
		let store = Self {
			users: database.collection(USERS),
			posts: database.collection(POSTS),
			database,
			timeout,
		};

		store.create_indexes().await?;

		Ok(store)
	}

	/// Email uniqueness lives in the store so concurrent inserts cannot both succeed.
	async fn create_indexes(&self) -> Result<()> {
		let email = IndexModel::builder()
			.keys(doc! { "email": 1 })
			.options(IndexOptions::builder().unique(true).build())
			.build();

		let userid = IndexModel::builder()
			.keys(doc! { "userid": 1, "_id": 1 })
			.build();

		self.run(self.users.create_index(email, None)).await?;
		self.run(self.posts.create_index(userid, None)).await?;

		Ok(())
	}

	async fn run<T, F>(&self, operation: F) -> Result<T>
	where
		F: Future<Output = mongodb::error::Result<T>>,
	{
		tokio::time::timeout(self.timeout, operation)
			.await
			.map_err(|_| Error::Timeout(self.timeout))?
			.map_err(Error::from)
	}
}

#[async_trait]
impl Store for MongoStore {
	async fn insert_user(&self, user: &model::User) -> Result<ObjectId> {
		let result = self.run(self.users.insert_one(user, None)).await?;

		Ok(result.inserted_id.as_object_id().unwrap_or(user.id))
	}

	async fn find_user(&self, id: ObjectId) -> Result<Option<model::User>> {
		self.run(self.users.find_one(doc! { "_id": id }, None)).await
	}

	async fn find_user_by_email(&self, email: &str) -> Result<Option<model::User>> {
		self.run(self.users.find_one(doc! { "email": email }, None))
			.await
	}

	async fn insert_post(&self, post: &model::Post) -> Result<ObjectId> {
		let result = self.run(self.posts.insert_one(post, None)).await?;

		Ok(result.inserted_id.as_object_id().unwrap_or(post.id))
	}

	async fn find_post(&self, id: ObjectId) -> Result<Option<model::Post>> {
		self.run(self.posts.find_one(doc! { "_id": id }, None)).await
	}

	async fn count_posts_by_user(&self, userid: &str) -> Result<u64> {
		self.run(self.posts.count_documents(doc! { "userid": userid }, None))
			.await
	}

	async fn find_posts_by_user(
		&self,
		userid: &str,
		skip: u64,
		limit: u64,
	) -> Result<Vec<model::Post>> {
		// ObjectIds grow with creation time, so this is insertion order
		let options = FindOptions::builder()
			.sort(doc! { "_id": 1 })
			.skip(skip)
			.limit(i64::try_from(limit).unwrap_or(i64::MAX))
			.build();

		let cursor = self
			.run(self.posts.find(doc! { "userid": userid }, options))
			.await?;

		self.run(cursor.try_collect::<Vec<_>>()).await
	}

	async fn ping(&self) -> Result<()> {
		self.run(self.database.run_command(doc! { "ping": 1 }, None))
			.await
			.map(|_| ())
	}
}
