use async_trait::async_trait;
use bson::oid::ObjectId;
use parking_lot::RwLock;

use super::{Error, Result, Store};
use crate::model;

/// In-memory [`Store`] for tests and local runs.
///
/// Documents are kept in insertion order and the email uniqueness check runs
/// under the write lock, mirroring the unique index of the MongoDB backend.
#[derive(Debug, Default)]
pub struct MemoryStore {
	users: RwLock<Vec<model::User>>,
	posts: RwLock<Vec<model::Post>>,
}

#[async_trait]
impl Store for MemoryStore {
	async fn insert_user(&self, user: &model::User) -> Result<ObjectId> {
		let mut users = self.users.write();

		if users.iter().any(|existing| existing.email == user.email) {
			return Err(Error::Duplicate);
		}

		users.push(user.clone());

		Ok(user.id)
	}

	async fn find_user(&self, id: ObjectId) -> Result<Option<model::User>> {
		Ok(self.users.read().iter().find(|user| user.id == id).cloned())
	}

	async fn find_user_by_email(&self, email: &str) -> Result<Option<model::User>> {
		Ok(self
			.users
			.read()
			.iter()
			.find(|user| user.email == email)
			.cloned())
	}

	async fn insert_post(&self, post: &model::Post) -> Result<ObjectId> {
		self.posts.write().push(post.clone());

		Ok(post.id)
	}

	async fn find_post(&self, id: ObjectId) -> Result<Option<model::Post>> {
		Ok(self.posts.read().iter().find(|post| post.id == id).cloned())
	}

	async fn count_posts_by_user(&self, userid: &str) -> Result<u64> {
		let count = self
			.posts
			.read()
			.iter()
			.filter(|post| post.userid == userid)
			.count();

		Ok(count as u64)
	}

	async fn find_posts_by_user(
		&self,
		userid: &str,
		skip: u64,
		limit: u64,
	) -> Result<Vec<model::Post>> {
		let skip = usize::try_from(skip).unwrap_or(usize::MAX);
		let limit = usize::try_from(limit).unwrap_or(usize::MAX);

		Ok(self
			.posts
			.read()
			.iter()
			.filter(|post| post.userid == userid)
			.skip(skip)
			.take(limit)
			.cloned()
			.collect())
	}

	async fn ping(&self) -> Result<()> {
		Ok(())
	}
}
