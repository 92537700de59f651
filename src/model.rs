use bson::oid::ObjectId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A user document, as stored in the `users` collection.
///
/// Use this when reading from or writing to the store. The route models in
/// [`crate::route::user::model`] are what clients see.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
	#[serde(rename = "_id")]
	pub id: ObjectId,
	#[serde(default)]
	pub name: String,
	#[serde(default)]
	pub email: String,
	/// argon2id, hex encoded and salted with `id`
	#[serde(default)]
	pub password: String,
}

/// A post document, as stored in the `posts` collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
	#[serde(rename = "_id")]
	pub id: ObjectId,
	/// Id of the owning user. Not checked against `users`.
	#[serde(default)]
	pub userid: String,
	#[serde(default)]
	pub caption: String,
	#[serde(default)]
	pub imageurl: String,
	#[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
	pub postedtimestamp: DateTime<Utc>,
}
