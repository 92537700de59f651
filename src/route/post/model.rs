pub use crate::route::model::{IdInput, InsertAck, Paginate};

use chrono::{DateTime, Utc};
use macros::model;
use schemars::{gen::SchemaGenerator, schema::Schema, JsonSchema};
use serde::{Deserialize, Serialize, Serializer};
use validator::Validate;

use crate::model;

/// `strftime` format of [`PostedTimestamp`], e.g. `Mon Jan  2`.
pub const TIMESTAMP_FORMAT: &str = "%a %b %e";

/// The time a post was created.
///
/// Serialized for display only, as the weekday, month and day of month.
/// Year and time of day are dropped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PostedTimestamp(pub DateTime<Utc>);

impl Serialize for PostedTimestamp {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		serializer.collect_str(&self.0.format(TIMESTAMP_FORMAT))
	}
}

impl JsonSchema for PostedTimestamp {
	fn schema_name() -> String {
		"PostedTimestamp".into()
	}

	fn json_schema(gen: &mut SchemaGenerator) -> Schema {
		String::json_schema(gen)
	}
}

/// A single post, created by a user.
#[model]
#[derive(Debug, Deserialize, Serialize, JsonSchema, Validate)]
pub struct Post {
	/// The unique identifier of the post.
	#[serde(rename = "_id", skip_deserializing)]
	pub id: String,
	/// The id of the user that created the post.
	pub userid: String,
	/// The caption shown with the image.
	pub caption: String,
	/// Location of the posted image.
	pub imageurl: String,
	/// When the post was created, set by the server.
	#[serde(skip_deserializing)]
	pub postedtimestamp: PostedTimestamp,
}

impl From<model::Post> for Post {
	fn from(post: model::Post) -> Self {
		Self {
			id: post.id.to_hex(),
			userid: post.userid,
			caption: post.caption,
			imageurl: post.imageurl,
			postedtimestamp: PostedTimestamp(post.postedtimestamp),
		}
	}
}

/// A page of a user's posts.
#[derive(Debug, Serialize, JsonSchema)]
pub struct Payload {
	/// The posts on this page, oldest first.
	pub posts: Vec<Post>,
	/// The number of posts the user has in total.
	pub total: u64,
	/// The page number returned.
	pub page: u64,
	/// The number of the last page that holds posts.
	pub lastpage: u64,
}
