use axum::extract::State;
use bson::oid::ObjectId;
use chrono::Utc;
use macros::route;

use crate::{
	extract::{Created, Json, Path, Query},
	model as store_model,
	openapi::tag,
	Database,
};

use super::{model, Error, RouteError};

/// Create post
/// Creates a new post. The posted time is set by the server.
#[route(
	tag = tag::POST,
	response(status = 201, description = "The post was created.", shape = "Json<model::InsertAck>"),
)]
pub async fn create_post(
	State(database): State<Database>,
	Json(input): Json<model::CreatePostInput>,
) -> Result<Created<model::InsertAck>, RouteError> {
	let post = store_model::Post {
		id: ObjectId::new(),
		userid: input.userid,
		caption: input.caption,
		imageurl: input.imageurl,
		postedtimestamp: Utc::now(),
	};

	let inserted = database.insert_post(&post).await?;

	tracing::info!(post = %inserted, user = %post.userid, "created post");

	Ok(Created(inserted.into()))
}

/// Get single post
/// Returns a single post by its unique id.
#[route(
	tag = tag::POST,
	response(status = 400, description = "The id is malformed."),
	response(status = 404, description = "No post has this id."),
)]
pub async fn get_post(
	State(database): State<Database>,
	Path(path): Path<model::IdInput>,
) -> Result<Json<model::Post>, RouteError> {
	let id = path.object_id()?;
	let post = database.find_post(id).await?;

	Ok(Json(post.ok_or(Error::UnknownPost(id))?.into()))
}

/// Get user posts
/// Returns a paginated response of a user's posts, oldest first, two per page.
#[route(tag = tag::POST)]
pub async fn get_user_posts(
	State(database): State<Database>,
	Path(path): Path<model::IdInput>,
	Query(paginate): Query<model::Paginate>,
) -> Result<Json<model::Payload>, RouteError> {
	let total = database.count_posts_by_user(&path.id).await?;
	let posts = database
		.find_posts_by_user(&path.id, paginate.offset(), paginate.limit())
		.await?;

	Ok(Json(model::Payload {
		posts: posts.into_iter().map(Into::into).collect(),
		total,
		page: paginate.page(),
		lastpage: model::Paginate::last_page(total),
	}))
}
