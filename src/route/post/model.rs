use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, Serializer};
use validator::Validate;

use crate::route::auth;

/// A single post, created by a user and optionally assigned to a group.
#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct Post {
	/// The unique identifier of the post.
	pub id: i64,
	/// The user that created the post.
	pub author_id: i64,
	/// The group the post was published to, if any.
	pub group_id: Option<i64>,
	/// The text of the post.
	pub text: String,
	/// An optional auxiliary note attached to the post.
	pub help_text: Option<String>,
	/// The image attached to the post, base64-encoded.
	#[serde(serialize_with = "image")]
	pub image: Option<Vec<u8>>,
	/// The publication time of the post. Set once at creation.
	pub pub_date: DateTime<Utc>,
}

fn image<S>(bytes: &Option<Vec<u8>>, serializer: S) -> Result<S::Ok, S::Error>
where
	S: Serializer,
{
	use base64::{engine::general_purpose::STANDARD, Engine};

	bytes
		.as_deref()
		.map(|bytes| STANDARD.encode(bytes))
		.serialize(serializer)
}

/// A single comment on a post.
#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct Comment {
	/// The unique identifier of the comment.
	pub id: i64,
	/// The post the comment belongs to.
	pub post_id: i64,
	/// The user that wrote the comment.
	pub author_id: i64,
	/// The text of the comment.
	pub text: String,
	/// The creation time of the comment.
	pub created: DateTime<Utc>,
}

/// Input for creating or editing a post. Editing replaces `text`,
/// `help_text` and `group` wholesale; the stored image is kept when
/// no new one is provided.
#[derive(Debug, Deserialize, Validate)]
pub struct PostInput {
	/// The text of the post.
	#[validate(length(min = 1))]
	pub text: String,
	/// An optional auxiliary note attached to the post.
	pub help_text: Option<String>,
	/// The id of the group to publish to.
	pub group: Option<i64>,
	/// A base64-encoded image.
	pub image: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CommentInput {
	/// The text of the comment.
	#[validate(length(min = 1))]
	pub text: String,
}

/// A post together with its comments and author, as shown on the post
/// detail page.
#[derive(Debug, Serialize)]
pub struct PostDetail {
	pub post: Post,
	pub comments: Vec<Comment>,
	pub author: auth::model::User,
	pub posts_count: i64,
}
