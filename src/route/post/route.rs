use axum::extract::{Path, State};
use base64::{engine::general_purpose::STANDARD, Engine};

use crate::{
	extract::{Json, Query, Session},
	route::auth,
	route::model::{Page, Paginate, PAGE_SIZE},
	Database,
};

use super::{model, Error};

/// Returns one page of the global feed, newest first.
pub async fn get_posts(
	State(database): State<Database>,
	Query(paginate): Query<Paginate>,
) -> Result<Json<Page<model::Post>>, crate::Error> {
	let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM posts")
		.fetch_one(&database)
		.await?;

	let (page, offset) = paginate.clamp(total);

	let posts = sqlx::query_as::<_, model::Post>(
		r"
			SELECT * FROM posts
			ORDER BY pub_date DESC, id DESC
			LIMIT ? OFFSET ?
		",
	)
	.bind(PAGE_SIZE)
	.bind(offset)
	.fetch_all(&database)
	.await?;

	Ok(Json(Page::new(posts, total, page)))
}

/// Returns one page of posts by the authors the session user follows,
/// newest first.
pub async fn get_follow_feed(
	State(database): State<Database>,
	session: Session,
	Query(paginate): Query<Paginate>,
) -> Result<Json<Page<model::Post>>, crate::Error> {
	let total: i64 = sqlx::query_scalar(
		"SELECT COUNT(*) FROM posts WHERE author_id IN (SELECT author_id FROM follows WHERE user_id = ?)",
	)
	.bind(session.user.id)
	.fetch_one(&database)
	.await?;

	let (page, offset) = paginate.clamp(total);

	let posts = sqlx::query_as::<_, model::Post>(
		r"
			SELECT * FROM posts
			WHERE author_id IN (SELECT author_id FROM follows WHERE user_id = ?)
			ORDER BY pub_date DESC, id DESC
			LIMIT ? OFFSET ?
		",
	)
	.bind(session.user.id)
	.bind(PAGE_SIZE)
	.bind(offset)
	.fetch_all(&database)
	.await?;

	Ok(Json(Page::new(posts, total, page)))
}

/// Decodes the optional base64 image field of a post input.
fn decode_image(image: Option<&str>) -> Result<Option<Vec<u8>>, Error> {
	image
		.map(|image| STANDARD.decode(image))
		.transpose()
		.map_err(|_| Error::InvalidImage)
}

/// Checks that a referenced group exists before a post is written to it.
async fn resolve_group(database: &Database, group: Option<i64>) -> Result<(), crate::Error> {
	let Some(group) = group else {
		return Ok(());
	};

	sqlx::query_scalar::<_, i64>("SELECT id FROM groups WHERE id = ?")
		.bind(group)
		.fetch_optional(database)
		.await?
		.ok_or_else(|| Error::UnknownGroup(group).into())
		.map(|_| ())
}

/// Resolves a `(username, post id)` pair to the stored post.
async fn resolve_post(
	database: &Database,
	username: &str,
	post_id: i64,
) -> Result<model::Post, crate::Error> {
	let post = sqlx::query_as::<_, model::Post>(
		r"
			SELECT posts.* FROM posts
			JOIN users ON users.id = posts.author_id
			WHERE posts.id = ? AND users.username = ?
		",
	)
	.bind(post_id)
	.bind(username)
	.fetch_optional(database)
	.await?;

	post.ok_or_else(|| Error::UnknownPost(post_id).into())
}

/// Creates a new post authored by the session user.
pub async fn create_post(
	State(database): State<Database>,
	session: Session,
	Json(input): Json<model::PostInput>,
) -> Result<Json<model::Post>, crate::Error> {
	resolve_group(&database, input.group).await?;

	let image = decode_image(input.image.as_deref())?;

	let post = sqlx::query_as::<_, model::Post>(
		r"
			INSERT INTO posts (author_id, group_id, text, help_text, image)
			VALUES (?, ?, ?, ?, ?)
			RETURNING *
		",
	)
	.bind(session.user.id)
	.bind(input.group)
	.bind(&input.text)
	.bind(&input.help_text)
	.bind(image)
	.fetch_one(&database)
	.await?;

	Ok(Json(post))
}

/// Returns a single post with its comments, its author and the author's
/// total post count.
pub async fn get_post(
	State(database): State<Database>,
	Path((username, post_id)): Path<(String, i64)>,
) -> Result<Json<model::PostDetail>, crate::Error> {
	let post = resolve_post(&database, &username, post_id).await?;

	let comments = sqlx::query_as::<_, model::Comment>(
		"SELECT * FROM comments WHERE post_id = ? ORDER BY created, id",
	)
	.bind(post.id)
	.fetch_all(&database)
	.await?;

	let author = sqlx::query_as::<_, auth::model::User>("SELECT * FROM users WHERE id = ?")
		.bind(post.author_id)
		.fetch_one(&database)
		.await?;

	let posts_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM posts WHERE author_id = ?")
		.bind(post.author_id)
		.fetch_one(&database)
		.await?;

	Ok(Json(model::PostDetail {
		post,
		comments,
		author,
		posts_count,
	}))
}

/// Updates a post in place.
///
/// Only the author may change anything: any other session user gets the
/// stored post back unmodified. `pub_date` and `author` never change.
pub async fn update_post(
	State(database): State<Database>,
	session: Session,
	Path((username, post_id)): Path<(String, i64)>,
	Json(input): Json<model::PostInput>,
) -> Result<Json<model::Post>, crate::Error> {
	let post = resolve_post(&database, &username, post_id).await?;

	if post.author_id != session.user.id {
		return Ok(Json(post));
	}

	resolve_group(&database, input.group).await?;

	let image = decode_image(input.image.as_deref())?;

	let post = sqlx::query_as::<_, model::Post>(
		r"
			UPDATE posts
			SET text = ?, help_text = ?, group_id = ?, image = COALESCE(?, image)
			WHERE id = ?
			RETURNING *
		",
	)
	.bind(&input.text)
	.bind(&input.help_text)
	.bind(input.group)
	.bind(image)
	.bind(post.id)
	.fetch_one(&database)
	.await?;

	Ok(Json(post))
}

/// Adds a comment by the session user to a post.
pub async fn add_comment(
	State(database): State<Database>,
	session: Session,
	Path((username, post_id)): Path<(String, i64)>,
	Json(input): Json<model::CommentInput>,
) -> Result<Json<model::Comment>, crate::Error> {
	let post = resolve_post(&database, &username, post_id).await?;

	let comment = sqlx::query_as::<_, model::Comment>(
		r"
			INSERT INTO comments (post_id, author_id, text)
			VALUES (?, ?, ?)
			RETURNING *
		",
	)
	.bind(post.id)
	.bind(session.user.id)
	.bind(&input.text)
	.fetch_one(&database)
	.await?;

	Ok(Json(comment))
}
