use axum::{
	extract::{Path, State},
	http::StatusCode,
};

use crate::{
	extract::{Json, OptionalSession, Query, Session},
	route::auth,
	route::model::{Page, Paginate, PAGE_SIZE},
	route::post,
	Database,
};

use super::{model, Error};

/// Resolves a username to the stored user.
async fn resolve_author(
	database: &Database,
	username: &str,
) -> Result<auth::model::User, crate::Error> {
	let author = sqlx::query_as::<_, auth::model::User>("SELECT * FROM users WHERE username = ?")
		.bind(username)
		.fetch_optional(database)
		.await?;

	author.ok_or_else(|| Error::UnknownUser(username.to_string()).into())
}

/// Returns an author's profile with one page of their posts, newest
/// first. The `following` flag reflects the session user when one is
/// present.
pub async fn get_profile(
	State(database): State<Database>,
	OptionalSession(session): OptionalSession,
	Path(username): Path<String>,
	Query(paginate): Query<Paginate>,
) -> Result<Json<model::Profile>, crate::Error> {
	let author = resolve_author(&database, &username).await?;

	let posts_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM posts WHERE author_id = ?")
		.bind(author.id)
		.fetch_one(&database)
		.await?;

	let following = match session {
		Some(session) => {
			sqlx::query_scalar::<_, bool>(
				"SELECT EXISTS (SELECT 1 FROM follows WHERE user_id = ? AND author_id = ?)",
			)
			.bind(session.user.id)
			.bind(author.id)
			.fetch_one(&database)
			.await?
		}
		None => false,
	};

	let (page, offset) = paginate.clamp(posts_count);

	let posts = sqlx::query_as::<_, post::model::Post>(
		r"
			SELECT * FROM posts
			WHERE author_id = ?
			ORDER BY pub_date DESC, id DESC
			LIMIT ? OFFSET ?
		",
	)
	.bind(author.id)
	.bind(PAGE_SIZE)
	.bind(offset)
	.fetch_all(&database)
	.await?;

	Ok(Json(model::Profile {
		author,
		posts_count,
		following,
		page: Page::new(posts, posts_count, page),
	}))
}

/// Follows an author on behalf of the session user.
///
/// Following yourself, or an author you already follow, is a no-op.
pub async fn follow(
	State(database): State<Database>,
	session: Session,
	Path(username): Path<String>,
) -> Result<StatusCode, crate::Error> {
	let author = resolve_author(&database, &username).await?;

	if author.id != session.user.id {
		sqlx::query(
			r"
				INSERT INTO follows (user_id, author_id)
				VALUES (?, ?)
				ON CONFLICT (user_id, author_id) DO NOTHING
			",
		)
		.bind(session.user.id)
		.bind(author.id)
		.execute(&database)
		.await?;
	}

	Ok(StatusCode::NO_CONTENT)
}

/// Unfollows an author. Deleting a follow that does not exist is not
/// an error.
pub async fn unfollow(
	State(database): State<Database>,
	session: Session,
	Path(username): Path<String>,
) -> Result<StatusCode, crate::Error> {
	let author = resolve_author(&database, &username).await?;

	sqlx::query("DELETE FROM follows WHERE user_id = ? AND author_id = ?")
		.bind(session.user.id)
		.bind(author.id)
		.execute(&database)
		.await?;

	Ok(StatusCode::NO_CONTENT)
}
