use axum::extract::{Path, State};

use crate::{
	extract::{Json, Query, Session},
	route::model::{Page, Paginate, PAGE_SIZE},
	route::post,
	Database,
};

use super::{model, Error};

/// Returns all groups, ordered by title.
pub async fn get_groups(
	State(database): State<Database>,
) -> Result<Json<Vec<model::Group>>, crate::Error> {
	let groups = sqlx::query_as::<_, model::Group>("SELECT * FROM groups ORDER BY title")
		.fetch_all(&database)
		.await?;

	Ok(Json(groups))
}

/// Creates a new group.
pub async fn create_group(
	State(database): State<Database>,
	_session: Session,
	Json(input): Json<model::GroupInput>,
) -> Result<Json<model::Group>, crate::Error> {
	let group = sqlx::query_as::<_, model::Group>(
		r"
			INSERT INTO groups (title, slug, description)
			VALUES (?, ?, ?)
			RETURNING *
		",
	)
	.bind(&input.title)
	.bind(&input.slug)
	.bind(&input.description)
	.fetch_one(&database)
	.await
	.map_err(|e| match e {
		sqlx::Error::Database(ref d) if d.message().contains("groups.slug") => {
			Error::SlugTaken.into()
		}
		e => crate::Error::Database(e),
	})?;

	Ok(Json(group))
}

/// Returns a group and one page of its posts, newest first.
pub async fn get_group(
	State(database): State<Database>,
	Path(slug): Path<String>,
	Query(paginate): Query<Paginate>,
) -> Result<Json<model::GroupFeed>, crate::Error> {
	let group = sqlx::query_as::<_, model::Group>("SELECT * FROM groups WHERE slug = ?")
		.bind(&slug)
		.fetch_optional(&database)
		.await?
		.ok_or(Error::UnknownGroup(slug))?;

	let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM posts WHERE group_id = ?")
		.bind(group.id)
		.fetch_one(&database)
		.await?;

	let (page, offset) = paginate.clamp(total);

	let posts = sqlx::query_as::<_, post::model::Post>(
		r"
			SELECT * FROM posts
			WHERE group_id = ?
			ORDER BY pub_date DESC, id DESC
			LIMIT ? OFFSET ?
		",
	)
	.bind(group.id)
	.bind(PAGE_SIZE)
	.bind(offset)
	.fetch_all(&database)
	.await?;

	Ok(Json(model::GroupFeed {
		group,
		page: Page::new(posts, total, page),
	}))
}
