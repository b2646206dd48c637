use axum::{http::StatusCode, routing::get, Router};

use crate::AppState;

pub mod model;
pub mod route;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("unknown group {0}")]
	UnknownGroup(String),
	#[error("slug already taken")]
	SlugTaken,
}

impl Error {
	pub fn status(&self) -> StatusCode {
		match self {
			Self::UnknownGroup(..) => StatusCode::NOT_FOUND,
			Self::SlugTaken => StatusCode::CONFLICT,
		}
	}
}

pub fn routes() -> Router<AppState> {
	use route::*;

	Router::new()
		.route("/", get(get_groups).post(create_group))
		.route("/:slug", get(get_group))
}

#[cfg(test)]
mod test {
	use crate::test::*;

	#[sqlx::test]
	async fn test_group_feed(pool: Database) {
		let app = app(pool);

		register(&app, "alice").await;

		let response = app
			.post("/groups")
			.json(&json!({ "title": "Tech", "slug": "tech" }))
			.await;

		assert_eq!(response.status_code(), 200);

		let response = app
			.post("/groups")
			.json(&json!({ "title": "Cooking", "slug": "cooking" }))
			.await;

		assert_eq!(response.status_code(), 200);

		let response = app
			.post("/posts")
			.json(&json!({ "text": "hello", "group": 1 }))
			.await;

		assert_eq!(response.status_code(), 200);

		let response = app.get("/groups/tech").await;
		let feed = response.json::<serde_json::Value>();

		assert_eq!(feed["group"]["slug"], "tech");
		assert_eq!(feed["page"]["total"], 1);
		assert_eq!(feed["page"]["items"][0]["text"], "hello");

		let response = app.get("/groups/cooking").await;

		assert_eq!(response.json::<serde_json::Value>()["page"]["total"], 0);

		let response = app.get("/groups/other").await;

		assert_eq!(response.status_code(), 404);
	}

	#[sqlx::test]
	async fn test_list_groups(pool: Database) {
		let app = app(pool);

		register(&app, "alice").await;

		for (title, slug) in [("Tech", "tech"), ("Cooking", "cooking")] {
			app.post("/groups")
				.json(&json!({ "title": title, "slug": slug }))
				.await;
		}

		let response = app.get("/groups").await;
		let groups = response.json::<serde_json::Value>();

		// title order
		assert_eq!(groups[0]["slug"], "cooking");
		assert_eq!(groups[1]["slug"], "tech");
	}

	#[sqlx::test]
	async fn test_create_requires_session(pool: Database) {
		let app = app(pool);

		let response = app
			.post("/groups")
			.json(&json!({ "title": "Tech", "slug": "tech" }))
			.await;

		assert_eq!(response.status_code(), 401);
	}

	#[sqlx::test]
	async fn test_duplicate_slug(pool: Database) {
		let app = app(pool);

		register(&app, "alice").await;

		let response = app
			.post("/groups")
			.json(&json!({ "title": "Tech", "slug": "tech" }))
			.await;

		assert_eq!(response.status_code(), 200);

		let response = app
			.post("/groups")
			.json(&json!({ "title": "Tech Too", "slug": "tech" }))
			.await;

		assert_eq!(response.status_code(), 409);
	}

	#[sqlx::test]
	async fn test_slug_validation(pool: Database) {
		let app = app(pool);

		register(&app, "alice").await;

		let response = app
			.post("/groups")
			.json(&json!({ "title": "Tech", "slug": "Bad Slug!" }))
			.await;

		assert_eq!(response.status_code(), 400);
	}

	#[sqlx::test]
	async fn test_deleting_group_keeps_posts(pool: Database) {
		let app = app(pool.clone());

		register(&app, "alice").await;

		app.post("/groups")
			.json(&json!({ "title": "Tech", "slug": "tech" }))
			.await;
		app.post("/posts")
			.json(&json!({ "text": "hello", "group": 1 }))
			.await;

		sqlx::query("DELETE FROM groups WHERE slug = ?")
			.bind("tech")
			.execute(&pool)
			.await
			.unwrap();

		let response = app.get("/posts/alice/1").await;

		assert_eq!(response.status_code(), 200);

		let detail = response.json::<serde_json::Value>();

		assert_eq!(detail["post"]["group_id"], serde_json::Value::Null);
	}
}
