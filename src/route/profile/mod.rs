use axum::{
	http::StatusCode,
	routing::{get, post},
	Router,
};

use crate::AppState;

pub mod model;
pub mod route;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("unknown user {0}")]
	UnknownUser(String),
}

impl Error {
	pub fn status(&self) -> StatusCode {
		match self {
			Self::UnknownUser(..) => StatusCode::NOT_FOUND,
		}
	}
}

pub fn routes() -> Router<AppState> {
	use route::*;

	Router::new()
		.route("/:username", get(get_profile))
		.route("/:username/follow", post(follow).delete(unfollow))
}

#[cfg(test)]
mod test {
	use crate::test::*;

	#[sqlx::test]
	async fn test_profile(pool: Database) {
		let alice = app(pool.clone());
		let bob = app(pool.clone());

		register(&alice, "alice").await;
		register(&bob, "bob").await;

		bob.post("/posts").json(&json!({ "text": "hi" })).await;

		let response = alice.get("/profiles/bob").await;
		let profile = response.json::<serde_json::Value>();

		assert_eq!(profile["author"]["username"], "bob");
		assert_eq!(profile["posts_count"], 1);
		assert_eq!(profile["following"], false);

		alice.post("/profiles/bob/follow").await;

		let response = alice.get("/profiles/bob").await;

		assert_eq!(response.json::<serde_json::Value>()["following"], true);

		// anonymous viewers are never "following"
		let anon = app(pool.clone());
		let response = anon.get("/profiles/bob").await;

		assert_eq!(response.status_code(), 200);
		assert_eq!(response.json::<serde_json::Value>()["following"], false);
	}

	#[sqlx::test]
	async fn test_unknown_profile(pool: Database) {
		let app = app(pool);

		let response = app.get("/profiles/ghost").await;

		assert_eq!(response.status_code(), 404);
	}

	#[sqlx::test]
	async fn test_follow_is_idempotent(pool: Database) {
		let alice = app(pool.clone());
		let bob = app(pool.clone());

		register(&alice, "alice").await;
		register(&bob, "bob").await;

		for _ in 0..2 {
			let response = alice.post("/profiles/bob/follow").await;

			assert_eq!(response.status_code(), 204);
		}

		let follows: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM follows")
			.fetch_one(&pool)
			.await
			.unwrap();

		assert_eq!(follows, 1);
	}

	#[sqlx::test]
	async fn test_self_follow_is_ignored(pool: Database) {
		let app = app(pool.clone());

		register(&app, "alice").await;

		let response = app.post("/profiles/alice/follow").await;

		assert_eq!(response.status_code(), 204);

		let follows: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM follows")
			.fetch_one(&pool)
			.await
			.unwrap();

		assert_eq!(follows, 0);
	}

	#[sqlx::test]
	async fn test_unfollow(pool: Database) {
		let alice = app(pool.clone());
		let bob = app(pool.clone());

		register(&alice, "alice").await;
		register(&bob, "bob").await;

		// unfollowing without a follow is not an error
		let response = alice.delete("/profiles/bob/follow").await;

		assert_eq!(response.status_code(), 204);

		alice.post("/profiles/bob/follow").await;
		alice.delete("/profiles/bob/follow").await;

		let follows: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM follows")
			.fetch_one(&pool)
			.await
			.unwrap();

		assert_eq!(follows, 0);
	}

	#[sqlx::test]
	async fn test_follow_requires_session(pool: Database) {
		let app = app(pool);

		let response = app.post("/profiles/bob/follow").await;

		assert_eq!(response.status_code(), 401);
	}
}
