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
	#[error("unknown post {0}")]
	UnknownPost(i64),
	#[error("unknown user {0}")]
	UnknownUser(String),
	#[error("unknown group {0}")]
	UnknownGroup(i64),
	#[error("image is not valid base64")]
	InvalidImage,
}

impl Error {
	pub fn status(&self) -> StatusCode {
		match self {
			Self::UnknownPost(..) | Self::UnknownUser(..) => StatusCode::NOT_FOUND,
			Self::UnknownGroup(..) | Self::InvalidImage => StatusCode::BAD_REQUEST,
		}
	}
}

pub fn routes() -> Router<AppState> {
	use route::*;

	Router::new()
		.route("/", get(get_posts).post(create_post))
		.route("/feed", get(get_follow_feed))
		.route("/:username/:post_id", get(get_post).put(update_post))
		.route("/:username/:post_id/comments", post(add_comment))
}
