use axum::{
	body::Body,
	extract::rejection,
	http::{Response, StatusCode},
	response::IntoResponse,
	Json,
};
use serde::Serialize;

use crate::route::{auth, group, post, profile};

/// Error type for the application.
///
/// The Display trait is not sent to the client, so it can show
/// sensitive information.
#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("validation error: {0}")]
	Validation(#[from] validator::ValidationErrors),
	#[error("json error: {0}")]
	Json(#[from] rejection::JsonRejection),
	#[error("query error: {0}")]
	Query(#[from] rejection::QueryRejection),
	#[error("auth error: {0}")]
	Auth(#[from] auth::Error),
	#[error("post error: {0}")]
	Post(#[from] post::Error),
	#[error("group error: {0}")]
	Group(#[from] group::Error),
	#[error("profile error: {0}")]
	Profile(#[from] profile::Error),
	#[error("database error: {0}")]
	Database(#[from] sqlx::Error),
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
	pub success: bool,
	pub errors: Vec<String>,
}

fn shape(status: StatusCode, errors: Vec<String>) -> Response<Body> {
	(
		status,
		Json(ErrorResponse {
			success: false,
			errors,
		}),
	)
		.into_response()
}

impl IntoResponse for Error {
	fn into_response(self) -> Response<Body> {
		match self {
			Error::Validation(errors) => shape(
				StatusCode::BAD_REQUEST,
				errors
					.field_errors()
					.into_iter()
					.flat_map(|(field, errors)| {
						errors
							.iter()
							.map(move |error| format!("{field}: {error}"))
					})
					.collect(),
			),
			Error::Json(error) => shape(StatusCode::BAD_REQUEST, vec![error.to_string()]),
			Error::Query(error) => shape(StatusCode::BAD_REQUEST, vec![error.to_string()]),
			Error::Auth(error) => shape(error.status(), vec![error.to_string()]),
			Error::Post(error) => shape(error.status(), vec![error.to_string()]),
			Error::Group(error) => shape(error.status(), vec![error.to_string()]),
			Error::Profile(error) => shape(error.status(), vec![error.to_string()]),
			Error::Database(error) => {
				tracing::error!("database error: {error}");

				shape(StatusCode::INTERNAL_SERVER_ERROR, Vec::new())
			}
		}
	}
}
