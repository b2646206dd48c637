use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

fn validate_username(username: &str) -> Result<(), ValidationError> {
	if username.chars().any(|c| !c.is_alphanumeric()) {
		return Err(ValidationError::new("username must be alphanumeric"));
	}

	Ok(())
}

/// A single user.
///
/// Use this when fetching from the database and returning to the client.
/// The `email` and `password` fields are not serialized to the client.
#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct User {
	/// The unique identifier of the user.
	pub id: i64,
	/// The user's primary email address, used for logging in.
	#[serde(skip_serializing)]
	#[allow(dead_code)]
	pub email: String,
	/// The password hash in PHC string format.
	#[serde(skip_serializing)]
	pub password: String,
	/// The username that is displayed to the public.
	pub username: String,
	/// The creation time of the user.
	pub created_at: DateTime<Utc>,
}

/// A single login session.
#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct Session {
	/// The session id, also stored in the session cookie.
	#[serde(rename = "session_id")]
	pub id: String,
	/// The user that owns the session.
	#[serde(skip_serializing)]
	#[allow(dead_code)]
	pub user_id: i64,
	/// The creation time of the session.
	pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginInput {
	#[validate(email)]
	pub email: String,
	#[validate(length(min = 8, max = 128))]
	pub password: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterInput {
	#[validate(email)]
	pub email: String,
	#[validate(length(min = 8, max = 128))]
	pub password: String,
	/// The username that is displayed to the public.
	#[validate(length(min = 3, max = 16), custom(function = "validate_username"))]
	pub username: String,
}
