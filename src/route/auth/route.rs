use argon2::{
	password_hash::{rand_core::OsRng, PasswordHash, SaltString},
	PasswordHasher, PasswordVerifier,
};
use axum::{
	extract::State,
	http::{header, StatusCode},
	response::IntoResponse,
};
use uuid::Uuid;

use crate::{
	extract::{Json, Session},
	session, AppState, Database,
};

use super::{model, Error};

/// Returns the authenticated user.
pub async fn me(session: Session) -> Json<model::User> {
	Json(session.user)
}

/// Returns a session cookie, assuming the credentials are valid.
pub async fn login(
	State(state): State<AppState>,
	Json(auth): Json<model::LoginInput>,
) -> Result<impl IntoResponse, crate::Error> {
	let user = sqlx::query_as::<_, model::User>("SELECT * FROM users WHERE email = ?")
		.bind(&auth.email)
		.fetch_optional(&state.database)
		.await?;

	let Some(user) = user else {
		return Err(Error::InvalidUsernameOrPassword.into());
	};

	let hash = PasswordHash::new(&user.password).map_err(Error::Hash)?;

	if state
		.hasher
		.verify_password(auth.password.as_bytes(), &hash)
		.is_err()
	{
		return Err(Error::InvalidUsernameOrPassword.into());
	}

	let session = sqlx::query_as::<_, model::Session>(
		"INSERT INTO sessions (id, user_id) VALUES (?, ?) RETURNING *",
	)
	.bind(Uuid::new_v4().to_string())
	.bind(user.id)
	.fetch_one(&state.database)
	.await?;

	let cookie = session::create_cookie(&session.id);

	Ok(([(header::SET_COOKIE, cookie.to_string())], Json(session)))
}

/// Logs out of the authenticated account.
pub async fn logout(
	State(database): State<Database>,
	session: Session,
) -> Result<impl IntoResponse, crate::Error> {
	sqlx::query("DELETE FROM sessions WHERE id = ?")
		.bind(&session.id)
		.execute(&database)
		.await?;

	// Clear the session cookie
	Ok([(header::SET_COOKIE, session::clear_cookie().to_string())])
}

/// Registers a new account, returning an associated session cookie.
pub async fn register(
	State(state): State<AppState>,
	Json(auth): Json<model::RegisterInput>,
) -> Result<impl IntoResponse, crate::Error> {
	let salt = SaltString::generate(&mut OsRng);
	let hashed = state
		.hasher
		.hash_password(auth.password.as_bytes(), &salt)
		.map_err(Error::Hash)?
		.to_string();

	let mut tx = state.database.begin().await?;

	let user_id: i64 = sqlx::query_scalar(
		"INSERT INTO users (email, username, password) VALUES (?, ?, ?) RETURNING id",
	)
	.bind(&auth.email)
	.bind(&auth.username)
	.bind(&hashed)
	.fetch_one(&mut *tx)
	.await
	.map_err(|e| match e {
		sqlx::Error::Database(ref d) if d.message().contains("users.username") => {
			Error::UsernameTaken.into()
		}
		sqlx::Error::Database(ref d) if d.message().contains("users.email") => {
			Error::EmailTaken.into()
		}
		e => crate::Error::Database(e),
	})?;

	let session = sqlx::query_as::<_, model::Session>(
		"INSERT INTO sessions (id, user_id) VALUES (?, ?) RETURNING *",
	)
	.bind(Uuid::new_v4().to_string())
	.bind(user_id)
	.fetch_one(&mut *tx)
	.await?;

	tx.commit().await?;

	let cookie = session::create_cookie(&session.id);

	Ok(([(header::SET_COOKIE, cookie.to_string())], Json(session)))
}

/// Deletes the authenticated account and their related content.
/// This action is irreversible.
pub async fn delete_me(
	State(database): State<Database>,
	session: Session,
) -> Result<impl IntoResponse, crate::Error> {
	sqlx::query("DELETE FROM users WHERE id = ?")
		.bind(session.user.id)
		.execute(&database)
		.await?;

	// Clear the session cookie
	Ok((
		[(header::SET_COOKIE, session::clear_cookie().to_string())],
		StatusCode::NO_CONTENT,
	))
}
