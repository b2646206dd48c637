use axum::{
	extract::{FromRef, FromRequestParts},
	http::{header, request},
};
use uuid::Uuid;

use crate::{route::auth, session, Database, Error};

/// Extracts the session and related user from the request.
///
/// If no session cookie is present, a [`auth::Error::NoSessionCookie`] is
/// returned. If the session does not resolve to a user, a
/// [`auth::Error::InvalidSessionCookie`] is returned.
///
/// ```rust
/// async fn route(session: Session) {
///   println!("{:?}", session.user);
/// }
/// ```
#[derive(Debug)]
pub struct Session {
	pub id: String,
	pub user: auth::model::User,
}

#[axum::async_trait]
impl<S> FromRequestParts<S> for Session
where
	Database: FromRef<S>,
	S: Sync + Send,
{
	type Rejection = Error;

	/// Extracts the session from the request using a session cookie.
	async fn from_request_parts(
		parts: &mut request::Parts,
		state: &S,
	) -> Result<Self, Self::Rejection> {
		let cookies = parts
			.headers
			.get_all(header::COOKIE)
			.into_iter()
			.filter_map(|value| value.to_str().ok());

		let session_id = cookies
			.flat_map(cookie::Cookie::split_parse)
			.filter_map(Result::ok)
			.find(|cookie| cookie.name() == session::COOKIE_NAME)
			.ok_or(auth::Error::NoSessionCookie)?;

		let session_id = Uuid::parse_str(session_id.value())
			.map_err(|_| auth::Error::InvalidSessionCookie)?;

		let database = Database::from_ref(state);
		let user = sqlx::query_as::<_, auth::model::User>(
			r"
				SELECT * FROM users WHERE id = (
					SELECT user_id FROM sessions WHERE id = ?
				)
			",
		)
		.bind(session_id.to_string())
		.fetch_optional(&database)
		.await?;

		let user = user.ok_or(auth::Error::InvalidSessionCookie)?;

		Ok(Session {
			id: session_id.to_string(),
			user,
		})
	}
}

/// Extracts the session if one is present.
///
/// Requests without a valid session resolve to `None` instead of an
/// authentication error, for routes that are public but show more to
/// a logged-in user.
#[derive(Debug)]
pub struct OptionalSession(pub Option<Session>);

#[axum::async_trait]
impl<S> FromRequestParts<S> for OptionalSession
where
	Database: FromRef<S>,
	S: Sync + Send,
{
	type Rejection = Error;

	async fn from_request_parts(
		parts: &mut request::Parts,
		state: &S,
	) -> Result<Self, Self::Rejection> {
		match Session::from_request_parts(parts, state).await {
			Ok(session) => Ok(Self(Some(session))),
			Err(Error::Auth(_)) => Ok(Self(None)),
			Err(error) => Err(error),
		}
	}
}
