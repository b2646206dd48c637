use serde::Serialize;

use crate::route::{auth, model::Page, post};

/// An author's public profile: the user, one page of their posts and
/// whether the requesting user follows them.
#[derive(Debug, Serialize)]
pub struct Profile {
	pub author: auth::model::User,
	pub posts_count: i64,
	pub following: bool,
	pub page: Page<post::model::Post>,
}
