use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::route::{model::Page, post};

fn validate_slug(slug: &str) -> Result<(), ValidationError> {
	if slug
		.chars()
		.any(|c| !c.is_ascii_lowercase() && !c.is_ascii_digit() && c != '-' && c != '_')
	{
		return Err(ValidationError::new(
			"slug must be lowercase alphanumeric, hyphen or underscore",
		));
	}

	Ok(())
}

/// A community that posts can be published to.
#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct Group {
	/// The unique identifier of the group.
	pub id: i64,
	/// The display name of the group.
	pub title: String,
	/// The unique URL slug of the group.
	pub slug: String,
	/// An optional description of the group.
	pub description: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct GroupInput {
	#[validate(length(min = 1, max = 200))]
	pub title: String,
	#[validate(length(min = 1, max = 200), custom(function = "validate_slug"))]
	pub slug: String,
	pub description: Option<String>,
}

/// A group together with one page of its posts.
#[derive(Debug, Serialize)]
pub struct GroupFeed {
	pub group: Group,
	pub page: Page<post::model::Post>,
}
