use serde::{Deserialize, Serialize};
use validator::Validate;

/// The number of posts on a single feed page.
pub const PAGE_SIZE: i64 = 10;

/// This can be removed when [`serde`] supports
/// literal defaults: <https://github.com/serde-rs/serde/issues/368>
#[inline]
fn one() -> i64 {
	1
}

#[derive(Debug, Deserialize, Validate)]
pub struct Paginate {
	/// The page number to return (1-indexed).
	#[serde(default = "one")]
	pub page: i64,
}

impl Paginate {
	/// Clamps the requested page to the valid range for `total` items,
	/// returning the effective page number and its row offset.
	pub fn clamp(&self, total: i64) -> (i64, i64) {
		let page = self.page.clamp(1, pages(total));

		(page, (page - 1) * PAGE_SIZE)
	}
}

/// The number of pages needed for `total` items. An empty feed still
/// has one (empty) page.
fn pages(total: i64) -> i64 {
	((total + PAGE_SIZE - 1) / PAGE_SIZE).max(1)
}

/// One page of a feed, with enough metadata to render pagination
/// controls without a second request.
#[derive(Debug, Serialize)]
pub struct Page<T> {
	pub items: Vec<T>,
	pub total: i64,
	pub page: i64,
	pub pages: i64,
	pub has_next: bool,
	pub has_previous: bool,
}

impl<T> Page<T> {
	pub fn new(items: Vec<T>, total: i64, page: i64) -> Self {
		let pages = pages(total);

		Self {
			items,
			total,
			page,
			pages,
			has_next: page < pages,
			has_previous: page > 1,
		}
	}
}

#[cfg(test)]
mod test {
	use super::{pages, Paginate};

	#[test]
	fn test_paginate_clamp() {
		let mut paginate = Paginate { page: 1 };

		assert_eq!(paginate.clamp(25), (1, 0));

		paginate.page = 2;

		assert_eq!(paginate.clamp(25), (2, 10));

		paginate.page = 9;

		assert_eq!(paginate.clamp(25), (3, 20));

		paginate.page = -4;

		assert_eq!(paginate.clamp(25), (1, 0));

		paginate.page = 7;

		assert_eq!(paginate.clamp(0), (1, 0));
	}

	#[test]
	fn test_pages() {
		assert_eq!(pages(0), 1);
		assert_eq!(pages(10), 1);
		assert_eq!(pages(11), 2);
		assert_eq!(pages(15), 2);
	}
}
