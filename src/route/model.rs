use bson::oid::ObjectId;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::AppError;

/// Number of items on each page of a listing.
pub const PAGE_SIZE: u64 = 2;

#[derive(Debug, Default, Deserialize, Validate, JsonSchema)]
pub struct Paginate {
	/// The page number to return (1-indexed). Omitted or `0` means the first page.
	pub page: Option<u64>,
}

impl Paginate {
	pub fn page(&self) -> u64 {
		match self.page {
			None | Some(0) => 1,
			Some(page) => page,
		}
	}

	pub fn offset(&self) -> u64 {
		(self.page() - 1).saturating_mul(PAGE_SIZE)
	}

	pub fn limit(&self) -> u64 {
		PAGE_SIZE
	}

	/// The last page holding any of `total` items, rounding partial pages up.
	pub fn last_page(total: u64) -> u64 {
		total.div_ceil(PAGE_SIZE)
	}
}

#[derive(Debug, Deserialize, Validate, JsonSchema)]
pub struct IdInput {
	pub id: String,
}

impl IdInput {
	/// Parses the id as a store identifier.
	pub fn object_id(&self) -> Result<ObjectId, AppError> {
		ObjectId::parse_str(&self.id).map_err(|_| AppError::InvalidId(self.id.clone()))
	}
}

/// Acknowledges an insert, carrying the id of the new document.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct InsertAck {
	/// The unique identifier of the inserted document.
	pub inserted_id: String,
}

impl From<ObjectId> for InsertAck {
	fn from(id: ObjectId) -> Self {
		Self {
			inserted_id: id.to_hex(),
		}
	}
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn test_paginate_page_defaults_to_one() {
		assert_eq!(Paginate { page: None }.page(), 1);
		assert_eq!(Paginate { page: Some(0) }.page(), 1);
		assert_eq!(Paginate { page: Some(3) }.page(), 3);
	}

	#[test]
	fn test_paginate_offset() {
		let mut paginate = Paginate { page: None };

		assert_eq!(paginate.offset(), 0);

		paginate.page = Some(2);

		assert_eq!(paginate.offset(), 2);

		paginate.page = Some(3);

		assert_eq!(paginate.offset(), 4);

		paginate.page = Some(u64::MAX);

		assert_eq!(paginate.offset(), u64::MAX);
	}

	#[test]
	fn test_paginate_limit() {
		assert_eq!(Paginate::default().limit(), PAGE_SIZE);
	}

	#[test]
	fn test_last_page_rounds_up() {
		assert_eq!(Paginate::last_page(0), 0);
		assert_eq!(Paginate::last_page(1), 1);
		assert_eq!(Paginate::last_page(4), 2);
		assert_eq!(Paginate::last_page(5), 3);
	}

	#[test]
	fn test_object_id() {
		let id = ObjectId::new();
		let input = IdInput { id: id.to_hex() };

		assert_eq!(input.object_id().unwrap(), id);

		let input = IdInput {
			id: "not-an-id".into(),
		};

		assert!(matches!(input.object_id(), Err(AppError::InvalidId(..))));
	}
}
