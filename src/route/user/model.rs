pub use crate::route::model::{IdInput, InsertAck};

use std::borrow::Cow;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::model;

/// Characters allowed in an unquoted local part or a domain label (RFC 5322 `atext`,
/// extended to UTF-8 by RFC 6532).
fn is_atext(c: char) -> bool {
	c.is_ascii_alphanumeric()
		|| "!#$%&'*+-/=?^_`{|}~".contains(c)
		|| (!c.is_ascii() && !c.is_control())
}

/// Runs of `atext` separated by single dots, with no leading or trailing dot.
fn is_dot_atom(input: &str) -> bool {
	input
		.split('.')
		.all(|label| !label.is_empty() && label.chars().all(is_atext))
}

fn is_quoted_text(c: char) -> bool {
	c == ' ' || c == '\t' || c.is_ascii_graphic() || (!c.is_ascii() && !c.is_control())
}

/// Splits a leading quoted string off `input`, returning its raw content and the rest.
fn split_quoted_string(input: &str) -> Option<(&str, &str)> {
	let body = input.strip_prefix('"')?;
	let mut chars = body.char_indices();

	while let Some((i, c)) = chars.next() {
		match c {
			'"' => return Some((&body[..i], &body[i + 1..])),
			'\\' => match chars.next() {
				Some((_, escaped)) if is_quoted_text(escaped) => {}
				_ => return None,
			},
			c if is_quoted_text(c) => {}
			_ => return None,
		}
	}

	None
}

/// Whether `address` is an RFC 5322 `addr-spec`: a dot-atom or quoted local part,
/// `@`, then a dot-atom domain. Domain literals are not accepted.
fn is_addr_spec(address: &str) -> bool {
	let domain = if address.starts_with('"') {
		match split_quoted_string(address) {
			Some((local, rest)) if !local.is_empty() => rest.strip_prefix('@'),
			_ => None,
		}
	} else {
		address
			.split_once('@')
			.and_then(|(local, domain)| is_dot_atom(local).then_some(domain))
	};

	domain.is_some_and(is_dot_atom)
}

fn validate_email(email: &str) -> Result<(), ValidationError> {
	if !is_addr_spec(email) {
		return Err(ValidationError::new("invalid_email")
			.with_message(Cow::Borrowed("Please enter a proper email address.")));
	}

	Ok(())
}

/// A single user.
#[derive(Debug, Serialize, JsonSchema)]
pub struct User {
	/// The unique identifier of the user.
	#[serde(rename = "_id")]
	pub id: String,
	/// The user's display name.
	pub name: String,
	/// The user's email address, unique across all users.
	pub email: String,
}

/// Request body used to create a [`User`].
#[derive(Debug, Deserialize, JsonSchema, Validate)]
pub struct CreateUserInput {
	/// The user's display name.
	#[serde(default)]
	pub name: String,
	/// The user's email address, unique across all users.
	#[serde(default)]
	#[validate(custom(function = "validate_email"))]
	pub email: String,
	/// The user's password. Only accepted on input, never returned.
	#[serde(default)]
	pub password: String,
}

impl From<model::User> for User {
	/// The stored digest is dropped here, so it cannot reach a response.
	fn from(user: model::User) -> Self {
		Self {
			id: user.id.to_hex(),
			name: user.name,
			email: user.email,
		}
	}
}
