use argon2::Argon2;
use bson::oid::ObjectId;

/// Length of the derived key, before hex encoding.
pub const KEY_LENGTH: usize = 32;

/// Hashes a password with Argon2, using the owning user's id as a salt.
///
/// Returns the key as lowercase hex, so the stored credential is always
/// `2 * KEY_LENGTH` characters.
pub fn hash_password(
	hasher: &Argon2,
	password: &str,
	salt: &ObjectId,
) -> Result<String, argon2::Error> {
	let mut hash = [0; KEY_LENGTH];

	hasher.hash_password_into(password.as_bytes(), &salt.bytes(), &mut hash)?;
	Ok(hex::encode(hash))
}
