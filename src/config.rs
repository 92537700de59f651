use std::{net::IpAddr, str::FromStr, time::Duration};

pub const DEFAULT_DATABASE_URL: &str = "mongodb://localhost:27017";
pub const DEFAULT_DATABASE_NAME: &str = "DataBase";
pub const DEFAULT_HOST: IpAddr = IpAddr::V4(std::net::Ipv4Addr::LOCALHOST);
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_STORE_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("{name} must be {expected}, got {value:?}")]
	Invalid {
		name: &'static str,
		expected: &'static str,
		value: String,
	},
}

/// Runtime configuration, read from the environment.
///
/// A `.env` file is loaded first if present (see `main`).
#[derive(Debug, Clone)]
pub struct Config {
	/// `DATABASE_URL`, a MongoDB connection string or `memory://`.
	pub database_url: String,
	/// `DATABASE_NAME`
	pub database_name: String,
	/// `HOST`
	pub host: IpAddr,
	/// `PORT`
	pub port: u16,
	/// `STORE_TIMEOUT_SECS`, applied to every store operation.
	pub store_timeout: Duration,
}

impl Config {
	pub fn from_env() -> Result<Self, Error> {
		Self::from_lookup(|name| std::env::var(name).ok())
	}

	/// Builds the configuration from an arbitrary variable source.
	pub fn from_lookup<F>(lookup: F) -> Result<Self, Error>
	where
		F: Fn(&str) -> Option<String>,
	{
		let timeout = parse(
			&lookup,
			"STORE_TIMEOUT_SECS",
			"a positive number of seconds",
			DEFAULT_STORE_TIMEOUT_SECS,
		)?;

		if timeout == 0 {
			return Err(Error::Invalid {
				name: "STORE_TIMEOUT_SECS",
				expected: "a positive number of seconds",
				value: timeout.to_string(),
			});
		}

		Ok(Self {
			database_url: lookup("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.into()),
			database_name: lookup("DATABASE_NAME").unwrap_or_else(|| DEFAULT_DATABASE_NAME.into()),
			host: parse(&lookup, "HOST", "an IP address", DEFAULT_HOST)?,
			port: parse(&lookup, "PORT", "a port number", DEFAULT_PORT)?,
			store_timeout: Duration::from_secs(timeout),
		})
	}
}

fn parse<F, T>(lookup: &F, name: &'static str, expected: &'static str, default: T) -> Result<T, Error>
where
	F: Fn(&str) -> Option<String>,
	T: FromStr,
{
	match lookup(name) {
		Some(value) => value.parse().map_err(|_| Error::Invalid {
			name,
			expected,
			value,
		}),
		None => Ok(default),
	}
}

#[cfg(test)]
mod test {
	use std::collections::HashMap;

	use super::*;

	fn config(vars: &[(&str, &str)]) -> Result<Config, Error> {
		let vars = vars
			.iter()
			.map(|(k, v)| ((*k).to_string(), (*v).to_string()))
			.collect::<HashMap<_, _>>();

		Config::from_lookup(|name| vars.get(name).cloned())
	}

	#[test]
	fn test_defaults() {
		let config = config(&[]).unwrap();

		assert_eq!(config.database_url, DEFAULT_DATABASE_URL);
		assert_eq!(config.database_name, "DataBase");
		assert_eq!(config.port, 8080);
		assert_eq!(config.store_timeout, Duration::from_secs(10));
	}

	#[test]
	fn test_overrides() {
		let config = config(&[
			("DATABASE_URL", "memory://"),
			("PORT", "3000"),
			("HOST", "0.0.0.0"),
			("STORE_TIMEOUT_SECS", "2"),
		])
		.unwrap();

		assert_eq!(config.database_url, "memory://");
		assert_eq!(config.port, 3000);
		assert!(config.host.is_unspecified());
		assert_eq!(config.store_timeout, Duration::from_secs(2));
	}

	#[test]
	fn test_invalid_values() {
		assert!(matches!(
			config(&[("PORT", "http")]),
			Err(Error::Invalid { name: "PORT", .. })
		));

		assert!(matches!(
			config(&[("STORE_TIMEOUT_SECS", "0")]),
			Err(Error::Invalid {
				name: "STORE_TIMEOUT_SECS",
				..
			})
		));
	}
}
