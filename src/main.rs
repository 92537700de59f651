#![warn(clippy::pedantic)]

mod config;
mod digest;
mod error;
mod extract;
mod model;
mod openapi;
mod route;
mod store;
#[cfg(test)]
mod test;
mod trace;

use std::sync::Arc;

use argon2::Argon2;

/// Handle to the document store, shared by every request.
pub type Database = Arc<dyn store::Store>;
pub type AppState = State;

/// The shared application state.
///
/// This should contain all shared dependencies that handlers need to access,
/// such as the store handle or a hash configuration (if it's expensive to create).
#[derive(Clone, axum::extract::FromRef)]
pub struct State {
	pub database: Database,
	pub hasher: Argon2<'static>,
}

#[tokio::main]
async fn main() {
	dotenvy::dotenv().ok();
	trace::init_tracing_subscriber();

	let config = config::Config::from_env().expect("invalid configuration");

	let state = State {
		database: store::connect(&config)
			.await
			.expect("failed to connect to database"),
		hasher: Argon2::default(),
	};

	tracing::info!(database = %config.database_name, "connected to database");

	let listener = tokio::net::TcpListener::bind((config.host, config.port))
		.await
		.expect("failed to bind to port");

	tracing::info!("listening on {}:{}", config.host, config.port);

	axum::serve(listener, route::app(state))
		.await
		.expect("server error");
}
