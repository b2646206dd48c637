#![warn(clippy::pedantic)]

mod error;
mod extract;
mod route;
mod session;

use argon2::Argon2;
use axum::Router;
use tower_http::trace::TraceLayer;

pub use error::Error;

pub type Database = sqlx::Pool<sqlx::Sqlite>;
pub type AppState = State;

/// The shared application state.
///
/// This should contain all shared dependencies that handlers need to access,
/// such as a database connection pool or a hash configuration (if it's
/// expensive to create).
#[derive(Clone, axum::extract::FromRef)]
pub struct State {
	pub database: Database,
	pub hasher: Argon2<'static>,
}

/// Builds the application router on top of a database pool.
pub fn app(database: Database) -> Router {
	let state = State {
		database,
		hasher: Argon2::default(),
	};

	Router::new()
		.nest("/auth", route::auth::routes())
		.nest("/posts", route::post::routes())
		.nest("/groups", route::group::routes())
		.nest("/profiles", route::profile::routes())
		.layer(TraceLayer::new_for_http())
		.with_state(state)
}

#[tokio::main]
async fn main() {
	tracing_subscriber::fmt::init();
	dotenvy::dotenv().ok();

	let database = Database::connect(
		&std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://plaza.db?mode=rwc".into()),
	)
	.await
	.expect("failed to connect to database");

	sqlx::migrate!()
		.run(&database)
		.await
		.expect("failed to run migrations");

	let app = app(database);

	let port = std::env::var("PORT").map_or_else(
		|_| 3000,
		|port| port.parse().expect("PORT must be a number"),
	);

	let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
		.await
		.expect("failed to bind to port");

	tracing::info!("listening on port {}", port);

	axum::serve(listener, app).await.unwrap();
}
