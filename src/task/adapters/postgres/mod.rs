//! `PostgreSQL` adapter implementations for task lifecycle ports.

mod event_store;
mod models;
mod repository;
mod schema;

use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool};

/// `PostgreSQL` connection pool type used by task adapters.
pub type PgPool = Pool<ConnectionManager<PgConnection>>;

pub use event_store::PostgresEventStore;
pub use repository::PostgresTaskRepository;
