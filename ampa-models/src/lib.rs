#[macro_use]
extern crate tracing;

mod directory;
mod models;

pub use directory::*;
pub use models::*;

use sqlx::{PgPool, Postgres};

pub type Db = sqlx::pool::PoolConnection<Postgres>;
pub type ClientRef<'a> = &'a Client;

#[derive(thiserror::Error, Debug)]
pub enum AmpaModelError {
    #[error("Other error: {}", .0)]
    Other(String),
    #[error("Error in underlying datamodel: {}", .0)]
    SQLx(#[from] sqlx::Error),
    #[error("Could not deserialize upstream: {}", .0)]
    SerdeJson(#[from] serde_json::Error),
    #[error("Column {} in {} {} was null", .column, .table, .id)]
    DataWasNull {
        column: String,
        table: String,
        id: String,
    },
    #[error("{:?}", .0)]
    Context(#[from] anyhow::Error),
}

/// Handle for all reads against the association database.
///
/// Cheap to clone, all clones share the underlying pool.
#[derive(Clone)]
pub struct Client {
    db: PgPool,
}

impl Client {
    pub fn new(db: PgPool) -> Self {
        debug!("Creating new database client");
        Self { db }
    }

    pub fn pool(&self) -> &PgPool {
        &self.db
    }
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client").field("db", &self.db).finish()
    }
}

impl From<PgPool> for Client {
    fn from(p: PgPool) -> Self {
        Client::new(p)
    }
}

impl From<&PgPool> for Client {
    fn from(p: &PgPool) -> Self {
        Client::new(p.clone())
    }
}

impl From<&mut PgPool> for Client {
    fn from(p: &mut PgPool) -> Self {
        Client::new(p.clone())
    }
}
