pub type DBPool = sqlx::PgPool;
pub type DBConnection = sqlx::PgConnection;
pub type DBTxOwned<'a> = sqlx::Transaction<'a, sqlx::Postgres>;
