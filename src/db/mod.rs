pub mod enums;
pub mod models;
pub mod repositories;

use diesel::PgConnection;
use diesel::r2d2::{self, ConnectionManager as DbConnectionManager};

pub type DbPool = r2d2::Pool<DbConnectionManager<PgConnection>>;
pub type DbConnection = r2d2::PooledConnection<DbConnectionManager<PgConnection>>;

/// A connection inside a transaction that is never committed.
#[cfg(test)]
pub(crate) fn test_connection() -> PgConnection {
    use diesel::Connection;

    dotenvy::dotenv().ok();
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let mut conn = PgConnection::establish(&url).expect("database is reachable");
    conn.begin_test_transaction()
        .expect("test transaction starts");
    conn
}
