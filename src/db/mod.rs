pub mod conversation;
pub mod message;

/// Failure of a query, with the unique-key case split out so routes can answer 409.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("record already exists")]
    Conflict,
    #[error("could not execute query: {0}")]
    Query(String),
}

impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => DbError::Conflict,
            _ => DbError::Query(err.to_string()),
        }
    }
}
