//! Unified error type for storefront.
//!
//! Failures fall into the categories a run can hit: schema creation,
//! constraint violations while inserting, and query execution. Pool and
//! connection problems are reported as [`Error::Database`].

/// Unified error type covering all failure modes in storefront.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Creating the schema failed, e.g. because a table already exists.
    #[error("Schema error: {0}")]
    Schema(String),

    /// An insert violated a foreign key, primary key or check constraint.
    #[error("Constraint violation: {0}")]
    Constraint(String),

    /// A read query failed to prepare or execute.
    #[error("Query error: {0}")]
    Query(String),

    /// The store could not be opened or a connection could not be obtained.
    #[error("Database error: {source}")]
    Database {
        /// The underlying database error.
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Configuration or input failed validation.
    #[error("Validation error: {0}")]
    Validation(String),
}

impl Error {
    /// Convenience constructor for [`Error::Database`].
    pub fn database(source: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Error::Database {
            source: source.into(),
        }
    }

    /// Convenience constructor for [`Error::Schema`].
    pub fn schema(msg: impl Into<String>) -> Self {
        Error::Schema(msg.into())
    }

    /// Convenience constructor for [`Error::Constraint`].
    pub fn constraint(msg: impl Into<String>) -> Self {
        Error::Constraint(msg.into())
    }

    /// Convenience constructor for [`Error::Query`].
    pub fn query(msg: impl Into<String>) -> Self {
        Error::Query(msg.into())
    }

    /// Convenience constructor for [`Error::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Error::Validation(msg.into())
    }
}

/// Result alias using the crate-level [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
