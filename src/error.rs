use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by [`DogStore`](crate::store::DogStore) operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The database file could not be opened, created, or initialized.
    #[error("storage unavailable at {}: {source}", path.display())]
    StorageUnavailable {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    #[error("failed to read dogs: {0}")]
    StorageRead(#[source] rusqlite::Error),
    #[error("failed to write dogs: {0}")]
    StorageWrite(#[source] rusqlite::Error),
    /// A stored row is missing a column or holds a value of the wrong type.
    #[error("failed to decode column `{column}`: {source}")]
    Decode {
        column: String,
        #[source]
        source: rusqlite::Error,
    },
}

impl StoreError {
    pub(crate) fn unavailable(
        path: impl Into<PathBuf>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        StoreError::StorageUnavailable {
            path: path.into(),
            source: source.into(),
        }
    }

    /// Classifies an error raised while reading a column of a fetched row.
    pub(crate) fn from_column(column: &str, err: rusqlite::Error) -> Self {
        match err {
            rusqlite::Error::InvalidColumnName(_)
            | rusqlite::Error::InvalidColumnType(..)
            | rusqlite::Error::FromSqlConversionFailure(..)
            | rusqlite::Error::IntegralValueOutOfRange(..) => StoreError::Decode {
                column: column.to_string(),
                source: err,
            },
            other => StoreError::StorageRead(other),
        }
    }
}

pub type Result<T> = std::result::Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_type_mismatch_is_a_decode_error() {
        let err = StoreError::from_column(
            "age",
            rusqlite::Error::InvalidColumnType(2, "age".into(), rusqlite::types::Type::Text),
        );
        assert!(matches!(err, StoreError::Decode { ref column, .. } if column == "age"));
        assert!(err.to_string().contains("`age`"));
    }

    #[test]
    fn other_row_errors_stay_read_errors() {
        let err = StoreError::from_column("id", rusqlite::Error::QueryReturnedNoRows);
        assert!(matches!(err, StoreError::StorageRead(_)));
    }

    #[test]
    fn unavailable_message_names_the_path() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = StoreError::unavailable("/nope/dogs.db", io);
        assert_eq!(
            err.to_string(),
            "storage unavailable at /nope/dogs.db: denied"
        );
    }
}
