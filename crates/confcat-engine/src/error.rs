use confcat_types::Category;
use std::fmt;

/// Result type for confcat-engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur in the engine layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Distinct values of one category map to the same file slug
    SlugCollision {
        category: Category,
        slug: String,
        values: Vec<String>,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::SlugCollision {
                category,
                slug,
                values,
            } => write!(
                f,
                "Slug collision in '{}': values {:?} all map to '{}'",
                category, values, slug
            ),
        }
    }
}

impl std::error::Error for Error {}
