//! Category store trait

use crate::domain::entities::Category;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CategoryError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Category already exists: {0}")]
    AlreadyExists(String),

    #[error("Category error: {0}")]
    Other(String),
}

/// Storage for destination categories, keyed by category id
pub trait CategoryStore: Send + Sync {
    fn list(&self) -> Result<Vec<Category>, CategoryError>;

    fn create(&self, category: &Category) -> Result<(), CategoryError>;

    /// Returns whether a category with this id exists
    fn contains(&self, id: &str) -> Result<bool, CategoryError> {
        Ok(self.list()?.iter().any(|category| category.id == id))
    }
}
