use thiserror::Error;

pub type StorageError = anyhow::Error;

#[derive(Error, Debug)]
pub enum GetError {
    #[error("the resource {0} does not exist")]
    DoesNotExist(String),
    #[error("an error ocurred in the storage backend: {0:?}")]
    Storage(#[from] StorageError),
}

pub type UpdateError = GetError;
