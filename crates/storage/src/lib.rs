#![forbid(unsafe_code)]

pub mod repository;
pub mod sqlite;

pub use repository::{CredentialRepository, Credentials, InMemoryCredentialStore, StorageError};
pub use sqlite::{SqliteCredentialStore, SqliteInitError};
