//! Temporary storage abstraction and the built-in disk implementation.

use std::{path::PathBuf, sync::Arc};

use crate::{StorageError, Token};

/// Disk-backed temporary storage implementation.
pub mod disk;
pub use disk::{DiskTempStorage, DiskTempStorageBuilder};

/// Resolves upload tokens to the directories where uploads are staged.
///
/// Implementations must return the same directory for the same token so a
/// staged upload can be found again on a later submission.
#[async_trait::async_trait]
pub trait TempStorage: Send + Sync {
    /// Returns the staging directory for `token`, creating it if needed.
    async fn temp_dir(&self, token: &Token) -> Result<PathBuf, StorageError>;
}

#[async_trait::async_trait]
impl<T> TempStorage for Arc<T>
where
    T: TempStorage + ?Sized,
{
    async fn temp_dir(&self, token: &Token) -> Result<PathBuf, StorageError> {
        (**self).temp_dir(token).await
    }
}
