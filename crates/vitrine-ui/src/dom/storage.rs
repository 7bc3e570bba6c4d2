//! `localStorage`-backed preference store.

use web_sys::Storage;

use crate::core::error::StorageError;
use crate::core::storage::PreferenceStore;

/// Raw-string access to `window.localStorage`.
///
/// The storage handle is resolved on every call so a page that toggles
/// storage permissions mid-session is handled the same way as one without it.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct LocalPreferenceStore;

fn local_storage() -> Result<Storage, StorageError> {
    web_sys::window()
        .ok_or(StorageError::Unavailable)?
        .local_storage()
        .map_err(|err| StorageError::Rejected {
            operation: "open",
            key: String::new(),
            detail: format!("{err:?}"),
        })?
        .ok_or(StorageError::Unavailable)
}

impl PreferenceStore for LocalPreferenceStore {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        local_storage()?
            .get_item(key)
            .map_err(|err| StorageError::Rejected {
                operation: "read",
                key: key.to_string(),
                detail: format!("{err:?}"),
            })
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        local_storage()?
            .set_item(key, value)
            .map_err(|err| StorageError::Rejected {
                operation: "write",
                key: key.to_string(),
                detail: format!("{err:?}"),
            })
    }
}
