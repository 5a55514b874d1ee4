mod cache_store;
mod data_store;
mod errors;
mod types;

pub(crate) async fn init() -> Result<(), errors::StorageError> {
    cache_store::GENERIC_CACHE_STORE.lock().await.init().await?;
    let _ = *data_store::GENERIC_DATA_STORE;

    Ok(())
}

pub(crate) use cache_store::GENERIC_CACHE_STORE;
pub(crate) use errors::StorageError;
pub(crate) use types::CacheData;

pub(crate) use data_store::{DB_TABLE_USERS, GENERIC_DATA_STORE};
