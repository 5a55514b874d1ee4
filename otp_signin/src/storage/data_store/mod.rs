mod config;
mod types;

pub(crate) use config::{DB_TABLE_USERS, GENERIC_DATA_STORE};
