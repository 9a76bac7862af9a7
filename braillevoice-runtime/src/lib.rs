pub mod history_store;
pub mod kv;
pub mod remote;
pub mod router;
pub mod session;
pub mod settings_store;
