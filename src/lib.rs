pub mod config;
pub mod content;
pub mod db;
pub mod error;
pub mod i18n;
pub mod retry;
pub mod security;
pub mod server;
pub mod store;
