pub mod identity;
pub mod member;
pub mod config;
pub mod error;
pub mod server;
