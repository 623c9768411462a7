pub mod cache;
pub mod credentials;
pub mod database;
pub mod push;
