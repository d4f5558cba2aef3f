pub mod config;
pub mod conversation;
pub mod error;
pub mod hub;
pub mod response;
pub mod routes;
