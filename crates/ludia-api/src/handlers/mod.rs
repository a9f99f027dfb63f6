pub mod auth;
pub mod games;
pub mod users;
