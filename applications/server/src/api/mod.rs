/// API route modules
pub mod albums;
pub mod artists;
pub mod auth;
pub mod extract;
pub mod health;
pub mod lyrics;
pub mod songs;
