pub mod auth;
pub mod medicine;
pub mod quality;
