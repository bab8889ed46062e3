pub mod admin;
pub mod auth;
pub mod cart;
pub mod content;
pub mod favorites;
pub mod orders;
pub mod products;
