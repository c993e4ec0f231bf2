pub mod activation;
pub mod admin;
pub mod codes;
pub mod health;
