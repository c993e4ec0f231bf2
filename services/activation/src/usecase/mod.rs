pub mod admin;
pub mod batch_delete;
pub mod cleanup;
pub mod codes;
pub mod generate;
pub mod health;
pub mod seed;
pub mod validate;
