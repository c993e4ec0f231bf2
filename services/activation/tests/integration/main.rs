mod helpers;

mod admin_test;
mod codes_test;
mod generate_test;
mod health_test;
