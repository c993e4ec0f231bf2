//! sea-orm entities owned by the activation service.

pub mod activation_codes;
pub mod admin_users;
