//! Value Object Module

pub mod claims;
pub mod display_name;
pub mod email;
pub mod phone;
pub mod user_id;
pub mod user_password;
pub mod user_role;
