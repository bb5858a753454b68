pub mod admin;
pub mod user;
pub mod view;
