pub mod admin;
pub mod view;
