pub mod operate;
pub mod pricing;
