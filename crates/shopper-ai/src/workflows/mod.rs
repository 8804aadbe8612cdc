pub mod catalog;
pub mod shopping;
