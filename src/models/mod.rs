pub mod analysis;
pub mod config;
pub mod medicine;
pub mod upload;
