pub mod config;
pub mod lookup;
pub mod ocr;
pub mod render;
pub mod search;
