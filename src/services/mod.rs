pub mod ai;
pub mod candidates;
pub mod config;
pub mod lookup;
pub mod ocr;
pub mod pipeline;
pub mod session;
pub mod upload;
