pub mod engine;
pub mod error;
pub mod models;

pub use error::EngineError;
