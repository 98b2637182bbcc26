pub mod config;
pub mod engine;
pub mod games;
pub mod gesture;
pub mod logger;
