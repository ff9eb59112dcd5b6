#![deny(warnings)]
pub mod error;
pub mod game;
pub mod knowledge;
pub mod model;

pub use error::KnowledgeError;
