mod choice;
mod engine;
mod error;
mod features;
mod log;

pub use engine::BeliefEngine;
pub use error::EngineError;
pub use features::EngineFeatures;
