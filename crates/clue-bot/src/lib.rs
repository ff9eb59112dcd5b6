pub mod bot;
pub mod policy;

pub use bot::{BeliefEngine, EngineError, EngineFeatures};
pub use policy::Detective;
