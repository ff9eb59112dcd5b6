use clue_core::KnowledgeError;
use thiserror::Error;

/// Errors surfaced by the belief engine to the hosting game.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error(transparent)]
    Knowledge(#[from] KnowledgeError),
    #[error("cannot choose {what}: no options available")]
    EmptyChoice { what: &'static str },
    #[error("a response was reported before any question was asked")]
    NoCurrentQuestion,
}
