use super::error::EngineError;
use rand::Rng;
use rand::seq::SliceRandom;

/// Picks one option uniformly at random.
pub(crate) fn choose<T: Copy, R: Rng + ?Sized>(
    rng: &mut R,
    options: &[T],
    what: &'static str,
) -> Result<T, EngineError> {
    options
        .choose(rng)
        .copied()
        .ok_or(EngineError::EmptyChoice { what })
}
