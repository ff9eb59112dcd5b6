use core::fmt;
use serde::{Deserialize, Serialize};

/// Stable roster index of a player, including the engine's own player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub u8);

impl PlayerId {
    pub const fn new(index: u8) -> Self {
        Self(index)
    }

    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Builds a roster of `count` consecutive ids starting at zero.
    pub fn roster(count: u8) -> Vec<PlayerId> {
        (0..count).map(PlayerId).collect()
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::PlayerId;

    #[test]
    fn roster_is_sequential() {
        let roster = PlayerId::roster(3);
        assert_eq!(roster, vec![PlayerId(0), PlayerId(1), PlayerId(2)]);
        assert_eq!(roster[2].index(), 2);
    }

    #[test]
    fn display_uses_prefix() {
        assert_eq!(PlayerId(4).to_string(), "P4");
    }
}
