use crate::error::KnowledgeError;
use crate::model::catalog::CardCatalog;
use crate::model::player::PlayerId;

/// Read-only view of the hosting game consumed when a player is attached.
pub trait GameView {
    fn catalog(&self) -> &CardCatalog;

    /// Every player in turn order, including the one being attached.
    fn players(&self) -> &[PlayerId];
}

/// Plain game reference: a card universe plus a roster.
#[derive(Debug, Clone)]
pub struct GameSetup {
    catalog: CardCatalog,
    players: Vec<PlayerId>,
}

impl GameSetup {
    pub fn new(catalog: CardCatalog, players: Vec<PlayerId>) -> Self {
        Self { catalog, players }
    }

    pub fn with_player_count(catalog: CardCatalog, count: u8) -> Self {
        Self::new(catalog, PlayerId::roster(count))
    }

    pub fn require_player(&self, player: PlayerId) -> Result<PlayerId, KnowledgeError> {
        if self.players.contains(&player) {
            Ok(player)
        } else {
            Err(KnowledgeError::UnknownPlayer(player))
        }
    }
}

impl GameView for GameSetup {
    fn catalog(&self) -> &CardCatalog {
        &self.catalog
    }

    fn players(&self) -> &[PlayerId] {
        &self.players
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn setup_exposes_roster() {
        let catalog = CardCatalog::new(&["Plum"], &["Rope"], &["Hall"]).unwrap();
        let setup = GameSetup::with_player_count(catalog, 3);
        assert_eq!(setup.players().len(), 3);
        assert_eq!(setup.catalog().total(), 3);
        assert!(setup.require_player(PlayerId(2)).is_ok());
        assert_eq!(
            setup.require_player(PlayerId(3)),
            Err(KnowledgeError::UnknownPlayer(PlayerId(3)))
        );
    }
}
