use crate::error::KnowledgeError;
use crate::model::card::Card;
use crate::model::catalog::CardCatalog;
use crate::model::player::PlayerId;
use std::collections::{BTreeMap, BTreeSet};

/// Cards one player is known to hold and known to lack.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayerConstraints {
    has: BTreeSet<Card>,
    has_not: BTreeSet<Card>,
}

impl PlayerConstraints {
    pub fn has(&self) -> &BTreeSet<Card> {
        &self.has
    }

    pub fn has_not(&self) -> &BTreeSet<Card> {
        &self.has_not
    }

    pub fn holds(&self, card: Card) -> bool {
        self.has.contains(&card)
    }

    pub fn lacks(&self, card: Card) -> bool {
        self.has_not.contains(&card)
    }
}

/// Per-player constraint records keyed by roster id.
///
/// `has` and `has_not` stay disjoint per player, and a card is recorded in at
/// most one player's `has`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstraintTable {
    entries: BTreeMap<PlayerId, PlayerConstraints>,
}

impl ConstraintTable {
    pub fn new(players: &[PlayerId]) -> Self {
        let entries = players
            .iter()
            .map(|player| (*player, PlayerConstraints::default()))
            .collect();
        Self { entries }
    }

    pub fn entry(&self, player: PlayerId) -> Result<&PlayerConstraints, KnowledgeError> {
        self.entries
            .get(&player)
            .ok_or(KnowledgeError::UnknownPlayer(player))
    }

    fn entry_mut(&mut self, player: PlayerId) -> Result<&mut PlayerConstraints, KnowledgeError> {
        self.entries
            .get_mut(&player)
            .ok_or(KnowledgeError::UnknownPlayer(player))
    }

    pub fn contains_player(&self, player: PlayerId) -> bool {
        self.entries.contains_key(&player)
    }

    pub fn players(&self) -> impl Iterator<Item = PlayerId> + '_ {
        self.entries.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &PlayerConstraints)> + '_ {
        self.entries.iter().map(|(player, entry)| (*player, entry))
    }

    /// Player already recorded as holding `card`, if any.
    pub fn known_holder(&self, card: Card) -> Option<PlayerId> {
        self.entries
            .iter()
            .find(|(_, entry)| entry.holds(card))
            .map(|(player, _)| *player)
    }

    /// Records that `player` holds `card`. Returns whether anything changed.
    pub fn mark_has(&mut self, player: PlayerId, card: Card) -> Result<bool, KnowledgeError> {
        if let Some(holder) = self.known_holder(card) {
            if holder == player {
                return Ok(false);
            }
            return Err(KnowledgeError::ConstraintConflict {
                card,
                reason: format!("already held by {holder}, cannot also be held by {player}"),
            });
        }
        let entry = self.entry_mut(player)?;
        if entry.lacks(card) {
            return Err(KnowledgeError::ConstraintConflict {
                card,
                reason: format!("{player} is known not to hold it"),
            });
        }
        Ok(entry.has.insert(card))
    }

    /// Records that `player` lacks `card`. Returns whether anything changed.
    pub fn mark_has_not(&mut self, player: PlayerId, card: Card) -> Result<bool, KnowledgeError> {
        let entry = self.entry_mut(player)?;
        if entry.holds(card) {
            return Err(KnowledgeError::ConstraintConflict {
                card,
                reason: format!("{player} is known to hold it"),
            });
        }
        Ok(entry.has_not.insert(card))
    }

    /// Records that `player` lacks every card in `cards`, or nothing at all when
    /// any of them conflicts with a recorded holding.
    pub fn mark_has_not_all(
        &mut self,
        player: PlayerId,
        cards: &[Card],
    ) -> Result<usize, KnowledgeError> {
        let entry = self.entry_mut(player)?;
        if let Some(card) = cards.iter().copied().find(|card| entry.holds(*card)) {
            return Err(KnowledgeError::ConstraintConflict {
                card,
                reason: format!("{player} is known to hold it"),
            });
        }
        Ok(cards
            .iter()
            .filter(|card| entry.has_not.insert(**card))
            .count())
    }

    /// Replaces the record of a player whose holdings are completely known:
    /// `held` becomes `has` and every other card of the universe `has_not`.
    pub fn set_exhaustive(
        &mut self,
        player: PlayerId,
        held: &BTreeSet<Card>,
        catalog: &CardCatalog,
    ) -> Result<(), KnowledgeError> {
        for &card in held {
            catalog.require(card)?;
            if let Some(holder) = self.known_holder(card) {
                if holder != player {
                    return Err(KnowledgeError::ConstraintConflict {
                        card,
                        reason: format!("already held by {holder}, cannot also be held by {player}"),
                    });
                }
            }
        }
        let entry = self.entry_mut(player)?;
        entry.has = held.clone();
        entry.has_not = catalog
            .all_cards()
            .filter(|card| !held.contains(card))
            .collect();
        Ok(())
    }

    /// Cards of the universe that every player is known to lack.
    pub fn eliminated_cards(&self, catalog: &CardCatalog) -> Vec<Card> {
        if self.entries.is_empty() {
            return Vec::new();
        }
        catalog
            .all_cards()
            .filter(|card| self.entries.values().all(|entry| entry.lacks(*card)))
            .collect()
    }
}
