use super::candidates::CandidateSets;
use super::constraints::ConstraintTable;
use crate::error::KnowledgeError;
use crate::model::card::Card;
use crate::model::catalog::CardCatalog;
use crate::model::category::Category;
use crate::model::player::PlayerId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerSnapshot {
    pub player: PlayerId,
    pub has: Vec<String>,
    pub has_not: Vec<String>,
}

/// Name-resolved copy of the deduction state, suitable for logs and reports.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct KnowledgeSnapshot {
    pub unknown_figures: Vec<String>,
    pub unknown_weapons: Vec<String>,
    pub unknown_rooms: Vec<String>,
    pub players: Vec<PlayerSnapshot>,
    pub solved: bool,
}

impl KnowledgeSnapshot {
    pub fn capture(
        catalog: &CardCatalog,
        candidates: &CandidateSets,
        constraints: &ConstraintTable,
    ) -> Result<Self, KnowledgeError> {
        let players = constraints
            .iter()
            .map(|(player, entry)| {
                Ok(PlayerSnapshot {
                    player,
                    has: resolve_names(catalog, entry.has())?,
                    has_not: resolve_names(catalog, entry.has_not())?,
                })
            })
            .collect::<Result<Vec<_>, KnowledgeError>>()?;
        Ok(Self {
            unknown_figures: resolve_names(catalog, candidates.get(Category::Figure))?,
            unknown_weapons: resolve_names(catalog, candidates.get(Category::Weapon))?,
            unknown_rooms: resolve_names(catalog, candidates.get(Category::Room))?,
            players,
            solved: candidates.solution().is_some(),
        })
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

fn resolve_names<'a>(
    catalog: &CardCatalog,
    cards: impl IntoIterator<Item = &'a Card>,
) -> Result<Vec<String>, KnowledgeError> {
    cards
        .into_iter()
        .map(|card| catalog.name(*card).map(str::to_string))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_resolves_names_and_roundtrips() {
        let catalog = CardCatalog::new(
            &["Mustard", "Plum"],
            &["Knife", "Rope"],
            &["Kitchen", "Library"],
        )
        .unwrap();
        let mut candidates = CandidateSets::new(&catalog);
        let mut table = ConstraintTable::new(&PlayerId::roster(2));
        candidates.discard(Card::figure(1)).unwrap();
        table.mark_has(PlayerId(1), Card::figure(1)).unwrap();
        table.mark_has_not(PlayerId(1), Card::room(0)).unwrap();

        let snapshot = KnowledgeSnapshot::capture(&catalog, &candidates, &table).unwrap();
        assert_eq!(snapshot.unknown_figures, vec!["Mustard".to_string()]);
        assert_eq!(snapshot.unknown_rooms.len(), 2);
        assert_eq!(snapshot.players[1].has, vec!["Plum".to_string()]);
        assert_eq!(snapshot.players[1].has_not, vec!["Kitchen".to_string()]);
        assert!(!snapshot.solved);

        let json = snapshot.to_json().unwrap();
        assert!(json.contains("\"unknown_figures\""));
        assert_eq!(KnowledgeSnapshot::from_json(&json).unwrap(), snapshot);
    }
}
