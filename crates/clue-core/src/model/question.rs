use crate::error::KnowledgeError;
use crate::model::card::Card;
use crate::model::catalog::CardCatalog;
use crate::model::category::Category;
use core::fmt;
use serde::{Deserialize, Serialize};

/// One figure, one weapon and one room named together in a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Suggestion {
    pub figure: Card,
    pub weapon: Card,
    pub room: Card,
}

impl Suggestion {
    /// Builds a suggestion after checking each card against its slot and the universe.
    pub fn new(
        catalog: &CardCatalog,
        figure: Card,
        weapon: Card,
        room: Card,
    ) -> Result<Self, KnowledgeError> {
        Ok(Self {
            figure: catalog.require_in(figure, Category::Figure)?,
            weapon: catalog.require_in(weapon, Category::Weapon)?,
            room: catalog.require_in(room, Category::Room)?,
        })
    }

    pub fn from_names(
        catalog: &CardCatalog,
        figure: &str,
        weapon: &str,
        room: &str,
    ) -> Result<Self, KnowledgeError> {
        Ok(Self {
            figure: catalog.card_in(figure, Category::Figure)?,
            weapon: catalog.card_in(weapon, Category::Weapon)?,
            room: catalog.card_in(room, Category::Room)?,
        })
    }

    pub const fn cards(&self) -> [Card; 3] {
        [self.figure, self.weapon, self.room]
    }

    pub fn card(&self, category: Category) -> Card {
        match category {
            Category::Figure => self.figure,
            Category::Weapon => self.weapon,
            Category::Room => self.room,
        }
    }

    pub fn contains(&self, card: Card) -> bool {
        self.card(card.category) == card
    }
}

impl fmt::Display for Suggestion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.figure, self.weapon, self.room)
    }
}

/// Query issued by a player: a plain question or a terminal accusation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Question {
    Ask(Suggestion),
    Accuse(Suggestion),
}

impl Question {
    pub const fn is_accusation(&self) -> bool {
        matches!(self, Question::Accuse(_))
    }

    pub const fn suggestion(&self) -> &Suggestion {
        match self {
            Question::Ask(suggestion) | Question::Accuse(suggestion) => suggestion,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> CardCatalog {
        CardCatalog::new(
            &["Mustard", "Plum"],
            &["Knife", "Rope"],
            &["Kitchen", "Library"],
        )
        .unwrap()
    }

    #[test]
    fn new_validates_slots() {
        let catalog = catalog();
        let err = Suggestion::new(&catalog, Card::weapon(0), Card::weapon(1), Card::room(0))
            .unwrap_err();
        assert_eq!(
            err,
            KnowledgeError::WrongCategory {
                card: Card::weapon(0),
                expected: Category::Figure,
            }
        );
        let err = Suggestion::new(&catalog, Card::figure(0), Card::weapon(1), Card::room(9))
            .unwrap_err();
        assert_eq!(err, KnowledgeError::UnknownCard(Card::room(9)));
    }

    #[test]
    fn cards_are_in_slot_order() {
        let catalog = catalog();
        let suggestion = Suggestion::from_names(&catalog, "Plum", "Rope", "Library").unwrap();
        assert_eq!(
            suggestion.cards(),
            [Card::figure(1), Card::weapon(1), Card::room(1)]
        );
        assert!(suggestion.contains(Card::weapon(1)));
        assert!(!suggestion.contains(Card::weapon(0)));
    }

    #[test]
    fn accusation_flag_follows_variant() {
        let catalog = catalog();
        let suggestion = Suggestion::from_names(&catalog, "Mustard", "Knife", "Kitchen").unwrap();
        assert!(!Question::Ask(suggestion).is_accusation());
        let accusation = Question::Accuse(suggestion);
        assert!(accusation.is_accusation());
        assert_eq!(accusation.suggestion(), &suggestion);
    }
}
