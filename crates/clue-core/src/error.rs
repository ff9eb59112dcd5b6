use crate::model::card::Card;
use crate::model::category::Category;
use crate::model::player::PlayerId;
use thiserror::Error;

/// Failures raised while building or updating deduction state.
///
/// Every variant is raised before the offending update is applied, so the
/// state that produced the error is left untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KnowledgeError {
    #[error("card {0} is not part of the card universe")]
    UnknownCard(Card),
    #[error("no card named {0:?} in the card universe")]
    UnknownName(String),
    #[error("card name {0:?} appears more than once in the card universe")]
    DuplicateName(String),
    #[error("{0} category has no cards")]
    EmptyCategory(Category),
    #[error("{category} category has {len} cards, at most 256 are supported")]
    CategoryOverflow { category: Category, len: usize },
    #[error("card {card} is not a {expected} card")]
    WrongCategory { card: Card, expected: Category },
    #[error("player {0} is not part of the roster")]
    UnknownPlayer(PlayerId),
    #[error("constraint conflict on {card}: {reason}")]
    ConstraintConflict { card: Card, reason: String },
    #[error("{category} candidates would become empty")]
    EmptyCandidates { category: Category },
    #[error("{category} candidates hold {len} cards, expected exactly one")]
    NotSingleton { category: Category, len: usize },
}

#[cfg(test)]
mod tests {
    use super::KnowledgeError;
    use crate::model::card::Card;
    use crate::model::category::Category;

    #[test]
    fn messages_name_the_card() {
        let err = KnowledgeError::WrongCategory {
            card: Card::figure(1),
            expected: Category::Room,
        };
        assert_eq!(err.to_string(), "card figure#1 is not a room card");

        let err = KnowledgeError::NotSingleton {
            category: Category::Weapon,
            len: 3,
        };
        assert!(err.to_string().contains("3 cards"));
    }
}
