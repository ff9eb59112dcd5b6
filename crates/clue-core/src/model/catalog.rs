use crate::error::KnowledgeError;
use crate::model::card::Card;
use crate::model::category::Category;
use std::collections::HashMap;

/// Fixed card universe of one game.
///
/// Built once from the figure, weapon and room name lists. Names are unique
/// across all three categories, so a name resolves to exactly one [`Card`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardCatalog {
    names: [Vec<String>; 3],
    lookup: HashMap<String, Card>,
}

impl CardCatalog {
    pub fn new<S: AsRef<str>>(
        figures: &[S],
        weapons: &[S],
        rooms: &[S],
    ) -> Result<Self, KnowledgeError> {
        let mut names: [Vec<String>; 3] = Default::default();
        let mut lookup = HashMap::new();
        for (category, list) in Category::ALL.into_iter().zip([figures, weapons, rooms]) {
            if list.is_empty() {
                return Err(KnowledgeError::EmptyCategory(category));
            }
            if list.len() > usize::from(u8::MAX) + 1 {
                return Err(KnowledgeError::CategoryOverflow {
                    category,
                    len: list.len(),
                });
            }
            for (index, raw) in list.iter().enumerate() {
                let name = raw.as_ref().trim();
                if name.is_empty() {
                    return Err(KnowledgeError::UnknownName(raw.as_ref().to_string()));
                }
                let card = Card::new(category, index as u8);
                if lookup.insert(name.to_string(), card).is_some() {
                    return Err(KnowledgeError::DuplicateName(name.to_string()));
                }
                names[category.index()].push(name.to_string());
            }
        }
        Ok(Self { names, lookup })
    }

    /// Resolves a card name.
    pub fn card(&self, name: &str) -> Result<Card, KnowledgeError> {
        self.lookup
            .get(name.trim())
            .copied()
            .ok_or_else(|| KnowledgeError::UnknownName(name.to_string()))
    }

    /// Resolves a card name and checks that it belongs to `category`.
    pub fn card_in(&self, name: &str, category: Category) -> Result<Card, KnowledgeError> {
        let card = self.card(name)?;
        if card.category != category {
            return Err(KnowledgeError::WrongCategory {
                card,
                expected: category,
            });
        }
        Ok(card)
    }

    pub fn name(&self, card: Card) -> Result<&str, KnowledgeError> {
        self.names[card.category.index()]
            .get(usize::from(card.index))
            .map(String::as_str)
            .ok_or(KnowledgeError::UnknownCard(card))
    }

    pub fn contains(&self, card: Card) -> bool {
        usize::from(card.index) < self.names[card.category.index()].len()
    }

    /// Returns `card` if it was issued by this catalog.
    pub fn require(&self, card: Card) -> Result<Card, KnowledgeError> {
        if self.contains(card) {
            Ok(card)
        } else {
            Err(KnowledgeError::UnknownCard(card))
        }
    }

    /// Like [`CardCatalog::require`], additionally enforcing the category.
    pub fn require_in(&self, card: Card, category: Category) -> Result<Card, KnowledgeError> {
        let card = self.require(card)?;
        if card.category != category {
            return Err(KnowledgeError::WrongCategory {
                card,
                expected: category,
            });
        }
        Ok(card)
    }

    pub fn len(&self, category: Category) -> usize {
        self.names[category.index()].len()
    }

    pub fn total(&self) -> usize {
        self.names.iter().map(Vec::len).sum()
    }

    pub fn cards(&self, category: Category) -> impl Iterator<Item = Card> + '_ {
        (0..self.names[category.index()].len()).map(move |index| Card::new(category, index as u8))
    }

    /// Every card of the universe, figures first, then weapons, then rooms.
    pub fn all_cards(&self) -> impl Iterator<Item = Card> + '_ {
        Category::ALL
            .into_iter()
            .flat_map(move |category| self.cards(category))
    }

    pub fn names(&self, category: Category) -> &[String] {
        &self.names[category.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small() -> CardCatalog {
        CardCatalog::new(
            &["Mustard", "Plum"],
            &["Knife", "Rope"],
            &["Kitchen", "Library"],
        )
        .expect("valid catalog")
    }

    #[test]
    fn resolves_names_both_ways() {
        let catalog = small();
        let rope = catalog.card("Rope").unwrap();
        assert_eq!(rope, Card::weapon(1));
        assert_eq!(catalog.name(rope).unwrap(), "Rope");
        assert_eq!(catalog.card(" Kitchen ").unwrap(), Card::room(0));
    }

    #[test]
    fn rejects_unknown_names_and_cards() {
        let catalog = small();
        assert_eq!(
            catalog.card("Candlestick"),
            Err(KnowledgeError::UnknownName("Candlestick".into()))
        );
        assert_eq!(
            catalog.require(Card::room(7)),
            Err(KnowledgeError::UnknownCard(Card::room(7)))
        );
        assert!(catalog.name(Card::figure(2)).is_err());
    }

    #[test]
    fn enforces_category() {
        let catalog = small();
        let err = catalog.card_in("Plum", Category::Room).unwrap_err();
        assert_eq!(
            err,
            KnowledgeError::WrongCategory {
                card: Card::figure(1),
                expected: Category::Room,
            }
        );
        assert!(catalog.require_in(Card::room(1), Category::Room).is_ok());
    }

    #[test]
    fn rejects_duplicates_across_categories() {
        let err = CardCatalog::new(&["Study"], &["Rope"], &["Study"]).unwrap_err();
        assert_eq!(err, KnowledgeError::DuplicateName("Study".into()));
    }

    #[test]
    fn rejects_empty_category() {
        let empty: [&str; 0] = [];
        let err = CardCatalog::new(&["Plum"], &empty, &["Hall"]).unwrap_err();
        assert_eq!(err, KnowledgeError::EmptyCategory(Category::Weapon));
    }

    #[test]
    fn iterates_universe_in_category_order() {
        let catalog = small();
        let all: Vec<_> = catalog.all_cards().collect();
        assert_eq!(all.len(), catalog.total());
        assert_eq!(all.first(), Some(&Card::figure(0)));
        assert_eq!(all.last(), Some(&Card::room(1)));
        assert_eq!(catalog.len(Category::Room), 2);
    }
}
