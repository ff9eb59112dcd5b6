use crate::error::KnowledgeError;
use crate::model::card::Card;
use crate::model::catalog::CardCatalog;
use crate::model::category::Category;
use crate::model::question::Suggestion;
use std::collections::BTreeSet;

/// Cards of each category that have not been ruled out as the solution.
///
/// Sets only ever shrink. Every mutation that would leave a category empty or
/// re-admit a ruled-out card is rejected without touching the sets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateSets {
    sets: [BTreeSet<Card>; 3],
}

impl CandidateSets {
    /// Starts every category from the full universe.
    pub fn new(catalog: &CardCatalog) -> Self {
        let sets: [BTreeSet<Card>; 3] = Category::ALL.map(|category| catalog.cards(category).collect());
        Self { sets }
    }

    pub fn get(&self, category: Category) -> &BTreeSet<Card> {
        &self.sets[category.index()]
    }

    pub fn figures(&self) -> &BTreeSet<Card> {
        self.get(Category::Figure)
    }

    pub fn weapons(&self) -> &BTreeSet<Card> {
        self.get(Category::Weapon)
    }

    pub fn rooms(&self) -> &BTreeSet<Card> {
        self.get(Category::Room)
    }

    pub fn len(&self, category: Category) -> usize {
        self.get(category).len()
    }

    pub fn contains(&self, card: Card) -> bool {
        self.get(card.category).contains(&card)
    }

    pub fn is_singleton(&self, category: Category) -> bool {
        self.len(category) == 1
    }

    /// Removes `card` from its category. Returns whether anything changed.
    pub fn discard(&mut self, card: Card) -> Result<bool, KnowledgeError> {
        let set = &mut self.sets[card.category.index()];
        if !set.contains(&card) {
            return Ok(false);
        }
        if set.len() == 1 {
            return Err(KnowledgeError::EmptyCandidates {
                category: card.category,
            });
        }
        set.remove(&card);
        Ok(true)
    }

    /// Narrows the category of `card` to that card alone.
    ///
    /// Fails when `card` was already ruled out, which covers collapsing onto a
    /// different existing singleton.
    pub fn collapse_to(&mut self, card: Card) -> Result<bool, KnowledgeError> {
        let set = &mut self.sets[card.category.index()];
        if !set.contains(&card) {
            let reason = match set.iter().next() {
                Some(other) if set.len() == 1 => {
                    format!("{} is already the only {} candidate", other, card.category)
                }
                _ => "card was already ruled out as a solution".to_string(),
            };
            return Err(KnowledgeError::ConstraintConflict { card, reason });
        }
        if set.len() == 1 {
            return Ok(false);
        }
        set.clear();
        set.insert(card);
        Ok(true)
    }

    /// Removes and returns the only candidate of `category`.
    pub fn take_single(&mut self, category: Category) -> Result<Card, KnowledgeError> {
        let set = &mut self.sets[category.index()];
        if set.len() != 1 {
            return Err(KnowledgeError::NotSingleton {
                category,
                len: set.len(),
            });
        }
        set.pop_first()
            .ok_or(KnowledgeError::EmptyCandidates { category })
    }

    /// The solution triple, once every category is down to one card.
    pub fn solution(&self) -> Option<Suggestion> {
        let single = |category: Category| {
            let set = self.get(category);
            if set.len() == 1 {
                set.first().copied()
            } else {
                None
            }
        };
        Some(Suggestion {
            figure: single(Category::Figure)?,
            weapon: single(Category::Weapon)?,
            room: single(Category::Room)?,
        })
    }

    pub fn total(&self) -> usize {
        self.sets.iter().map(BTreeSet::len).sum()
    }
}
