//! Belief engine: turns observed query outcomes into solution candidates and
//! picks moves, questions and reveals from them.

use super::choice::choose;
use super::error::EngineError;
use super::features::EngineFeatures;
use super::log::{
    log_attribution, log_elimination, log_question, log_room, log_seen_card, log_show,
};
use crate::policy::Detective;
use clue_core::KnowledgeError;
use clue_core::game::GameView;
use clue_core::knowledge::{CandidateSets, ConstraintTable, KnowledgeSnapshot};
use clue_core::model::card::Card;
use clue_core::model::catalog::CardCatalog;
use clue_core::model::category::Category;
use clue_core::model::player::PlayerId;
use clue_core::model::question::{Question, Suggestion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::BTreeSet;

/// Deduction state and decision logic of one computer player.
///
/// One engine per player, created once the card universe and roster are known
/// and kept for the whole game.
#[derive(Debug, Clone)]
pub struct BeliefEngine<R = StdRng> {
    me: PlayerId,
    catalog: CardCatalog,
    players: Vec<PlayerId>,
    candidates: CandidateSets,
    constraints: ConstraintTable,
    own: [BTreeSet<Card>; 3],
    current_question: Option<Question>,
    features: EngineFeatures,
    rng: R,
}

impl BeliefEngine<StdRng> {
    /// Attaches with an entropy-seeded random source and features read from
    /// the environment.
    pub fn attach_with_entropy<G: GameView + ?Sized>(
        game: &G,
        me: PlayerId,
    ) -> Result<Self, EngineError> {
        Self::attach(game, me, EngineFeatures::from_env(), StdRng::from_entropy())
    }

    pub fn attach_with_seed<G: GameView + ?Sized>(
        game: &G,
        me: PlayerId,
        features: EngineFeatures,
        seed: u64,
    ) -> Result<Self, EngineError> {
        Self::attach(game, me, features, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> BeliefEngine<R> {
    /// Builds the knowledge repository from the game reference: every card
    /// starts as a candidate and every player starts without constraints.
    pub fn attach<G: GameView + ?Sized>(
        game: &G,
        me: PlayerId,
        features: EngineFeatures,
        rng: R,
    ) -> Result<Self, EngineError> {
        let players = game.players().to_vec();
        if !players.contains(&me) {
            return Err(KnowledgeError::UnknownPlayer(me).into());
        }
        let catalog = game.catalog().clone();
        Ok(Self {
            me,
            candidates: CandidateSets::new(&catalog),
            constraints: ConstraintTable::new(&players),
            catalog,
            players,
            own: Default::default(),
            current_question: None,
            features,
            rng,
        })
    }

    pub fn me(&self) -> PlayerId {
        self.me
    }

    pub fn catalog(&self) -> &CardCatalog {
        &self.catalog
    }

    pub fn players(&self) -> &[PlayerId] {
        &self.players
    }

    pub fn candidates(&self) -> &CandidateSets {
        &self.candidates
    }

    pub fn constraints(&self) -> &ConstraintTable {
        &self.constraints
    }

    pub fn features(&self) -> EngineFeatures {
        self.features
    }

    /// Cards dealt to this player in `category`.
    pub fn own_cards_in(&self, category: Category) -> &BTreeSet<Card> {
        &self.own[category.index()]
    }

    pub fn own_cards(&self) -> BTreeSet<Card> {
        self.own.iter().flatten().copied().collect()
    }

    pub fn holds(&self, card: Card) -> bool {
        self.own[card.category.index()].contains(&card)
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.current_question.as_ref()
    }

    /// The solution triple once every candidate set is a singleton.
    pub fn solution(&self) -> Option<Suggestion> {
        self.candidates.solution()
    }

    pub fn snapshot(&self) -> Result<KnowledgeSnapshot, EngineError> {
        Ok(KnowledgeSnapshot::capture(
            &self.catalog,
            &self.candidates,
            &self.constraints,
        )?)
    }

    /// Rules `card` out as a solution candidate. A card that is no longer a
    /// candidate is ignored.
    pub fn note_seen_card(&mut self, card: Card) -> Result<bool, EngineError> {
        let card = self.catalog.require(card)?;
        let changed = self.candidates.discard(card)?;
        log_seen_card(&self.catalog, self.me, card, changed);
        Ok(changed)
    }

    /// Collapses a category onto any card every player is known to lack.
    ///
    /// Returns the cards collapsed onto. Running it again without new
    /// observations changes nothing.
    pub fn check_if_nobody_has_card(&mut self) -> Result<Vec<Card>, EngineError> {
        let eliminated = self.constraints.eliminated_cards(&self.catalog);
        let mut next = self.candidates.clone();
        let mut per_category: [Option<Card>; 3] = [None; 3];
        for &card in &eliminated {
            let slot = &mut per_category[card.category.index()];
            if let Some(previous) = *slot {
                return Err(KnowledgeError::ConstraintConflict {
                    card,
                    reason: format!(
                        "nobody holds it, but nobody holds {previous} either and only one {} is the solution",
                        card.category
                    ),
                }
                .into());
            }
            *slot = Some(card);
            if next.collapse_to(card)? {
                log_elimination(&self.catalog, self.me, card, "nobody_has_card");
            }
        }
        self.candidates = next;
        Ok(eliminated)
    }

    fn require_player(&self, player: PlayerId) -> Result<PlayerId, EngineError> {
        if self.constraints.contains_player(player) {
            Ok(player)
        } else {
            Err(KnowledgeError::UnknownPlayer(player).into())
        }
    }

    fn require_suggestion(&self, queried: &Suggestion) -> Result<Suggestion, EngineError> {
        Ok(Suggestion::new(
            &self.catalog,
            queried.figure,
            queried.weapon,
            queried.room,
        )?)
    }

    /// Fails when ruling `card` out would leave its category empty.
    fn ensure_discardable(&self, card: Card) -> Result<(), EngineError> {
        if self.candidates.contains(card) && self.candidates.is_singleton(card.category) {
            return Err(KnowledgeError::EmptyCandidates {
                category: card.category,
            }
            .into());
        }
        Ok(())
    }

    fn remaining(&self) -> [usize; 3] {
        Category::ALL.map(|category| self.candidates.len(category))
    }

    fn random_candidate(&mut self, category: Category) -> Result<Card, EngineError> {
        let options: Vec<Card> = self.candidates.get(category).iter().copied().collect();
        choose(&mut self.rng, &options, category.as_str())
    }
}

impl<R: Rng> Detective for BeliefEngine<R> {
    fn set_own_card(&mut self, card: Card) -> Result<(), EngineError> {
        let card = self.catalog.require(card)?;
        self.ensure_discardable(card)?;
        let mut held = self.own_cards();
        held.insert(card);
        self.constraints
            .set_exhaustive(self.me, &held, &self.catalog)?;
        self.own[card.category.index()].insert(card);
        self.note_seen_card(card)?;
        Ok(())
    }

    fn next_room(&mut self, possible_rooms: &[Card]) -> Result<Card, EngineError> {
        for &room in possible_rooms {
            self.catalog.require_in(room, Category::Room)?;
        }
        self.check_if_nobody_has_card()?;

        let unresolved: Vec<Card> = possible_rooms
            .iter()
            .copied()
            .filter(|room| self.candidates.contains(*room))
            .collect();
        let (options, reason) = if self.candidates.len(Category::Room) > 1 && !unresolved.is_empty()
        {
            (unresolved, "unknown_room")
        } else {
            let owned: Vec<Card> = possible_rooms
                .iter()
                .copied()
                .filter(|room| self.holds(*room))
                .collect();
            if owned.is_empty() {
                (possible_rooms.to_vec(), "any_room")
            } else {
                (owned, "own_room")
            }
        };

        let chosen = choose(&mut self.rng, &options, "room")?;
        if self.features.decision_details_enabled() {
            log_room(&self.catalog, self.me, possible_rooms.len(), chosen, reason);
        }
        Ok(chosen)
    }

    fn next_question(&mut self, position: Card) -> Result<Question, EngineError> {
        let position = self.catalog.require_in(position, Category::Room)?;
        let question = if let Some(solution) = self.candidates.solution() {
            let accusation = Suggestion {
                figure: self.candidates.take_single(Category::Figure)?,
                weapon: self.candidates.take_single(Category::Weapon)?,
                room: self.candidates.take_single(Category::Room)?,
            };
            debug_assert_eq!(accusation, solution);
            Question::Accuse(accusation)
        } else {
            Question::Ask(Suggestion {
                figure: self.random_candidate(Category::Figure)?,
                weapon: self.random_candidate(Category::Weapon)?,
                room: position,
            })
        };

        if self.features.decision_details_enabled() || question.is_accusation() {
            log_question(&self.catalog, self.me, &question, self.remaining());
        }
        self.current_question = Some(question);
        Ok(question)
    }

    fn choose_card_to_show(&mut self, queried: &Suggestion) -> Result<Option<Card>, EngineError> {
        let queried = self.require_suggestion(queried)?;
        let matches: Vec<Card> = queried
            .cards()
            .into_iter()
            .filter(|card| self.holds(*card))
            .collect();
        let shown = if matches.is_empty() {
            None
        } else {
            Some(choose(&mut self.rng, &matches, "card to show")?)
        };
        if self.features.decision_details_enabled() {
            log_show(&self.catalog, self.me, matches.len(), shown);
        }
        Ok(shown)
    }

    fn see_card(&mut self, card: Card, showing_player: PlayerId) -> Result<(), EngineError> {
        let card = self.catalog.require(card)?;
        let showing_player = self.require_player(showing_player)?;
        self.ensure_discardable(card)?;
        self.constraints.mark_has(showing_player, card)?;
        self.note_seen_card(card)?;
        Ok(())
    }

    fn see_no_card(&mut self, showing_player: PlayerId) -> Result<(), EngineError> {
        let question = self.current_question.ok_or(EngineError::NoCurrentQuestion)?;
        let showing_player = self.require_player(showing_player)?;
        self.constraints
            .mark_has_not_all(showing_player, &question.suggestion().cards())?;
        Ok(())
    }

    fn see_no_card_from_nobody(&mut self) -> Result<(), EngineError> {
        let question = self.current_question.ok_or(EngineError::NoCurrentQuestion)?;
        let suggestion = *question.suggestion();
        let mut next = self.candidates.clone();
        let mut collapsed = Vec::with_capacity(3);
        if next.collapse_to(suggestion.figure)? {
            collapsed.push(suggestion.figure);
        }
        if next.collapse_to(suggestion.weapon)? {
            collapsed.push(suggestion.weapon);
        }
        // Asking about a room we hold says nothing about the solution room.
        if !self.holds(suggestion.room) && next.collapse_to(suggestion.room)? {
            collapsed.push(suggestion.room);
        }
        self.candidates = next;
        for card in collapsed {
            log_elimination(&self.catalog, self.me, card, "nobody_answered_own_question");
        }
        Ok(())
    }

    fn observe_card_shown(
        &mut self,
        showing_player: PlayerId,
        seeing_player: PlayerId,
        queried: &Suggestion,
    ) -> Result<(), EngineError> {
        let showing_player = self.require_player(showing_player)?;
        self.require_player(seeing_player)?;
        let queried = self.require_suggestion(queried)?;
        if showing_player == self.me {
            return Ok(());
        }

        // Only attributes when all but one queried card are our own.
        let unknown: Vec<Card> = queried
            .cards()
            .into_iter()
            .filter(|card| !self.holds(*card))
            .collect();
        if let [card] = *unknown.as_slice() {
            log_attribution(&self.catalog, self.me, showing_player, card, "only_unowned_card");
            self.see_card(card, showing_player)?;
        }
        Ok(())
    }

    fn observe_no_card_shown(
        &mut self,
        showing_player: PlayerId,
        seeing_player: PlayerId,
        queried: &Suggestion,
    ) -> Result<(), EngineError> {
        let showing_player = self.require_player(showing_player)?;
        self.require_player(seeing_player)?;
        let queried = self.require_suggestion(queried)?;
        self.constraints
            .mark_has_not_all(showing_player, &queried.cards())?;
        Ok(())
    }

    fn observe_no_card_from_nobody(
        &mut self,
        seeing_player: PlayerId,
        queried: &Suggestion,
    ) -> Result<(), EngineError> {
        let seeing_player = self.require_player(seeing_player)?;
        let queried = self.require_suggestion(queried)?;
        if !self.features.observe_nobody_enabled() {
            return Ok(());
        }

        // The asker may hold the queried cards, so only the other players are
        // known to lack them; elimination does the rest once the asker's
        // holdings are pinned down.
        let mut next = self.constraints.clone();
        for &player in &self.players {
            if player != seeing_player {
                next.mark_has_not_all(player, &queried.cards())?;
            }
        }
        self.constraints = next;
        Ok(())
    }
}
