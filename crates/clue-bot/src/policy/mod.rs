use crate::bot::EngineError;
use clue_core::model::card::Card;
use clue_core::model::player::PlayerId;
use clue_core::model::question::{Question, Suggestion};

/// Interface the hosting game drives a computer player through.
///
/// Calls arrive one at a time in response to game events. Observation calls
/// only tighten what the player knows; decision calls read that knowledge.
pub trait Detective {
    /// Records a card dealt to this player. Called once per dealt card.
    fn set_own_card(&mut self, card: Card) -> Result<(), EngineError>;

    /// Movement phase: picks one of the rooms reachable this turn.
    fn next_room(&mut self, possible_rooms: &[Card]) -> Result<Card, EngineError>;

    /// Query phase: asks about the room the player currently stands in, or
    /// accuses once the solution is known.
    fn next_question(&mut self, position: Card) -> Result<Question, EngineError>;

    /// Another player asked this player; returns the card to reveal, if any.
    fn choose_card_to_show(&mut self, queried: &Suggestion) -> Result<Option<Card>, EngineError>;

    /// Own question answered: `showing_player` revealed `card`.
    fn see_card(&mut self, card: Card, showing_player: PlayerId) -> Result<(), EngineError>;

    /// Own question: `showing_player` could not reveal any queried card.
    fn see_no_card(&mut self, showing_player: PlayerId) -> Result<(), EngineError>;

    /// Own question: no player could reveal any queried card.
    fn see_no_card_from_nobody(&mut self) -> Result<(), EngineError>;

    /// Another player's question: `showing_player` revealed some card to
    /// `seeing_player`, hidden from this player.
    fn observe_card_shown(
        &mut self,
        showing_player: PlayerId,
        seeing_player: PlayerId,
        queried: &Suggestion,
    ) -> Result<(), EngineError>;

    /// Another player's question: `showing_player` could not reveal anything.
    fn observe_no_card_shown(
        &mut self,
        showing_player: PlayerId,
        seeing_player: PlayerId,
        queried: &Suggestion,
    ) -> Result<(), EngineError>;

    /// Another player's question went unanswered by everyone.
    fn observe_no_card_from_nobody(
        &mut self,
        _seeing_player: PlayerId,
        _queried: &Suggestion,
    ) -> Result<(), EngineError> {
        Ok(())
    }
}
