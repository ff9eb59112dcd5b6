use clue_core::model::card::Card;
use clue_core::model::catalog::CardCatalog;
use clue_core::model::player::PlayerId;
use clue_core::model::question::Question;
use tracing::{Level, event};

fn label(catalog: &CardCatalog, card: Card) -> String {
    catalog
        .name(card)
        .map(str::to_string)
        .unwrap_or_else(|_| card.to_string())
}

pub(crate) fn log_seen_card(catalog: &CardCatalog, me: PlayerId, card: Card, changed: bool) {
    if !tracing::enabled!(Level::DEBUG) {
        return;
    }
    event!(
        target: "clue_bot::observe",
        Level::DEBUG,
        player = %me,
        card = %label(catalog, card),
        category = %card.category,
        changed,
        "see card"
    );
}

pub(crate) fn log_attribution(
    catalog: &CardCatalog,
    me: PlayerId,
    holder: PlayerId,
    card: Card,
    reason: &str,
) {
    if !tracing::enabled!(Level::DEBUG) {
        return;
    }
    event!(
        target: "clue_bot::observe",
        Level::DEBUG,
        player = %me,
        holder = %holder,
        card = %label(catalog, card),
        reason,
    );
}

pub(crate) fn log_elimination(catalog: &CardCatalog, me: PlayerId, card: Card, reason: &str) {
    if !tracing::enabled!(Level::INFO) {
        return;
    }
    event!(
        target: "clue_bot::eliminate",
        Level::INFO,
        player = %me,
        card = %label(catalog, card),
        category = %card.category,
        reason,
    );
}

pub(crate) fn log_question(
    catalog: &CardCatalog,
    me: PlayerId,
    question: &Question,
    remaining: [usize; 3],
) {
    if !tracing::enabled!(Level::INFO) {
        return;
    }
    let suggestion = question.suggestion();
    let cards = suggestion
        .cards()
        .iter()
        .map(|card| label(catalog, *card))
        .collect::<Vec<_>>()
        .join(",");
    event!(
        target: "clue_bot::decision",
        Level::INFO,
        player = %me,
        accusation = question.is_accusation(),
        cards = %cards,
        figures_left = remaining[0],
        weapons_left = remaining[1],
        rooms_left = remaining[2],
    );
}

pub(crate) fn log_room(
    catalog: &CardCatalog,
    me: PlayerId,
    options: usize,
    chosen: Card,
    reason: &str,
) {
    if !tracing::enabled!(Level::INFO) {
        return;
    }
    event!(
        target: "clue_bot::decision",
        Level::INFO,
        player = %me,
        options,
        chosen = %label(catalog, chosen),
        reason,
    );
}

pub(crate) fn log_show(catalog: &CardCatalog, me: PlayerId, matches: usize, shown: Option<Card>) {
    if !tracing::enabled!(Level::INFO) {
        return;
    }
    let shown = shown
        .map(|card| label(catalog, card))
        .unwrap_or_else(|| "none".to_string());
    event!(
        target: "clue_bot::decision",
        Level::INFO,
        player = %me,
        matches,
        shown = %shown,
    );
}
