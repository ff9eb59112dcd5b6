use clue_bot::{BeliefEngine, Detective, EngineFeatures};
use clue_core::game::{GameSetup, GameView};
use clue_core::model::card::Card;
use clue_core::model::catalog::CardCatalog;
use clue_core::model::category::Category;
use clue_core::model::player::PlayerId;
use clue_core::model::question::Suggestion;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

fn classic_game() -> GameSetup {
    let catalog = CardCatalog::new(
        &["Scarlet", "Mustard", "White", "Green", "Peacock", "Plum"],
        &["Candlestick", "Knife", "Pipe", "Revolver", "Rope", "Wrench"],
        &[
            "Kitchen", "Ballroom", "Conservatory", "Dining", "Billiard", "Library", "Lounge",
            "Hall", "Study",
        ],
    )
    .expect("classic universe");
    GameSetup::with_player_count(catalog, 4)
}

fn random_suggestion<R: Rng>(catalog: &CardCatalog, rng: &mut R) -> Suggestion {
    let pick = |category: Category, rng: &mut R| {
        let cards: Vec<Card> = catalog.cards(category).collect();
        *cards.choose(rng).expect("category has cards")
    };
    Suggestion {
        figure: pick(Category::Figure, rng),
        weapon: pick(Category::Weapon, rng),
        room: pick(Category::Room, rng),
    }
}

#[test]
fn candidate_sets_only_shrink_under_random_observations() {
    let game = classic_game();
    let catalog = game.catalog().clone();
    let universe: Vec<Card> = catalog.all_cards().collect();
    let players = game.players().to_vec();
    let mut rng = StdRng::seed_from_u64(2718);

    for round in 0..24u64 {
        let mut engine =
            BeliefEngine::attach_with_seed(&game, PlayerId(0), EngineFeatures::default(), round)
                .expect("attach");
        let mut dealt = universe.clone();
        dealt.shuffle(&mut rng);
        for card in dealt.iter().take(4) {
            let _ = engine.set_own_card(*card);
        }

        for _ in 0..60 {
            let before = engine.candidates().clone();
            let showing = *players[1..].choose(&mut rng).expect("opponents");
            let seeing = *players.choose(&mut rng).expect("players");
            let queried = random_suggestion(&catalog, &mut rng);
            let _ = match rng.gen_range(0..6) {
                0 => engine.see_card(*universe.choose(&mut rng).expect("cards"), showing),
                1 => engine.observe_card_shown(showing, seeing, &queried),
                2 => engine.observe_no_card_shown(showing, seeing, &queried),
                3 => engine
                    .next_question(queried.room)
                    .and_then(|_| engine.see_no_card(showing)),
                4 => engine.next_room(&[queried.room]).map(|_| ()),
                _ => engine.check_if_nobody_has_card().map(|_| ()),
            };

            for category in Category::ALL {
                let after = engine.candidates().get(category);
                assert!(
                    after.is_subset(before.get(category)),
                    "{category} candidates grew"
                );
            }
            for own in engine.own_cards() {
                assert!(!engine.candidates().contains(own));
            }
        }
    }
}
