use clue_core::KnowledgeError;
use clue_core::knowledge::CandidateSets;
use clue_core::model::catalog::CardCatalog;
use clue_core::model::category::Category;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

fn classic_catalog() -> CardCatalog {
    CardCatalog::new(
        &["Scarlet", "Mustard", "White", "Green", "Peacock", "Plum"],
        &["Candlestick", "Knife", "Pipe", "Revolver", "Rope", "Wrench"],
        &[
            "Kitchen", "Ballroom", "Conservatory", "Dining", "Billiard", "Library", "Lounge",
            "Hall", "Study",
        ],
    )
    .expect("classic universe")
}

#[test]
fn random_updates_never_grow_candidate_sets() {
    let catalog = classic_catalog();
    let universe: Vec<_> = catalog.all_cards().collect();
    let mut rng = SmallRng::seed_from_u64(7);

    for _ in 0..64 {
        let mut sets = CandidateSets::new(&catalog);
        for _ in 0..40 {
            let before = sets.clone();
            let card = *universe.choose(&mut rng).expect("non-empty universe");
            let result = if rng.gen_bool(0.8) {
                sets.discard(card)
            } else {
                sets.collapse_to(card)
            };
            if result.is_err() {
                assert_eq!(sets, before, "failed update must leave sets untouched");
            }
            for category in Category::ALL {
                assert!(sets.get(category).is_subset(before.get(category)));
                assert!(!sets.get(category).is_empty());
            }
        }
    }
}

#[test]
fn discarding_every_card_stops_at_the_last_one() {
    let catalog = classic_catalog();
    let mut sets = CandidateSets::new(&catalog);
    let weapons: Vec<_> = catalog.cards(Category::Weapon).collect();
    let (last, rest) = weapons.split_last().expect("weapons exist");
    for card in rest {
        sets.discard(*card).expect("other weapons remain");
    }
    assert_eq!(
        sets.discard(*last),
        Err(KnowledgeError::EmptyCandidates {
            category: Category::Weapon
        })
    );
    assert!(sets.is_singleton(Category::Weapon));
}
