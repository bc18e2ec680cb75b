//! Property tests for the deck model and the probability aggregator.

use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use ws_sim::damage::resolve_damage_event;
use ws_sim::{cumulative_probability_at_least, DeckSetup, DeckState};

fn setup() -> impl Strategy<Value = DeckSetup> {
    (1u32..40, 0u32..30).prop_flat_map(|(deck, waiting)| {
        (0..=deck, 0..=waiting).prop_map(move |(deck_climax, waiting_climax)| {
            DeckSetup::new(deck, deck_climax).with_waiting_room(waiting, waiting_climax)
        })
    })
}

proptest! {
    #[test]
    fn cards_and_climaxes_are_conserved(setup in setup(), seed in any::<u64>(), draws in 0usize..200) {
        let config = setup.build().unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut state = DeckState::new(&config, &mut rng).unwrap();

        for _ in 0..draws {
            state.draw(&mut rng).unwrap();
            prop_assert_eq!(
                state.deck().len() + state.waiting_room().len(),
                config.total_cards() as usize
            );
            prop_assert_eq!(
                state.deck_climax_count() + state.waiting_room_climax_count(),
                config.total_climax_cards() as usize
            );
        }
    }

    #[test]
    fn at_most_one_refresh_per_draw(setup in setup(), seed in any::<u64>(), damage in 0u32..60) {
        let config = setup.build().unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut state = DeckState::new(&config, &mut rng).unwrap();

        let outcome = resolve_damage_event(damage, &mut state, &mut rng).unwrap();

        prop_assert!(outcome.refresh_penalty <= damage);
        prop_assert_eq!(outcome.dealt == 0 && damage > 0, outcome.cancelled);
        if let Some(position) = outcome.cancel_position {
            prop_assert!(position >= 1 && position <= damage);
        }
    }

    #[test]
    fn probability_is_non_increasing(damages in prop::collection::vec(0u32..30, 1..200)) {
        let probabilities = cumulative_probability_at_least(&damages, 0..=31).unwrap();

        let values: Vec<f64> = probabilities.values().copied().collect();
        prop_assert_eq!(values[0], 1.0);
        for pair in values.windows(2) {
            prop_assert!(pair[1] <= pair[0]);
        }
    }
}
