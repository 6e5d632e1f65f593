mod common;

use common::*;
use hangman_core::{GuessOutcome, Letter, MAX_WRONG_GUESSES, Round, ScoringEngine, TickOutcome};
use hangman_types::{GameError, RoundStatus};
use proptest::prelude::*;

#[test]
fn test_every_category_starts_on_its_own_word() {
    let catalog = create_test_catalog();
    let mut rng = create_test_rng(11);

    for category in ["Pets", "Colors"] {
        for _ in 0..25 {
            let round = Round::start(&catalog, category, &mut rng).unwrap();
            assert_eq!(round.status(), RoundStatus::InProgress);
            assert!(
                catalog
                    .words(category)
                    .unwrap()
                    .iter()
                    .any(|w| w == round.target_word())
            );
        }
    }
}

#[test]
fn test_invalid_category_creates_no_round() {
    let mut session = create_test_session();
    let mut rng = create_test_rng(11);

    for category in ["Nothing", "Planets", ""] {
        let result = session.start_round(category, &mut rng);
        assert!(matches!(result, Err(GameError::InvalidCategory { .. })));
    }

    assert!(session.current_round().is_none());
    assert_eq!(session.status(), RoundStatus::NotStarted);
}

#[test]
fn test_score_formula_at_win() {
    for (misses, ticks) in [(0usize, 5u32), (1, 0), (3, 30), (5, 89)] {
        let mut round = Round::with_word("Pets", "CAT");
        for miss in misses_for("CAT").into_iter().take(misses) {
            round.guess_letter(miss);
        }
        for _ in 0..ticks {
            round.tick();
        }

        let outcomes = guess_all(&mut round, "CAT");
        let expected = (MAX_WRONG_GUESSES - misses as u32) * 100 + (90 - ticks) * 10;

        assert_eq!(outcomes.last(), Some(&GuessOutcome::Won { score: expected }));
        assert_eq!(
            round.score(),
            Some(ScoringEngine::round_score(misses as u32, 90 - ticks))
        );
    }
}

#[test]
fn test_cat_example_scores_1450() {
    let mut round = Round::with_word("Pets", "CAT");
    for _ in 0..5 {
        round.tick();
    }

    let outcomes = guess_all(&mut round, "CAT");
    assert_eq!(
        outcomes,
        vec![
            GuessOutcome::Correct,
            GuessOutcome::Correct,
            GuessOutcome::Won { score: 1450 }
        ]
    );
}

#[test]
fn test_loss_exactly_on_sixth_miss() {
    let mut round = Round::with_word("Colors", "BLUE");
    let misses = misses_for("BLUE");

    for (i, miss) in misses.iter().take(5).enumerate() {
        assert_eq!(round.guess_letter(*miss), GuessOutcome::Incorrect);
        assert_eq!(round.wrong_guess_count(), i as u32 + 1);
    }
    assert_eq!(round.status(), RoundStatus::InProgress);

    assert_eq!(round.guess_letter(misses[5]), GuessOutcome::Lost);
    assert_eq!(round.status(), RoundStatus::Lost);

    assert_eq!(round.guess_letter(misses[6]), GuessOutcome::Ignored);
    assert_eq!(round.wrong_guess_count(), MAX_WRONG_GUESSES);
}

#[test]
fn test_correct_guesses_interleaved_with_misses_do_not_lose_early() {
    let mut round = Round::with_word("Pets", "HAMSTER");
    let misses = misses_for("HAMSTER");

    for (miss, hit) in misses.iter().take(5).zip("HAMST".chars()) {
        round.guess_letter(*miss);
        round.guess_letter(letter(hit));
    }

    assert_eq!(round.status(), RoundStatus::InProgress);
    assert_eq!(round.wrong_guess_count(), 5);
    assert_eq!(round.guess_letter(letter('E')), GuessOutcome::Correct);
    assert!(matches!(round.guess_letter(letter('R')), GuessOutcome::Won { score: 1000 }));
}

#[test]
fn test_timer_boundary() {
    let mut round = Round::with_word("Pets", "DOG");
    for _ in 0..89 {
        round.tick();
    }
    assert_eq!(round.remaining_seconds(), 1);
    assert_eq!(round.status(), RoundStatus::InProgress);

    assert_eq!(round.tick(), TickOutcome::TimedOut);
    assert_eq!(round.remaining_seconds(), 0);
    assert_eq!(round.status(), RoundStatus::TimedOut);

    for _ in 0..3 {
        assert_eq!(round.tick(), TickOutcome::Ignored);
    }
    assert_eq!(round.remaining_seconds(), 0);
}

#[test]
fn test_timed_out_round_rejects_guesses() {
    let mut round = Round::with_word("Pets", "DOG");
    run_clock_out(&mut round);

    assert_eq!(guess_all(&mut round, "DOG"), vec![GuessOutcome::Ignored; 3]);
    assert!(round.guessed_letters().is_empty());
    assert_eq!(round.score(), None);
}

prop_compose! {
    fn arbitrary_letters(max_len: usize)(
        chars in prop::collection::vec(prop::char::range('A', 'Z'), 0..max_len)
    ) -> Vec<Letter> {
        chars.into_iter().map(letter).collect()
    }
}

proptest! {
    #[test]
    fn guessed_letters_only_grow(letters in arbitrary_letters(40)) {
        let mut round = Round::with_word("Pets", "HAMSTER");
        let mut previous = 0;

        for l in letters {
            round.guess_letter(l);
            let now = round.guessed_letters().len();
            prop_assert!(now >= previous);
            previous = now;
        }
    }

    #[test]
    fn repeated_guess_matches_single_guess(letters in arbitrary_letters(12)) {
        let mut once = Round::with_word("Colors", "GREEN");
        let mut twice = Round::with_word("Colors", "GREEN");

        for l in letters {
            once.guess_letter(l);
            twice.guess_letter(l);
            prop_assert_eq!(twice.guess_letter(l), GuessOutcome::Ignored);
            prop_assert_eq!(&once, &twice);
        }
    }

    #[test]
    fn finished_round_is_frozen(letters in arbitrary_letters(40), ticks in 0u32..120) {
        let mut round = Round::with_word("Pets", "HAMSTER");
        for _ in 0..ticks {
            round.tick();
        }

        for l in letters {
            let before = round.clone();
            let outcome = round.guess_letter(l);

            prop_assert!(round.wrong_guess_count() <= MAX_WRONG_GUESSES);
            if before.is_finished() {
                prop_assert_eq!(outcome, GuessOutcome::Ignored);
                prop_assert_eq!(&round, &before);
            }
        }
    }
}
