//! End-to-end play through the selector and the overlay

use std::time::Duration;

use funzone::games::math::{MathWhiz, Operator, Problem};
use funzone::games::{ActiveGame, GameAction, GameId, GameSelector};
use funzone::sim::{Outcome, Phase, Session};
use funzone::ui::OverlayAction;
use funzone::{Catalog, ConfigError};

fn memory_cards(sel: &GameSelector) -> Vec<(String, bool)> {
    match sel.active() {
        Some(ActiveGame::Memory(s)) => s
            .round()
            .cards
            .iter()
            .map(|c| (c.symbol.clone(), c.face_up()))
            .collect(),
        other => panic!("expected memory, got {:?}", other.map(ActiveGame::id)),
    }
}

fn memory_misses(sel: &GameSelector) -> u32 {
    match sel.active() {
        Some(ActiveGame::Memory(s)) => s.round().misses,
        _ => 0,
    }
}

#[test]
fn math_seven_plus_two() {
    let problem = Problem {
        lhs: 7,
        rhs: 2,
        op: Operator::Plus,
        answer: 9,
        options: vec![12, 9, 6],
    };
    assert_eq!(problem.question(), "7 + 2 = ?");

    let mut s = Session::with_round(MathWhiz, 1, problem.clone());
    assert_eq!(
        s.act(9),
        Outcome::Scored {
            points: 10,
            next_round: true
        }
    );
    assert_eq!(s.score(), 10);

    for wrong in [6, 12] {
        let mut s = Session::with_round(MathWhiz, 1, problem.clone());
        assert_eq!(s.act(wrong), Outcome::Failed);
        assert_eq!(s.phase(), Phase::GameOver);
        assert_eq!(s.score(), 0);
    }
}

#[test]
fn memory_tenth_miss_ends_with_scaled_score() {
    let mut sel = GameSelector::new(Catalog::default(), 77);
    sel.select(GameId::Memory);

    // One pair first so the overlay has something to scale
    let cards = memory_cards(&sel);
    let twin = (1..cards.len()).find(|&i| cards[i].0 == cards[0].0).unwrap();
    sel.act(GameAction::Flip(0));
    sel.act(GameAction::Flip(twin));
    sel.advance(Duration::from_millis(500));
    assert_eq!(sel.status().unwrap().score, 1);

    while memory_misses(&sel) < 9 {
        let cards = memory_cards(&sel);
        let a = cards.iter().position(|c| !c.1).unwrap();
        let b = (0..cards.len())
            .find(|&i| !cards[i].1 && cards[i].0 != cards[a].0)
            .unwrap();
        sel.act(GameAction::Flip(a));
        assert_eq!(sel.act(GameAction::Flip(b)), Outcome::Pending);
        assert_eq!(sel.advance(Duration::from_millis(1000)), vec![Outcome::Pending]);
    }
    assert_eq!(sel.status().unwrap().phase, Phase::InProgress);

    let cards = memory_cards(&sel);
    let a = cards.iter().position(|c| !c.1).unwrap();
    let b = (0..cards.len())
        .find(|&i| !cards[i].1 && cards[i].0 != cards[a].0)
        .unwrap();
    sel.act(GameAction::Flip(a));
    sel.act(GameAction::Flip(b));
    assert_eq!(sel.advance(Duration::from_millis(1000)), vec![Outcome::Failed]);
    assert_eq!(memory_misses(&sel), 10);

    let overlay = sel.overlay().unwrap();
    assert_eq!(overlay.score_line(), "Final Score: 10");
    assert_eq!(sel.act(GameAction::Flip(a)), Outcome::Ignored);

    sel.apply_overlay(OverlayAction::Restart);
    assert_eq!(memory_misses(&sel), 0);
    assert!(memory_cards(&sel).iter().all(|c| !c.1));
}

#[test]
fn spelling_accepts_lowercase_mango() {
    let catalog = Catalog::from_json(r#"{"words": ["mango"]}"#).unwrap();
    let mut sel = GameSelector::new(catalog, 5);
    sel.select(GameId::Spell);

    let json: serde_json::Value = serde_json::from_str(&sel.snapshot_json().unwrap()).unwrap();
    let mut scrambled: Vec<char> = json["round"]["scrambled"].as_str().unwrap().chars().collect();
    scrambled.sort_unstable();
    assert_eq!(scrambled, vec!['A', 'G', 'M', 'N', 'O']);

    assert!(matches!(
        sel.act(GameAction::Submit("mango".into())),
        Outcome::Scored { points: 10, .. }
    ));
    assert_eq!(sel.advance(Duration::from_secs(1)), vec![Outcome::NextRound]);
    assert_eq!(sel.status().unwrap().score, 10);
}

#[test]
fn emoji_pop_countdown_keeps_tap_count() {
    let mut sel = GameSelector::new(Catalog::default(), 12);
    sel.select(GameId::Pop);
    for _ in 0..4 {
        sel.act(GameAction::Pop);
    }
    let mut fired = Vec::new();
    for _ in 0..30 {
        fired.extend(sel.advance(Duration::from_secs(1)));
    }
    assert_eq!(fired.len(), 30);
    assert_eq!(fired.last(), Some(&Outcome::Failed));

    let status = sel.status().unwrap();
    assert_eq!(status.phase, Phase::GameOver);
    assert_eq!(status.score, 4);
    assert_eq!(sel.overlay().unwrap().final_score, 4);
}

#[test]
fn switching_games_never_leaks_state() {
    let mut sel = GameSelector::new(Catalog::default(), 3);
    sel.select(GameId::Pop);
    sel.act(GameAction::Pop);
    sel.select(GameId::Count);
    assert_eq!(sel.active_id(), Some(GameId::Count));
    assert_eq!(sel.status().unwrap().score, 0);
    // The Pop countdown went with its session
    assert!(sel.advance(Duration::from_secs(60)).is_empty());
}

#[test]
fn bad_catalog_rejected() {
    assert!(matches!(
        Catalog::from_json(r#"{"words": []}"#),
        Err(ConfigError::Empty { field: "words" })
    ));
    assert!(matches!(
        Catalog::from_json(r##"{"trail_palette": ["#12345"]}"##),
        Err(ConfigError::BadColor(_))
    ));
}
