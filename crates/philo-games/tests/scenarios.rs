//! End-to-end activity runs through the runner with an in-memory store.

use std::sync::Arc;

use philo_core::{
    AppConfig, ContentStore, MemoryStore, ModuleKind, NotificationKind, Outcome, Session,
    SessionState, UnitId,
};
use philo_games::{Event, Field, Runner};

fn runner() -> (Runner, MemoryStore) {
    let config = AppConfig::default().with_seed(42);
    let store = MemoryStore::new();
    let session = Session::new(store.clone(), &config);
    let content = Arc::new(ContentStore::builtin().unwrap());
    (Runner::new(session, content, config), store)
}

fn achievements(r: &mut Runner) -> Vec<String> {
    r.session_mut()
        .drain_notifications()
        .into_iter()
        .filter(|n| n.kind == NotificationKind::Achievement)
        .map(|n| n.text)
        .collect()
}

#[test]
fn quiz_correct_then_expired() {
    let (mut r, store) = runner();
    r.launch(ModuleKind::Quiz).unwrap();

    r.dispatch(Event::Choose(0)).unwrap();
    assert_eq!(r.session().state().total_score, 70);
    assert_eq!(r.session().state().games_completed, 0);
    assert_eq!(achievements(&mut r), vec!["Accurate answer without hint"]);

    // Second item reports 90 at once, then 89 down to 1.
    for _ in 0..89 {
        r.on_second().unwrap();
    }
    assert_eq!(r.session().state().total_score, 70);
    r.on_second().unwrap();

    let state = r.session().state();
    assert_eq!(state.total_score, 80);
    assert_eq!(state.games_completed, 1);
    assert!(r.is_finished());
    assert_eq!(achievements(&mut r), vec!["Quiz completed"]);

    let persisted = SessionState::restore(&store.contents().unwrap()).unwrap();
    assert_eq!(persisted.total_score, 80);
    match &persisted.portfolio.entries()[0].outcome {
        Outcome::Quiz(q) => {
            assert_eq!(q.points, 80);
            assert_eq!(q.items[1].answer, None);
            assert!(!q.items[1].correct);
        }
        other => panic!("unexpected outcome {other:?}"),
    }
}

#[test]
fn dilemma_changed_decision() {
    let (mut r, _) = runner();
    r.launch(ModuleKind::Dilemma).unwrap();
    r.dispatch(Event::Choose(0)).unwrap();
    r.dispatch(Event::Continue).unwrap();
    r.dispatch(Event::Choose(2)).unwrap();
    r.dispatch(Event::Write {
        field: Field::Justification,
        text: "The reframing changed the stakes.".to_string(),
    })
    .unwrap();
    r.dispatch(Event::Submit).unwrap();

    let state = r.session().state();
    assert_eq!(state.total_score, 160);
    assert_eq!(state.achievements, 1);
    assert_eq!(state.games_completed, 1);
    assert_eq!(state.portfolio.len(), 1);
    let entry = &state.portfolio.entries()[0];
    assert_eq!(entry.unit, UnitId::I);
    match &entry.outcome {
        Outcome::Dilemma(d) => {
            assert_eq!(d.first, Some(0));
            assert_eq!(d.last, Some(2));
            assert!(d.changed);
        }
        other => panic!("unexpected outcome {other:?}"),
    }
    assert_eq!(achievements(&mut r), vec!["Critical openness"]);
}

#[test]
fn story_two_choices_and_ending() {
    let (mut r, _) = runner();
    r.launch(ModuleKind::Story).unwrap();
    r.dispatch(Event::Choose(1)).unwrap();
    r.dispatch(Event::Choose(0)).unwrap();
    r.dispatch(Event::Submit).unwrap();

    let state = r.session().state();
    assert_eq!(state.total_score, 130);
    assert_eq!(state.portfolio.len(), 1);
    match &state.portfolio.entries()[0].outcome {
        Outcome::Story(s) => assert_eq!(s.end, "context"),
        other => panic!("unexpected outcome {other:?}"),
    }
}

#[test]
fn relaunch_cancels_previous_countdown() {
    let (mut r, _) = runner();
    r.launch(ModuleKind::Quiz).unwrap();
    for _ in 0..85 {
        r.on_second().unwrap();
    }
    r.launch(ModuleKind::Flashcards).unwrap();
    for _ in 0..10 {
        r.on_second().unwrap();
    }
    // The quiz item would have expired by now.
    assert_eq!(r.session().state().total_score, 0);
    assert_eq!(r.active_kind(), Some(ModuleKind::Flashcards));
    assert_eq!(r.remaining(), Some(290));
}

#[test]
fn leaving_midway_keeps_points() {
    let (mut r, store) = runner();
    r.launch(ModuleKind::Story).unwrap();
    r.dispatch(Event::Choose(0)).unwrap();
    r.leave();
    assert_eq!(r.session().state().total_score, 15);
    assert_eq!(r.session().state().games_completed, 0);
    assert!(r.dispatch(Event::Choose(0)).is_err());

    let persisted = SessionState::restore(&store.contents().unwrap()).unwrap();
    assert_eq!(persisted.total_score, 15);
}

#[test]
fn unit_selection_changes_content() {
    let (mut r, _) = runner();
    r.session_mut().select_unit(UnitId::III);
    r.launch(ModuleKind::Story).unwrap();
    r.dispatch(Event::Choose(0)).unwrap();
    r.dispatch(Event::Submit).unwrap();
    let entry = &r.session().state().portfolio.entries()[0];
    assert_eq!(entry.unit, UnitId::III);
    match &entry.outcome {
        Outcome::Story(s) => {
            assert_eq!(s.id, "III-AI-Grades");
            assert_eq!(s.end, "hybrid");
        }
        other => panic!("unexpected outcome {other:?}"),
    }
}

#[test]
fn every_module_completes() {
    let (mut r, _) = runner();
    r.launch(ModuleKind::Reading).unwrap();
    r.dispatch(Event::Submit).unwrap();
    r.launch(ModuleKind::Dialogue).unwrap();
    r.dispatch(Event::Submit).unwrap();
    r.launch(ModuleKind::Flashcards).unwrap();
    r.dispatch(Event::Flip(0)).unwrap();
    r.dispatch(Event::Submit).unwrap();

    let state = r.session().state();
    assert_eq!(state.games_completed, 3);
    assert_eq!(state.total_score, 60 + 90 + 70);
    let modules: Vec<ModuleKind> = state
        .portfolio
        .entries()
        .iter()
        .filter_map(|e| e.module())
        .collect();
    assert_eq!(
        modules,
        vec![
            ModuleKind::Reading,
            ModuleKind::Dialogue,
            ModuleKind::Flashcards
        ]
    );
}
