//! Tests for the collaborator-facing level service

use qoxo::Error;
use qoxo::adapters::InMemoryRepository;
use qoxo::app::{AgentParams, App, LevelsConfig, LevelService};
use qoxo::tictactoe::{Board, Player};

fn make_service(repo: InMemoryRepository) -> LevelService {
    let app = App::for_testing()
        .with_repository(repo)
        .with_default_seed(42)
        .build();
    let levels = LevelsConfig::new()
        .with_level("easy", "models/easy.json")
        .with_level("medium", "models/medium.json")
        .with_level("hard", "models/hard.json");

    LevelService::new(app, levels, AgentParams::new(), "easy")
        .expect("service construction should succeed")
}

#[test]
fn test_unknown_level_selection_fails() {
    let service = make_service(InMemoryRepository::new());

    let result = service.select_level("nightmare");
    assert!(matches!(result, Err(Error::UnknownLevel { .. })));

    // The active level is untouched by the failed switch
    assert_eq!(service.status().level, "easy");
}

#[test]
fn test_train_to_target_is_idempotent_and_persists() {
    let repo = InMemoryRepository::new();
    let service = make_service(repo.clone());

    let outcome = service.train_to_target(100).expect("training should succeed");
    assert_eq!(outcome.episodes_run, 100);
    assert_eq!(outcome.total_episodes, 100);
    assert_eq!(repo.count(), 1, "training must persist the artifact");

    // At or below the current total: nothing runs
    for target in [100, 50, 0] {
        let outcome = service.train_to_target(target).expect("no-op should succeed");
        assert_eq!(outcome.episodes_run, 0);
        assert_eq!(outcome.total_episodes, 100);
    }

    // A higher target runs only the difference
    let outcome = service.train_to_target(150).expect("training should succeed");
    assert_eq!(outcome.episodes_run, 50);
    assert_eq!(outcome.total_episodes, 150);
}

#[test]
fn test_level_switch_reloads_wholesale() {
    let repo = InMemoryRepository::new();
    let service = make_service(repo.clone());

    service.train_to_target(80).expect("training should succeed");
    let easy_states = service.status().known_states;
    assert!(easy_states > 0);

    // A fresh level starts empty; nothing leaks across
    service.select_level("hard").expect("switch should succeed");
    let status = service.status();
    assert_eq!(status.level, "hard");
    assert_eq!(status.total_episodes, 0);
    assert_eq!(status.known_states, 0);
    assert!(!status.model_loaded);

    // Returning to the trained level restores its table from the artifact
    service.select_level("easy").expect("switch should succeed");
    let status = service.status();
    assert_eq!(status.total_episodes, 80);
    assert_eq!(status.known_states, easy_states);
    assert!(status.model_loaded);
}

#[test]
fn test_suggest_move_returns_a_legal_move() {
    let service = make_service(InMemoryRepository::new());
    service.train_to_target(200).expect("training should succeed");

    let board = Board::from_string("X...O....").expect("valid board");
    let position = service
        .suggest_move(&board, Player::X)
        .expect("inference should succeed");

    assert!(board.available_moves().contains(&position));
}

#[test]
fn test_suggest_move_rejects_decided_boards() {
    let service = make_service(InMemoryRepository::new());

    let won = Board::from_string("XXX.OO...").expect("valid board");
    assert!(matches!(
        service.suggest_move(&won, Player::O),
        Err(Error::GameOver)
    ));

    let drawn = Board::from_string("XOXXOOOXX").expect("valid board");
    assert!(matches!(
        service.suggest_move(&drawn, Player::X),
        Err(Error::GameOver)
    ));
}

#[test]
fn test_suggest_move_rejects_wrong_side() {
    let service = make_service(InMemoryRepository::new());

    // Equal piece counts: it is X's turn
    let board = Board::new();
    assert!(matches!(
        service.suggest_move(&board, Player::O),
        Err(Error::WrongSideToMove { .. })
    ));

    // X ahead by one: it is O's turn
    let board = Board::from_string("X........").expect("valid board");
    assert!(matches!(
        service.suggest_move(&board, Player::X),
        Err(Error::WrongSideToMove { .. })
    ));
}

#[test]
fn test_status_reports_level_and_counts() {
    let service = make_service(InMemoryRepository::new());

    let status = service.status();
    assert_eq!(status.level, "easy");
    assert_eq!(status.total_episodes, 0);
    assert_eq!(status.known_states, 0);
    assert!(!status.model_loaded);

    service.train_to_target(25).expect("training should succeed");

    let status = service.status();
    assert_eq!(status.total_episodes, 25);
    assert!(status.known_states > 0);
    assert!(status.model_loaded);

    let mut names = service.level_names();
    names.sort();
    assert_eq!(names, vec!["easy", "hard", "medium"]);
}
