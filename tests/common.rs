//! Shared helpers for the integration tests.

#![allow(dead_code)]

use minicheckers::{
    Board, EngineConfig, QLearningAgent, SessionConfig, adapters::InMemoryRepository,
    game::GameSession,
};

pub const TABLE_PATH: &str = "q_table.msgpack";

/// Board from the compact row notation, e.g. `"A.../.H../..../...."`.
pub fn board(rows: &str) -> Board {
    Board::parse(rows).expect("valid board literal")
}

/// Greedy, seeded engine settings.
pub fn greedy_engine() -> EngineConfig {
    EngineConfig::default().with_epsilon(0.0).with_seed(7)
}

pub fn agent_with(config: &EngineConfig, repo: &InMemoryRepository) -> QLearningAgent {
    QLearningAgent::new(config, repo.clone(), TABLE_PATH)
}

pub fn session_from(board: Board, engine: &EngineConfig, repo: &InMemoryRepository) -> GameSession {
    GameSession::from_position(agent_with(engine, repo), SessionConfig::default(), board)
}
