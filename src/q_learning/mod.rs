//! Tabular Q-learning
//!
//! The agent keeps one value per (board state, move) pair and improves it
//! after each of its moves with the off-policy TD update
//!
//! ```text
//! Q(s,a) ← Q(s,a) + α[r + γ max_a' Q(s',a') - Q(s,a)]
//! ```
//!
//! where `s'` is the state the agent faces on its next turn. Moves are
//! chosen ε-greedily and ε decays after every move down to a floor.
//!
//! ## Usage Example
//!
//! ```no_run
//! use minicheckers::adapters::MsgPackRepository;
//! use minicheckers::checkers::Board;
//! use minicheckers::config::EngineConfig;
//! use minicheckers::q_learning::QLearningAgent;
//!
//! let mut agent = QLearningAgent::open(
//!     &EngineConfig::default().with_seed(42),
//!     MsgPackRepository::new(),
//!     "q_table.msgpack",
//! );
//!
//! let state = Board::initial().state_key();
//! let actions = agent.legal_actions(&state);
//! let action = agent.choose_action(&state, &actions);
//! assert!(action.is_some());
//! agent.decay_epsilon();
//! agent.persist()?;
//! # Ok::<(), minicheckers::Error>(())
//! ```

pub mod agent;
pub mod q_table;
pub mod serialization;

// Public re-exports
pub use agent::QLearningAgent;
pub use q_table::QTable;
pub use serialization::{QEntry, SavedQTable};
