//! Subcommands of the `minicheckers` binary

pub mod export;
pub mod inspect;
pub mod play;
