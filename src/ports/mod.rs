//! Ports (trait boundaries) for external dependencies.
//!
//! Following hexagonal architecture, these traits are owned by the domain and
//! implemented by adapters in the infrastructure layer.

pub mod repository;

pub use repository::QTableRepository;
