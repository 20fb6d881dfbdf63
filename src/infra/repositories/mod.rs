//! Repository layer - Data access abstraction
//!
//! Repositories provide an abstraction over data persistence,
//! following the Repository pattern for clean separation of concerns.

pub(crate) mod entities;
mod sequence_repository;
mod user_repository;

pub use sequence_repository::{SequenceRepository, SequenceStore};
pub use user_repository::{UserRepository, UserStore};

#[cfg(test)]
pub use sequence_repository::MockSequenceRepository;
#[cfg(test)]
pub use user_repository::MockUserRepository;
