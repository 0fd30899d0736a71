//! In-process storage for development and tests

mod memory;

pub use memory::InMemoryRepositoryProvider;
