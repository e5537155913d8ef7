//! Common utilities for integration tests

pub mod test_helpers;

// Re-export commonly used items
pub use test_helpers::{
    assert_vectors_close,
    isocratic_setup,
    relative_error,
    three_species,
};
