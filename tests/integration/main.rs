//! Cross-layer integration tests for pinmap
//!
//! Tests that whole machine descriptions flow from position codes through
//! allocation to bring-up records.
