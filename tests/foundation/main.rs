//! Integration tests for Layer 0: Foundation
//!
//! Tests for machine generations, sections, and the error types.
