//! Tests for the manifest module
