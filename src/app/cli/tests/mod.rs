//! Tests for the CLI module
//!
//! Argument parsing, settings resolution and TOML configuration handling.
