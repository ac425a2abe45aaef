//! Tests for scan reconstruction

pub mod segmenter_tests;
