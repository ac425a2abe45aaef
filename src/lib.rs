pub mod app;
pub mod core;
pub mod manifest;
pub mod reconcile;
pub mod scan;
