//! Application module

pub mod cli;
pub mod console;
pub mod desk;
pub mod display;
pub mod startup;
