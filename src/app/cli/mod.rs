//! Command line interface: arguments and configuration file

pub mod args;
pub mod config;

pub use args::{Args, Command};
pub use config::{ConfigError, ConfigResult};

#[cfg(test)]
mod tests;
