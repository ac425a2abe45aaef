//! Flight manifests
//!
//! A manifest is the ordered list of flights for a working period, each with
//! the bag tags expected on it. It is loaded once per session (or on an
//! explicit reload) and read-only afterwards.

pub mod cache;
pub mod error;
pub mod flight;
pub mod loader;
pub mod status;
pub mod store;

pub use cache::{CachedPayload, ManifestCache};
pub use error::{ManifestError, ManifestResult};
pub use flight::{Flight, FlightKey};
pub use loader::{
    load_manifest, parse_manifest, LoaderOptions, ManifestFormat, ManifestLoad, ManifestSource,
};
pub use status::ManifestStatus;
pub use store::ManifestStore;

#[cfg(test)]
mod tests;
