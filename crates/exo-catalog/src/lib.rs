//! Exoplanet catalog: records, dataset loading, grouping into star systems,
//! and the label/value rows shown when a planet is selected.

mod error;
mod grouping;
mod info;
mod loader;
mod record;

pub use error::CatalogError;
pub use grouping::{StarSystem, group_by_star};
pub use info::{InfoRow, PlanetInfo};
pub use loader::{DatasetSource, load_dataset, parse_dataset, read_dataset};
pub use record::{ExoplanetRecord, StarId};
