pub mod api;
pub mod bestiary;
pub mod error;
pub mod filler;
pub mod importer;
pub mod model;
pub mod parser;
mod fdf;

pub use api::{fill, EncounterSheet};
pub use bestiary::Bestiary;
pub use error::EncounterError;
