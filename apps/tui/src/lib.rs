// Library surface shared by the dashboard binary and its tests
pub mod chart;
pub mod config;
pub mod data;
pub mod domain;
pub mod error;
pub mod markup;
pub mod table;
pub mod views;

pub use domain::{Field, ALL_AREAS};
pub use error::{DataError, DataErrorKind};
