//! Domain layer for the trip map
//!
//! Contains the map's value objects, entities, the click cycle state machine,
//! input validation, and domain errors. This layer performs no I/O and defines
//! the ubiquitous language shared by the other crates.

pub mod click_cycle;
pub mod commands;
pub mod entities;
pub mod errors;
pub mod validation;
pub mod value_objects;

pub use click_cycle::{ClickAction, ClickCycle};
pub use commands::MapCommand;
pub use entities::*;
pub use errors::DomainError;
pub use validation::{Axis, parse_coordinate, parse_point, parse_time};
pub use value_objects::*;
