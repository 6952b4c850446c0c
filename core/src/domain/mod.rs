//! Domain entities and value objects

pub mod entities;
pub mod value_objects;

pub use entities::*;
pub use value_objects::*;
