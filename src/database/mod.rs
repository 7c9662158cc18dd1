pub mod connector;
pub mod models;
pub mod repository;

pub use connector::{Connector, DatabaseError};
pub use repository::{Repository, OBJECT_NOT_FOUND};
