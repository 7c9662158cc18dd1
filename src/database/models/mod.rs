pub mod game;
pub mod genre;
pub mod platform;

pub use game::{Game, GameInput, GameWithGenreRow};
pub use genre::{Genre, GenreInput};
pub use platform::{Platform, PlatformInput};
