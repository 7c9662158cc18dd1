pub mod game_service;
pub mod genre_service;
pub mod platform_service;

pub use game_service::GameService;
pub use genre_service::GenreService;
pub use platform_service::PlatformService;
