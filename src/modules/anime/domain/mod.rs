pub mod entities;

pub use entities::anime_record::{AnimeId, AnimeImage, AnimeRecord};
