pub mod card;
pub mod grid;

pub use card::{AnimeCard, Easing, FadeIn};
pub use grid::{GridFrame, GridLayout, GridRenderer, HtmlGridRenderer, TextGridRenderer};
