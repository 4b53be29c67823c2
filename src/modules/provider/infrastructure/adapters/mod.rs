pub mod shikimori;

pub use shikimori::{page_url, ShikimoriAdapter};
