pub mod anime;
pub mod feed;
pub mod provider;
pub mod render;
