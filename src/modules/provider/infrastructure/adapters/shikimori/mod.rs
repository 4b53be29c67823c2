pub mod adapter;
pub mod mapper;
pub mod models;

pub use adapter::{page_url, ShikimoriAdapter};
pub use mapper::{RecordMapper, ShikimoriMapper};
