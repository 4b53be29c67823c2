pub mod api_client;

pub use api_client::{decode_body, ApiClient};
