mod http_gateway_client;
mod mock_provider;
mod openai_client;

pub use http_gateway_client::*;
pub use mock_provider::*;
pub use openai_client::*;
