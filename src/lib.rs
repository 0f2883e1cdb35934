pub mod config;
pub mod logger;
pub mod post_list;
pub mod content;
pub mod http;
pub mod thumbnail;
pub mod download;
pub mod pipeline;
mod test_data;
