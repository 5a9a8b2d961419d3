//! HTTP request handlers for API endpoints.

pub mod health;
pub mod mini_urls;

pub use health::health_handler;
pub use mini_urls::{
    create_mini_url_handler, delete_mini_url_handler, get_mini_url_handler,
    list_mini_urls_handler, update_mini_url_handler,
};
