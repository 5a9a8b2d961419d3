//! Business logic services for the application layer.

pub mod mini_url_service;

pub use mini_url_service::MiniUrlService;
