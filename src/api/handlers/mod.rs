//! HTTP request handlers.
//!
//! Handlers are thin: they extract input, call a service, and shape the
//! response. All failures are returned as [`crate::error::AppError`].

pub mod health;
pub mod hello;
pub mod index;
pub mod redirect;
pub mod shorten;

pub use health::health_handler;
pub use hello::hello_handler;
pub use index::index_handler;
pub use redirect::redirect_handler;
pub use shorten::shorten_handler;
