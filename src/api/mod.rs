//! HTTP handlers and route registration

pub mod urls;

pub use urls::UrlApi;
