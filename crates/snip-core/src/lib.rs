pub mod config;
pub mod logging;

// Short-link service
pub mod charset;
pub mod codec;
pub mod link_db;
pub mod obfuscator;
pub mod server;
pub mod shortener;

// Client side: encode requests and result presentation
pub mod client;
pub mod input;
pub mod presenter;
pub mod session;
