pub mod config;
pub mod connection;
pub mod network;
pub mod unit;

pub use config::NetConfig;
pub use connection::Connection;
pub use network::{Layer, Network};
pub use unit::Unit;
