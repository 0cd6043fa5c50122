pub mod geocode;
pub mod server;
