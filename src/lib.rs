pub mod config;
pub mod db;
pub mod selector;
pub mod server;
pub mod telemetry;
pub mod transfer;

#[cfg(test)]
pub mod test_utils;
