pub mod mac;
pub mod ports;
pub mod subnet;
