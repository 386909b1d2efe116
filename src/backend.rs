pub mod rest;

pub use rest::Server;
