pub mod config;
pub mod logging;

pub mod aggregate;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod file_id;
pub mod filter;
pub mod index;
pub mod report;
