pub mod config;
pub mod logging;

pub mod checksum;
pub mod error;
pub mod fetch;
pub mod mapping;
pub mod report;
pub mod sheet;
pub mod storage;
