pub mod add;
pub mod chart;
pub mod config;
pub mod days;
pub mod del;
pub mod init;
pub mod limit;
pub mod list;
pub mod log;
pub mod scan;
