pub mod add;
pub mod config;
pub mod del;
pub mod history;
pub mod journal;
pub mod log;
pub mod report;
pub mod scan;
