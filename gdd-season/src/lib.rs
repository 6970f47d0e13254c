pub mod dataset;
pub mod date_range;
pub mod error;
pub mod season;
pub mod service;
pub mod threshold;
