pub mod cli;
pub mod dataset;
