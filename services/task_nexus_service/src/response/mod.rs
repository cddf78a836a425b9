pub mod problem;
pub mod yaml;
