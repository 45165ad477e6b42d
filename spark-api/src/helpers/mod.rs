pub mod assistant;
pub mod database;
pub mod sample_data;
