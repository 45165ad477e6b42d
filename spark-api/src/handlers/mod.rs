pub mod activities;
pub mod assistant;
pub mod customers;
pub mod emails;
pub mod functions;
pub mod insights;
pub mod notes;
pub mod pages;
pub mod settings;
