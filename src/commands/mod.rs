pub mod add;
pub mod agenda;
pub mod config;
pub mod day;
pub mod delete;
pub mod month;
