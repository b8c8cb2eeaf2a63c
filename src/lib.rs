pub mod cards;
pub mod cli;
pub mod config;
pub mod db;
pub mod delete_flow;
pub mod error;
pub mod kpi;
pub mod logging;
pub mod models;
pub mod output;
pub mod session;
