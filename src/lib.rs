pub mod configuration;
pub mod connectors;
pub mod console;
pub mod db;
pub mod forms;
pub mod helpers;
mod middleware;
pub mod models;
pub mod repository;
pub mod routes;
pub mod services;
pub mod startup;
pub mod telemetry;
pub mod views;
