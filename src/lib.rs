#![doc = "The `tasknest` library crate."]
#![doc = ""]
#![doc = "This crate contains the domain models, authentication mechanisms, the"]
#![doc = "ownership-scoped persistence layer, routing configuration, and error"]
#![doc = "handling for the TaskNest service. It is used by the main binary"]
#![doc = "(`main.rs`) to construct and run the application."]

pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod store;
