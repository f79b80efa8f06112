#![doc = "The `taskgate` library crate."]
#![doc = ""]
#![doc = "A small task-tracking API: users register and log in, then manage tasks through"]
#![doc = "bearer-token protected routes. Users and tasks live in two whole-collection record"]
#![doc = "stores. The binary (`main.rs`) reads the configuration and wires everything into"]
#![doc = "an Actix server."]

pub mod auth;
pub mod boundary;
pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod store;

pub use crate::error::AppError;
