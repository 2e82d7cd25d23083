#![doc = "The `taskboard` library crate."]
#![doc = ""]
#![doc = "Contains the authentication flow (signup, login, password reset/change, JWT"]
#![doc = "middleware), the kanban domain models (users, projects, tasks), the HTTP"]
#![doc = "route handlers, configuration, and error handling. The binary (`main.rs`)"]
#![doc = "uses it to construct and run the server."]

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
