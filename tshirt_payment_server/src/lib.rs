//! # T-shirt payment server
//! This crate hosts the HTTP server for the T-shirt store. It is responsible for:
//! Issuing signed payment forms for the gateway's hosted payment page.
//! Receiving the gateway's payment callbacks and handing them to the verification pipeline in the engine.
//! Translating the verdict into an HTTP response.
//!
//! ## Configuration
//! The server is configured via environment variables. See [config](config/index.html) for more information.
//!
//! ## Routes
//! The server exposes the following routes:
//! * `/health`: A health check route that returns a 200 OK response.
//! * `GET /form/buy/`: Returns the signed fields of a fresh payment form.
//! * `GET /form/thanks/`, `POST /form/thanks/`: The payment callback receiver.

pub mod cli;
pub mod config;
pub mod data_objects;
pub mod errors;

pub mod helpers;
pub mod routes;
pub mod server;

#[cfg(test)]
mod endpoint_tests;
