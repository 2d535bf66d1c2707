//! Chatbot API service
//!
//! Wires the database pools, the embedding pipeline and the vector
//! collection into one [`container::ServiceContainer`] and serves the HTTP
//! surface on top of it.

pub mod api;
pub mod bootstrap;
pub mod config;
pub mod container;
pub mod openapi;
