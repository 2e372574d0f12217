//! Core logic for cram: session parameters, plan types and validation,
//! the structured-output schema, prompt construction, and the upstream
//! completion API client.
//!
//! This crate contains no HTTP-server code; the `cram-cli` crate wires
//! these pieces into the `cram` binary and its `/api/sessions` endpoint.

pub mod openai;
pub mod plan;
pub mod prompt;
pub mod service;
pub mod session;
