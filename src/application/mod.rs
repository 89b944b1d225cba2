//! Application layer - Use cases built on the domain model
//!
//! - Ports: interfaces to the model client, chapter source and renderer
//! - Services: instruction builder, validator, sequencer, extraction runs
//! - DTOs: run report shapes for the HTTP boundary

pub mod dto;
pub mod ports;
pub mod services;
