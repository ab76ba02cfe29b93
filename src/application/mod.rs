//! Application layer - Use cases orchestrating the domain
//!
//! This layer contains:
//! - Ports: traits for the character store and the inventory
//! - Services: minigame play coordination and character management
//! - DTOs: serializable request/response shapes for the transport layer

pub mod dto;
pub mod ports;
pub mod services;
