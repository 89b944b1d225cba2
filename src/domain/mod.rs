//! Domain layer - Core scene pack model with no I/O
//!
//! This layer contains:
//! - Entities: Scene, Character, Environment, ChapterResult, SequencedScene
//! - Value Objects: roles, environment types, scene identifiers, extraction settings

pub mod entities;
pub mod value_objects;
