//! Database module: models, schema and per-request sessions.
//!
//! Layout:
//! - `models.rs`: Rust structs mirroring DB rows, plus validated insert payloads
//! - `schema.rs`: SQL DDL for initializing the database
//! - `repository.rs`: operations a session exposes, per resource
//! - `sqlite.rs`: the store handle and its session type

pub mod models;
pub mod repository;
pub mod schema;
pub mod sqlite;

pub use models::{DbAppointment, DbMedication, NewAppointment, NewMedication};
pub use repository::{AppointmentRepository, MedicationRepository};
pub use sqlite::{Session, Store};
