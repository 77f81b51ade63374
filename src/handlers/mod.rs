pub mod appointment;
pub mod medication;
