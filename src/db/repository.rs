use std::future::Future;

use crate::db::models::{DbAppointment, DbMedication, NewAppointment, NewMedication};
use crate::error::InfomedError;

/// Medication persistence operations available inside one session.
pub trait MedicationRepository: Send {
    /// Insert a row and return it with its assigned id.
    /// A duplicate `medicine` surfaces as a unique-violation database error.
    fn insert_medication(
        &mut self,
        new: &NewMedication,
    ) -> impl Future<Output = Result<DbMedication, InfomedError>> + Send;

    fn list_medications(
        &mut self,
    ) -> impl Future<Output = Result<Vec<DbMedication>, InfomedError>> + Send;

    /// Case-insensitive substring match on `medicine`; the lowest id wins.
    fn find_medication_by_name(
        &mut self,
        fragment: &str,
    ) -> impl Future<Output = Result<Option<DbMedication>, InfomedError>> + Send;

    /// Exact-match delete. Returns the number of rows removed.
    fn delete_medication_by_name(
        &mut self,
        medicine: &str,
    ) -> impl Future<Output = Result<u64, InfomedError>> + Send;

    fn delete_medication_by_id(
        &mut self,
        id: i64,
    ) -> impl Future<Output = Result<u64, InfomedError>> + Send;
}

/// Appointment persistence operations available inside one session.
pub trait AppointmentRepository: Send {
    fn insert_appointment(
        &mut self,
        new: &NewAppointment,
    ) -> impl Future<Output = Result<DbAppointment, InfomedError>> + Send;

    fn list_appointments(
        &mut self,
    ) -> impl Future<Output = Result<Vec<DbAppointment>, InfomedError>> + Send;

    fn get_appointment(
        &mut self,
        id: i64,
    ) -> impl Future<Output = Result<Option<DbAppointment>, InfomedError>> + Send;

    /// Overwrite every mutable field. `None` when no row has this id.
    fn update_appointment(
        &mut self,
        id: i64,
        fields: &NewAppointment,
    ) -> impl Future<Output = Result<Option<DbAppointment>, InfomedError>> + Send;

    fn delete_appointment(
        &mut self,
        id: i64,
    ) -> impl Future<Output = Result<u64, InfomedError>> + Send;
}
