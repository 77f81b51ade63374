use axum::{Json, extract::State};
use tracing::{debug, warn};

use crate::db::{AppointmentRepository, DbAppointment};
use crate::middleware::{FormInput, QueryInput};
use crate::router::InfomedState;
use crate::types::appointment::{AppointmentForm, AppointmentList, AppointmentView};
use crate::types::{DeletedById, IdQuery};
use crate::InfomedError;

const SAVE_FAILED: &str = "Não foi possível salvar uma nova consulta médica.";
const UPDATE_FAILED: &str = "Não foi possível atualizar a Consulta Médica.";
const NOT_FOUND: &str = "Consulta Médica não encontrada.";
const REMOVED: &str = "Consulta Médica removida";

/// POST /add_consulta -> stores the appointment exactly as submitted.
pub async fn add_appointment(
    State(state): State<InfomedState>,
    FormInput(form): FormInput<AppointmentForm>,
) -> Result<Json<AppointmentView>, InfomedError> {
    let new = form.validate()?;
    debug!(doctor_name = %new.doctor_name, "adding appointment");

    let inserted: Result<DbAppointment, InfomedError> = async {
        let mut session = state.store.open_session().await?;
        session.insert_appointment(&new).await
    }
    .await;

    match inserted {
        Ok(row) => {
            debug!(doctor_name = %row.doctor_name, id = row.id, "appointment added");
            Ok(Json(row.into()))
        }
        Err(e) => {
            warn!(doctor_name = %new.doctor_name, error = %e, "failed to add appointment: {SAVE_FAILED}");
            Err(InfomedError::BadRequest(SAVE_FAILED.to_string()))
        }
    }
}

/// GET /get_consultas
pub async fn list_appointments(
    State(state): State<InfomedState>,
) -> Result<Json<AppointmentList>, InfomedError> {
    debug!("listing appointments");
    let rows: Vec<DbAppointment> = async {
        let mut session = state.store.open_session().await?;
        session.list_appointments().await
    }
    .await
    .inspect_err(|e| warn!(error = %e, "failed to list appointments"))?;

    debug!(count = rows.len(), "appointments found");
    Ok(Json(rows.into()))
}

/// GET /get_consulta
pub async fn get_appointment(
    State(state): State<InfomedState>,
    QueryInput(IdQuery { id }): QueryInput<IdQuery>,
) -> Result<Json<AppointmentView>, InfomedError> {
    debug!(id, "fetching appointment");
    let found: Option<DbAppointment> = async {
        let mut session = state.store.open_session().await?;
        session.get_appointment(id).await
    }
    .await
    .inspect_err(|e| warn!(id, error = %e, "failed to fetch appointment"))?;

    match found {
        Some(row) => Ok(Json(row.into())),
        None => {
            warn!(id, "failed to fetch appointment: {NOT_FOUND}");
            Err(InfomedError::NotFound(NOT_FOUND.to_string()))
        }
    }
}

/// PUT /update_consulta -> replaces all four fields of an existing appointment.
pub async fn update_appointment(
    State(state): State<InfomedState>,
    QueryInput(IdQuery { id }): QueryInput<IdQuery>,
    FormInput(form): FormInput<AppointmentForm>,
) -> Result<Json<AppointmentView>, InfomedError> {
    let fields = form.validate()?;
    debug!(id, "updating appointment");

    // Only the write itself is classified as a failed update.
    let mut session = state
        .store
        .open_session()
        .await
        .inspect_err(|e| warn!(id, error = %e, "failed to open session for appointment update"))?;

    match session.update_appointment(id, &fields).await {
        Ok(Some(row)) => {
            debug!(id, "appointment updated");
            Ok(Json(row.into()))
        }
        Ok(None) => {
            warn!(id, "failed to update appointment: {NOT_FOUND}");
            Err(InfomedError::NotFound(NOT_FOUND.to_string()))
        }
        Err(e) => {
            warn!(id, error = %e, "failed to update appointment: {UPDATE_FAILED}");
            Err(InfomedError::BadRequest(UPDATE_FAILED.to_string()))
        }
    }
}

/// DELETE /del_consulta_id
pub async fn delete_appointment(
    State(state): State<InfomedState>,
    QueryInput(IdQuery { id }): QueryInput<IdQuery>,
) -> Result<Json<DeletedById>, InfomedError> {
    debug!(id, "deleting appointment");

    let count: u64 = async {
        let mut session = state.store.open_session().await?;
        session.delete_appointment(id).await
    }
    .await
    .inspect_err(|e| warn!(id, error = %e, "failed to delete appointment"))?;

    if count == 0 {
        warn!(id, "failed to delete appointment: {NOT_FOUND}");
        return Err(InfomedError::NotFound(NOT_FOUND.to_string()));
    }

    debug!(id, "appointment deleted");
    Ok(Json(DeletedById {
        mensagem: REMOVED.to_string(),
        id,
    }))
}
