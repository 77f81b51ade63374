use axum::{Json, extract::State};
use tracing::{debug, warn};

use crate::db::{DbMedication, MedicationRepository};
use crate::middleware::{FormInput, QueryInput};
use crate::router::InfomedState;
use crate::types::medication::{
    MedicationDeletedByName, MedicationForm, MedicationList, MedicationNameQuery, MedicationView,
};
use crate::types::{DeletedById, IdQuery};
use crate::InfomedError;

const DUPLICATE: &str = "Um medicamento com o mesmo nome já existe.";
const SAVE_FAILED: &str = "Não foi possível salvar um novo medicamento.";
const NOT_FOUND: &str = "Medicamento não encontrado.";
const REMOVED: &str = "Medicamento removido";

/// POST /add_medicamento -> stores a medication under its title-cased name.
pub async fn add_medication(
    State(state): State<InfomedState>,
    FormInput(form): FormInput<MedicationForm>,
) -> Result<Json<MedicationView>, InfomedError> {
    let new = form.validate()?;
    debug!(medicine = %new.medicine, "adding medication");

    // Session acquisition counts as part of the save.
    let inserted: Result<DbMedication, InfomedError> = async {
        let mut session = state.store.open_session().await?;
        session.insert_medication(&new).await
    }
    .await;

    match inserted {
        Ok(row) => {
            debug!(medicine = %row.medicine, id = row.id, "medication added");
            Ok(Json(row.into()))
        }
        Err(e) if e.is_unique_violation() => {
            warn!(medicine = %new.medicine, "failed to add medication: {DUPLICATE}");
            Err(InfomedError::Conflict(DUPLICATE.to_string()))
        }
        Err(e) => {
            warn!(medicine = %new.medicine, error = %e, "failed to add medication: {SAVE_FAILED}");
            Err(InfomedError::BadRequest(SAVE_FAILED.to_string()))
        }
    }
}

/// GET /get_medicamentos -> every stored medication, possibly none.
pub async fn list_medications(
    State(state): State<InfomedState>,
) -> Result<Json<MedicationList>, InfomedError> {
    debug!("listing medications");
    let rows: Vec<DbMedication> = async {
        let mut session = state.store.open_session().await?;
        session.list_medications().await
    }
    .await
    .inspect_err(|e| warn!(error = %e, "failed to list medications"))?;

    debug!(count = rows.len(), "medications found");
    Ok(Json(rows.into()))
}

/// GET /get_medicamento -> first medication whose name contains `medicine`, ignoring case.
pub async fn find_medication(
    State(state): State<InfomedState>,
    QueryInput(query): QueryInput<MedicationNameQuery>,
) -> Result<Json<MedicationView>, InfomedError> {
    let fragment = query.medicine;
    debug!(medicine = %fragment, "searching medication");

    let found: Option<DbMedication> = async {
        let mut session = state.store.open_session().await?;
        session.find_medication_by_name(&fragment).await
    }
    .await
    .inspect_err(|e| warn!(medicine = %fragment, error = %e, "failed to search medication"))?;

    match found {
        Some(row) => {
            debug!(medicine = %row.medicine, "medication found");
            Ok(Json(row.into()))
        }
        None => {
            warn!(medicine = %fragment, "failed to find medication: {NOT_FOUND}");
            Err(InfomedError::NotFound(NOT_FOUND.to_string()))
        }
    }
}

/// DELETE /del_medicamento -> removes the medication with exactly this name.
pub async fn delete_medication_by_name(
    State(state): State<InfomedState>,
    QueryInput(query): QueryInput<MedicationNameQuery>,
) -> Result<Json<MedicationDeletedByName>, InfomedError> {
    let medicine = query.medicine.trim().to_string();
    debug!(medicine = %medicine, "deleting medication");

    let count: u64 = async {
        let mut session = state.store.open_session().await?;
        session.delete_medication_by_name(&medicine).await
    }
    .await
    .inspect_err(|e| warn!(medicine = %medicine, error = %e, "failed to delete medication"))?;

    if count == 0 {
        warn!(medicine = %medicine, "failed to delete medication: {NOT_FOUND}");
        return Err(InfomedError::NotFound(NOT_FOUND.to_string()));
    }

    debug!(medicine = %medicine, "medication deleted");
    Ok(Json(MedicationDeletedByName {
        message: REMOVED.to_string(),
        id: medicine,
    }))
}

/// DELETE /del_medicamento_id -> removes the medication with this id.
pub async fn delete_medication_by_id(
    State(state): State<InfomedState>,
    QueryInput(IdQuery { id }): QueryInput<IdQuery>,
) -> Result<Json<DeletedById>, InfomedError> {
    debug!(id, "deleting medication");

    let count: u64 = async {
        let mut session = state.store.open_session().await?;
        session.delete_medication_by_id(id).await
    }
    .await
    .inspect_err(|e| warn!(id, error = %e, "failed to delete medication"))?;

    if count == 0 {
        warn!(id, "failed to delete medication: {NOT_FOUND}");
        return Err(InfomedError::NotFound(NOT_FOUND.to_string()));
    }

    debug!(id, "medication deleted");
    Ok(Json(DeletedById {
        mensagem: REMOVED.to_string(),
        id,
    }))
}
