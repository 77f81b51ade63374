use serde::{Deserialize, Serialize};

use super::required;
use crate::db::models::{DbMedication, NewMedication};
use crate::error::InfomedError;

/// Form body of `POST /add_medicamento`.
#[derive(Debug, Default, Deserialize)]
pub struct MedicationForm {
    #[serde(default)]
    pub medicine: Option<String>,
    #[serde(default)]
    pub posology: Option<String>,
    #[serde(default)]
    pub doctor: Option<String>,
    #[serde(default)]
    pub specialty: Option<String>,
}

impl MedicationForm {
    /// Check every field is present and title-case the medicine name.
    pub fn validate(self) -> Result<NewMedication, InfomedError> {
        Ok(NewMedication {
            medicine: title_case(required("medicine", self.medicine)?.trim()),
            posology: required("posology", self.posology)?,
            doctor: required("doctor", self.doctor)?,
            specialty: required("specialty", self.specialty)?,
        })
    }
}

/// Query of the search and delete-by-name endpoints.
#[derive(Debug, Deserialize)]
pub struct MedicationNameQuery {
    pub medicine: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MedicationView {
    pub id: i64,
    pub medicine: String,
    pub posology: String,
    pub doctor: String,
    pub specialty: String,
}

impl From<DbMedication> for MedicationView {
    fn from(m: DbMedication) -> Self {
        Self {
            id: m.id,
            medicine: m.medicine,
            posology: m.posology,
            doctor: m.doctor,
            specialty: m.specialty,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MedicationList {
    pub medicamentos: Vec<MedicationView>,
}

impl From<Vec<DbMedication>> for MedicationList {
    fn from(rows: Vec<DbMedication>) -> Self {
        Self {
            medicamentos: rows.into_iter().map(MedicationView::from).collect(),
        }
    }
}

/// Confirmation body of `DELETE /del_medicamento`; `id` echoes the name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MedicationDeletedByName {
    pub message: String,
    pub id: String,
}

/// Upper-case the first letter of every alphabetic run and lower-case the rest,
/// so "dipirona SÓDICA" becomes "Dipirona Sódica".
pub fn title_case(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut in_word = false;
    for c in input.chars() {
        if c.is_alphabetic() {
            if in_word {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(c);
            in_word = false;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_case_matches_word_boundaries() {
        assert_eq!(title_case("aspirin"), "Aspirin");
        assert_eq!(title_case("dipirona SÓDICA"), "Dipirona Sódica");
        assert_eq!(title_case("ácido acetilsalicílico"), "Ácido Acetilsalicílico");
        assert_eq!(title_case("vitamin b12"), "Vitamin B12");
        assert_eq!(title_case("anti-inflamatório"), "Anti-Inflamatório");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn validate_normalizes_name_and_keeps_other_fields() {
        let form = MedicationForm {
            medicine: Some(" paracetamol ".to_string()),
            posology: Some("500mg 6/6h".to_string()),
            doctor: Some("Dra. Maria Silva".to_string()),
            specialty: Some("Clínica Geral".to_string()),
        };
        let new = form.validate().expect("valid form");
        assert_eq!(new.medicine, "Paracetamol");
        assert_eq!(new.posology, "500mg 6/6h");
        assert_eq!(new.doctor, "Dra. Maria Silva");
        assert_eq!(new.specialty, "Clínica Geral");
    }

    #[test]
    fn validate_rejects_missing_field() {
        let form = MedicationForm {
            medicine: Some("aspirin".to_string()),
            ..Default::default()
        };
        assert!(matches!(form.validate(), Err(InfomedError::BadRequest(_))));
    }

    #[test]
    fn list_presentation_keeps_row_order() {
        let rows = vec![
            DbMedication {
                id: 1,
                medicine: "Aspirin".into(),
                posology: "p".into(),
                doctor: "d".into(),
                specialty: "s".into(),
            },
            DbMedication {
                id: 2,
                medicine: "Dipirona".into(),
                posology: "p".into(),
                doctor: "d".into(),
                specialty: "s".into(),
            },
        ];
        let list = MedicationList::from(rows);
        let ids: Vec<i64> = list.medicamentos.iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![1, 2]);
        assert!(MedicationList::from(Vec::new()).medicamentos.is_empty());
    }
}
