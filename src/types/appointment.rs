use serde::{Deserialize, Serialize};

use super::required;
use crate::db::models::{DbAppointment, NewAppointment};
use crate::error::InfomedError;

/// Form body of `POST /add_consulta` and `PUT /update_consulta`.
/// An update replaces every field, so the same shape serves both.
#[derive(Debug, Default, Deserialize)]
pub struct AppointmentForm {
    #[serde(default)]
    pub doctor_name: Option<String>,
    #[serde(default)]
    pub specialty: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub time: Option<String>,
}

impl AppointmentForm {
    /// Values are stored verbatim; only presence is checked. A blank `time` means none.
    pub fn validate(self) -> Result<NewAppointment, InfomedError> {
        Ok(NewAppointment {
            doctor_name: required("doctor_name", self.doctor_name)?,
            specialty: required("specialty", self.specialty)?,
            date: required("date", self.date)?,
            time: self.time.filter(|t| !t.trim().is_empty()),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppointmentView {
    pub id: i64,
    pub doctor_name: String,
    pub specialty: String,
    pub date: String,
    pub time: Option<String>,
}

impl From<DbAppointment> for AppointmentView {
    fn from(a: DbAppointment) -> Self {
        Self {
            id: a.id,
            doctor_name: a.doctor_name,
            specialty: a.specialty,
            date: a.date,
            time: a.time,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppointmentList {
    pub consultas: Vec<AppointmentView>,
}

impl From<Vec<DbAppointment>> for AppointmentList {
    fn from(rows: Vec<DbAppointment>) -> Self {
        Self {
            consultas: rows.into_iter().map(AppointmentView::from).collect(),
        }
    }
}
