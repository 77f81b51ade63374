use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct DbMedication {
    #[sqlx(rename = "pk_medicamento")]
    pub id: i64,
    pub medicine: String,
    pub posology: String,
    pub doctor: String,
    pub specialty: String,
}

#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct DbAppointment {
    #[sqlx(rename = "pk_consulta")]
    pub id: i64,
    pub doctor_name: String,
    pub specialty: String,
    pub date: String,
    pub time: Option<String>,
}

/// Validated medication ready for insertion. `medicine` is already title-cased.
#[derive(Debug, Clone, PartialEq)]
pub struct NewMedication {
    pub medicine: String,
    pub posology: String,
    pub doctor: String,
    pub specialty: String,
}

/// Validated appointment fields, used both for insertion and full replacement.
#[derive(Debug, Clone, PartialEq)]
pub struct NewAppointment {
    pub doctor_name: String,
    pub specialty: String,
    pub date: String,
    pub time: Option<String>,
}
