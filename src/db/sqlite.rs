use crate::db::models::{DbAppointment, DbMedication, NewAppointment, NewMedication};
use crate::db::repository::{AppointmentRepository, MedicationRepository};
use crate::db::schema::SQLITE_INIT;
use crate::error::InfomedError;
use futures::TryStreamExt;
use sqlx::pool::PoolConnection;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use std::str::FromStr;
use tracing::info;

type SqlitePool = Pool<Sqlite>;

const MEDICATION_COLUMNS: &str = "pk_medicamento, medicine, posology, doctor, specialty";
const APPOINTMENT_COLUMNS: &str = "pk_consulta, doctor_name, specialty, date, time";

/// Process-wide handle to the record database. Cheap to clone.
#[derive(Clone)]
pub struct Store {
    pool: SqlitePool,
}

impl Store {
    fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Open the database at `database_url`, creating the file, its parent
    /// directory and the schema when they do not exist yet.
    pub async fn open(database_url: &str) -> Result<Self, InfomedError> {
        let connect_opts = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

        if let Some(dir) = connect_opts.get_filename().parent()
            && !dir.as_os_str().is_empty()
            && !dir.exists()
        {
            std::fs::create_dir_all(dir)?;
            info!(path = %dir.display(), "created database directory");
        }

        let pool = SqlitePoolOptions::new().connect_with(connect_opts).await?;
        let store = Self::new(pool);
        store.init_schema().await?;
        Ok(store)
    }

    /// Initialize the schema by executing the bundled DDL.
    async fn init_schema(&self) -> Result<(), InfomedError> {
        // sqlx::query runs one statement at a time
        for stmt in SQLITE_INIT.split(';') {
            let s = stmt.trim();
            if s.is_empty() {
                continue;
            }
            sqlx::query(s).execute(&self.pool).await?;
        }
        Ok(())
    }

    /// Start a unit of work. The connection goes back to the pool when the
    /// session is dropped.
    pub async fn open_session(&self) -> Result<Session, InfomedError> {
        let conn = self.pool.acquire().await?;
        Ok(Session { conn })
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

/// One request's view of the database. Every mutation auto-commits.
pub struct Session {
    conn: PoolConnection<Sqlite>,
}

impl MedicationRepository for Session {
    async fn insert_medication(
        &mut self,
        new: &NewMedication,
    ) -> Result<DbMedication, InfomedError> {
        let row = sqlx::query_as::<_, DbMedication>(&format!(
            "INSERT INTO medicamento (medicine, posology, doctor, specialty)
             VALUES (?, ?, ?, ?) RETURNING {MEDICATION_COLUMNS}"
        ))
        .bind(new.medicine.as_str())
        .bind(new.posology.as_str())
        .bind(new.doctor.as_str())
        .bind(new.specialty.as_str())
        .fetch_one(&mut *self.conn)
        .await?;
        Ok(row)
    }

    async fn list_medications(&mut self) -> Result<Vec<DbMedication>, InfomedError> {
        let rows = sqlx::query_as::<_, DbMedication>(&format!(
            "SELECT {MEDICATION_COLUMNS} FROM medicamento ORDER BY pk_medicamento"
        ))
        .fetch_all(&mut *self.conn)
        .await?;
        Ok(rows)
    }

    async fn find_medication_by_name(
        &mut self,
        fragment: &str,
    ) -> Result<Option<DbMedication>, InfomedError> {
        // SQLite's LIKE only folds ASCII; match in Rust so accented names fold too.
        let needle = fragment.trim().to_lowercase();
        let sql = format!("SELECT {MEDICATION_COLUMNS} FROM medicamento ORDER BY pk_medicamento");
        let mut rows = sqlx::query_as::<_, DbMedication>(&sql).fetch(&mut *self.conn);
        while let Some(row) = rows.try_next().await? {
            if row.medicine.to_lowercase().contains(&needle) {
                return Ok(Some(row));
            }
        }
        Ok(None)
    }

    async fn delete_medication_by_name(&mut self, medicine: &str) -> Result<u64, InfomedError> {
        let res = sqlx::query("DELETE FROM medicamento WHERE medicine = ?")
            .bind(medicine)
            .execute(&mut *self.conn)
            .await?;
        Ok(res.rows_affected())
    }

    async fn delete_medication_by_id(&mut self, id: i64) -> Result<u64, InfomedError> {
        let res = sqlx::query("DELETE FROM medicamento WHERE pk_medicamento = ?")
            .bind(id)
            .execute(&mut *self.conn)
            .await?;
        Ok(res.rows_affected())
    }
}

impl AppointmentRepository for Session {
    async fn insert_appointment(
        &mut self,
        new: &NewAppointment,
    ) -> Result<DbAppointment, InfomedError> {
        let row = sqlx::query_as::<_, DbAppointment>(&format!(
            "INSERT INTO consulta (doctor_name, specialty, date, time)
             VALUES (?, ?, ?, ?) RETURNING {APPOINTMENT_COLUMNS}"
        ))
        .bind(new.doctor_name.as_str())
        .bind(new.specialty.as_str())
        .bind(new.date.as_str())
        .bind(new.time.as_deref())
        .fetch_one(&mut *self.conn)
        .await?;
        Ok(row)
    }

    async fn list_appointments(&mut self) -> Result<Vec<DbAppointment>, InfomedError> {
        let rows = sqlx::query_as::<_, DbAppointment>(&format!(
            "SELECT {APPOINTMENT_COLUMNS} FROM consulta ORDER BY pk_consulta"
        ))
        .fetch_all(&mut *self.conn)
        .await?;
        Ok(rows)
    }

    async fn get_appointment(&mut self, id: i64) -> Result<Option<DbAppointment>, InfomedError> {
        let row = sqlx::query_as::<_, DbAppointment>(&format!(
            "SELECT {APPOINTMENT_COLUMNS} FROM consulta WHERE pk_consulta = ?"
        ))
        .bind(id)
        .fetch_optional(&mut *self.conn)
        .await?;
        Ok(row)
    }

    async fn update_appointment(
        &mut self,
        id: i64,
        fields: &NewAppointment,
    ) -> Result<Option<DbAppointment>, InfomedError> {
        let row = sqlx::query_as::<_, DbAppointment>(&format!(
            "UPDATE consulta SET doctor_name = ?, specialty = ?, date = ?, time = ?
             WHERE pk_consulta = ? RETURNING {APPOINTMENT_COLUMNS}"
        ))
        .bind(fields.doctor_name.as_str())
        .bind(fields.specialty.as_str())
        .bind(fields.date.as_str())
        .bind(fields.time.as_deref())
        .bind(id)
        .fetch_optional(&mut *self.conn)
        .await?;
        Ok(row)
    }

    async fn delete_appointment(&mut self, id: i64) -> Result<u64, InfomedError> {
        let res = sqlx::query("DELETE FROM consulta WHERE pk_consulta = ?")
            .bind(id)
            .execute(&mut *self.conn)
            .await?;
        Ok(res.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_db_dir(tag: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time before UNIX_EPOCH")
            .as_nanos();
        let mut dir = std::env::temp_dir();
        dir.push(format!("infomed-{tag}-{}-{}", std::process::id(), nanos));
        dir
    }

    async fn temp_store(tag: &str) -> (Store, PathBuf) {
        let dir = temp_db_dir(tag);
        let url = format!("sqlite:{}", dir.join("db.sqlite3").display());
        let store = Store::open(&url).await.expect("failed to open store");
        (store, dir)
    }

    fn aspirin() -> NewMedication {
        NewMedication {
            medicine: "Aspirin".to_string(),
            posology: "1 tablet every 8h".to_string(),
            doctor: "Dr. House".to_string(),
            specialty: "Diagnostics".to_string(),
        }
    }

    fn checkup() -> NewAppointment {
        NewAppointment {
            doctor_name: "Dr. X".to_string(),
            specialty: "Cardiology".to_string(),
            date: "01/01/2024".to_string(),
            time: Some("09:00".to_string()),
        }
    }

    #[tokio::test]
    async fn open_creates_missing_directory_and_is_reopenable() {
        let dir = temp_db_dir("reopen");
        let url = format!("sqlite:{}", dir.join("nested").join("db.sqlite3").display());

        let store = Store::open(&url).await.expect("first open");
        let mut session = store.open_session().await.expect("session");
        session.insert_medication(&aspirin()).await.expect("insert");
        drop(session);
        store.close().await;
        assert!(dir.join("nested").exists());

        let store = Store::open(&url).await.expect("second open keeps schema");
        let mut session = store.open_session().await.expect("session");
        assert_eq!(session.list_medications().await.expect("list").len(), 1);
        drop(session);
        store.close().await;

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn duplicate_medicine_is_a_unique_violation() {
        let (store, dir) = temp_store("dup").await;
        let mut session = store.open_session().await.expect("session");

        let first = session.insert_medication(&aspirin()).await.expect("insert");
        assert!(first.id > 0);

        let err = session
            .insert_medication(&aspirin())
            .await
            .expect_err("duplicate must fail");
        assert!(err.is_unique_violation());
        assert_eq!(session.list_medications().await.expect("list").len(), 1);

        drop(session);
        store.close().await;
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn find_by_name_is_case_insensitive_substring() {
        let (store, dir) = temp_store("find").await;
        let mut session = store.open_session().await.expect("session");
        session.insert_medication(&aspirin()).await.expect("insert");
        let mut acid = aspirin();
        acid.medicine = "Ácido Fólico".to_string();
        session.insert_medication(&acid).await.expect("insert");

        let hit = session
            .find_medication_by_name("  ASP ")
            .await
            .expect("query")
            .expect("match");
        assert_eq!(hit.medicine, "Aspirin");

        let hit = session
            .find_medication_by_name("ácido")
            .await
            .expect("query")
            .expect("match");
        assert_eq!(hit.medicine, "Ácido Fólico");

        assert!(
            session
                .find_medication_by_name("ibuprofen")
                .await
                .expect("query")
                .is_none()
        );

        drop(session);
        store.close().await;
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn deletes_report_affected_rows() {
        let (store, dir) = temp_store("delete").await;
        let mut session = store.open_session().await.expect("session");
        let med = session.insert_medication(&aspirin()).await.expect("insert");

        assert_eq!(session.delete_medication_by_name("aspirin").await.expect("delete"), 0);
        assert_eq!(session.delete_medication_by_id(med.id + 100).await.expect("delete"), 0);
        assert_eq!(session.delete_medication_by_id(med.id).await.expect("delete"), 1);

        let appt = session.insert_appointment(&checkup()).await.expect("insert");
        assert_eq!(session.delete_appointment(appt.id + 1).await.expect("delete"), 0);
        assert_eq!(session.delete_appointment(appt.id).await.expect("delete"), 1);
        assert!(session.list_appointments().await.expect("list").is_empty());

        drop(session);
        store.close().await;
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn update_replaces_every_field() {
        let (store, dir) = temp_store("update").await;
        let mut session = store.open_session().await.expect("session");
        let appt = session.insert_appointment(&checkup()).await.expect("insert");

        let replacement = NewAppointment {
            doctor_name: "Dra. Leiza".to_string(),
            specialty: "Cirurgia Cardíaca".to_string(),
            date: "27/08/2017".to_string(),
            time: None,
        };
        let updated = session
            .update_appointment(appt.id, &replacement)
            .await
            .expect("update")
            .expect("row exists");
        assert_eq!(updated.id, appt.id);
        assert_eq!(updated.doctor_name, "Dra. Leiza");
        assert_eq!(updated.time, None);

        let stored = session
            .get_appointment(appt.id)
            .await
            .expect("get")
            .expect("row exists");
        assert_eq!(stored, updated);

        assert!(
            session
                .update_appointment(appt.id + 1, &replacement)
                .await
                .expect("update")
                .is_none()
        );

        drop(session);
        store.close().await;
        let _ = std::fs::remove_dir_all(&dir);
    }
}
