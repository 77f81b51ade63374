//! SQL DDL for initializing the record storage.

/// SQLite schema with:
/// - `medicamento`: `pk_medicamento` INTEGER PRIMARY KEY AUTOINCREMENT, `medicine` UNIQUE
/// - `consulta`: `pk_consulta` INTEGER PRIMARY KEY AUTOINCREMENT, nullable `time`
///
/// Every statement is idempotent so it can run on each startup.
pub const SQLITE_INIT: &str = r#"
CREATE TABLE IF NOT EXISTS medicamento (
    pk_medicamento INTEGER PRIMARY KEY AUTOINCREMENT,
    medicine VARCHAR(140) NOT NULL UNIQUE,
    posology VARCHAR(140) NOT NULL,
    doctor VARCHAR(140) NOT NULL,
    specialty VARCHAR(140) NOT NULL
);

CREATE TABLE IF NOT EXISTS consulta (
    pk_consulta INTEGER PRIMARY KEY AUTOINCREMENT,
    doctor_name VARCHAR(140) NOT NULL,
    specialty VARCHAR(140) NOT NULL,
    date VARCHAR(140) NOT NULL,
    time VARCHAR(140) NULL
);
"#;
