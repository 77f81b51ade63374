//! Wire shapes: request payloads with their validation step, and the
//! presentation of stored rows as response bodies.

pub mod appointment;
pub mod medication;

use crate::error::InfomedError;

/// Query string carrying a record identity.
#[derive(Debug, Clone, Copy, serde::Deserialize)]
pub struct IdQuery {
    pub id: i64,
}

/// Confirmation body returned after deleting a record by id.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct DeletedById {
    pub mensagem: String,
    pub id: i64,
}

/// Reject an absent or whitespace-only mandatory field. The value itself is kept as sent.
pub(crate) fn required(field: &str, value: Option<String>) -> Result<String, InfomedError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(InfomedError::BadRequest(format!(
            "O campo '{field}' é obrigatório."
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_keeps_value_and_rejects_blank() {
        assert_eq!(
            required("doctor", Some(" Dr. X".to_string())).unwrap(),
            " Dr. X"
        );
        assert!(matches!(
            required("doctor", Some("   ".to_string())),
            Err(InfomedError::BadRequest(_))
        ));
        assert!(matches!(
            required("doctor", None),
            Err(InfomedError::BadRequest(msg)) if msg.contains("doctor")
        ));
    }
}
