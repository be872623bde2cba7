//! Review verdicts and the human-readable status message.

use serde_json::Value;

use crate::{errors::Error, homework::json_kind, Result};

/// Known review outcomes reported by the API in the `status` field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Verdict {
    Approved,
    Reviewing,
    Rejected,
}

impl Verdict {
    pub const ALL: [Verdict; 3] = [Verdict::Approved, Verdict::Reviewing, Verdict::Rejected];

    pub fn from_status(status: &str) -> Option<Self> {
        match status {
            "approved" => Some(Verdict::Approved),
            "reviewing" => Some(Verdict::Reviewing),
            "rejected" => Some(Verdict::Rejected),
            _ => None,
        }
    }

    pub fn status(self) -> &'static str {
        match self {
            Verdict::Approved => "approved",
            Verdict::Reviewing => "reviewing",
            Verdict::Rejected => "rejected",
        }
    }

    pub fn sentence(self) -> &'static str {
        match self {
            Verdict::Approved => "Работа проверена: ревьюеру всё понравилось. Ура!",
            Verdict::Reviewing => "Работа взята на проверку ревьюером.",
            Verdict::Rejected => "Работа проверена: у ревьюера есть замечания.",
        }
    }
}

/// Turn one homework record into the notification text.
pub fn describe(record: &Value) -> Result<String> {
    tracing::debug!("checking homework status");

    let homework_name = string_field(record, "homework_name")?;
    let status = string_field(record, "status")?;
    let verdict =
        Verdict::from_status(status).ok_or_else(|| Error::UnknownStatus(status.to_string()))?;

    Ok(format!(
        "Изменился статус проверки работы \"{homework_name}\". {}",
        verdict.sentence()
    ))
}

fn string_field<'a>(record: &'a Value, field: &'static str) -> Result<&'a str> {
    let value = record.get(field).ok_or(Error::MissingField(field))?;
    value.as_str().ok_or_else(|| Error::TypeMismatch {
        what: field,
        expected: "string",
        found: json_kind(value),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn describes_approved_homework() {
        let msg = describe(&json!({"homework_name": "hw1", "status": "approved"})).unwrap();
        assert_eq!(
            msg,
            "Изменился статус проверки работы \"hw1\". Работа проверена: ревьюеру всё понравилось. Ура!"
        );
    }

    #[test]
    fn every_verdict_round_trips_through_status() {
        for v in Verdict::ALL {
            assert_eq!(Verdict::from_status(v.status()), Some(v));
            let msg = describe(&json!({"homework_name": "x", "status": v.status()})).unwrap();
            assert!(msg.ends_with(v.sentence()));
        }
    }

    #[test]
    fn unknown_status_is_rejected() {
        match describe(&json!({"homework_name": "hw1", "status": "unknown_value"})) {
            Err(Error::UnknownStatus(s)) => assert_eq!(s, "unknown_value"),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn missing_fields_are_reported() {
        assert!(matches!(
            describe(&json!({"status": "approved"})),
            Err(Error::MissingField("homework_name"))
        ));
        assert!(matches!(
            describe(&json!({"homework_name": "hw1"})),
            Err(Error::MissingField("status"))
        ));
        assert!(matches!(
            describe(&json!("not a record")),
            Err(Error::MissingField("homework_name"))
        ));
    }

    #[test]
    fn non_string_fields_are_type_mismatch() {
        assert!(matches!(
            describe(&json!({"homework_name": 7, "status": "approved"})),
            Err(Error::TypeMismatch { what: "homework_name", .. })
        ));
        assert!(matches!(
            describe(&json!({"homework_name": "hw", "status": ["approved"]})),
            Err(Error::TypeMismatch { what: "status", .. })
        ));
    }
}
