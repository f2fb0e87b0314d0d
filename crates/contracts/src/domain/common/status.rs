//! Терпимый к типу разбор поля `status`
//!
//! Формы присылают `"active"` / `"inactive"`, API присылает `true` / `false`,
//! старые записи встречаются с `1` / `0`. Внутри системы статус всегда `bool`.

use serde::{de, Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum RawStatus {
    Flag(bool),
    Number(i64),
    Text(String),
}

fn interpret<E: de::Error>(raw: RawStatus) -> Result<bool, E> {
    match raw {
        RawStatus::Flag(b) => Ok(b),
        RawStatus::Number(0) => Ok(false),
        RawStatus::Number(1) => Ok(true),
        RawStatus::Number(n) => Err(E::custom(format!("invalid status value: {}", n))),
        RawStatus::Text(s) => match s.trim().to_ascii_lowercase().as_str() {
            "active" | "true" | "1" => Ok(true),
            "inactive" | "false" | "0" => Ok(false),
            other => Err(E::custom(format!("invalid status value: {}", other))),
        },
    }
}

/// Значение по умолчанию для новых записей
pub fn default_active() -> bool {
    true
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    interpret(RawStatus::deserialize(deserializer)?)
}

pub fn deserialize_option<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<RawStatus>::deserialize(deserializer)? {
        Some(raw) => interpret(raw).map(Some),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Payload {
        #[serde(default = "super::default_active", deserialize_with = "super::deserialize")]
        status: bool,
    }

    #[derive(Deserialize)]
    struct PatchPayload {
        #[serde(default, deserialize_with = "super::deserialize_option")]
        status: Option<bool>,
    }

    fn parse(json: &str) -> bool {
        serde_json::from_str::<Payload>(json).unwrap().status
    }

    #[test]
    fn accepts_all_known_spellings() {
        assert!(parse(r#"{"status": true}"#));
        assert!(parse(r#"{"status": "active"}"#));
        assert!(parse(r#"{"status": "Active"}"#));
        assert!(parse(r#"{"status": 1}"#));
        assert!(!parse(r#"{"status": false}"#));
        assert!(!parse(r#"{"status": "inactive"}"#));
        assert!(!parse(r#"{"status": 0}"#));
    }

    #[test]
    fn missing_status_defaults_to_active() {
        assert!(parse("{}"));
    }

    #[test]
    fn rejects_unknown_values() {
        assert!(serde_json::from_str::<Payload>(r#"{"status": "archived"}"#).is_err());
        assert!(serde_json::from_str::<Payload>(r#"{"status": 5}"#).is_err());
    }

    #[test]
    fn patch_status_is_optional() {
        let p: PatchPayload = serde_json::from_str("{}").unwrap();
        assert_eq!(p.status, None);
        let p: PatchPayload = serde_json::from_str(r#"{"status": "inactive"}"#).unwrap();
        assert_eq!(p.status, Some(false));
    }
}
