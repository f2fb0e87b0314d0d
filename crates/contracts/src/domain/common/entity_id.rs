use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use uuid::Uuid;

/// Идентификатор записи каталога
///
/// Бэкенд исторически отдавал id то строкой, то числом, поэтому значение
/// хранится в канонической строковой форме:
/// - пробелы по краям отбрасываются;
/// - целое число приводится к десятичной записи без ведущих нулей (`"007"` == `7`);
/// - UUID приводится к нижнему регистру.
///
/// Сравнение внешних ключей всегда идёт через `EntityId`, а не через сырые строки.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(String);

impl EntityId {
    pub fn new(raw: impl AsRef<str>) -> Self {
        Self(canonicalize(raw.as_ref()))
    }

    /// Новый уникальный идентификатор (UUID v4)
    pub fn new_v4() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Разобрать необязательный параметр запроса: пустая строка означает «нет значения»
    pub fn parse_optional(raw: Option<&str>) -> Option<Self> {
        raw.map(str::trim)
            .filter(|s| !s.is_empty())
            .map(EntityId::new)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

fn canonicalize(raw: &str) -> String {
    let trimmed = raw.trim();
    if let Ok(n) = trimmed.parse::<i128>() {
        return n.to_string();
    }
    if let Ok(uuid) = Uuid::parse_str(trimmed) {
        return uuid.to_string();
    }
    trimmed.to_string()
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EntityId {
    fn from(value: &str) -> Self {
        EntityId::new(value)
    }
}

impl From<String> for EntityId {
    fn from(value: String) -> Self {
        EntityId::new(value)
    }
}

impl From<i64> for EntityId {
    fn from(value: i64) -> Self {
        Self(value.to_string())
    }
}

impl Serialize for EntityId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

struct EntityIdVisitor;

impl<'de> Visitor<'de> for EntityIdVisitor {
    type Value = EntityId;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a string or integer id")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Ok(EntityId::new(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(EntityId::from(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(EntityId(v.to_string()))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        if v.fract() == 0.0 && v.is_finite() {
            Ok(EntityId(format!("{}", v as i128)))
        } else {
            Err(E::custom(format!("id must be integral, got {}", v)))
        }
    }
}

impl<'de> Deserialize<'de> for EntityId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(EntityIdVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_and_string_ids_compare_equal() {
        assert_eq!(EntityId::new("7"), EntityId::from(7));
        assert_eq!(EntityId::new(" 007 "), EntityId::from(7));
        assert_ne!(EntityId::new("7a"), EntityId::from(7));
    }

    #[test]
    fn uuid_is_case_insensitive() {
        let upper = EntityId::new("6F9619FF-8B86-D011-B42D-00C04FC964FF");
        let lower = EntityId::new("6f9619ff-8b86-d011-b42d-00c04fc964ff");
        assert_eq!(upper, lower);
    }

    #[test]
    fn deserializes_from_number_and_string() {
        let ids: Vec<EntityId> = serde_json::from_str(r#"[12, "12", "m1", 3.0]"#).unwrap();
        assert_eq!(ids[0], ids[1]);
        assert_eq!(ids[2].as_str(), "m1");
        assert_eq!(ids[3], EntityId::from(3));
        assert!(serde_json::from_str::<EntityId>("1.5").is_err());
    }

    #[test]
    fn serializes_as_string() {
        let json = serde_json::to_string(&EntityId::from(42)).unwrap();
        assert_eq!(json, r#""42""#);
    }

    #[test]
    fn empty_query_value_is_none() {
        assert_eq!(EntityId::parse_optional(Some("  ")), None);
        assert_eq!(EntityId::parse_optional(None), None);
        assert_eq!(EntityId::parse_optional(Some("5")), Some(EntityId::from(5)));
    }

    #[test]
    fn fresh_ids_are_unique() {
        assert_ne!(EntityId::new_v4(), EntityId::new_v4());
    }
}
