//! Разбор очищаемых полей частичного обновления
//!
//! `Option<Option<T>>`: поле отсутствует в JSON → `None` (не трогать),
//! `null` → `Some(None)` (очистить), значение → `Some(Some(v))`.
//! Поле объявляется с `#[serde(default, deserialize_with = "nullable::deserialize")]`.

use serde::{Deserialize, Deserializer};

pub fn deserialize<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Patch {
        #[serde(default, deserialize_with = "super::deserialize")]
        image: Option<Option<String>>,
    }

    fn parse(json: &str) -> Option<Option<String>> {
        serde_json::from_str::<Patch>(json).unwrap().image
    }

    #[test]
    fn missing_null_and_value_are_distinct() {
        assert_eq!(parse("{}"), None);
        assert_eq!(parse(r#"{"image": null}"#), Some(None));
        assert_eq!(parse(r#"{"image": "a.png"}"#), Some(Some("a.png".into())));
    }
}
