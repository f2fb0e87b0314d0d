pub mod a001_menu;
pub mod a002_category;
pub mod a003_sub_category;
pub mod a004_product;
pub mod a005_offer;
pub mod sqlite_repository;

use serde::de::DeserializeOwned;

/// Разобрать JSON-колонку; повреждённое значение заменяется значением по умолчанию
pub(crate) fn decode_json_column<T: DeserializeOwned + Default>(raw: &str, column: &str, id: &str) -> T {
    serde_json::from_str(raw).unwrap_or_else(|e| {
        tracing::warn!("Failed to deserialize {} for record {}: {}", column, id, e);
        T::default()
    })
}
