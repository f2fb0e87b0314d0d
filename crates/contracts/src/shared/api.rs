use serde::{Deserialize, Serialize};

use crate::domain::common::{status, EntityId};
use crate::shared::hierarchy::HierarchySelection;

/// Конверт ответа REST API: `{ "data": ... }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    pub data: T,
}

impl<T> ApiEnvelope<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// Тело ошибки REST API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

/// Ответ на удаление
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletedResponse {
    pub id: EntityId,
    /// Сколько дочерних записей удалено каскадом
    #[serde(default)]
    pub cascaded: usize,
}

/// Перестановка строки в отображаемом (возможно, отфильтрованном) списке
///
/// Индексы приходят от drag-and-drop как есть и могут быть некорректными
/// (в том числе отрицательными): проверка границ на стороне сервера.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReorderRequest {
    pub old_index: i64,
    pub new_index: i64,
    #[serde(flatten)]
    pub selection: HierarchySelection,
}

/// Смена статуса позиции в пределах меню
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemStatusChange {
    pub item_id: EntityId,
    #[serde(deserialize_with = "status::deserialize")]
    pub active: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reorder_request_carries_filter() {
        let request: ReorderRequest = serde_json::from_str(
            r#"{"oldIndex": 0, "newIndex": 2, "menuId": 1, "categoryId": "4"}"#,
        )
        .unwrap();
        assert_eq!(request.old_index, 0);
        assert_eq!(request.selection.menu_id, Some(EntityId::from(1)));
        assert_eq!(request.selection.category_id, Some(EntityId::from(4)));
        assert_eq!(request.selection.sub_category_id, None);
    }

    #[test]
    fn envelope_wraps_data() {
        let json = serde_json::to_value(ApiEnvelope::new(vec![1, 2])).unwrap();
        assert_eq!(json, serde_json::json!({"data": [1, 2]}));
    }
}
