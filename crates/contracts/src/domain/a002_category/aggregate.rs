use serde::{Deserialize, Serialize};

use crate::domain::common::validation::{validate_display_order, validate_name};
use crate::domain::common::{nullable, status, AggregateRoot, EntityId, EntityKind, EntityMetadata};

// ============================================================================
// Aggregate Root
// ============================================================================

/// Категория меню
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: EntityId,
    pub menu_id: EntityId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "status::default_active", deserialize_with = "status::deserialize")]
    pub status: bool,
    pub display_order: i32,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(flatten)]
    pub metadata: EntityMetadata,
}

impl Category {
    /// Создать новую категорию для вставки (FK уже проверен вызывающим кодом)
    pub fn new_for_insert(menu_id: EntityId, dto: CategoryDto, display_order: i32) -> Self {
        Self {
            id: EntityId::new_v4(),
            menu_id,
            name: dto.name.trim().to_string(),
            description: dto.description,
            status: dto.status,
            display_order,
            image: dto.image,
            metadata: EntityMetadata::new(),
        }
    }

    /// Применить частичное обновление. Смена `menu_id` здесь не проверяется.
    pub fn apply(&mut self, patch: &CategoryPatch) {
        if let Some(menu_id) = &patch.menu_id {
            self.menu_id = menu_id.clone();
        }
        if let Some(name) = &patch.name {
            self.name = name.trim().to_string();
        }
        if let Some(description) = &patch.description {
            self.description = description.clone();
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(order) = patch.display_order {
            self.display_order = order;
        }
        if let Some(image) = &patch.image {
            self.image = image.clone();
        }
    }

    /// Валидация данных
    pub fn validate(&self) -> Result<(), String> {
        validate_name(&self.name)?;
        validate_display_order(self.display_order, 0)?;
        if self.menu_id.is_empty() {
            return Err("Необходимо выбрать меню".into());
        }
        Ok(())
    }
}

impl AggregateRoot for Category {
    crate::impl_catalog_fields!();

    fn scope_id(&self) -> Option<&EntityId> {
        Some(&self.menu_id)
    }

    fn kind() -> EntityKind {
        EntityKind::Category
    }

    fn aggregate_index() -> &'static str {
        "a002"
    }

    fn collection_name() -> &'static str {
        "category"
    }

    fn element_name() -> &'static str {
        "Категория"
    }

    fn list_name() -> &'static str {
        "Категории"
    }
}

// ============================================================================
// Forms / DTOs
// ============================================================================

/// DTO для создания категории
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryDto {
    /// Меню-владелец; при отсутствии ошибка валидации, а не ошибка разбора
    #[serde(default)]
    pub menu_id: Option<EntityId>,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "status::default_active", deserialize_with = "status::deserialize")]
    pub status: bool,
    #[serde(default)]
    pub image: Option<String>,
}

/// Частичное обновление категории
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryPatch {
    pub menu_id: Option<EntityId>,
    pub name: Option<String>,
    pub description: Option<String>,
    #[serde(default, deserialize_with = "status::deserialize_option")]
    pub status: Option<bool>,
    pub display_order: Option<i32>,
    #[serde(default, deserialize_with = "nullable::deserialize", skip_serializing_if = "Option::is_none")]
    pub image: Option<Option<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_menu_id_from_form_is_normalized() {
        let dto: CategoryDto =
            serde_json::from_str(r#"{"menuId": 3, "name": "Hot Beverages"}"#).unwrap();
        assert_eq!(dto.menu_id, Some(EntityId::new("3")));
        assert!(dto.status);
    }

    #[test]
    fn missing_menu_is_not_a_parse_error() {
        let dto: CategoryDto = serde_json::from_str(r#"{"name": "Cold Beverages"}"#).unwrap();
        assert!(dto.menu_id.is_none());
    }

    #[test]
    fn scope_is_owning_menu() {
        let dto: CategoryDto = serde_json::from_str(r#"{"name": "Desserts"}"#).unwrap();
        let category = Category::new_for_insert(EntityId::new("m1"), dto, 1);
        assert_eq!(category.scope_id(), Some(&EntityId::new("m1")));
        assert!(category.validate().is_ok());
    }
}
