use serde::{Deserialize, Serialize};

use crate::domain::common::validation::{validate_display_order, validate_name};
use crate::domain::common::{nullable, status, AggregateRoot, EntityId, EntityKind, EntityMetadata};

// ============================================================================
// Aggregate Root
// ============================================================================

/// Меню (корень иерархии каталога)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Menu {
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "status::default_active", deserialize_with = "status::deserialize")]
    pub status: bool,
    pub display_order: i32,
    #[serde(default)]
    pub tag_line: Option<String>,
    #[serde(flatten)]
    pub metadata: EntityMetadata,
}

impl Menu {
    /// Создать новое меню для вставки
    pub fn new_for_insert(dto: MenuDto, display_order: i32) -> Self {
        Self {
            id: EntityId::new_v4(),
            name: dto.name.trim().to_string(),
            description: dto.description,
            status: dto.status,
            display_order,
            tag_line: dto.tag_line,
            metadata: EntityMetadata::new(),
        }
    }

    /// Применить частичное обновление: меняются только переданные поля
    pub fn apply(&mut self, patch: &MenuPatch) {
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
        if let Some(tag_line) = &patch.tag_line {
            self.tag_line = tag_line.clone();
        }
    }

    /// Валидация данных
    pub fn validate(&self) -> Result<(), String> {
        validate_name(&self.name)?;
        validate_display_order(self.display_order, 1)?;
        Ok(())
    }
}

impl AggregateRoot for Menu {
    crate::impl_catalog_fields!();

    fn scope_id(&self) -> Option<&EntityId> {
        None
    }

    fn kind() -> EntityKind {
        EntityKind::Menu
    }

    fn aggregate_index() -> &'static str {
        "a001"
    }

    fn collection_name() -> &'static str {
        "menu"
    }

    fn element_name() -> &'static str {
        "Меню"
    }

    fn list_name() -> &'static str {
        "Меню"
    }
}

// ============================================================================
// Forms / DTOs
// ============================================================================

/// DTO для создания меню
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuDto {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "status::default_active", deserialize_with = "status::deserialize")]
    pub status: bool,
    #[serde(default)]
    pub tag_line: Option<String>,
}

/// Частичное обновление меню
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    #[serde(default, deserialize_with = "status::deserialize_option")]
    pub status: Option<bool>,
    pub display_order: Option<i32>,
    #[serde(default, deserialize_with = "nullable::deserialize", skip_serializing_if = "Option::is_none")]
    pub tag_line: Option<Option<String>>,
}
