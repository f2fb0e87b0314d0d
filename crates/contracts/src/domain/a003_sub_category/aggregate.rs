use serde::{Deserialize, Serialize};

use crate::domain::common::validation::{validate_display_order, validate_name};
use crate::domain::common::{nullable, status, AggregateRoot, EntityId, EntityKind, EntityMetadata};

/// Подкатегория (второй уровень группировки под категорией)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubCategory {
    pub id: EntityId,
    pub category_id: EntityId,
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

impl SubCategory {
    pub fn new_for_insert(category_id: EntityId, dto: SubCategoryDto, display_order: i32) -> Self {
        Self {
            id: EntityId::new_v4(),
            category_id,
            name: dto.name.trim().to_string(),
            description: dto.description,
            status: dto.status,
            display_order,
            image: dto.image,
            metadata: EntityMetadata::new(),
        }
    }

    pub fn apply(&mut self, patch: &SubCategoryPatch) {
        if let Some(category_id) = &patch.category_id {
            self.category_id = category_id.clone();
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

    pub fn validate(&self) -> Result<(), String> {
        validate_name(&self.name)?;
        validate_display_order(self.display_order, 0)?;
        if self.category_id.is_empty() {
            return Err("Необходимо выбрать категорию".into());
        }
        Ok(())
    }
}

impl AggregateRoot for SubCategory {
    crate::impl_catalog_fields!();

    fn scope_id(&self) -> Option<&EntityId> {
        Some(&self.category_id)
    }

    fn kind() -> EntityKind {
        EntityKind::SubCategory
    }

    fn aggregate_index() -> &'static str {
        "a003"
    }

    fn collection_name() -> &'static str {
        "sub_category"
    }

    fn element_name() -> &'static str {
        "Подкатегория"
    }

    fn list_name() -> &'static str {
        "Подкатегории"
    }
}

/// DTO для создания подкатегории
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubCategoryDto {
    #[serde(default)]
    pub category_id: Option<EntityId>,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "status::default_active", deserialize_with = "status::deserialize")]
    pub status: bool,
    #[serde(default)]
    pub image: Option<String>,
}

/// Частичное обновление подкатегории
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubCategoryPatch {
    pub category_id: Option<EntityId>,
    pub name: Option<String>,
    pub description: Option<String>,
    #[serde(default, deserialize_with = "status::deserialize_option")]
    pub status: Option<bool>,
    pub display_order: Option<i32>,
    #[serde(default, deserialize_with = "nullable::deserialize", skip_serializing_if = "Option::is_none")]
    pub image: Option<Option<String>>,
}
