use serde::{Deserialize, Serialize};

use crate::domain::common::validation::{validate_display_order, validate_name, validate_non_negative};
use crate::domain::common::{nullable, status, AggregateRoot, EntityId, EntityKind, EntityMetadata};

// ============================================================================
// Aggregate Root
// ============================================================================

/// Позиция меню (товар), лист иерархии
///
/// `category_id` и `menu_id`: денормализованные копии цепочки предков
/// подкатегории. Они никогда не пишутся из DTO напрямую: их выставляет
/// `set_ancestry` после разрешения подкатегории.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: EntityId,
    pub sub_category_id: EntityId,
    pub category_id: EntityId,
    pub menu_id: EntityId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    #[serde(default = "status::default_active", deserialize_with = "status::deserialize")]
    pub status: bool,
    pub display_order: i32,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default, alias = "itemsImagePaths")]
    pub images: Vec<String>,
    #[serde(default)]
    pub allergies: Option<String>,
    #[serde(default)]
    pub tag_line: Option<String>,
    #[serde(flatten)]
    pub metadata: EntityMetadata,
}

/// Цепочка предков подкатегории: (категория, меню)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ancestry {
    pub category_id: EntityId,
    pub menu_id: EntityId,
}

impl Product {
    /// Создать новую позицию для вставки
    pub fn new_for_insert(
        sub_category_id: EntityId,
        ancestry: Ancestry,
        dto: ProductDto,
        display_order: i32,
    ) -> Self {
        Self {
            id: EntityId::new_v4(),
            sub_category_id,
            category_id: ancestry.category_id,
            menu_id: ancestry.menu_id,
            name: dto.name.trim().to_string(),
            description: dto.description,
            price: dto.price,
            status: dto.status,
            display_order,
            tags: dto.tags,
            ingredients: dto.ingredients,
            images: dto.images,
            allergies: dto.allergies,
            tag_line: dto.tag_line,
            metadata: EntityMetadata::new(),
        }
    }

    /// Применить частичное обновление.
    /// Денормализованные `category_id` / `menu_id` из patch игнорируются.
    pub fn apply(&mut self, patch: &ProductPatch) {
        if let Some(sub_category_id) = &patch.sub_category_id {
            self.sub_category_id = sub_category_id.clone();
        }
        if let Some(name) = &patch.name {
            self.name = name.trim().to_string();
        }
        if let Some(description) = &patch.description {
            self.description = description.clone();
        }
        if let Some(price) = patch.price {
            self.price = price;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(order) = patch.display_order {
            self.display_order = order;
        }
        if let Some(tags) = &patch.tags {
            self.tags = tags.clone();
        }
        if let Some(ingredients) = &patch.ingredients {
            self.ingredients = ingredients.clone();
        }
        if let Some(images) = &patch.images {
            self.images = images.clone();
        }
        if let Some(allergies) = &patch.allergies {
            self.allergies = allergies.clone();
        }
        if let Some(tag_line) = &patch.tag_line {
            self.tag_line = tag_line.clone();
        }
    }

    pub fn ancestry(&self) -> Ancestry {
        Ancestry {
            category_id: self.category_id.clone(),
            menu_id: self.menu_id.clone(),
        }
    }

    pub fn set_ancestry(&mut self, ancestry: Ancestry) {
        self.category_id = ancestry.category_id;
        self.menu_id = ancestry.menu_id;
    }

    /// Валидация данных
    pub fn validate(&self) -> Result<(), String> {
        validate_name(&self.name)?;
        validate_non_negative("price", self.price)?;
        validate_display_order(self.display_order, 0)?;
        if self.sub_category_id.is_empty() {
            return Err("Необходимо выбрать подкатегорию".into());
        }
        Ok(())
    }
}

impl AggregateRoot for Product {
    crate::impl_catalog_fields!();

    fn scope_id(&self) -> Option<&EntityId> {
        Some(&self.sub_category_id)
    }

    fn kind() -> EntityKind {
        EntityKind::Product
    }

    fn aggregate_index() -> &'static str {
        "a004"
    }

    fn collection_name() -> &'static str {
        "product"
    }

    fn element_name() -> &'static str {
        "Позиция"
    }

    fn list_name() -> &'static str {
        "Позиции"
    }
}

// ============================================================================
// Forms / DTOs
// ============================================================================

/// DTO для создания позиции
///
/// Форма присылает всю цепочку `menuId` → `categoryId` → `subCategoryId`.
/// Владельцем считается только подкатегория; остальные поля, если переданы,
/// проверяются на согласованность с её предками.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDto {
    #[serde(default)]
    pub sub_category_id: Option<EntityId>,
    #[serde(default)]
    pub category_id: Option<EntityId>,
    #[serde(default)]
    pub menu_id: Option<EntityId>,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default = "status::default_active", deserialize_with = "status::deserialize")]
    pub status: bool,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default, alias = "itemsImagePaths")]
    pub images: Vec<String>,
    #[serde(default)]
    pub allergies: Option<String>,
    #[serde(default)]
    pub tag_line: Option<String>,
}

/// Частичное обновление позиции
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPatch {
    pub sub_category_id: Option<EntityId>,
    pub category_id: Option<EntityId>,
    pub menu_id: Option<EntityId>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    #[serde(default, deserialize_with = "status::deserialize_option")]
    pub status: Option<bool>,
    pub display_order: Option<i32>,
    pub tags: Option<Vec<String>>,
    pub ingredients: Option<Vec<String>>,
    #[serde(alias = "itemsImagePaths")]
    pub images: Option<Vec<String>>,
    #[serde(default, deserialize_with = "nullable::deserialize", skip_serializing_if = "Option::is_none")]
    pub allergies: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable::deserialize", skip_serializing_if = "Option::is_none")]
    pub tag_line: Option<Option<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Product {
        let dto: ProductDto = serde_json::from_str(
            r#"{
                "subCategoryId": 11,
                "categoryId": "5",
                "menuId": "1",
                "name": "Masala Chai",
                "price": 120.5,
                "status": "active",
                "tags": ["hot"],
                "itemsImagePaths": ["/img/chai.png"]
            }"#,
        )
        .unwrap();
        let sub = dto.sub_category_id.clone().unwrap();
        Product::new_for_insert(
            sub,
            Ancestry {
                category_id: EntityId::new("5"),
                menu_id: EntityId::new("1"),
            },
            dto,
            1,
        )
    }

    #[test]
    fn legacy_image_field_is_accepted() {
        let product = sample();
        assert_eq!(product.images, vec!["/img/chai.png".to_string()]);
        assert_eq!(product.sub_category_id, EntityId::from(11));
    }

    #[test]
    fn patch_ignores_denormalized_ancestry() {
        let mut product = sample();
        product.apply(&ProductPatch {
            category_id: Some(EntityId::new("999")),
            menu_id: Some(EntityId::new("999")),
            price: Some(99.0),
            ..Default::default()
        });
        assert_eq!(product.category_id, EntityId::new("5"));
        assert_eq!(product.menu_id, EntityId::new("1"));
        assert_eq!(product.price, 99.0);
    }

    #[test]
    fn null_in_patch_clears_optional_field() {
        let mut product = sample();
        product.allergies = Some("nuts".into());
        product.tag_line = Some("Bestseller".into());

        let patch: ProductPatch = serde_json::from_str(r#"{"allergies": null}"#).unwrap();
        product.apply(&patch);

        assert_eq!(product.allergies, None);
        assert_eq!(product.tag_line.as_deref(), Some("Bestseller"));
    }

    #[test]
    fn negative_price_fails_validation() {
        let mut product = sample();
        product.price = -1.0;
        assert!(product.validate().is_err());
    }
}
