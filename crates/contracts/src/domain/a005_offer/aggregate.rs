use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::common::validation::{validate_display_order, validate_name, validate_non_negative};
use crate::domain::common::{nullable, status, AggregateRoot, EntityId, EntityKind, EntityMetadata};

// ============================================================================
// Aggregate Root
// ============================================================================

/// Акция (комбо, скидка, спецпредложение), привязанная к меню
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Offer {
    pub id: EntityId,
    pub menu_id: EntityId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "status::default_active", deserialize_with = "status::deserialize")]
    pub status: bool,
    pub display_order: i32,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub discount_percentage: f64,
    #[serde(default)]
    pub foods: Vec<OfferItem>,
    #[serde(default)]
    pub drinks: Vec<OfferItem>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(flatten)]
    pub metadata: EntityMetadata,
}

/// Описание блюда или напитка внутри акции
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfferItem {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default = "status::default_active", deserialize_with = "status::deserialize")]
    pub status: bool,
}

impl Offer {
    pub fn new_for_insert(menu_id: EntityId, dto: OfferDto, display_order: i32) -> Self {
        Self {
            id: EntityId::new_v4(),
            menu_id,
            name: dto.name.trim().to_string(),
            description: dto.description,
            status: dto.status,
            display_order,
            start_date: dto.start_date,
            end_date: dto.end_date,
            discount_percentage: dto.discount_percentage,
            foods: dto.foods,
            drinks: dto.drinks,
            images: dto.images,
            metadata: EntityMetadata::new(),
        }
    }

    pub fn apply(&mut self, patch: &OfferPatch) {
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
        if let Some(start_date) = patch.start_date {
            self.start_date = start_date;
        }
        if let Some(end_date) = patch.end_date {
            self.end_date = end_date;
        }
        if let Some(discount) = patch.discount_percentage {
            self.discount_percentage = discount;
        }
        if let Some(foods) = &patch.foods {
            self.foods = foods.clone();
        }
        if let Some(drinks) = &patch.drinks {
            self.drinks = drinks.clone();
        }
        if let Some(images) = &patch.images {
            self.images = images.clone();
        }
    }

    /// Валидация данных
    pub fn validate(&self) -> Result<(), String> {
        validate_name(&self.name)?;
        validate_display_order(self.display_order, 0)?;
        validate_non_negative("discountPercentage", self.discount_percentage)?;
        if self.discount_percentage > 100.0 {
            return Err("Скидка не может превышать 100%".into());
        }
        if let (Some(start), Some(end)) = (self.start_date, self.end_date) {
            if end < start {
                return Err("Дата окончания раньше даты начала".into());
            }
        }
        for item in self.foods.iter().chain(self.drinks.iter()) {
            validate_name(&item.name)?;
            validate_non_negative("price", item.price)?;
        }
        Ok(())
    }
}

impl AggregateRoot for Offer {
    crate::impl_catalog_fields!();

    fn scope_id(&self) -> Option<&EntityId> {
        Some(&self.menu_id)
    }

    fn kind() -> EntityKind {
        EntityKind::Offer
    }

    fn aggregate_index() -> &'static str {
        "a005"
    }

    fn collection_name() -> &'static str {
        "offer"
    }

    fn element_name() -> &'static str {
        "Акция"
    }

    fn list_name() -> &'static str {
        "Акции"
    }
}

// ============================================================================
// Forms / DTOs
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfferDto {
    #[serde(default)]
    pub menu_id: Option<EntityId>,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "status::default_active", deserialize_with = "status::deserialize")]
    pub status: bool,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub discount_percentage: f64,
    #[serde(default)]
    pub foods: Vec<OfferItem>,
    #[serde(default)]
    pub drinks: Vec<OfferItem>,
    #[serde(default)]
    pub images: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfferPatch {
    pub menu_id: Option<EntityId>,
    pub name: Option<String>,
    pub description: Option<String>,
    #[serde(default, deserialize_with = "status::deserialize_option")]
    pub status: Option<bool>,
    pub display_order: Option<i32>,
    #[serde(default, deserialize_with = "nullable::deserialize", skip_serializing_if = "Option::is_none")]
    pub start_date: Option<Option<NaiveDate>>,
    #[serde(default, deserialize_with = "nullable::deserialize", skip_serializing_if = "Option::is_none")]
    pub end_date: Option<Option<NaiveDate>>,
    pub discount_percentage: Option<f64>,
    pub foods: Option<Vec<OfferItem>>,
    pub drinks: Option<Vec<OfferItem>>,
    pub images: Option<Vec<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn combo() -> Offer {
        let dto: OfferDto = serde_json::from_str(
            r#"{
                "menuId": "m1",
                "name": "Lunch combo",
                "startDate": "2025-03-01",
                "endDate": "2025-03-31",
                "discountPercentage": 15,
                "foods": [{"name": "Paneer wrap", "price": 180}],
                "drinks": [{"name": "Lime soda", "price": 60, "status": "inactive"}]
            }"#,
        )
        .unwrap();
        Offer::new_for_insert(EntityId::new("m1"), dto, 1)
    }

    #[test]
    fn combo_offer_is_valid() {
        let offer = combo();
        assert!(offer.validate().is_ok());
        assert!(!offer.drinks[0].status);
    }

    #[test]
    fn discount_over_hundred_is_rejected() {
        let mut offer = combo();
        offer.discount_percentage = 120.0;
        assert!(offer.validate().is_err());
    }

    #[test]
    fn inverted_period_is_rejected() {
        let mut offer = combo();
        offer.apply(&OfferPatch {
            end_date: Some(NaiveDate::from_ymd_opt(2025, 2, 1)),
            ..Default::default()
        });
        assert!(offer.validate().is_err());
    }
}
