use serde::{Deserialize, Serialize};

use crate::domain::common::EntityId;

/// Строка страницы «позиции меню»: позиция вместе с названиями предков
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuProduct {
    pub menu_id: EntityId,
    pub menu_name: String,
    pub category_id: EntityId,
    pub category_name: String,
    pub sub_category_id: EntityId,
    pub sub_category_name: String,
    pub item: MenuProductItem,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuProductItem {
    pub id: EntityId,
    pub name: String,
    pub description: String,
    pub image_path: Option<String>,
    pub price: f64,
    pub display_order: i32,
    pub status: bool,
}

/// Дерево категорий одного меню
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuTree {
    pub menu_id: EntityId,
    pub menu_name: String,
    pub categories: Vec<CategoryNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryNode {
    pub id: EntityId,
    pub name: String,
    pub status: bool,
    pub sub_categories: Vec<SubCategoryNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubCategoryNode {
    pub id: EntityId,
    pub name: String,
    pub status: bool,
    pub product_count: usize,
}

impl MenuTree {
    /// Общее число подкатегорий в дереве
    pub fn sub_category_count(&self) -> usize {
        self.categories.iter().map(|c| c.sub_categories.len()).sum()
    }
}
