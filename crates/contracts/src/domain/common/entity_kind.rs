use serde::{Deserialize, Serialize};

/// Вид сущности каталога
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Menu,
    Category,
    SubCategory,
    Product,
    Offer,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Menu => "menu",
            EntityKind::Category => "category",
            EntityKind::SubCategory => "sub_category",
            EntityKind::Product => "product",
            EntityKind::Offer => "offer",
        }
    }

    /// Сегмент пути REST API (`/api/{segment}`)
    pub fn api_segment(&self) -> &'static str {
        match self {
            EntityKind::Menu => "menu",
            EntityKind::Category => "category",
            EntityKind::SubCategory => "subcategory",
            EntityKind::Product => "item",
            EntityKind::Offer => "offer",
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
