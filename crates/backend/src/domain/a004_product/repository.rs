use chrono::Utc;
use contracts::domain::a004_product::aggregate::Product;
use contracts::domain::common::{EntityId, EntityMetadata};
use sea_orm::entity::prelude::*;
use sea_orm::{ConnectionTrait, QueryOrder, Set};
use serde::{Deserialize, Serialize};

use crate::domain::decode_json_column;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a004_product")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub sub_category_id: String,
    pub category_id: String,
    pub menu_id: String,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub status: bool,
    pub display_order: i32,
    pub tags_json: String,
    pub ingredients_json: String,
    pub images_json: String,
    pub allergies: Option<String>,
    pub tag_line: Option<String>,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Product {
    fn from(m: Model) -> Self {
        Product {
            tags: decode_json_column(&m.tags_json, "a004_product.tags_json", &m.id),
            ingredients: decode_json_column(&m.ingredients_json, "a004_product.ingredients_json", &m.id),
            images: decode_json_column(&m.images_json, "a004_product.images_json", &m.id),
            id: EntityId::new(&m.id),
            sub_category_id: EntityId::new(&m.sub_category_id),
            category_id: EntityId::new(&m.category_id),
            menu_id: EntityId::new(&m.menu_id),
            name: m.name,
            description: m.description,
            price: m.price,
            status: m.status,
            display_order: m.display_order,
            allergies: m.allergies,
            tag_line: m.tag_line,
            metadata: EntityMetadata {
                created_at: m.created_at.unwrap_or_else(Utc::now),
                updated_at: m.updated_at.unwrap_or_else(Utc::now),
            },
        }
    }
}

fn active_model(aggregate: &Product) -> anyhow::Result<ActiveModel> {
    Ok(ActiveModel {
        id: Set(aggregate.id.to_string()),
        sub_category_id: Set(aggregate.sub_category_id.to_string()),
        category_id: Set(aggregate.category_id.to_string()),
        menu_id: Set(aggregate.menu_id.to_string()),
        name: Set(aggregate.name.clone()),
        description: Set(aggregate.description.clone()),
        price: Set(aggregate.price),
        status: Set(aggregate.status),
        display_order: Set(aggregate.display_order),
        tags_json: Set(serde_json::to_string(&aggregate.tags)?),
        ingredients_json: Set(serde_json::to_string(&aggregate.ingredients)?),
        images_json: Set(serde_json::to_string(&aggregate.images)?),
        allergies: Set(aggregate.allergies.clone()),
        tag_line: Set(aggregate.tag_line.clone()),
        created_at: Set(Some(aggregate.metadata.created_at)),
        updated_at: Set(Some(aggregate.metadata.updated_at)),
    })
}

pub async fn list_all<C: ConnectionTrait>(db: &C) -> anyhow::Result<Vec<Product>> {
    let items = Entity::find()
        .order_by_asc(Column::DisplayOrder)
        .all(db)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(items)
}

pub async fn upsert<C: ConnectionTrait>(db: &C, aggregate: &Product) -> anyhow::Result<()> {
    let active = active_model(aggregate)?;
    if Entity::find_by_id(aggregate.id.to_string()).one(db).await?.is_some() {
        active.update(db).await?;
    } else {
        active.insert(db).await?;
    }
    Ok(())
}

pub async fn delete<C: ConnectionTrait>(db: &C, id: &EntityId) -> anyhow::Result<bool> {
    let result = Entity::delete_by_id(id.to_string()).exec(db).await?;
    Ok(result.rows_affected > 0)
}
