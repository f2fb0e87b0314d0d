use chrono::Utc;
use contracts::domain::a005_offer::aggregate::Offer;
use contracts::domain::common::{EntityId, EntityMetadata};
use sea_orm::entity::prelude::*;
use sea_orm::{ConnectionTrait, QueryOrder, Set};
use serde::{Deserialize, Serialize};

use crate::domain::decode_json_column;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a005_offer")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub menu_id: String,
    pub name: String,
    pub description: String,
    pub status: bool,
    pub display_order: i32,
    pub start_date: Option<chrono::NaiveDate>,
    pub end_date: Option<chrono::NaiveDate>,
    pub discount_percentage: f64,
    /// Блюда акции (JSON массив OfferItem)
    pub foods_json: String,
    /// Напитки акции (JSON массив OfferItem)
    pub drinks_json: String,
    pub images_json: String,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Offer {
    fn from(m: Model) -> Self {
        Offer {
            foods: decode_json_column(&m.foods_json, "a005_offer.foods_json", &m.id),
            drinks: decode_json_column(&m.drinks_json, "a005_offer.drinks_json", &m.id),
            images: decode_json_column(&m.images_json, "a005_offer.images_json", &m.id),
            id: EntityId::new(&m.id),
            menu_id: EntityId::new(&m.menu_id),
            name: m.name,
            description: m.description,
            status: m.status,
            display_order: m.display_order,
            start_date: m.start_date,
            end_date: m.end_date,
            discount_percentage: m.discount_percentage,
            metadata: EntityMetadata {
                created_at: m.created_at.unwrap_or_else(Utc::now),
                updated_at: m.updated_at.unwrap_or_else(Utc::now),
            },
        }
    }
}

fn active_model(aggregate: &Offer) -> anyhow::Result<ActiveModel> {
    Ok(ActiveModel {
        id: Set(aggregate.id.to_string()),
        menu_id: Set(aggregate.menu_id.to_string()),
        name: Set(aggregate.name.clone()),
        description: Set(aggregate.description.clone()),
        status: Set(aggregate.status),
        display_order: Set(aggregate.display_order),
        start_date: Set(aggregate.start_date),
        end_date: Set(aggregate.end_date),
        discount_percentage: Set(aggregate.discount_percentage),
        foods_json: Set(serde_json::to_string(&aggregate.foods)?),
        drinks_json: Set(serde_json::to_string(&aggregate.drinks)?),
        images_json: Set(serde_json::to_string(&aggregate.images)?),
        created_at: Set(Some(aggregate.metadata.created_at)),
        updated_at: Set(Some(aggregate.metadata.updated_at)),
    })
}

pub async fn list_all<C: ConnectionTrait>(db: &C) -> anyhow::Result<Vec<Offer>> {
    let items = Entity::find()
        .order_by_asc(Column::DisplayOrder)
        .all(db)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(items)
}

pub async fn upsert<C: ConnectionTrait>(db: &C, aggregate: &Offer) -> anyhow::Result<()> {
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
