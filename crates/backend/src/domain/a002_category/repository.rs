use chrono::Utc;
use contracts::domain::a002_category::aggregate::Category;
use contracts::domain::common::{EntityId, EntityMetadata};
use sea_orm::entity::prelude::*;
use sea_orm::{ConnectionTrait, QueryOrder, Set};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a002_category")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub menu_id: String,
    pub name: String,
    pub description: String,
    pub status: bool,
    pub display_order: i32,
    pub image: Option<String>,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Category {
    fn from(m: Model) -> Self {
        Category {
            id: EntityId::new(&m.id),
            menu_id: EntityId::new(&m.menu_id),
            name: m.name,
            description: m.description,
            status: m.status,
            display_order: m.display_order,
            image: m.image,
            metadata: EntityMetadata {
                created_at: m.created_at.unwrap_or_else(Utc::now),
                updated_at: m.updated_at.unwrap_or_else(Utc::now),
            },
        }
    }
}

fn active_model(aggregate: &Category) -> ActiveModel {
    ActiveModel {
        id: Set(aggregate.id.to_string()),
        menu_id: Set(aggregate.menu_id.to_string()),
        name: Set(aggregate.name.clone()),
        description: Set(aggregate.description.clone()),
        status: Set(aggregate.status),
        display_order: Set(aggregate.display_order),
        image: Set(aggregate.image.clone()),
        created_at: Set(Some(aggregate.metadata.created_at)),
        updated_at: Set(Some(aggregate.metadata.updated_at)),
    }
}

pub async fn list_all<C: ConnectionTrait>(db: &C) -> anyhow::Result<Vec<Category>> {
    let items = Entity::find()
        .order_by_asc(Column::DisplayOrder)
        .all(db)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(items)
}

pub async fn upsert<C: ConnectionTrait>(db: &C, aggregate: &Category) -> anyhow::Result<()> {
    let active = active_model(aggregate);
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
