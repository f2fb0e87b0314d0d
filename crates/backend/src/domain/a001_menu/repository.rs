use chrono::Utc;
use contracts::domain::a001_menu::aggregate::Menu;
use contracts::domain::common::{EntityId, EntityMetadata};
use sea_orm::entity::prelude::*;
use sea_orm::{ConnectionTrait, QueryOrder, Set};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a001_menu")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    pub description: String,
    pub status: bool,
    pub display_order: i32,
    pub tag_line: Option<String>,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Menu {
    fn from(m: Model) -> Self {
        Menu {
            id: EntityId::new(&m.id),
            name: m.name,
            description: m.description,
            status: m.status,
            display_order: m.display_order,
            tag_line: m.tag_line,
            metadata: EntityMetadata {
                created_at: m.created_at.unwrap_or_else(Utc::now),
                updated_at: m.updated_at.unwrap_or_else(Utc::now),
            },
        }
    }
}

fn active_model(aggregate: &Menu) -> ActiveModel {
    ActiveModel {
        id: Set(aggregate.id.to_string()),
        name: Set(aggregate.name.clone()),
        description: Set(aggregate.description.clone()),
        status: Set(aggregate.status),
        display_order: Set(aggregate.display_order),
        tag_line: Set(aggregate.tag_line.clone()),
        created_at: Set(Some(aggregate.metadata.created_at)),
        updated_at: Set(Some(aggregate.metadata.updated_at)),
    }
}

pub async fn list_all<C: ConnectionTrait>(db: &C) -> anyhow::Result<Vec<Menu>> {
    let items = Entity::find()
        .order_by_asc(Column::DisplayOrder)
        .all(db)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(items)
}

pub async fn upsert<C: ConnectionTrait>(db: &C, aggregate: &Menu) -> anyhow::Result<()> {
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
