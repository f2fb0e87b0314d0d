use async_trait::async_trait;
use contracts::domain::common::EntityKind;
use sea_orm::{DatabaseConnection, TransactionTrait};

use super::{a001_menu, a002_category, a003_sub_category, a004_product, a005_offer};
use crate::catalog::persistence::{CatalogRecord, CatalogRepository, StoreChange};
use crate::catalog::store::EntityStore;

/// Хранилище каталога в SQLite (таблицы a001..a005)
pub struct SqliteCatalogRepository {
    db: DatabaseConnection,
}

impl SqliteCatalogRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CatalogRepository for SqliteCatalogRepository {
    async fn load(&self) -> anyhow::Result<EntityStore> {
        Ok(EntityStore {
            menus: a001_menu::repository::list_all(&self.db).await?,
            categories: a002_category::repository::list_all(&self.db).await?,
            sub_categories: a003_sub_category::repository::list_all(&self.db).await?,
            products: a004_product::repository::list_all(&self.db).await?,
            offers: a005_offer::repository::list_all(&self.db).await?,
        })
    }

    /// Все изменения одной операции пишутся в одной транзакции
    async fn apply(&self, changes: &[StoreChange]) -> anyhow::Result<()> {
        let txn = self.db.begin().await?;

        for change in changes {
            match change {
                StoreChange::Upsert(CatalogRecord::Menu(r)) => {
                    a001_menu::repository::upsert(&txn, r).await?
                }
                StoreChange::Upsert(CatalogRecord::Category(r)) => {
                    a002_category::repository::upsert(&txn, r).await?
                }
                StoreChange::Upsert(CatalogRecord::SubCategory(r)) => {
                    a003_sub_category::repository::upsert(&txn, r).await?
                }
                StoreChange::Upsert(CatalogRecord::Product(r)) => {
                    a004_product::repository::upsert(&txn, r).await?
                }
                StoreChange::Upsert(CatalogRecord::Offer(r)) => {
                    a005_offer::repository::upsert(&txn, r).await?
                }
                StoreChange::Delete(kind, id) => {
                    let deleted = match kind {
                        EntityKind::Menu => a001_menu::repository::delete(&txn, id).await?,
                        EntityKind::Category => a002_category::repository::delete(&txn, id).await?,
                        EntityKind::SubCategory => {
                            a003_sub_category::repository::delete(&txn, id).await?
                        }
                        EntityKind::Product => a004_product::repository::delete(&txn, id).await?,
                        EntityKind::Offer => a005_offer::repository::delete(&txn, id).await?,
                    };
                    if !deleted {
                        tracing::warn!("Delete of {} '{}' matched no rows", kind, id);
                    }
                }
            }
        }

        txn.commit().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::store::fixtures::catalog;
    use crate::catalog::store::Stored;
    use crate::shared::data::db;
    use contracts::domain::a004_product::aggregate::Product;
    use contracts::domain::common::{AggregateRoot, EntityId};

    fn upserts(store: &EntityStore) -> Vec<StoreChange> {
        let mut changes = Vec::new();
        changes.extend(store.menus.iter().cloned().map(|r| StoreChange::Upsert(r.into_record())));
        changes.extend(store.categories.iter().cloned().map(|r| StoreChange::Upsert(r.into_record())));
        changes.extend(store.sub_categories.iter().cloned().map(|r| StoreChange::Upsert(r.into_record())));
        changes.extend(store.products.iter().cloned().map(|r| StoreChange::Upsert(r.into_record())));
        changes.extend(store.offers.iter().cloned().map(|r| StoreChange::Upsert(r.into_record())));
        changes
    }

    fn ids<T: AggregateRoot>(items: &[T]) -> Vec<String> {
        let mut ids: Vec<String> = items.iter().map(|i| i.id().to_string()).collect();
        ids.sort();
        ids
    }

    async fn repository() -> SqliteCatalogRepository {
        let conn = db::connect("sqlite::memory:").await.unwrap();
        SqliteCatalogRepository::new(conn)
    }

    #[tokio::test]
    async fn saved_catalog_loads_back() {
        let repository = repository().await;
        let mut store = catalog();
        store.products[0].tags = vec!["hot".into(), "new".into()];
        repository.apply(&upserts(&store)).await.unwrap();

        let loaded = repository.load().await.unwrap();
        assert_eq!(ids(&loaded.menus), vec!["m1", "m2"]);
        assert_eq!(ids(&loaded.categories), vec!["c1", "c2", "c3"]);
        assert_eq!(ids(&loaded.sub_categories), vec!["s1", "s2", "s3"]);
        assert_eq!(ids(&loaded.products), vec!["p1", "p2", "p3", "p4"]);
        assert_eq!(ids(&loaded.offers), vec!["o1"]);

        let p1 = loaded.find::<Product>(&EntityId::new("p1")).unwrap();
        assert_eq!(p1.tags, vec!["hot".to_string(), "new".to_string()]);
        assert_eq!(p1.menu_id, EntityId::new("m1"));
        assert_eq!(p1.price, 100.0);
    }

    #[tokio::test]
    async fn upsert_overwrites_and_delete_removes() {
        let repository = repository().await;
        let store = catalog();
        repository.apply(&upserts(&store)).await.unwrap();

        let mut renamed = store.products[1].clone();
        renamed.name = "Renamed".into();
        renamed.status = false;
        repository
            .apply(&[
                StoreChange::Upsert(renamed.into_record()),
                StoreChange::Delete(EntityKind::Product, EntityId::new("p4")),
            ])
            .await
            .unwrap();

        let loaded = repository.load().await.unwrap();
        assert_eq!(ids(&loaded.products), vec!["p1", "p2", "p3"]);
        let p2 = loaded.find::<Product>(&EntityId::new("p2")).unwrap();
        assert_eq!(p2.name, "Renamed");
        assert!(!p2.status);
    }
}
