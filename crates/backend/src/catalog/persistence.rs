use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use contracts::domain::a001_menu::aggregate::Menu;
use contracts::domain::a002_category::aggregate::Category;
use contracts::domain::a003_sub_category::aggregate::SubCategory;
use contracts::domain::a004_product::aggregate::Product;
use contracts::domain::a005_offer::aggregate::Offer;
use contracts::domain::common::{AggregateRoot, EntityId, EntityKind};

use super::store::EntityStore;

/// Запись любого вида для передачи в хранилище
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogRecord {
    Menu(Menu),
    Category(Category),
    SubCategory(SubCategory),
    Product(Product),
    Offer(Offer),
}

impl CatalogRecord {
    pub fn kind(&self) -> EntityKind {
        match self {
            CatalogRecord::Menu(_) => EntityKind::Menu,
            CatalogRecord::Category(_) => EntityKind::Category,
            CatalogRecord::SubCategory(_) => EntityKind::SubCategory,
            CatalogRecord::Product(_) => EntityKind::Product,
            CatalogRecord::Offer(_) => EntityKind::Offer,
        }
    }

    pub fn id(&self) -> &EntityId {
        match self {
            CatalogRecord::Menu(r) => r.id(),
            CatalogRecord::Category(r) => r.id(),
            CatalogRecord::SubCategory(r) => r.id(),
            CatalogRecord::Product(r) => r.id(),
            CatalogRecord::Offer(r) => r.id(),
        }
    }
}

/// Изменение, которое нужно сохранить после мутации хранилища
#[derive(Debug, Clone, PartialEq)]
pub enum StoreChange {
    Upsert(CatalogRecord),
    Delete(EntityKind, EntityId),
}

/// Постоянное хранилище каталога
///
/// `apply` получает все изменения одной операции фасада и должен применить
/// их целиком или не применить вовсе.
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    async fn load(&self) -> anyhow::Result<EntityStore>;

    async fn apply(&self, changes: &[StoreChange]) -> anyhow::Result<()>;
}

/// Хранилище в памяти процесса (тесты, запуск без БД)
#[derive(Default)]
pub struct MemoryCatalogRepository {
    state: Mutex<EntityStore>,
    fail_writes: AtomicBool,
    applied: Mutex<Vec<StoreChange>>,
}

impl MemoryCatalogRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_store(store: EntityStore) -> Self {
        Self {
            state: Mutex::new(store),
            ..Self::default()
        }
    }

    /// Все следующие вызовы `apply` завершатся ошибкой
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Журнал успешно применённых изменений
    pub fn applied(&self) -> Vec<StoreChange> {
        self.applied.lock().map(|log| log.clone()).unwrap_or_default()
    }

    pub fn snapshot(&self) -> EntityStore {
        self.state.lock().map(|s| s.clone()).unwrap_or_default()
    }
}

fn upsert<T: AggregateRoot>(items: &mut Vec<T>, record: T) {
    match items.iter_mut().find(|item| item.id() == record.id()) {
        Some(existing) => *existing = record,
        None => items.push(record),
    }
}

#[async_trait]
impl CatalogRepository for MemoryCatalogRepository {
    async fn load(&self) -> anyhow::Result<EntityStore> {
        let state = self
            .state
            .lock()
            .map_err(|_| anyhow::anyhow!("memory repository poisoned"))?;
        Ok(state.clone())
    }

    async fn apply(&self, changes: &[StoreChange]) -> anyhow::Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            anyhow::bail!("memory repository is configured to fail writes");
        }

        let mut state = self
            .state
            .lock()
            .map_err(|_| anyhow::anyhow!("memory repository poisoned"))?;
        for change in changes {
            match change.clone() {
                StoreChange::Upsert(CatalogRecord::Menu(r)) => upsert(&mut state.menus, r),
                StoreChange::Upsert(CatalogRecord::Category(r)) => upsert(&mut state.categories, r),
                StoreChange::Upsert(CatalogRecord::SubCategory(r)) => {
                    upsert(&mut state.sub_categories, r)
                }
                StoreChange::Upsert(CatalogRecord::Product(r)) => upsert(&mut state.products, r),
                StoreChange::Upsert(CatalogRecord::Offer(r)) => upsert(&mut state.offers, r),
                StoreChange::Delete(kind, id) => {
                    state.remove(kind, &id);
                }
            }
        }

        if let Ok(mut log) = self.applied.lock() {
            log.extend_from_slice(changes);
        }
        Ok(())
    }
}
