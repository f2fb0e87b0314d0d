//! Фасад мутаций каталога
//!
//! Единственная точка записи в `EntityStore`. Каждая операция:
//! 1. берёт блокировку на запись и снимок хранилища;
//! 2. применяет изменение к хранилищу в памяти;
//! 3. отправляет изменения в `CatalogRepository` одним вызовом;
//! 4. при ошибке сохранения восстанавливает снимок.
//!
//! Блокировка держится до конца операции, поэтому чтение никогда не видит
//! частично применённую мутацию.

use std::sync::Arc;

use contracts::domain::a001_menu::aggregate::{Menu, MenuDto, MenuPatch};
use contracts::domain::a002_category::aggregate::{Category, CategoryDto, CategoryPatch};
use contracts::domain::a003_sub_category::aggregate::{SubCategory, SubCategoryDto, SubCategoryPatch};
use contracts::domain::a004_product::aggregate::{Ancestry, Product, ProductDto, ProductPatch};
use contracts::domain::a005_offer::aggregate::{Offer, OfferDto, OfferPatch};
use contracts::domain::common::{AggregateRoot, EntityId, EntityKind};
use contracts::shared::api::{DeletedResponse, ItemStatusChange, ReorderRequest};
use contracts::shared::hierarchy::HierarchySelection;
use contracts::shared::menu_tree::{
    CategoryNode, MenuProduct, MenuProductItem, MenuTree, SubCategoryNode,
};
use serde::Deserialize;
use tokio::sync::RwLock;

use super::error::{CatalogError, CatalogResult};
use super::persistence::{CatalogRepository, StoreChange};
use super::reorder::reorder;
use super::seed;
use super::store::{EntityStore, Stored};

/// Что делать с дочерними записями при удалении родителя
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeletePolicy {
    /// Удалить только саму запись; потомки остаются с висячей ссылкой
    Orphan,
    /// Запретить удаление, пока есть потомки
    #[default]
    Restrict,
    /// Удалить запись вместе со всем поддеревом
    Cascade,
}

pub struct CatalogService {
    store: RwLock<EntityStore>,
    repository: Arc<dyn CatalogRepository>,
    delete_policy: DeletePolicy,
}

impl CatalogService {
    pub fn new(
        store: EntityStore,
        repository: Arc<dyn CatalogRepository>,
        delete_policy: DeletePolicy,
    ) -> Self {
        Self {
            store: RwLock::new(store),
            repository,
            delete_policy,
        }
    }

    /// Загрузить каталог из хранилища
    pub async fn load(
        repository: Arc<dyn CatalogRepository>,
        delete_policy: DeletePolicy,
    ) -> anyhow::Result<Self> {
        let store = repository.load().await?;
        tracing::info!(
            menus = store.menus.len(),
            categories = store.categories.len(),
            sub_categories = store.sub_categories.len(),
            products = store.products.len(),
            offers = store.offers.len(),
            "Catalog loaded"
        );
        Ok(Self::new(store, repository, delete_policy))
    }

    pub fn delete_policy(&self) -> DeletePolicy {
        self.delete_policy
    }

    /// Копия текущего состояния
    pub async fn snapshot(&self) -> EntityStore {
        self.store.read().await.clone()
    }

    // ========================================================================
    // Чтение
    // ========================================================================

    /// Видимые записи, отсортированные по `display_order`
    pub async fn list<T: Stored>(&self, selection: &HierarchySelection) -> Vec<T> {
        self.store.read().await.sorted_view::<T>(selection)
    }

    pub async fn get<T: Stored>(&self, id: &EntityId) -> CatalogResult<T> {
        self.store
            .read()
            .await
            .find::<T>(id)
            .cloned()
            .ok_or_else(|| CatalogError::not_found(T::kind(), id))
    }

    /// Позиции меню вместе с названиями предков (страница «позиции меню»)
    pub async fn menu_items(&self, menu_id: &EntityId) -> CatalogResult<Vec<MenuProduct>> {
        let store = self.store.read().await;
        let menu = store
            .find::<Menu>(menu_id)
            .ok_or_else(|| CatalogError::not_found(EntityKind::Menu, menu_id))?;

        let selection = HierarchySelection::for_menu(menu_id.clone());
        let mut rows: Vec<((i32, i32, i32), MenuProduct)> = Vec::new();
        for product in Product::visible(&store, &selection) {
            let Some(sub) = store.find::<SubCategory>(&product.sub_category_id) else {
                continue;
            };
            let Some(category) = store.find::<Category>(&sub.category_id) else {
                continue;
            };
            let key = (category.display_order, sub.display_order, product.display_order);
            rows.push((
                key,
                MenuProduct {
                    menu_id: menu.id.clone(),
                    menu_name: menu.name.clone(),
                    category_id: category.id.clone(),
                    category_name: category.name.clone(),
                    sub_category_id: sub.id.clone(),
                    sub_category_name: sub.name.clone(),
                    item: MenuProductItem {
                        id: product.id.clone(),
                        name: product.name.clone(),
                        description: product.description.clone(),
                        image_path: product.images.first().cloned(),
                        price: product.price,
                        display_order: product.display_order,
                        status: product.status,
                    },
                },
            ));
        }
        rows.sort_by_key(|(key, _)| *key);
        Ok(rows.into_iter().map(|(_, row)| row).collect())
    }

    /// Дерево Category → SubCategory одного меню
    pub async fn menu_tree(&self, menu_id: &EntityId) -> CatalogResult<MenuTree> {
        let store = self.store.read().await;
        let menu = store
            .find::<Menu>(menu_id)
            .ok_or_else(|| CatalogError::not_found(EntityKind::Menu, menu_id))?;

        let mut selection = HierarchySelection::for_menu(menu_id.clone());
        let categories = store
            .sorted_view::<Category>(&selection)
            .into_iter()
            .map(|category| {
                selection.select_category(Some(category.id.clone()));
                let sub_categories = store
                    .sorted_view::<SubCategory>(&selection)
                    .into_iter()
                    .map(|sub| SubCategoryNode {
                        product_count: store
                            .products
                            .iter()
                            .filter(|p| p.sub_category_id == sub.id)
                            .count(),
                        id: sub.id,
                        name: sub.name,
                        status: sub.status,
                    })
                    .collect();
                CategoryNode {
                    id: category.id,
                    name: category.name,
                    status: category.status,
                    sub_categories,
                }
            })
            .collect();

        Ok(MenuTree {
            menu_id: menu.id.clone(),
            menu_name: menu.name.clone(),
            categories,
        })
    }

    // ========================================================================
    // Ядро транзакции
    // ========================================================================

    async fn mutate<R, F>(&self, operation: &str, apply: F) -> CatalogResult<R>
    where
        F: FnOnce(&mut EntityStore) -> CatalogResult<(R, Vec<StoreChange>)>,
    {
        let mut store = self.store.write().await;
        let snapshot = store.clone();

        let (result, changes) = match apply(&mut *store) {
            Ok(outcome) => outcome,
            Err(e) => {
                *store = snapshot;
                tracing::warn!("{} rejected: {}", operation, e);
                return Err(e);
            }
        };

        if changes.is_empty() {
            return Ok(result);
        }

        if let Err(e) = self.repository.apply(&changes).await {
            *store = snapshot;
            tracing::warn!("{} rolled back: {:#}", operation, e);
            return Err(CatalogError::Persistence(e.to_string()));
        }

        tracing::info!("{} applied ({} change(s))", operation, changes.len());
        Ok(result)
    }

    async fn update_with<T, F>(&self, id: &EntityId, patch: F) -> CatalogResult<T>
    where
        T: Stored,
        F: FnOnce(&EntityStore, &mut T) -> CatalogResult<()>,
    {
        let operation = format!("update {} '{}'", T::kind(), id);
        self.mutate(&operation, |store| {
            let mut record = store
                .find::<T>(id)
                .cloned()
                .ok_or_else(|| CatalogError::not_found(T::kind(), id))?;

            let parent_before = record.scope_id().cloned();
            patch(store, &mut record)?;
            let reparented = record.scope_id() != parent_before.as_ref();
            record.touch();

            if let Some(slot) = store.find_mut::<T>(id) {
                *slot = record.clone();
            }

            let mut changes = vec![StoreChange::Upsert(record.clone().into_record())];
            if reparented && matches!(T::kind(), EntityKind::Category | EntityKind::SubCategory) {
                changes.extend(resync_product_ancestry(store, T::kind(), id));
            }
            Ok((record, changes))
        })
        .await
    }

    // ========================================================================
    // Create
    // ========================================================================

    pub async fn create_menu(&self, dto: MenuDto) -> CatalogResult<Menu> {
        self.mutate("create menu", |store| {
            let menu = insert_menu(store, dto)?;
            Ok((menu.clone(), vec![StoreChange::Upsert(menu.into_record())]))
        })
        .await
    }

    pub async fn create_category(&self, dto: CategoryDto) -> CatalogResult<Category> {
        self.mutate("create category", |store| {
            let category = insert_category(store, dto)?;
            Ok((
                category.clone(),
                vec![StoreChange::Upsert(category.into_record())],
            ))
        })
        .await
    }

    pub async fn create_sub_category(&self, dto: SubCategoryDto) -> CatalogResult<SubCategory> {
        self.mutate("create sub_category", |store| {
            let sub_category = insert_sub_category(store, dto)?;
            Ok((
                sub_category.clone(),
                vec![StoreChange::Upsert(sub_category.into_record())],
            ))
        })
        .await
    }

    pub async fn create_product(&self, dto: ProductDto) -> CatalogResult<Product> {
        self.mutate("create product", |store| {
            let product = insert_product(store, dto)?;
            Ok((
                product.clone(),
                vec![StoreChange::Upsert(product.into_record())],
            ))
        })
        .await
    }

    pub async fn create_offer(&self, dto: OfferDto) -> CatalogResult<Offer> {
        self.mutate("create offer", |store| {
            let offer = insert_offer(store, dto)?;
            Ok((offer.clone(), vec![StoreChange::Upsert(offer.into_record())]))
        })
        .await
    }

    // ========================================================================
    // Update
    // ========================================================================

    pub async fn update_menu(&self, id: &EntityId, patch: MenuPatch) -> CatalogResult<Menu> {
        self.update_with::<Menu, _>(id, |_, menu| {
            menu.apply(&patch);
            menu.validate().map_err(CatalogError::Validation)
        })
        .await
    }

    pub async fn update_category(
        &self,
        id: &EntityId,
        patch: CategoryPatch,
    ) -> CatalogResult<Category> {
        self.update_with::<Category, _>(id, |store, category| {
            if let Some(menu_id) = &patch.menu_id {
                require_parent::<Menu>(store, Some(menu_id))?;
            }
            category.apply(&patch);
            category.validate().map_err(CatalogError::Validation)
        })
        .await
    }

    pub async fn update_sub_category(
        &self,
        id: &EntityId,
        patch: SubCategoryPatch,
    ) -> CatalogResult<SubCategory> {
        self.update_with::<SubCategory, _>(id, |store, sub_category| {
            if let Some(category_id) = &patch.category_id {
                require_parent::<Category>(store, Some(category_id))?;
            }
            sub_category.apply(&patch);
            sub_category.validate().map_err(CatalogError::Validation)
        })
        .await
    }

    pub async fn update_product(
        &self,
        id: &EntityId,
        patch: ProductPatch,
    ) -> CatalogResult<Product> {
        self.update_with::<Product, _>(id, |store, product| {
            let reparented = match &patch.sub_category_id {
                Some(sub_id) => {
                    require_parent::<SubCategory>(store, Some(sub_id))?;
                    sub_id != &product.sub_category_id
                }
                None => false,
            };
            product.apply(&patch);

            // Осиротевшую позицию можно править, пока её не переносят
            match store.sub_category_ancestry(&product.sub_category_id) {
                Some(ancestry) => {
                    check_declared_ancestry(
                        &ancestry,
                        patch.category_id.as_ref(),
                        patch.menu_id.as_ref(),
                    )?;
                    product.set_ancestry(ancestry);
                }
                None if reparented => {
                    resolve_ancestry(store, &product.sub_category_id)?;
                }
                None => {}
            }
            product.validate().map_err(CatalogError::Validation)
        })
        .await
    }

    pub async fn update_offer(&self, id: &EntityId, patch: OfferPatch) -> CatalogResult<Offer> {
        self.update_with::<Offer, _>(id, |store, offer| {
            if let Some(menu_id) = &patch.menu_id {
                require_parent::<Menu>(store, Some(menu_id))?;
            }
            offer.apply(&patch);
            offer.validate().map_err(CatalogError::Validation)
        })
        .await
    }

    // ========================================================================
    // Delete / status / reorder
    // ========================================================================

    /// Удалить запись с учётом `DeletePolicy`
    pub async fn delete<T: Stored>(&self, id: &EntityId) -> CatalogResult<DeletedResponse> {
        let policy = self.delete_policy;
        let operation = format!("delete {} '{}'", T::kind(), id);
        self.mutate(&operation, |store| {
            if store.find::<T>(id).is_none() {
                return Err(CatalogError::not_found(T::kind(), id));
            }

            let descendants = store.descendants(T::kind(), id);
            let mut changes = Vec::new();
            match policy {
                DeletePolicy::Restrict if !descendants.is_empty() => {
                    return Err(CatalogError::HasChildren {
                        kind: T::kind(),
                        id: id.clone(),
                        children: descendants.len(),
                    });
                }
                DeletePolicy::Cascade => {
                    for (kind, child_id) in &descendants {
                        store.remove(*kind, child_id);
                        changes.push(StoreChange::Delete(*kind, child_id.clone()));
                    }
                }
                _ => {}
            }

            store.remove(T::kind(), id);
            changes.push(StoreChange::Delete(T::kind(), id.clone()));

            let cascaded = changes.len() - 1;
            Ok((
                DeletedResponse {
                    id: id.clone(),
                    cascaded,
                },
                changes,
            ))
        })
        .await
    }

    /// Переключить статус ровно одной записи
    pub async fn toggle_status<T: Stored>(&self, id: &EntityId) -> CatalogResult<T> {
        let operation = format!("toggle status of {} '{}'", T::kind(), id);
        self.mutate(&operation, |store| {
            let record = store
                .find_mut::<T>(id)
                .ok_or_else(|| CatalogError::not_found(T::kind(), id))?;
            let next = !record.status();
            record.set_status(next);
            record.touch();
            let record = record.clone();
            Ok((record.clone(), vec![StoreChange::Upsert(record.into_record())]))
        })
        .await
    }

    /// Перестановка в отображаемом списке; новый порядок сохраняется сразу
    ///
    /// Отображаемый список: записи, видимые при `request.selection`,
    /// отсортированные по `display_order`. Все они должны принадлежать одному
    /// родителю, иначе нумерация смешала бы несвязанные списки.
    pub async fn reorder<T: Stored>(&self, request: &ReorderRequest) -> CatalogResult<Vec<T>> {
        let operation = format!(
            "reorder {} {} -> {}",
            T::kind(),
            request.old_index,
            request.new_index
        );
        self.mutate(&operation, |store| {
            let visible = store.sorted_view::<T>(&request.selection);
            let outcome = reorder(
                &visible,
                T::collection(store),
                request.old_index,
                request.new_index,
            )?;
            if outcome.changed.is_empty() {
                return Ok((outcome.visible, Vec::new()));
            }
            ensure_single_scope(&visible)?;

            *T::collection_mut(store) = outcome.full;
            let changes = outcome
                .changed
                .iter()
                .filter_map(|id| store.find::<T>(id).cloned())
                .map(|record| StoreChange::Upsert(record.into_record()))
                .collect();
            Ok((outcome.visible, changes))
        })
        .await
    }

    /// Массовая смена статуса позиций одного меню
    pub async fn set_menu_item_status(
        &self,
        menu_id: &EntityId,
        changes: Vec<ItemStatusChange>,
    ) -> CatalogResult<Vec<Product>> {
        let operation = format!("set item status in menu '{}'", menu_id);
        self.mutate(&operation, |store| {
            if store.find::<Menu>(menu_id).is_none() {
                return Err(CatalogError::not_found(EntityKind::Menu, menu_id));
            }
            let in_menu: Vec<EntityId> =
                Product::visible(store, &HierarchySelection::for_menu(menu_id.clone()))
                    .into_iter()
                    .map(|p| p.id.clone())
                    .collect();

            let mut updated = Vec::new();
            for change in &changes {
                if !in_menu.contains(&change.item_id) {
                    return Err(CatalogError::not_found(EntityKind::Product, &change.item_id));
                }
                if let Some(product) = store.find_mut::<Product>(&change.item_id) {
                    if product.status != change.active {
                        product.status = change.active;
                        product.touch();
                        updated.push(product.clone());
                    }
                }
            }

            let store_changes = updated
                .iter()
                .cloned()
                .map(|p| StoreChange::Upsert(p.into_record()))
                .collect();
            Ok((updated, store_changes))
        })
        .await
    }

    /// Заполнить пустой каталог демонстрационными данными.
    /// Возвращает число созданных записей (0, если каталог не пуст).
    ///
    /// Всё дерево создаётся одной мутацией: при ошибке сохранения каталог
    /// остаётся пустым.
    pub async fn insert_test_data(&self) -> CatalogResult<usize> {
        self.mutate("insert test data", |store| {
            if !store.is_empty() {
                tracing::info!("Catalog is not empty, test data skipped");
                return Ok((0, Vec::new()));
            }

            let mut records = Vec::new();
            for menu_seed in seed::demo_catalog() {
                let menu = insert_menu(store, menu_seed.menu)?;
                records.push(menu.clone().into_record());
                for category_seed in menu_seed.categories {
                    let mut dto = category_seed.category;
                    dto.menu_id = Some(menu.id.clone());
                    let category = insert_category(store, dto)?;
                    records.push(category.clone().into_record());
                    for sub_seed in category_seed.sub_categories {
                        let mut dto = sub_seed.sub_category;
                        dto.category_id = Some(category.id.clone());
                        let sub_category = insert_sub_category(store, dto)?;
                        records.push(sub_category.clone().into_record());
                        for mut product in sub_seed.products {
                            product.sub_category_id = Some(sub_category.id.clone());
                            records.push(insert_product(store, product)?.into_record());
                        }
                    }
                }
                for mut offer in menu_seed.offers {
                    offer.menu_id = Some(menu.id.clone());
                    records.push(insert_offer(store, offer)?.into_record());
                }
            }

            let created = records.len();
            let changes = records.into_iter().map(StoreChange::Upsert).collect();
            Ok((created, changes))
        })
        .await
    }
}

// ============================================================================
// Вспомогательные функции
// ============================================================================

fn insert_menu(store: &mut EntityStore, dto: MenuDto) -> CatalogResult<Menu> {
    let order = store.next_display_order::<Menu>(None);
    let menu = Menu::new_for_insert(dto, order);
    menu.validate().map_err(CatalogError::Validation)?;
    store.menus.push(menu.clone());
    Ok(menu)
}

fn insert_category(store: &mut EntityStore, dto: CategoryDto) -> CatalogResult<Category> {
    let menu_id = require_parent::<Menu>(store, dto.menu_id.as_ref())?;
    let order = store.next_display_order::<Category>(Some(&menu_id));
    let category = Category::new_for_insert(menu_id, dto, order);
    category.validate().map_err(CatalogError::Validation)?;
    store.categories.push(category.clone());
    Ok(category)
}

fn insert_sub_category(store: &mut EntityStore, dto: SubCategoryDto) -> CatalogResult<SubCategory> {
    let category_id = require_parent::<Category>(store, dto.category_id.as_ref())?;
    let order = store.next_display_order::<SubCategory>(Some(&category_id));
    let sub_category = SubCategory::new_for_insert(category_id, dto, order);
    sub_category.validate().map_err(CatalogError::Validation)?;
    store.sub_categories.push(sub_category.clone());
    Ok(sub_category)
}

fn insert_product(store: &mut EntityStore, dto: ProductDto) -> CatalogResult<Product> {
    let sub_category_id = require_parent::<SubCategory>(store, dto.sub_category_id.as_ref())?;
    let ancestry = resolve_ancestry(store, &sub_category_id)?;
    check_declared_ancestry(&ancestry, dto.category_id.as_ref(), dto.menu_id.as_ref())?;

    let order = store.next_display_order::<Product>(Some(&sub_category_id));
    let product = Product::new_for_insert(sub_category_id, ancestry, dto, order);
    product.validate().map_err(CatalogError::Validation)?;
    store.products.push(product.clone());
    Ok(product)
}

fn insert_offer(store: &mut EntityStore, dto: OfferDto) -> CatalogResult<Offer> {
    let menu_id = require_parent::<Menu>(store, dto.menu_id.as_ref())?;
    let order = store.next_display_order::<Offer>(Some(&menu_id));
    let offer = Offer::new_for_insert(menu_id, dto, order);
    offer.validate().map_err(CatalogError::Validation)?;
    store.offers.push(offer.clone());
    Ok(offer)
}

/// Родитель должен быть указан и существовать
fn require_parent<T: Stored>(store: &EntityStore, id: Option<&EntityId>) -> CatalogResult<EntityId> {
    let id = id.filter(|id| !id.is_empty()).ok_or_else(|| {
        CatalogError::Validation(format!("Необходимо выбрать: {}", T::element_name()))
    })?;
    if store.find::<T>(id).is_none() {
        return Err(CatalogError::Validation(format!(
            "{} '{}' не существует",
            T::element_name(),
            id
        )));
    }
    Ok(id.clone())
}

fn resolve_ancestry(store: &EntityStore, sub_category_id: &EntityId) -> CatalogResult<Ancestry> {
    store.sub_category_ancestry(sub_category_id).ok_or_else(|| {
        CatalogError::Validation(format!(
            "Подкатегория '{}' не привязана к существующей категории",
            sub_category_id
        ))
    })
}

/// Переданные формой `categoryId` / `menuId` должны совпадать с реальными предками
fn check_declared_ancestry(
    ancestry: &Ancestry,
    category_id: Option<&EntityId>,
    menu_id: Option<&EntityId>,
) -> CatalogResult<()> {
    if let Some(category_id) = category_id.filter(|id| !id.is_empty()) {
        if category_id != &ancestry.category_id {
            return Err(CatalogError::Validation(format!(
                "Подкатегория не относится к категории '{}'",
                category_id
            )));
        }
    }
    if let Some(menu_id) = menu_id.filter(|id| !id.is_empty()) {
        if menu_id != &ancestry.menu_id {
            return Err(CatalogError::Validation(format!(
                "Подкатегория не относится к меню '{}'",
                menu_id
            )));
        }
    }
    Ok(())
}

/// Привести денормализованных предков позиций из поддерева записи к цепочке подкатегорий
fn resync_product_ancestry(
    store: &mut EntityStore,
    kind: EntityKind,
    id: &EntityId,
) -> Vec<StoreChange> {
    let moved: Vec<EntityId> = store
        .descendants(kind, id)
        .into_iter()
        .filter(|(child_kind, _)| *child_kind == EntityKind::Product)
        .map(|(_, product_id)| product_id)
        .collect();

    let fixes: Vec<(usize, Ancestry)> = store
        .products
        .iter()
        .enumerate()
        .filter(|(_, product)| moved.contains(&product.id))
        .filter_map(|(index, product)| {
            store
                .sub_category_ancestry(&product.sub_category_id)
                .filter(|ancestry| ancestry != &product.ancestry())
                .map(|ancestry| (index, ancestry))
        })
        .collect();

    fixes
        .into_iter()
        .map(|(index, ancestry)| {
            let product = &mut store.products[index];
            product.set_ancestry(ancestry);
            StoreChange::Upsert(product.clone().into_record())
        })
        .collect()
}

fn ensure_single_scope<T: Stored>(visible: &[T]) -> CatalogResult<()> {
    let mut scopes = visible.iter().map(|item| item.scope_id());
    if let Some(first) = scopes.next() {
        if scopes.any(|scope| scope != first) {
            return Err(CatalogError::Validation(format!(
                "{}: перестановка возможна только внутри одного родителя, уточните фильтр",
                T::list_name()
            )));
        }
    }
    Ok(())
}
