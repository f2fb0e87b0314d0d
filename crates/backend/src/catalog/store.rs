use contracts::domain::a001_menu::aggregate::Menu;
use contracts::domain::a002_category::aggregate::Category;
use contracts::domain::a003_sub_category::aggregate::SubCategory;
use contracts::domain::a004_product::aggregate::{Ancestry, Product};
use contracts::domain::a005_offer::aggregate::Offer;
use contracts::domain::common::{AggregateRoot, EntityId, EntityKind};
use contracts::shared::hierarchy::HierarchySelection;

use super::hierarchy;
use super::persistence::CatalogRecord;

/// Хранилище сущностей каталога: упорядоченные коллекции в памяти
///
/// Порядок внутри `Vec` соответствует порядку добавления, порядок показа задаёт `display_order`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntityStore {
    pub menus: Vec<Menu>,
    pub categories: Vec<Category>,
    pub sub_categories: Vec<SubCategory>,
    pub products: Vec<Product>,
    pub offers: Vec<Offer>,
}

/// Агрегат, который хранится в `EntityStore`
pub trait Stored: AggregateRoot + Clone + Send + Sync + 'static {
    fn collection(store: &EntityStore) -> &Vec<Self>;

    fn collection_mut(store: &mut EntityStore) -> &mut Vec<Self>;

    /// Записи, видимые при данном выборе фильтров (в порядке коллекции)
    fn visible<'a>(store: &'a EntityStore, selection: &HierarchySelection) -> Vec<&'a Self>;

    fn into_record(self) -> CatalogRecord;
}

impl Stored for Menu {
    fn collection(store: &EntityStore) -> &Vec<Self> {
        &store.menus
    }

    fn collection_mut(store: &mut EntityStore) -> &mut Vec<Self> {
        &mut store.menus
    }

    fn visible<'a>(store: &'a EntityStore, _selection: &HierarchySelection) -> Vec<&'a Self> {
        store.menus.iter().collect()
    }

    fn into_record(self) -> CatalogRecord {
        CatalogRecord::Menu(self)
    }
}

impl Stored for Category {
    fn collection(store: &EntityStore) -> &Vec<Self> {
        &store.categories
    }

    fn collection_mut(store: &mut EntityStore) -> &mut Vec<Self> {
        &mut store.categories
    }

    fn visible<'a>(store: &'a EntityStore, selection: &HierarchySelection) -> Vec<&'a Self> {
        hierarchy::filter_categories(&store.categories, selection)
    }

    fn into_record(self) -> CatalogRecord {
        CatalogRecord::Category(self)
    }
}

impl Stored for SubCategory {
    fn collection(store: &EntityStore) -> &Vec<Self> {
        &store.sub_categories
    }

    fn collection_mut(store: &mut EntityStore) -> &mut Vec<Self> {
        &mut store.sub_categories
    }

    fn visible<'a>(store: &'a EntityStore, selection: &HierarchySelection) -> Vec<&'a Self> {
        hierarchy::filter_sub_categories(&store.categories, &store.sub_categories, selection)
    }

    fn into_record(self) -> CatalogRecord {
        CatalogRecord::SubCategory(self)
    }
}

impl Stored for Product {
    fn collection(store: &EntityStore) -> &Vec<Self> {
        &store.products
    }

    fn collection_mut(store: &mut EntityStore) -> &mut Vec<Self> {
        &mut store.products
    }

    fn visible<'a>(store: &'a EntityStore, selection: &HierarchySelection) -> Vec<&'a Self> {
        hierarchy::filter_products(
            &store.categories,
            &store.sub_categories,
            &store.products,
            selection,
        )
    }

    fn into_record(self) -> CatalogRecord {
        CatalogRecord::Product(self)
    }
}

impl Stored for Offer {
    fn collection(store: &EntityStore) -> &Vec<Self> {
        &store.offers
    }

    fn collection_mut(store: &mut EntityStore) -> &mut Vec<Self> {
        &mut store.offers
    }

    fn visible<'a>(store: &'a EntityStore, selection: &HierarchySelection) -> Vec<&'a Self> {
        hierarchy::filter_offers(&store.offers, selection)
    }

    fn into_record(self) -> CatalogRecord {
        CatalogRecord::Offer(self)
    }
}

impl EntityStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.menus.is_empty()
            && self.categories.is_empty()
            && self.sub_categories.is_empty()
            && self.products.is_empty()
            && self.offers.is_empty()
    }

    pub fn find<T: Stored>(&self, id: &EntityId) -> Option<&T> {
        T::collection(self).iter().find(|item| item.id() == id)
    }

    pub fn find_mut<T: Stored>(&mut self, id: &EntityId) -> Option<&mut T> {
        let index = self.position::<T>(id)?;
        T::collection_mut(self).get_mut(index)
    }

    pub fn position<T: Stored>(&self, id: &EntityId) -> Option<usize> {
        T::collection(self).iter().position(|item| item.id() == id)
    }

    /// Количество записей вида `T` у одного родителя
    pub fn count_in_scope<T: Stored>(&self, scope: Option<&EntityId>) -> usize {
        T::collection(self)
            .iter()
            .filter(|item| item.scope_id() == scope)
            .count()
    }

    /// Порядок для новой записи: в конец списка родителя
    pub fn next_display_order<T: Stored>(&self, scope: Option<&EntityId>) -> i32 {
        self.count_in_scope::<T>(scope) as i32 + 1
    }

    /// Видимые записи, отсортированные по `display_order` (стабильно)
    pub fn sorted_view<T: Stored>(&self, selection: &HierarchySelection) -> Vec<T> {
        let mut view: Vec<T> = T::visible(self, selection).into_iter().cloned().collect();
        view.sort_by_key(|item| item.display_order());
        view
    }

    /// Цепочка предков подкатегории. `None`, если подкатегория или её категория отсутствует.
    pub fn sub_category_ancestry(&self, sub_category_id: &EntityId) -> Option<Ancestry> {
        let sub_category = self.find::<SubCategory>(sub_category_id)?;
        let category = self.find::<Category>(&sub_category.category_id)?;
        Some(Ancestry {
            category_id: category.id.clone(),
            menu_id: category.menu_id.clone(),
        })
    }

    /// Прямые потомки записи
    pub fn children(&self, kind: EntityKind, id: &EntityId) -> Vec<(EntityKind, EntityId)> {
        match kind {
            EntityKind::Menu => self
                .categories
                .iter()
                .filter(|c| &c.menu_id == id)
                .map(|c| (EntityKind::Category, c.id.clone()))
                .chain(
                    self.offers
                        .iter()
                        .filter(|o| &o.menu_id == id)
                        .map(|o| (EntityKind::Offer, o.id.clone())),
                )
                .collect(),
            EntityKind::Category => self
                .sub_categories
                .iter()
                .filter(|s| &s.category_id == id)
                .map(|s| (EntityKind::SubCategory, s.id.clone()))
                .collect(),
            EntityKind::SubCategory => self
                .products
                .iter()
                .filter(|p| &p.sub_category_id == id)
                .map(|p| (EntityKind::Product, p.id.clone()))
                .collect(),
            EntityKind::Product | EntityKind::Offer => Vec::new(),
        }
    }

    /// Все потомки записи (в глубину), без самой записи
    pub fn descendants(&self, kind: EntityKind, id: &EntityId) -> Vec<(EntityKind, EntityId)> {
        let mut result = Vec::new();
        let mut pending = self.children(kind, id);
        while let Some((child_kind, child_id)) = pending.pop() {
            pending.extend(self.children(child_kind, &child_id));
            result.push((child_kind, child_id));
        }
        result
    }

    /// Удалить запись любого вида. Возвращает `false`, если её не было.
    pub fn remove(&mut self, kind: EntityKind, id: &EntityId) -> bool {
        fn take<T: Stored>(items: &mut Vec<T>, id: &EntityId) -> bool {
            let before = items.len();
            items.retain(|item| item.id() != id);
            items.len() != before
        }

        match kind {
            EntityKind::Menu => take(&mut self.menus, id),
            EntityKind::Category => take(&mut self.categories, id),
            EntityKind::SubCategory => take(&mut self.sub_categories, id),
            EntityKind::Product => take(&mut self.products, id),
            EntityKind::Offer => take(&mut self.offers, id),
        }
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::catalog;
    use super::*;

    #[test]
    fn ancestry_follows_sub_category_chain() {
        let store = catalog();
        let ancestry = store.sub_category_ancestry(&EntityId::new("s3")).unwrap();
        assert_eq!(ancestry.category_id, EntityId::new("c2"));
        assert_eq!(ancestry.menu_id, EntityId::new("m1"));
        assert!(store.sub_category_ancestry(&EntityId::new("missing")).is_none());
    }

    #[test]
    fn next_order_is_counted_per_parent() {
        let store = catalog();
        let m1 = EntityId::new("m1");
        let m2 = EntityId::new("m2");
        assert_eq!(store.next_display_order::<Category>(Some(&m1)), 3);
        assert_eq!(store.next_display_order::<Category>(Some(&m2)), 2);
        assert_eq!(store.next_display_order::<Menu>(None), 3);
    }

    #[test]
    fn descendants_walk_the_whole_subtree() {
        let store = catalog();
        let mut ids: Vec<String> = store
            .descendants(EntityKind::Menu, &EntityId::new("m1"))
            .into_iter()
            .map(|(_, id)| id.to_string())
            .collect();
        ids.sort();
        assert_eq!(
            ids,
            vec!["c1", "c2", "o1", "p1", "p2", "p3", "p4", "s1", "s2", "s3"]
        );
        assert!(store
            .descendants(EntityKind::Category, &EntityId::new("c3"))
            .is_empty());
    }

    #[test]
    fn sorted_view_orders_by_display_order() {
        let mut store = catalog();
        store.menus[0].display_order = 5;
        let view = store.sorted_view::<Menu>(&HierarchySelection::new());
        let ids: Vec<&str> = view.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["m2", "m1"]);
    }

    #[test]
    fn remove_reports_missing_records() {
        let mut store = catalog();
        assert!(store.remove(EntityKind::Product, &EntityId::new("p1")));
        assert!(!store.remove(EntityKind::Product, &EntityId::new("p1")));
        assert_eq!(store.products.len(), 3);
    }
}
