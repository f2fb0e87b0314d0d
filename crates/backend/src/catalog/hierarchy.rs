//! Фильтр иерархии Menu → Category → SubCategory → Product
//!
//! Чистые функции без побочных эффектов: порядок входной коллекции сохраняется,
//! идентификаторы сравниваются через нормализованный `EntityId`.

use contracts::domain::a002_category::aggregate::Category;
use contracts::domain::a003_sub_category::aggregate::SubCategory;
use contracts::domain::a004_product::aggregate::Product;
use contracts::domain::a005_offer::aggregate::Offer;
use contracts::shared::hierarchy::HierarchySelection;

use super::store::EntityStore;

/// Категории выбранного меню (все, если меню не выбрано)
pub fn filter_categories<'a>(
    categories: &'a [Category],
    selection: &HierarchySelection,
) -> Vec<&'a Category> {
    match &selection.menu_id {
        Some(menu_id) => categories.iter().filter(|c| &c.menu_id == menu_id).collect(),
        None => categories.iter().collect(),
    }
}

/// Подкатегория видна, если её категория прошла фильтр меню
/// и (при выбранной категории) принадлежит именно ей.
pub fn filter_sub_categories<'a>(
    categories: &[Category],
    sub_categories: &'a [SubCategory],
    selection: &HierarchySelection,
) -> Vec<&'a SubCategory> {
    let visible_categories = filter_categories(categories, selection);

    sub_categories
        .iter()
        .filter(|sub| {
            let matches_menu = selection.menu_id.is_none()
                || visible_categories.iter().any(|c| c.id == sub.category_id);
            let matches_category = selection
                .category_id
                .as_ref()
                .map_or(true, |category_id| &sub.category_id == category_id);
            matches_menu && matches_category
        })
        .collect()
}

/// Позиция видна, если её подкатегория прошла фильтры меню и категории,
/// а при выбранной подкатегории совпадает с ней.
pub fn filter_products<'a>(
    categories: &[Category],
    sub_categories: &[SubCategory],
    products: &'a [Product],
    selection: &HierarchySelection,
) -> Vec<&'a Product> {
    let visible_sub_categories = filter_sub_categories(categories, sub_categories, selection);

    products
        .iter()
        .filter(|product| {
            let owner = visible_sub_categories
                .iter()
                .find(|sub| sub.id == product.sub_category_id);

            let matches_menu = selection.menu_id.is_none() || owner.is_some();
            let matches_category = selection
                .category_id
                .as_ref()
                .map_or(true, |category_id| {
                    owner.map_or(false, |sub| &sub.category_id == category_id)
                });
            let matches_sub_category = selection
                .sub_category_id
                .as_ref()
                .map_or(true, |sub_id| &product.sub_category_id == sub_id);

            matches_menu && matches_category && matches_sub_category
        })
        .collect()
}

/// Акции выбранного меню
pub fn filter_offers<'a>(offers: &'a [Offer], selection: &HierarchySelection) -> Vec<&'a Offer> {
    match &selection.menu_id {
        Some(menu_id) => offers.iter().filter(|o| &o.menu_id == menu_id).collect(),
        None => offers.iter().collect(),
    }
}

/// Все три отфильтрованных уровня для одного выбора
#[derive(Debug)]
pub struct HierarchyView<'a> {
    pub categories: Vec<&'a Category>,
    pub sub_categories: Vec<&'a SubCategory>,
    pub products: Vec<&'a Product>,
}

impl<'a> HierarchyView<'a> {
    pub fn compute(store: &'a EntityStore, selection: &HierarchySelection) -> Self {
        Self {
            categories: filter_categories(&store.categories, selection),
            sub_categories: filter_sub_categories(
                &store.categories,
                &store.sub_categories,
                selection,
            ),
            products: filter_products(
                &store.categories,
                &store.sub_categories,
                &store.products,
                selection,
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::store::fixtures::{catalog, category};
    use contracts::domain::common::EntityId;

    fn ids<T: contracts::domain::common::AggregateRoot>(items: &[&T]) -> Vec<String> {
        items.iter().map(|i| i.id().to_string()).collect()
    }

    #[test]
    fn categories_of_selected_menu_only() {
        let categories = vec![category("c1", "m1", 1), category("c2", "m2", 1)];
        let selection = HierarchySelection::for_menu("m1");
        let visible = filter_categories(&categories, &selection);
        assert_eq!(ids(&visible), vec!["c1"]);
    }

    #[test]
    fn numeric_and_string_menu_ids_match() {
        let categories = vec![category("7", "3", 1), category("8", "4", 1)];
        let selection = HierarchySelection::for_menu(EntityId::from(3));
        assert_eq!(ids(&filter_categories(&categories, &selection)), vec!["7"]);
    }

    #[test]
    fn no_filter_returns_everything_in_order() {
        let store = catalog();
        let view = HierarchyView::compute(&store, &HierarchySelection::new());
        assert_eq!(ids(&view.categories), vec!["c1", "c2", "c3"]);
        assert_eq!(ids(&view.sub_categories), vec!["s1", "s2", "s3"]);
        assert_eq!(ids(&view.products), vec!["p1", "p2", "p3", "p4"]);
    }

    #[test]
    fn menu_filter_cascades_through_levels() {
        let mut store = catalog();
        store.products.push(crate::catalog::store::fixtures::product(
            "p9", "s9", "c3", "m2", 1,
        ));
        store
            .sub_categories
            .push(crate::catalog::store::fixtures::sub_category("s9", "c3", 1));

        let view = HierarchyView::compute(&store, &HierarchySelection::for_menu("m2"));
        assert_eq!(ids(&view.categories), vec!["c3"]);
        assert_eq!(ids(&view.sub_categories), vec!["s9"]);
        assert_eq!(ids(&view.products), vec!["p9"]);
    }

    #[test]
    fn category_and_sub_category_filters_narrow_products() {
        let store = catalog();
        let mut selection = HierarchySelection::for_menu("m1");
        selection.select_category(Some("c1".into()));
        let view = HierarchyView::compute(&store, &selection);
        assert_eq!(ids(&view.sub_categories), vec!["s1", "s2"]);
        assert_eq!(ids(&view.products), vec!["p1", "p2", "p3"]);

        selection.select_sub_category(Some("s2".into()));
        let view = HierarchyView::compute(&store, &selection);
        assert_eq!(ids(&view.products), vec!["p3"]);
    }

    #[test]
    fn category_filter_without_menu_filter() {
        let store = catalog();
        let selection = HierarchySelection {
            category_id: Some("c2".into()),
            ..Default::default()
        };
        let view = HierarchyView::compute(&store, &selection);
        assert_eq!(ids(&view.sub_categories), vec!["s3"]);
        assert_eq!(ids(&view.products), vec!["p4"]);
    }

    #[test]
    fn products_of_orphaned_sub_categories_hide_under_menu_filter() {
        let mut store = catalog();
        store.sub_categories.retain(|s| s.id.as_str() != "s3");
        let view = HierarchyView::compute(&store, &HierarchySelection::for_menu("m1"));
        assert_eq!(ids(&view.products), vec!["p1", "p2", "p3"]);
        // without a filter the orphan is still listed
        let view = HierarchyView::compute(&store, &HierarchySelection::new());
        assert_eq!(view.products.len(), 4);
    }

    #[test]
    fn adding_category_filter_never_widens_sub_categories() {
        let store = catalog();
        for menu in ["m1", "m2"] {
            let wide = filter_sub_categories(
                &store.categories,
                &store.sub_categories,
                &HierarchySelection::for_menu(menu),
            );
            for category in &store.categories {
                let mut selection = HierarchySelection::for_menu(menu);
                selection.select_category(Some(category.id.clone()));
                let narrow =
                    filter_sub_categories(&store.categories, &store.sub_categories, &selection);
                for sub in narrow {
                    assert!(wide.iter().any(|w| w.id == sub.id));
                }
            }
        }
    }

    #[test]
    fn offers_follow_menu_filter() {
        let store = catalog();
        assert_eq!(filter_offers(&store.offers, &HierarchySelection::for_menu("m1")).len(), 1);
        assert!(filter_offers(&store.offers, &HierarchySelection::for_menu("m2")).is_empty());
    }
}
