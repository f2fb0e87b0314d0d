use serde::{Deserialize, Serialize};

use crate::domain::common::EntityId;

/// Выбранные фильтры по уровням иерархии Menu → Category → SubCategory
///
/// `None` на уровне означает «без фильтра». Выбор верхнего уровня всегда
/// сбрасывает все нижние: фильтр категории из другого меню не сохраняется.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HierarchySelection {
    #[serde(default)]
    pub menu_id: Option<EntityId>,
    #[serde(default)]
    pub category_id: Option<EntityId>,
    #[serde(default)]
    pub sub_category_id: Option<EntityId>,
}

impl HierarchySelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Фильтр только по меню
    pub fn for_menu(menu_id: impl Into<EntityId>) -> Self {
        Self {
            menu_id: Some(menu_id.into()),
            ..Self::default()
        }
    }

    /// Собрать выбор из параметров запроса (пустые строки игнорируются)
    pub fn from_query(
        menu_id: Option<&str>,
        category_id: Option<&str>,
        sub_category_id: Option<&str>,
    ) -> Self {
        Self {
            menu_id: EntityId::parse_optional(menu_id),
            category_id: EntityId::parse_optional(category_id),
            sub_category_id: EntityId::parse_optional(sub_category_id),
        }
    }

    /// Выбрать меню; категория и подкатегория сбрасываются
    pub fn select_menu(&mut self, menu_id: Option<EntityId>) {
        self.menu_id = menu_id;
        self.category_id = None;
        self.sub_category_id = None;
    }

    /// Выбрать категорию; подкатегория сбрасывается
    pub fn select_category(&mut self, category_id: Option<EntityId>) {
        self.category_id = category_id;
        self.sub_category_id = None;
    }

    pub fn select_sub_category(&mut self, sub_category_id: Option<EntityId>) {
        self.sub_category_id = sub_category_id;
    }

    pub fn is_empty(&self) -> bool {
        self.menu_id.is_none() && self.category_id.is_none() && self.sub_category_id.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Copy)]
    enum Step {
        Menu(Option<i64>),
        Category(Option<i64>),
        SubCategory(Option<i64>),
    }

    fn run(selection: &mut HierarchySelection, step: Step) {
        match step {
            Step::Menu(id) => selection.select_menu(id.map(EntityId::from)),
            Step::Category(id) => selection.select_category(id.map(EntityId::from)),
            Step::SubCategory(id) => selection.select_sub_category(id.map(EntityId::from)),
        }
    }

    #[test]
    fn selecting_menu_always_clears_lower_levels() {
        let steps = [
            Step::Menu(Some(1)),
            Step::Category(Some(10)),
            Step::SubCategory(Some(100)),
            Step::Menu(None),
            Step::SubCategory(Some(101)),
            Step::Category(Some(11)),
            Step::Menu(Some(2)),
        ];
        // every prefix of the sequence, followed by a menu selection
        for end in 0..=steps.len() {
            let mut selection = HierarchySelection::new();
            for step in &steps[..end] {
                run(&mut selection, *step);
            }
            selection.select_menu(Some(EntityId::from(3)));
            assert_eq!(selection.menu_id, Some(EntityId::from(3)));
            assert_eq!(selection.category_id, None);
            assert_eq!(selection.sub_category_id, None);
        }
    }

    #[test]
    fn selecting_category_clears_sub_category_only() {
        let mut selection = HierarchySelection::for_menu("m1");
        selection.select_category(Some("c1".into()));
        selection.select_sub_category(Some("s1".into()));
        selection.select_category(Some("c2".into()));
        assert_eq!(selection.menu_id, Some(EntityId::new("m1")));
        assert_eq!(selection.category_id, Some(EntityId::new("c2")));
        assert_eq!(selection.sub_category_id, None);
    }

    #[test]
    fn query_with_blank_values_is_empty() {
        let selection = HierarchySelection::from_query(Some(""), None, Some(" "));
        assert!(selection.is_empty());
    }
}
