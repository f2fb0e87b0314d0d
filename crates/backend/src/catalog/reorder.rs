//! Перестановка строки в отображаемом списке с пересчётом `display_order`

use std::collections::HashMap;

use contracts::domain::common::{AggregateRoot, EntityId};

use super::error::{CatalogError, CatalogResult};

/// Результат перестановки
#[derive(Debug, Clone)]
pub struct Reordered<T> {
    /// Отображаемый список в новом порядке, `display_order` = 1..N
    pub visible: Vec<T>,
    /// Полная коллекция в исходном порядке с обновлёнными `display_order`
    pub full: Vec<T>,
    /// Записи, у которых `display_order` действительно изменился
    pub changed: Vec<EntityId>,
}

fn checked_index(index: i64, len: usize) -> CatalogResult<usize> {
    usize::try_from(index)
        .ok()
        .filter(|i| *i < len)
        .ok_or(CatalogError::InvalidIndex { index, len })
}

/// Переместить элемент `old_index` видимого списка на позицию `new_index`
///
/// Элементы `full`, которых нет в `visible`, сохраняют свой `display_order`.
/// При `old_index == new_index` входные данные возвращаются без изменений.
pub fn reorder<T>(
    visible: &[T],
    full: &[T],
    old_index: i64,
    new_index: i64,
) -> CatalogResult<Reordered<T>>
where
    T: AggregateRoot + Clone,
{
    let old = checked_index(old_index, visible.len())?;
    let new = checked_index(new_index, visible.len())?;

    if old == new {
        return Ok(Reordered {
            visible: visible.to_vec(),
            full: full.to_vec(),
            changed: Vec::new(),
        });
    }

    let mut moved = visible.to_vec();
    let item = moved.remove(old);
    moved.insert(new, item);

    for (position, item) in moved.iter_mut().enumerate() {
        item.set_display_order(position as i32 + 1);
    }

    let new_orders: HashMap<&EntityId, i32> = moved
        .iter()
        .map(|item| (item.id(), item.display_order()))
        .collect();

    let mut changed = Vec::new();
    let merged = full
        .iter()
        .map(|item| {
            let mut item = item.clone();
            if let Some(order) = new_orders.get(item.id()).copied() {
                if item.display_order() != order {
                    item.set_display_order(order);
                    changed.push(item.id().clone());
                }
            }
            item
        })
        .collect();

    Ok(Reordered {
        visible: moved,
        full: merged,
        changed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::store::fixtures::{category, menu};

    fn orders<T: AggregateRoot>(items: &[T]) -> Vec<(String, i32)> {
        items
            .iter()
            .map(|i| (i.id().to_string(), i.display_order()))
            .collect()
    }

    #[test]
    fn moving_first_menu_to_the_end() {
        let list = vec![menu("m1", 1), menu("m2", 2), menu("m3", 3)];
        let result = reorder(&list, &list, 0, 2).unwrap();
        assert_eq!(
            orders(&result.visible),
            vec![("m2".into(), 1), ("m3".into(), 2), ("m1".into(), 3)]
        );
        // full collection keeps its storage order
        assert_eq!(
            orders(&result.full),
            vec![("m1".into(), 3), ("m2".into(), 1), ("m3".into(), 2)]
        );
        assert_eq!(result.changed.len(), 3);
    }

    #[test]
    fn same_index_is_identity() {
        let list = vec![menu("m1", 4), menu("m2", 9), menu("m3", 9)];
        for i in 0..list.len() as i64 {
            let result = reorder(&list, &list, i, i).unwrap();
            assert_eq!(result.visible, list);
            assert_eq!(result.full, list);
            assert!(result.changed.is_empty());
        }
    }

    #[test]
    fn out_of_range_indices_are_rejected() {
        let list = vec![menu("m1", 1), menu("m2", 2)];
        assert!(matches!(
            reorder(&list, &list, -1, 0),
            Err(CatalogError::InvalidIndex { index: -1, len: 2 })
        ));
        assert!(matches!(
            reorder(&list, &list, 0, 2),
            Err(CatalogError::InvalidIndex { index: 2, len: 2 })
        ));
        let empty: Vec<_> = Vec::new();
        assert!(reorder(&empty, &list, 0, 0).is_err());
    }

    #[test]
    fn every_move_renumbers_densely() {
        let list: Vec<_> = (1..=5).map(|i| menu(&format!("m{}", i), i * 10)).collect();
        for old in 0..5 {
            for new in 0..5 {
                if old == new {
                    continue;
                }
                let result = reorder(&list, &list, old, new).unwrap();
                let got: Vec<i32> = result.visible.iter().map(|m| m.display_order).collect();
                assert_eq!(got, vec![1, 2, 3, 4, 5]);
                assert_eq!(result.visible[new as usize].id, list[old as usize].id);
            }
        }
    }

    #[test]
    fn hidden_rows_keep_their_order() {
        let full = vec![
            category("c1", "m1", 1),
            category("x1", "m2", 1),
            category("c2", "m1", 2),
            category("x2", "m2", 2),
            category("c3", "m1", 3),
        ];
        let visible: Vec<_> = full
            .iter()
            .filter(|c| c.menu_id.as_str() == "m1")
            .cloned()
            .collect();

        let result = reorder(&visible, &full, 2, 0).unwrap();
        assert_eq!(
            orders(&result.full),
            vec![
                ("c1".into(), 2),
                ("x1".into(), 1),
                ("c2".into(), 3),
                ("x2".into(), 2),
                ("c3".into(), 1),
            ]
        );
    }

    #[test]
    fn only_actually_moved_rows_are_reported() {
        let list = vec![menu("m1", 1), menu("m2", 2), menu("m3", 3), menu("m4", 4)];
        let result = reorder(&list, &list, 1, 2).unwrap();
        let mut changed: Vec<&str> = result.changed.iter().map(|id| id.as_str()).collect();
        changed.sort();
        assert_eq!(changed, vec!["m2", "m3"]);
    }
}
