use super::{EntityId, EntityKind, EntityMetadata};

/// Трейт для корня агрегата каталога
///
/// Общий контракт для Menu, Category, SubCategory, Product и Offer: идентичность,
/// статус, порядок отображения и область (родитель), внутри которой этот порядок действует.
pub trait AggregateRoot {
    // ============================================================================
    // Методы экземпляра (данные конкретной записи)
    // ============================================================================

    /// Получить ID записи
    fn id(&self) -> &EntityId;

    /// Получить название записи
    fn name(&self) -> &str;

    /// Активна ли запись
    fn status(&self) -> bool;

    fn set_status(&mut self, status: bool);

    /// Позиция среди записей того же родителя (начиная с 1)
    fn display_order(&self) -> i32;

    fn set_display_order(&mut self, order: i32);

    /// Родитель, в пределах которого действует `display_order`.
    /// `None` у корня иерархии (меню).
    fn scope_id(&self) -> Option<&EntityId>;

    /// Получить метаданные жизненного цикла
    fn metadata(&self) -> &EntityMetadata;

    /// Получить изменяемые метаданные
    fn metadata_mut(&mut self) -> &mut EntityMetadata;

    // ============================================================================
    // Метаданные класса агрегата (статические данные)
    // ============================================================================

    fn kind() -> EntityKind;

    /// Индекс агрегата в системе (например, "a001")
    fn aggregate_index() -> &'static str;

    /// Имя коллекции для БД (например, "menu")
    fn collection_name() -> &'static str;

    /// Имя элемента для UI (единственное число)
    fn element_name() -> &'static str;

    /// Имя списка для UI (множественное число)
    fn list_name() -> &'static str;

    // ============================================================================
    // Методы с реализацией по умолчанию
    // ============================================================================

    /// Полное имя агрегата, оно же имя таблицы (например, "a001_menu")
    fn full_name() -> String {
        format!("{}_{}", Self::aggregate_index(), Self::collection_name())
    }

    /// Обновить timestamp
    fn touch(&mut self) {
        self.metadata_mut().touch();
    }
}

/// Реализация методов экземпляра для агрегатов с одинаковым набором полей
/// (`id`, `name`, `status`, `display_order`, `metadata`).
#[macro_export]
macro_rules! impl_catalog_fields {
    () => {
        fn id(&self) -> &$crate::domain::common::EntityId {
            &self.id
        }

        fn name(&self) -> &str {
            &self.name
        }

        fn status(&self) -> bool {
            self.status
        }

        fn set_status(&mut self, status: bool) {
            self.status = status;
        }

        fn display_order(&self) -> i32 {
            self.display_order
        }

        fn set_display_order(&mut self, order: i32) {
            self.display_order = order;
        }

        fn metadata(&self) -> &$crate::domain::common::EntityMetadata {
            &self.metadata
        }

        fn metadata_mut(&mut self) -> &mut $crate::domain::common::EntityMetadata {
            &mut self.metadata
        }
    };
}
