use contracts::domain::common::{EntityId, EntityKind};
use thiserror::Error;

/// Ошибки ядра каталога
///
/// Ни одна из них не фатальна для процесса: обработчик HTTP превращает её
/// в ответ с кодом 4xx/5xx, состояние хранилища при этом не меняется.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Некорректные входные данные (имя, цена, отсутствующий или несуществующий родитель)
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("{kind} '{id}' not found")]
    NotFound { kind: EntityKind, id: EntityId },

    /// Индекс перестановки вне диапазона `[0, len)`
    #[error("Index {index} is out of range for a list of {len} rows")]
    InvalidIndex { index: i64, len: usize },

    /// Удаление запрещено политикой `restrict`
    #[error("{kind} '{id}' still has {children} dependent record(s)")]
    HasChildren {
        kind: EntityKind,
        id: EntityId,
        children: usize,
    },

    /// Не удалось сохранить изменение; локальное состояние откатено
    #[error("Persistence failed: {0}")]
    Persistence(String),
}

impl CatalogError {
    pub fn not_found(kind: EntityKind, id: &EntityId) -> Self {
        CatalogError::NotFound {
            kind,
            id: id.clone(),
        }
    }
}

pub type CatalogResult<T> = Result<T, CatalogError>;
