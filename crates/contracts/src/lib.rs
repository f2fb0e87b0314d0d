//! Общие типы каталога меню: агрегаты, DTO, фильтры иерархии и конверты API

pub mod domain;
pub mod shared;
