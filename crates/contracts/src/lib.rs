//! Общие типы и правила для frontend и backend.
//!
//! Всё, что пересекает границу HTTP (DTO), и вся чистая логика,
//! которую нужно тестировать без браузера, живёт здесь.

pub mod domain;
pub mod enums;
pub mod shared;
pub mod system;
