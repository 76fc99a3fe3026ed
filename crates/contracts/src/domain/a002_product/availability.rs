//! Арифметика доступного остатка.
//!
//! Остаток = приход - расход. Доступно = остаток - то, что держат открытые
//! заказы (draft/submitted). Сервер проверяет авторитетно, клиент только
//! подсказывает и ограничивает ввод.

use crate::shared::money::format_quantity;

/// Сколько ещё можно добавить из пикера: доступное за вычетом того,
/// что уже лежит в этом заказе. Никогда не меньше нуля.
pub fn available_for_picker(cantidad_disponible: f64, already_in_order: f64) -> f64 {
    (cantidad_disponible - already_in_order).max(0.0)
}

/// Ограничивает ввод диапазоном `[0, available]`
pub fn clamp_quantity(requested: f64, available: f64) -> f64 {
    if !requested.is_finite() {
        return 0.0;
    }
    requested.clamp(0.0, available.max(0.0))
}

/// Количество для добавления или `None`, если добавлять нечего
pub fn pick_quantity(requested: f64, available: f64) -> Option<f64> {
    let q = clamp_quantity(requested, available);
    if q > 0.0 {
        Some(q)
    } else {
        None
    }
}

/// Серверная проверка строки заказа.
/// `Err(available)` если итоговое количество строки больше доступного.
pub fn check_line_quantity(line_quantity: f64, stock: f64, held_by_other_orders: f64) -> Result<(), f64> {
    let available = stock - held_by_other_orders;
    if line_quantity > available + 1e-9 {
        Err(available.max(0.0))
    } else {
        Ok(())
    }
}

pub fn exceeds_available_message(available: f64) -> String {
    format!(
        "Cantidad solicitada supera el disponible ({})",
        format_quantity(available)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picker_subtracts_quantity_already_in_order() {
        assert_eq!(available_for_picker(30.0, 12.0), 18.0);
        assert_eq!(available_for_picker(5.0, 9.0), 0.0);
    }

    #[test]
    fn quantity_above_available_is_clamped() {
        assert_eq!(clamp_quantity(50.0, 18.0), 18.0);
        assert_eq!(clamp_quantity(-3.0, 18.0), 0.0);
        assert_eq!(clamp_quantity(f64::NAN, 18.0), 0.0);
        assert_eq!(pick_quantity(50.0, 18.0), Some(18.0));
        assert_eq!(pick_quantity(0.0, 18.0), None);
        assert_eq!(pick_quantity(4.0, 0.0), None);
    }

    #[test]
    fn server_check() {
        assert!(check_line_quantity(10.0, 40.0, 30.0).is_ok());
        assert_eq!(check_line_quantity(11.0, 40.0, 30.0), Err(10.0));
        assert_eq!(check_line_quantity(1.0, 5.0, 9.0), Err(0.0));
        assert_eq!(
            exceeds_available_message(10.0),
            "Cantidad solicitada supera el disponible (10)"
        );
    }
}
