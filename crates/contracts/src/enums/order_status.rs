use serde::{Deserialize, Serialize};

/// Статус заказа (pedido).
///
/// Допустимые переходы: `draft -> submitted -> approved`,
/// `draft | submitted -> cancelled`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    Draft,
    Submitted,
    Approved,
    Cancelled,
}

impl OrderStatus {
    pub fn code(&self) -> &'static str {
        match self {
            OrderStatus::Draft => "draft",
            OrderStatus::Submitted => "submitted",
            OrderStatus::Approved => "approved",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            OrderStatus::Draft => "Borrador",
            OrderStatus::Submitted => "Enviado",
            OrderStatus::Approved => "Aprobado",
            OrderStatus::Cancelled => "Cancelado",
        }
    }

    /// CSS-модификатор бейджа
    pub fn badge_color(&self) -> &'static str {
        match self {
            OrderStatus::Draft => "neutral",
            OrderStatus::Submitted => "info",
            OrderStatus::Approved => "success",
            OrderStatus::Cancelled => "error",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "draft" => Some(OrderStatus::Draft),
            "submitted" => Some(OrderStatus::Submitted),
            "approved" => Some(OrderStatus::Approved),
            "cancelled" => Some(OrderStatus::Cancelled),
            _ => None,
        }
    }

    pub fn all() -> [OrderStatus; 4] {
        [
            OrderStatus::Draft,
            OrderStatus::Submitted,
            OrderStatus::Approved,
            OrderStatus::Cancelled,
        ]
    }

    /// Позиции можно менять, а заказ удалять
    pub fn is_editable(&self) -> bool {
        matches!(self, OrderStatus::Draft | OrderStatus::Submitted)
    }

    /// Заказ держит резерв на складе
    pub fn holds_stock(&self) -> bool {
        self.is_editable()
    }

    pub fn can_transition_to(&self, next: OrderStatus) -> bool {
        matches!(
            (self, next),
            (OrderStatus::Draft, OrderStatus::Submitted)
                | (OrderStatus::Submitted, OrderStatus::Approved)
                | (OrderStatus::Draft, OrderStatus::Cancelled)
                | (OrderStatus::Submitted, OrderStatus::Cancelled)
        )
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_lifecycle() {
        assert!(OrderStatus::Draft.can_transition_to(OrderStatus::Submitted));
        assert!(OrderStatus::Submitted.can_transition_to(OrderStatus::Approved));
        assert!(!OrderStatus::Draft.can_transition_to(OrderStatus::Approved));
        assert!(!OrderStatus::Approved.can_transition_to(OrderStatus::Approved));
        assert!(!OrderStatus::Approved.can_transition_to(OrderStatus::Cancelled));
        assert!(!OrderStatus::Cancelled.can_transition_to(OrderStatus::Draft));
    }

    #[test]
    fn approved_and_cancelled_are_read_only() {
        assert!(OrderStatus::Draft.is_editable());
        assert!(OrderStatus::Submitted.is_editable());
        assert!(!OrderStatus::Approved.is_editable());
        assert!(!OrderStatus::Cancelled.is_editable());
    }

    #[test]
    fn codes_round_trip() {
        for s in OrderStatus::all() {
            assert_eq!(OrderStatus::from_code(s.code()), Some(s));
        }
        assert_eq!(OrderStatus::from_code("pending"), None);
    }
}
