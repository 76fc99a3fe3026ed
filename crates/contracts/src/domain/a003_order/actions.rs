//! Доступные действия в карточке заказа.

use crate::enums::order_status::OrderStatus;
use crate::enums::user_profile::UserProfile;

/// Кнопки карточки заказа для профиля, статуса и локального состояния.
///
/// Пока есть несохранённые правки, заказ нельзя отправить или одобрить:
/// сервер увидел бы старые количества.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OrderActions {
    pub edit: bool,
    pub save: bool,
    pub submit: bool,
    pub approve: bool,
    pub cancel: bool,
}

impl OrderActions {
    pub fn compute(profile: UserProfile, status: OrderStatus, has_items: bool, dirty: usize) -> Self {
        let edit = profile.can_edit_orders() && status.is_editable();
        let clean = dirty == 0;
        Self {
            edit,
            save: edit && !clean,
            submit: profile.can_edit_orders()
                && status.can_transition_to(OrderStatus::Submitted)
                && has_items
                && clean,
            approve: profile.can_approve_orders()
                && status.can_transition_to(OrderStatus::Approved)
                && clean,
            cancel: profile.can_approve_orders() && status.can_transition_to(OrderStatus::Cancelled),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsaved_edits_block_submit_and_approve() {
        let draft = OrderActions::compute(UserProfile::Seller, OrderStatus::Draft, true, 2);
        assert!(draft.edit && draft.save);
        assert!(!draft.submit);

        let submitted = OrderActions::compute(UserProfile::Manager, OrderStatus::Submitted, true, 1);
        assert!(!submitted.approve);
        assert!(submitted.cancel);

        let saved = OrderActions::compute(UserProfile::Manager, OrderStatus::Submitted, true, 0);
        assert!(saved.approve);
        assert!(!saved.save);
    }

    #[test]
    fn save_needs_edit_rights() {
        let viewer = OrderActions::compute(UserProfile::Viewer, OrderStatus::Draft, true, 3);
        assert_eq!(viewer, OrderActions::default());

        let approved = OrderActions::compute(UserProfile::Admin, OrderStatus::Approved, true, 1);
        assert!(!approved.edit && !approved.save);
        assert!(!approved.cancel);
    }

    #[test]
    fn empty_order_cannot_be_submitted() {
        let actions = OrderActions::compute(UserProfile::Seller, OrderStatus::Draft, false, 0);
        assert!(actions.edit);
        assert!(!actions.submit);
        assert!(!actions.approve);
    }
}
