//! ViewModel for order details

use contracts::domain::a003_order::actions::OrderActions;
use contracts::domain::a003_order::aggregate::{remove_order_row, Order, OrderItem, OrderListRow};
use contracts::domain::a003_order::dirty_set::{BatchSaveOutcome, DirtySet};
use contracts::domain::a003_order::lines::{total_amount, total_units};
use contracts::enums::order_status::OrderStatus;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::domain::a002_product::ui::picker::PickRequest;
use crate::domain::a003_order::api;
use crate::shared::api_utils::ApiClientError;
use crate::shared::query_cache::{use_query_cache, QueryCache, KEY_INVENTORY, KEY_ORDERS};
use crate::shared::toast::{use_toasts, Toasts};
use crate::system::auth::context::{use_auth, AuthContext};

/// Какое поле позиции правится в карточке
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemField {
    Cantidad,
    Precio,
}

#[derive(Clone, Copy)]
pub struct OrderDetailsVm {
    pub id: StoredValue<String>,
    pub order: RwSignal<Option<Order>>,
    pub items: RwSignal<Vec<OrderItem>>,
    /// Позиции в том виде, в каком они лежат на сервере (без локальных правок)
    pub server_items: RwSignal<Vec<OrderItem>>,
    pub dirty: RwSignal<DirtySet>,

    pub loading: RwSignal<bool>,
    pub busy: RwSignal<bool>,
    pub error: RwSignal<Option<String>>,

    pub picker_open: RwSignal<bool>,
    pub confirm_delete_order: RwSignal<bool>,
    pub deleting_item: RwSignal<Option<OrderItem>>,

    auth: AuthContext,
    cache: QueryCache,
    toasts: Toasts,
}

impl OrderDetailsVm {
    pub fn new(id: String) -> Self {
        Self {
            id: StoredValue::new(id),
            order: RwSignal::new(None),
            items: RwSignal::new(Vec::new()),
            server_items: RwSignal::new(Vec::new()),
            dirty: RwSignal::new(DirtySet::new()),
            loading: RwSignal::new(false),
            busy: RwSignal::new(false),
            error: RwSignal::new(None),
            picker_open: RwSignal::new(false),
            confirm_delete_order: RwSignal::new(false),
            deleting_item: RwSignal::new(None),
            auth: use_auth(),
            cache: use_query_cache(),
            toasts: use_toasts(),
        }
    }

    pub fn status(&self) -> Signal<OrderStatus> {
        let order = self.order;
        Signal::derive(move || order.with(|o| o.as_ref().map(|o| o.status).unwrap_or_default()))
    }

    fn actions(&self) -> Signal<OrderActions> {
        let auth = self.auth;
        let status = self.status();
        let items = self.items;
        let dirty = self.dirty;
        Signal::derive(move || {
            OrderActions::compute(
                auth.profile(),
                status.get(),
                items.with(|i| !i.is_empty()),
                dirty.with(DirtySet::len),
            )
        })
    }

    /// Позиции можно менять: статус позволяет и профиль не «Consulta»
    pub fn can_edit(&self) -> Signal<bool> {
        let order = self.order;
        let actions = self.actions();
        Signal::derive(move || order.with(Option::is_some) && actions.get().edit)
    }

    pub fn can_save(&self) -> Signal<bool> {
        let actions = self.actions();
        Signal::derive(move || actions.get().save)
    }

    pub fn can_approve(&self) -> Signal<bool> {
        let actions = self.actions();
        Signal::derive(move || actions.get().approve)
    }

    pub fn can_submit(&self) -> Signal<bool> {
        let actions = self.actions();
        Signal::derive(move || actions.get().submit)
    }

    pub fn can_cancel(&self) -> Signal<bool> {
        let actions = self.actions();
        Signal::derive(move || actions.get().cancel)
    }

    pub fn total_units(&self) -> Signal<f64> {
        let items = self.items;
        Signal::derive(move || items.with(|i| total_units(i)))
    }

    pub fn total_amount(&self) -> Signal<f64> {
        let items = self.items;
        Signal::derive(move || items.with(|i| total_amount(i)))
    }

    pub fn dirty_count(&self) -> Signal<usize> {
        let dirty = self.dirty;
        Signal::derive(move || dirty.with(DirtySet::len))
    }

    pub fn load(&self) {
        let vm = *self;
        vm.loading.set(true);
        vm.error.set(None);
        spawn_local(async move {
            match api::fetch_order(&vm.id.get_value()).await {
                Ok(detail) => {
                    vm.order.set(Some(detail.pedido));
                    vm.server_items.set(detail.items.clone());
                    vm.items.set(detail.items);
                    vm.dirty.update(DirtySet::clear);
                }
                Err(err) => {
                    vm.error.set(Some(err.message()));
                    if err.is_unauthorized() {
                        vm.auth.report("No se pudo cargar el pedido", err);
                    }
                }
            }
            vm.loading.set(false);
        });
    }

    /// Локальная правка поля; позиция попадает в набор несохранённых
    pub fn edit_item(&self, item_id: &str, field: ItemField, value: f64) {
        if !value.is_finite() || value < 0.0 {
            return;
        }
        self.items.update(|items| {
            if let Some(item) = items.iter_mut().find(|i| i.id == item_id) {
                match field {
                    ItemField::Cantidad => item.cantidad = value,
                    ItemField::Precio => item.precio = value,
                }
            }
        });
        self.dirty.update(|d| d.mark(item_id));
    }

    /// Последовательно сохраняет все изменённые позиции
    pub fn save_dirty(&self) {
        let vm = *self;
        if !vm.can_save().get_untracked() {
            return;
        }
        let pending = vm
            .dirty
            .with_untracked(|d| vm.items.with_untracked(|items| d.pending_updates(items)));
        if pending.is_empty() {
            return;
        }
        vm.busy.set(true);
        spawn_local(async move {
            let pedido_id = vm.id.get_value();
            let mut outcome = BatchSaveOutcome::default();
            for (item_id, dto) in pending {
                match api::update_item(&pedido_id, &item_id, &dto).await {
                    Ok(()) => {
                        outcome.saved += 1;
                        vm.dirty.update(|d| d.unmark(&item_id));
                        vm.server_items.update(|items| {
                            if let Some(item) = items.iter_mut().find(|i| i.id == item_id) {
                                item.cantidad = dto.cantidad.unwrap_or(item.cantidad);
                                item.precio = dto.precio.unwrap_or(item.precio);
                            }
                        });
                    }
                    Err(err) if err.is_unauthorized() => {
                        vm.auth.report("No se pudo guardar", err);
                        vm.busy.set(false);
                        return;
                    }
                    Err(err) => {
                        log::warn!("order {}: item {} not saved: {}", pedido_id, item_id, err);
                        outcome.failed.push(item_id);
                    }
                }
            }
            if outcome.is_success() {
                vm.toasts.success(outcome.summary());
            } else {
                vm.toasts.error(outcome.summary(), None);
            }
            vm.after_change();
            vm.busy.set(false);
        });
    }

    pub fn delete_item(&self, item: OrderItem) {
        let vm = *self;
        vm.busy.set(true);
        spawn_local(async move {
            match api::delete_item(&vm.id.get_value(), &item.id).await {
                Ok(()) => {
                    vm.items.update(|items| items.retain(|i| i.id != item.id));
                    vm.server_items.update(|items| items.retain(|i| i.id != item.id));
                    vm.dirty.update(|d| d.unmark(&item.id));
                    vm.toasts.success("Ítem eliminado");
                    vm.after_change();
                }
                Err(err) => vm.auth.report("No se pudo eliminar el ítem", err),
            }
            vm.deleting_item.set(None);
            vm.busy.set(false);
        });
    }

    pub fn add_from_picker(&self, request: PickRequest) {
        let vm = *self;
        vm.busy.set(true);
        spawn_local(async move {
            let pedido_id = vm.id.get_value();
            let producto_id = request.row.id.clone();
            match api::add_item_reconciled(&pedido_id, &producto_id, request.cantidad, request.previous).await {
                Ok(items) => {
                    vm.merge_items(items, &producto_id);
                    vm.toasts.success("Ítem agregado");
                    vm.after_change();
                }
                Err(err) => vm.auth.report("No se pudo agregar", err),
            }
            vm.busy.set(false);
        });
    }

    /// Свежие позиции с сервера; несохранённые правки других строк остаются поверх
    fn merge_items(&self, fresh: Vec<OrderItem>, producto_id: &str) {
        self.server_items.set(fresh.clone());
        let local = self.items.get_untracked();
        let mut merged = Vec::new();
        self.dirty
            .update(|d| merged = d.merge_fresh(fresh, &local, producto_id));
        self.items.set(merged);
    }

    pub fn delete_order(&self, on_done: Callback<()>) {
        let vm = *self;
        vm.busy.set(true);
        spawn_local(async move {
            match api::delete_order(&vm.id.get_value()).await {
                Ok(()) => {
                    let pedido_id = vm.id.get_value();
                    vm.toasts.success("Pedido eliminado");
                    vm.cache
                        .patch::<Vec<OrderListRow>, _>(KEY_ORDERS, |rows| {
                            remove_order_row(rows, &pedido_id);
                        });
                    vm.cache.invalidate(KEY_INVENTORY);
                    vm.confirm_delete_order.set(false);
                    on_done.run(());
                }
                Err(err) => {
                    vm.confirm_delete_order.set(false);
                    vm.auth.report("No se pudo eliminar el pedido", err);
                }
            }
            vm.busy.set(false);
        });
    }

    pub fn submit(&self) {
        self.change_status(StatusAction::Submit);
    }

    pub fn approve(&self) {
        self.change_status(StatusAction::Approve);
    }

    pub fn cancel(&self) {
        self.change_status(StatusAction::Cancel);
    }

    fn change_status(&self, action: StatusAction) {
        let vm = *self;
        vm.busy.set(true);
        spawn_local(async move {
            let pedido_id = vm.id.get_value();
            let result: Result<_, ApiClientError> = match action {
                StatusAction::Submit => api::submit_order(&pedido_id).await,
                StatusAction::Approve => api::approve_order(&pedido_id).await,
                StatusAction::Cancel => api::cancel_order(&pedido_id).await,
            };
            match result {
                Ok(response) => {
                    vm.order.update(|o| {
                        if let Some(o) = o {
                            response.apply_to_order(o);
                        }
                    });
                    vm.toasts.success(action.success_text());
                    // Строки списка меняют только статус; резерв склада пересчитывается
                    let patched = vm.cache.patch::<Vec<OrderListRow>, _>(KEY_ORDERS, |rows| {
                        response.apply_to_rows(rows, &pedido_id);
                    });
                    if !patched {
                        log::debug!("order {}: list not cached, nothing to patch", pedido_id);
                    }
                    vm.cache.invalidate(KEY_INVENTORY);
                }
                Err(err) => vm.auth.report(action.error_text(), err),
            }
            vm.busy.set(false);
        });
    }

    /// Список заказов и остатки устарели
    fn after_change(&self) {
        self.cache.invalidate(KEY_ORDERS);
        self.cache.invalidate(KEY_INVENTORY);
    }
}

#[derive(Debug, Clone, Copy)]
enum StatusAction {
    Submit,
    Approve,
    Cancel,
}

impl StatusAction {
    fn success_text(&self) -> &'static str {
        match self {
            StatusAction::Submit => "Pedido enviado",
            StatusAction::Approve => "Pedido aprobado",
            StatusAction::Cancel => "Pedido cancelado",
        }
    }

    fn error_text(&self) -> &'static str {
        match self {
            StatusAction::Submit => "No se pudo enviar",
            StatusAction::Approve => "No se pudo aprobar",
            StatusAction::Cancel => "No se pudo cancelar",
        }
    }
}
