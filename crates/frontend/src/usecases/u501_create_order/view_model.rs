//! ViewModel мастера «Nuevo pedido»: черновик создаётся один раз,
//! дальше все правки идут прямо в заказ на сервере.

use chrono::Local;
use contracts::domain::a001_client::aggregate::Client;
use contracts::domain::a003_order::aggregate::{OrderItem, StartOrderDto, UpdateItemDto};
use contracts::domain::a003_order::lines::{total_amount, total_units};
use contracts::shared::dates::is_valid_date;
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::state::{fill_if_empty, OrderSummary, WizardStep};
use crate::domain::a002_product::ui::picker::PickRequest;
use crate::domain::a003_order::api;
use crate::domain::a003_order::ui::details::view_model::ItemField;
use crate::shared::export::export_csv;
use crate::shared::query_cache::{use_query_cache, QueryCache, KEY_INVENTORY, KEY_ORDERS};
use crate::shared::toast::{use_toasts, Toasts};
use crate::system::auth::context::{use_auth, AuthContext};

#[derive(Clone, Copy)]
pub struct CreateOrderVm {
    pub step: RwSignal<WizardStep>,

    // Шаг 1
    pub client: RwSignal<Option<Client>>,
    pub cliente_nombre: RwSignal<String>,
    pub cliente_telefono: RwSignal<String>,
    pub direccion_entrega: RwSignal<String>,
    pub fecha_entrega: RwSignal<String>,

    // Шаг 2
    pub pedido_id: RwSignal<Option<String>>,
    pub items: RwSignal<Vec<OrderItem>>,
    pub picker_open: RwSignal<bool>,
    pub deleting_item: RwSignal<Option<OrderItem>>,

    pub busy: RwSignal<bool>,

    auth: AuthContext,
    cache: QueryCache,
    toasts: Toasts,
}

impl CreateOrderVm {
    pub fn new() -> Self {
        Self {
            step: RwSignal::new(WizardStep::Client),
            client: RwSignal::new(None),
            cliente_nombre: RwSignal::new(String::new()),
            cliente_telefono: RwSignal::new(String::new()),
            direccion_entrega: RwSignal::new(String::new()),
            fecha_entrega: RwSignal::new(String::new()),
            pedido_id: RwSignal::new(None),
            items: RwSignal::new(Vec::new()),
            picker_open: RwSignal::new(false),
            deleting_item: RwSignal::new(None),
            busy: RwSignal::new(false),
            auth: use_auth(),
            cache: use_query_cache(),
            toasts: use_toasts(),
        }
    }

    /// Черновик уже создан: поля шага 1 больше не меняют заказ
    pub fn draft_created(&self) -> Signal<bool> {
        let pedido_id = self.pedido_id;
        Signal::derive(move || pedido_id.with(Option::is_some))
    }

    pub fn can_continue(&self) -> Signal<bool> {
        let vm = *self;
        Signal::derive(move || {
            vm.pedido_id.with(Option::is_some)
                || (!vm.cliente_nombre.with(|s| s.trim().is_empty())
                    && !vm.cliente_telefono.with(|s| s.trim().is_empty())
                    && !vm.direccion_entrega.with(|s| s.trim().is_empty())
                    && vm.fecha_entrega.with(|s| is_valid_date(s)))
        })
    }

    pub fn can_submit(&self) -> Signal<bool> {
        let items = self.items;
        let busy = self.busy;
        Signal::derive(move || !busy.get() && items.with(|i| !i.is_empty()))
    }

    pub fn total_units(&self) -> Signal<f64> {
        let items = self.items;
        Signal::derive(move || items.with(|i| total_units(i)))
    }

    pub fn total_amount(&self) -> Signal<f64> {
        let items = self.items;
        Signal::derive(move || items.with(|i| total_amount(i)))
    }

    /// Выбор клиента: имя берётся всегда, телефон и адрес только в пустые поля
    pub fn apply_client(&self, client: &Client) {
        self.cliente_nombre.set(client.nombre.clone());
        let telefono = client.telefono.clone().unwrap_or_default();
        if let Some(v) = fill_if_empty(&self.cliente_telefono.get_untracked(), &telefono) {
            self.cliente_telefono.set(v);
        }
        if let Some(v) = fill_if_empty(&self.direccion_entrega.get_untracked(), &client.delivery_address()) {
            self.direccion_entrega.set(v);
        }
    }

    fn start_dto(&self) -> StartOrderDto {
        let now = Local::now();
        StartOrderDto {
            cliente_id: self.client.with_untracked(|c| c.as_ref().map(|c| c.id.clone())),
            cliente_nombre: self.cliente_nombre.get_untracked().trim().to_string(),
            cliente_telefono: self.cliente_telefono.get_untracked().trim().to_string(),
            direccion_entrega: self.direccion_entrega.get_untracked().trim().to_string(),
            fecha_entrega: self.fecha_entrega.get_untracked(),
            fecha_local: Some(now.format("%Y-%m-%d").to_string()),
            hora_local: Some(now.format("%H:%M").to_string()),
        }
    }

    /// Шаг 1 -> 2. Повторный проход (после «Atrás») заказ не пересоздаёт.
    pub fn continue_to_items(&self) {
        if self.pedido_id.with_untracked(Option::is_some) {
            self.step.set(WizardStep::Items);
            return;
        }
        let dto = self.start_dto();
        let errors = dto.validate();
        if !errors.is_empty() {
            self.toasts.error("Completa los datos del pedido", Some(errors.join("; ")));
            return;
        }

        let vm = *self;
        vm.busy.set(true);
        spawn_local(async move {
            match api::start_order(&dto).await {
                Ok(id) => {
                    log::info!("wizard: draft order {} created", id);
                    vm.pedido_id.set(Some(id));
                    vm.toasts.success("Pedido creado");
                    vm.cache.invalidate(KEY_ORDERS);
                    vm.step.set(WizardStep::Items);
                }
                Err(err) => vm.auth.report("No se pudo crear el pedido", err),
            }
            vm.busy.set(false);
        });
    }

    pub fn back(&self) {
        self.step.update(|s| {
            *s = match *s {
                WizardStep::Items => WizardStep::Client,
                other => other,
            }
        });
    }

    fn after_change(&self) {
        self.cache.invalidate(KEY_ORDERS);
        self.cache.invalidate(KEY_INVENTORY);
    }

    pub fn add_from_picker(&self, request: PickRequest) {
        let Some(pedido_id) = self.pedido_id.get_untracked() else {
            return;
        };
        let vm = *self;
        vm.busy.set(true);
        spawn_local(async move {
            match api::add_item_reconciled(&pedido_id, &request.row.id, request.cantidad, request.previous).await {
                Ok(items) => {
                    vm.items.set(items);
                    vm.toasts.success("Ítem agregado");
                    vm.after_change();
                }
                Err(err) => vm.auth.report("No se pudo agregar", err),
            }
            vm.busy.set(false);
        });
    }

    /// Правка на месте уходит на сервер сразу (по blur/change)
    pub fn update_item(&self, item_id: String, field: ItemField, value: f64) {
        let Some(pedido_id) = self.pedido_id.get_untracked() else {
            return;
        };
        let unchanged = self.items.with_untracked(|items| {
            items.iter().find(|i| i.id == item_id).is_none_or(|i| match field {
                ItemField::Cantidad => (i.cantidad - value).abs() < 1e-9,
                ItemField::Precio => (i.precio - value).abs() < 1e-9,
            })
        });
        if unchanged {
            return;
        }
        let dto = match field {
            ItemField::Cantidad => UpdateItemDto { cantidad: Some(value), precio: None },
            ItemField::Precio => UpdateItemDto { cantidad: None, precio: Some(value) },
        };
        if !dto.validate().is_empty() {
            return;
        }

        let vm = *self;
        spawn_local(async move {
            match api::update_item(&pedido_id, &item_id, &dto).await {
                Ok(()) => {
                    vm.items.update(|items| {
                        if let Some(item) = items.iter_mut().find(|i| i.id == item_id) {
                            match field {
                                ItemField::Cantidad => item.cantidad = value,
                                ItemField::Precio => item.precio = value,
                            }
                        }
                    });
                    vm.after_change();
                }
                Err(err) => {
                    vm.auth.report("No se pudo actualizar", err);
                    vm.reload_items(pedido_id).await;
                }
            }
        });
    }

    /// Локальные позиции заново с сервера (после неудачной правки)
    async fn reload_items(&self, pedido_id: String) {
        match api::fetch_order(&pedido_id).await {
            Ok(detail) => self.items.set(detail.items),
            Err(err) => log::warn!("wizard: cannot reload order {}: {}", pedido_id, err),
        }
    }

    pub fn delete_item(&self) {
        let (Some(pedido_id), Some(item)) = (self.pedido_id.get_untracked(), self.deleting_item.get_untracked()) else {
            return;
        };
        let vm = *self;
        vm.busy.set(true);
        spawn_local(async move {
            match api::delete_item(&pedido_id, &item.id).await {
                Ok(()) => {
                    vm.items.update(|items| items.retain(|i| i.id != item.id));
                    vm.toasts.success("Ítem eliminado");
                    vm.after_change();
                }
                Err(err) => vm.auth.report("No se pudo eliminar", err),
            }
            vm.deleting_item.set(None);
            vm.busy.set(false);
        });
    }

    /// Шаг 2 -> 3: черновик уходит на проверку
    pub fn submit(&self) {
        let Some(pedido_id) = self.pedido_id.get_untracked() else {
            return;
        };
        if self.items.with_untracked(Vec::is_empty) {
            return;
        }
        let vm = *self;
        vm.busy.set(true);
        spawn_local(async move {
            match api::submit_order(&pedido_id).await {
                Ok(response) => {
                    log::info!("wizard: order {} is now {}", pedido_id, response.status.code());
                    vm.after_change();
                    vm.step.set(WizardStep::Done);
                }
                Err(err) => vm.auth.report("No se pudo enviar", err),
            }
            vm.busy.set(false);
        });
    }

    pub fn summary(&self) -> OrderSummary {
        OrderSummary {
            pedido_id: self.pedido_id.get_untracked().unwrap_or_default(),
            cliente_nombre: self.cliente_nombre.get_untracked(),
            cliente_email: self.client.with_untracked(|c| c.as_ref().and_then(|c| c.email.clone())),
            direccion_entrega: self.direccion_entrega.get_untracked(),
            fecha_entrega: self.fecha_entrega.get_untracked(),
        }
    }

    pub fn download(&self) {
        let summary = self.summary();
        let items = self.items.get_untracked();
        if let Err(err) = export_csv(&items, &summary.csv_filename()) {
            self.toasts.error("No se pudo descargar", Some(err));
        }
    }

    /// «Crear otro»: мастер с чистого листа
    pub fn reset(&self) {
        self.client.set(None);
        self.cliente_nombre.set(String::new());
        self.cliente_telefono.set(String::new());
        self.direccion_entrega.set(String::new());
        self.fecha_entrega.set(String::new());
        self.pedido_id.set(None);
        self.items.set(Vec::new());
        self.picker_open.set(false);
        self.deleting_item.set(None);
        self.step.set(WizardStep::Client);
    }
}
