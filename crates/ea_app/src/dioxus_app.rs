use std::sync::OnceLock;

use dioxus::prelude::*;
use ea_core::model::{UserRole, UserStatus};
use ea_core::windowed::{WindowedFrame, EMPTY_STATE_MESSAGE};
use tracing::{debug, error};

use crate::actions::AppAction;
use crate::config::ConsoleConfig;
use crate::driver::AppDriver;
use crate::notify::ToastLevel;

const VIEWPORT_HEIGHT: f32 = 520.0;

const STYLE: &str = r#"
body { font-family: sans-serif; margin: 0; color: #1f2937; }
.toolbar { display: flex; gap: 8px; padding: 8px; border-bottom: 1px solid #d0d5dd; }
.grid-body { overflow-y: auto; border-bottom: 1px solid #d0d5dd; }
.grid-row { display: flex; align-items: center; gap: 8px; box-sizing: border-box; padding: 0 8px; border-bottom: 1px solid #eef0f3; }
.grid-row.sel { background: #e8f0fe; }
.grid-row span { overflow: hidden; white-space: nowrap; text-overflow: ellipsis; }
.c-name { width: 180px; } .c-email { width: 220px; } .c-tag { width: 90px; } .c-status { width: 140px; }
.empty { padding: 32px; text-align: center; color: #6b7280; }
.toast.ok { color: #15803d; } .toast.err { color: #b91c1c; }
.status { padding: 6px 8px; font-size: 12px; }
"#;

static CONFIG: OnceLock<ConsoleConfig> = OnceLock::new();

pub fn run(config: ConsoleConfig) {
    if CONFIG.set(config).is_err() {
        debug!("console config was already set; keeping the first one");
    }
    dioxus::launch(App);
}

/// Dispatches from an event handler. Failures already surface as toasts.
fn apply(mut driver: Signal<AppDriver>, action: AppAction) {
    let resets_scroll = action.resets_scroll();
    if let Err(err) = driver.write().dispatch(action) {
        debug!(error = %err, "action failed");
    }
    if resets_scroll {
        document::eval(
            "const el = document.getElementById('user-grid'); if (el) { el.scrollTop = 0; }",
        );
    }
}

fn build_driver() -> AppDriver {
    let config = CONFIG.get_or_init(ConsoleConfig::default);
    let mut driver = AppDriver::from_config(config).unwrap_or_else(|err| {
        error!(error = %err, "falling back to an empty user directory");
        AppDriver::default()
    });
    if let Err(err) = driver.dispatch(AppAction::ResizeViewport(VIEWPORT_HEIGHT)) {
        debug!(error = %err, "initial resize failed");
    }
    driver
}

#[component]
fn App() -> Element {
    let driver = use_signal(build_driver);

    let (frame, row_height, filter, counts, total, toast, status) = {
        let driver = driver.read();
        let state = driver.state();
        (
            state.visible_rows(),
            state.renderer.row_height(),
            state.table().filter().clone(),
            state.status_counts(),
            state.records().len(),
            state.toasts.latest().cloned(),
            state.status.clone(),
        )
    };
    let spacer = frame.spacer_height();
    let empty = matches!(frame, WindowedFrame::Empty);
    let rows = match frame {
        WindowedFrame::Rows(window) => window.rows,
        WindowedFrame::Empty | WindowedFrame::Unmeasured => Vec::new(),
    };
    let role_value = filter.role.map_or("", UserRole::label);
    let status_value = filter.status.map_or("", UserStatus::label);

    rsx! {
        style { {STYLE} }
        div { class: "toolbar",
            input {
                placeholder: "Search name, email or id",
                value: "{filter.query}",
                oninput: move |e| {
                    apply(driver, AppAction::SetQuery(e.value()));
                },
            }
            select {
                value: "{role_value}",
                onchange: move |e| {
                    let role = UserRole::parse(&e.value());
                    apply(driver, AppAction::SetRoleFilter(role));
                },
                option { value: "", "All roles" }
                for role in UserRole::all() {
                    option { value: "{role.label()}", "{role.label()}" }
                }
            }
            select {
                value: "{status_value}",
                onchange: move |e| {
                    let status = UserStatus::parse(&e.value());
                    apply(driver, AppAction::SetStatusFilter(status));
                },
                option { value: "", "All statuses" }
                for status in UserStatus::all() {
                    option { value: "{status.label()}", "{status.label()}" }
                }
            }
            button {
                disabled: filter.is_empty(),
                onclick: move |_| {
                    apply(driver, AppAction::ClearFilters);
                },
                "Clear"
            }
            button {
                onclick: move |_| {
                    apply(driver, AppAction::Refresh);
                },
                "Refresh"
            }
        }
        if let Some(toast) = toast {
            div {
                class: if toast.level == ToastLevel::Success { "toast ok" } else { "toast err" },
                onclick: move |_| {
                    apply(driver, AppAction::DismissToasts);
                },
                "{toast.message}"
            }
        }
        if empty {
            div { class: "empty", "{EMPTY_STATE_MESSAGE}" }
        } else {
            div {
                id: "user-grid",
                class: "grid-body",
                style: "height: {VIEWPORT_HEIGHT}px;",
                onscroll: move |ev| {
                    let data = &ev.data;
                    apply(driver, AppAction::ResizeViewport(data.client_height() as f32));
                    apply(driver, AppAction::Scroll(data.scroll_top() as f32));
                },
                div { style: "position: relative; height: {spacer}px;",
                    for row in rows {
                        div {
                            key: "{row.key}",
                            class: if row.element.selected { "grid-row sel" } else { "grid-row" },
                            style: "position: absolute; left: 0; right: 0; top: {row.top}px; height: {row_height}px;",
                            onclick: {
                                let id = row.key.clone();
                                move |_| {
                                    apply(driver, AppAction::SelectUser(id.clone()));
                                }
                            },
                            span { class: "c-name", "{row.element.full_name}" }
                            span { class: "c-email", "{row.element.email}" }
                            span { class: "c-tag", "{row.element.role.label()}" }
                            span { class: "c-status", "{row.element.status.label()}" }
                            span { class: "c-tag", "{row.element.kyc}" }
                            span { class: "c-tag", "{row.element.joined}" }
                            button {
                                onclick: {
                                    let id = row.key.clone();
                                    let suspended = row.element.is_suspended();
                                    move |ev: MouseEvent| {
                                        ev.stop_propagation();
                                        let action = if suspended {
                                            AppAction::ReactivateUser(id.clone())
                                        } else {
                                            AppAction::SuspendUser(id.clone())
                                        };
                                        apply(driver, action);
                                    }
                                },
                                if row.element.is_suspended() { "Reactivate" } else { "Suspend" }
                            }
                            select {
                                value: "{row.element.role.label()}",
                                onclick: move |ev: MouseEvent| ev.stop_propagation(),
                                onchange: {
                                    let id = row.key.clone();
                                    move |e: FormEvent| {
                                        if let Some(role) = UserRole::parse(&e.value()) {
                                            apply(driver, AppAction::ChangeRole(id.clone(), role));
                                        }
                                    }
                                },
                                for role in UserRole::all() {
                                    option { value: "{role.label()}", "{role.label()}" }
                                }
                            }
                        }
                    }
                }
            }
        }
        div { class: "status",
            "{counts.total}/{total} users · active {counts.active} · suspended {counts.suspended} · pending {counts.pending} · {status}"
        }
    }
}
