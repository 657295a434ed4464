use ea_core::model::{UserRole, UserStatus};
use ea_core::viewport::{ViewportEvent, ViewportState, ViewportTracker};
use ea_core::windowed::EMPTY_STATE_MESSAGE;
use eframe::egui::{self, Align, Color32, Layout, RichText, ScrollArea, TextEdit, TopBottomPanel};
use tracing::debug;

use crate::actions::AppAction;
use crate::driver::AppDriver;
use crate::egui_theme::{self, DANGER, MUTED, SUCCESS};
use crate::notify::ToastLevel;
use crate::state::RowView;

const NAME_WIDTH: f32 = 180.0;
const EMAIL_WIDTH: f32 = 220.0;
const TAG_WIDTH: f32 = 90.0;
const STATUS_WIDTH: f32 = 140.0;

pub fn launch(driver: AppDriver) -> eframe::Result<()> {
    let options = eframe::NativeOptions::default();
    eframe::run_native(
        "Estate Admin",
        options,
        Box::new(|cc| {
            egui_theme::apply_base_theme(&cc.egui_ctx);
            Ok(Box::new(EstateAdminApp::new(driver)))
        }),
    )
}

pub struct EstateAdminApp {
    driver: AppDriver,
    query: String,
    viewport: ViewportTracker,
    reset_scroll: bool,
}

impl EstateAdminApp {
    pub fn new(driver: AppDriver) -> Self {
        let query = driver.state().table().query().to_string();
        Self {
            driver,
            query,
            viewport: ViewportTracker::new(ViewportState::unmeasured()),
            reset_scroll: false,
        }
    }

    fn run_action(&mut self, action: AppAction) {
        if action.resets_scroll() {
            self.reset_scroll = true;
        }
        // Failures already surface as error toasts.
        if let Err(err) = self.driver.dispatch(action) {
            debug!(error = %err, "action failed");
        }
    }

    fn draw_toolbar(&mut self, ui: &mut egui::Ui, actions: &mut Vec<AppAction>) {
        let filter = self.driver.state().table().filter().clone();
        ui.horizontal(|ui| {
            ui.heading("Users");
            ui.separator();

            let search = ui.add(
                TextEdit::singleline(&mut self.query)
                    .hint_text("Search name, email or id")
                    .desired_width(260.0),
            );
            if search.changed() {
                actions.push(AppAction::SetQuery(self.query.clone()));
            }

            let mut role = filter.role;
            egui::ComboBox::from_id_source("role_filter")
                .selected_text(role.map_or("All roles", UserRole::label))
                .show_ui(ui, |ui| {
                    ui.selectable_value(&mut role, None, "All roles");
                    for option in UserRole::all() {
                        ui.selectable_value(&mut role, Some(option), option.label());
                    }
                });
            if role != filter.role {
                actions.push(AppAction::SetRoleFilter(role));
            }

            let mut status = filter.status;
            egui::ComboBox::from_id_source("status_filter")
                .selected_text(status.map_or("All statuses", UserStatus::label))
                .show_ui(ui, |ui| {
                    ui.selectable_value(&mut status, None, "All statuses");
                    for option in UserStatus::all() {
                        ui.selectable_value(&mut status, Some(option), option.label());
                    }
                });
            if status != filter.status {
                actions.push(AppAction::SetStatusFilter(status));
            }

            if ui
                .add_enabled(!filter.is_empty(), egui::Button::new("Clear"))
                .clicked()
            {
                self.query.clear();
                actions.push(AppAction::ClearFilters);
            }

            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                if ui.button("Refresh").clicked() {
                    actions.push(AppAction::Refresh);
                }
            });
        });
    }

    fn draw_rows(&mut self, ui: &mut egui::Ui, actions: &mut Vec<AppAction>) {
        draw_header(ui);
        ui.separator();

        if self.driver.state().filtered_len() == 0 {
            ui.centered_and_justified(|ui| {
                ui.label(RichText::new(EMPTY_STATE_MESSAGE).color(MUTED));
            });
            return;
        }

        let row_height = self.driver.state().renderer.row_height();
        let mut area = ScrollArea::vertical()
            .id_source("user_rows")
            .auto_shrink([false, false]);
        if std::mem::take(&mut self.reset_scroll) {
            area = area.vertical_scroll_offset(0.0);
        }

        area.show_viewport(ui, |ui, viewport| {
            if self
                .viewport
                .dispatch(ViewportEvent::Resized(viewport.height()))
            {
                self.run_action(AppAction::ResizeViewport(viewport.height()));
            }
            if self
                .viewport
                .dispatch(ViewportEvent::Scrolled(viewport.min.y))
            {
                self.run_action(AppAction::Scroll(viewport.min.y));
            }

            let frame = self.driver.state().visible_rows();
            let origin = ui.max_rect().min;
            let width = ui.available_width();
            ui.set_height(frame.spacer_height());

            for row in frame.rows() {
                let rect = egui::Rect::from_min_size(
                    origin + egui::vec2(0.0, row.top),
                    egui::vec2(width, row_height),
                );
                ui.allocate_ui_at_rect(rect, |ui| draw_row(ui, &row.element, actions));
            }
        });
    }

    fn draw_details(&self, ui: &mut egui::Ui) {
        ui.heading("Details");
        ui.separator();
        let Some(user) = self.driver.state().selected_user() else {
            ui.label(RichText::new("Select a user to see details").color(MUTED));
            return;
        };
        egui::Grid::new("user_details")
            .num_columns(2)
            .spacing([12.0, 6.0])
            .show(ui, |ui| {
                ui.label("Id");
                ui.monospace(&user.id);
                ui.end_row();
                ui.label("Name");
                ui.label(&user.full_name);
                ui.end_row();
                ui.label("Email");
                ui.label(&user.email);
                ui.end_row();
                ui.label("Role");
                ui.label(user.role.label());
                ui.end_row();
                ui.label("Status");
                ui.label(RichText::new(user.status.label()).color(status_color(user.status)));
                ui.end_row();
                ui.label("KYC");
                ui.label(user.kyc.label());
                ui.end_row();
                ui.label("Joined");
                ui.label(user.joined_at.format("%Y-%m-%d %H:%M").to_string());
                ui.end_row();
            });
    }

    fn draw_status_bar(&self, ui: &mut egui::Ui) {
        let state = self.driver.state();
        let counts = state.status_counts();
        ui.with_layout(Layout::left_to_right(Align::Center), |ui| {
            ui.label(format!("{}/{} users", counts.total, state.records().len()));
            ui.label(RichText::new(format!("active {}", counts.active)).color(SUCCESS));
            ui.label(RichText::new(format!("suspended {}", counts.suspended)).color(DANGER));
            ui.label(format!("pending {}", counts.pending));
            ui.separator();
            ui.label(RichText::new(&state.status).small());
        });
    }

    fn draw_toasts(&self, ui: &mut egui::Ui, actions: &mut Vec<AppAction>) {
        let toasts = &self.driver.state().toasts;
        if toasts.is_empty() {
            return;
        }
        ui.horizontal_wrapped(|ui| {
            for toast in toasts.iter() {
                let color = match toast.level {
                    ToastLevel::Success => SUCCESS,
                    ToastLevel::Error => DANGER,
                };
                ui.label(RichText::new(&toast.message).color(color));
            }
            if ui.small_button("Dismiss").clicked() {
                actions.push(AppAction::DismissToasts);
            }
        });
    }
}

fn draw_header(ui: &mut egui::Ui) {
    ui.horizontal(|ui| {
        for (title, width) in [
            ("Name", NAME_WIDTH),
            ("Email", EMAIL_WIDTH),
            ("Role", TAG_WIDTH),
            ("Status", STATUS_WIDTH),
            ("KYC", TAG_WIDTH),
            ("Joined", TAG_WIDTH),
        ] {
            ui.add_sized([width, 18.0], egui::Label::new(RichText::new(title).strong()));
        }
    });
}

fn draw_row(ui: &mut egui::Ui, row: &RowView, actions: &mut Vec<AppAction>) {
    ui.horizontal_centered(|ui| {
        let name = ui.add_sized(
            [NAME_WIDTH, 20.0],
            egui::SelectableLabel::new(row.selected, &row.full_name),
        );
        if name.clicked() {
            actions.push(AppAction::SelectUser(row.id.clone()));
        }
        ui.add_sized([EMAIL_WIDTH, 20.0], egui::Label::new(&row.email));
        ui.add_sized([TAG_WIDTH, 20.0], egui::Label::new(row.role.label()));
        ui.add_sized(
            [STATUS_WIDTH, 20.0],
            egui::Label::new(RichText::new(row.status.label()).color(status_color(row.status))),
        );
        ui.add_sized([TAG_WIDTH, 20.0], egui::Label::new(row.kyc));
        ui.add_sized([TAG_WIDTH, 20.0], egui::Label::new(&row.joined));

        if row.is_suspended() {
            if ui.button("Reactivate").clicked() {
                actions.push(AppAction::ReactivateUser(row.id.clone()));
            }
        } else if ui.button("Suspend").clicked() {
            actions.push(AppAction::SuspendUser(row.id.clone()));
        }

        ui.menu_button("Role", |ui| {
            for role in UserRole::all() {
                if ui
                    .add_enabled(role != row.role, egui::Button::new(role.label()))
                    .clicked()
                {
                    actions.push(AppAction::ChangeRole(row.id.clone(), role));
                    ui.close_menu();
                }
            }
        });
    });
}

fn status_color(status: UserStatus) -> Color32 {
    match status {
        UserStatus::Active => SUCCESS,
        UserStatus::Suspended => DANGER,
        UserStatus::PendingVerification => MUTED,
    }
}

impl eframe::App for EstateAdminApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let mut actions = Vec::new();

        if ctx.input(|i| i.key_pressed(egui::Key::F5)) {
            actions.push(AppAction::Refresh);
        }

        TopBottomPanel::top("toolbar").show(ctx, |ui| {
            self.draw_toolbar(ui, &mut actions);
            self.draw_toasts(ui, &mut actions);
        });

        TopBottomPanel::bottom("status").show(ctx, |ui| {
            self.draw_status_bar(ui);
        });

        egui::SidePanel::right("details")
            .default_width(280.0)
            .show(ctx, |ui| {
                self.draw_details(ui);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.draw_rows(ui, &mut actions);
        });

        for action in actions {
            self.run_action(action);
        }
    }
}
