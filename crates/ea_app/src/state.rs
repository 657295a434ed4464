use ea_core::filter::UserTableState;
use ea_core::model::{UserProfile, UserRole, UserStatus};
use ea_core::viewport::{ViewportEvent, ViewportState};
use ea_core::virtual_list::RowHeight;
use ea_core::windowed::{WindowedFrame, WindowedRenderer};

use crate::config::DEFAULT_ROW_HEIGHT;
use crate::notify::ToastQueue;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StatusCounts {
    pub total: usize,
    pub active: usize,
    pub suspended: usize,
    pub pending: usize,
}

/// Display cells for one user row, built only for materialized rows.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RowView {
    pub id: String,
    pub full_name: String,
    pub email: String,
    pub role: UserRole,
    pub status: UserStatus,
    pub kyc: &'static str,
    pub joined: String,
    pub selected: bool,
}

impl RowView {
    pub fn new(user: &UserProfile, selected: bool) -> Self {
        Self {
            id: user.id.clone(),
            full_name: user.full_name.clone(),
            email: user.email.clone(),
            role: user.role,
            status: user.status,
            kyc: user.kyc.label(),
            joined: user.joined_at.format("%Y-%m-%d").to_string(),
            selected,
        }
    }

    pub fn is_suspended(&self) -> bool {
        self.status == UserStatus::Suspended
    }
}

pub struct AppState {
    table: UserTableState,
    pub viewport: ViewportState,
    pub renderer: WindowedRenderer,
    pub toasts: ToastQueue,
    pub status: String,

    filtered_index_cache: Vec<usize>,
    filtered_counts_cache: StatusCounts,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(WindowedRenderer::new(RowHeight::new(DEFAULT_ROW_HEIGHT)))
    }
}

impl AppState {
    pub fn new(renderer: WindowedRenderer) -> Self {
        Self {
            table: UserTableState::new(Vec::new()),
            viewport: ViewportState::unmeasured(),
            renderer,
            toasts: ToastQueue::default(),
            status: String::new(),
            filtered_index_cache: Vec::new(),
            filtered_counts_cache: StatusCounts::default(),
        }
    }

    pub fn table(&self) -> &UserTableState {
        &self.table
    }

    pub fn records(&self) -> &[UserProfile] {
        self.table.records()
    }

    pub fn selected_id(&self) -> Option<String> {
        self.table.selected_id().map(ToString::to_string)
    }

    pub fn selected_user(&self) -> Option<&UserProfile> {
        self.table.selected()
    }

    pub fn select(&mut self, id: &str) -> bool {
        self.table.select(id)
    }

    pub fn filtered_len(&self) -> usize {
        self.filtered_index_cache.len()
    }

    pub fn set_query(&mut self, query: &str) {
        self.table.set_query(query);
        self.filter_changed();
    }

    pub fn set_role_filter(&mut self, role: Option<UserRole>) {
        self.table.set_role_filter(role);
        self.filter_changed();
    }

    pub fn set_status_filter(&mut self, status: Option<UserStatus>) {
        self.table.set_status_filter(status);
        self.filter_changed();
    }

    pub fn clear_filters(&mut self) {
        self.table.clear_filters();
        self.filter_changed();
    }

    /// Swaps in a freshly fetched list. The scroll offset is kept; the
    /// windowing clamp pulls it back if the list got shorter.
    pub fn set_records(&mut self, records: Vec<UserProfile>) {
        self.table.set_records(records);
        self.rebuild_filtered_cache();
    }

    pub fn apply_viewport(&mut self, event: ViewportEvent) {
        self.viewport = self.viewport.apply(event);
    }

    pub fn status_counts(&self) -> StatusCounts {
        self.filtered_counts_cache.clone()
    }

    /// Rows to draw for the current viewport. Only the windowed indices are
    /// resolved through the filtered-index cache.
    pub fn visible_rows(&self) -> WindowedFrame<String, RowView> {
        let records = self.table.records();
        let selected = self.table.selected_id();
        self.renderer
            .render_with(self.filtered_len(), self.viewport, |index| {
                // The cache is rebuilt on every record or filter change.
                let user = &records[self.filtered_index_cache[index]];
                let view = RowView::new(user, selected == Some(user.id.as_str()));
                (user.id.clone(), view)
            })
    }

    fn filter_changed(&mut self) {
        self.viewport = self.viewport.apply(ViewportEvent::Scrolled(0.0));
        self.rebuild_filtered_cache();
    }

    fn rebuild_filtered_cache(&mut self) {
        let indices = self.table.filtered_indices();
        let records = self.table.records();

        let mut counts = StatusCounts {
            total: indices.len(),
            ..StatusCounts::default()
        };
        for user in indices.iter().map(|&idx| &records[idx]) {
            match user.status {
                UserStatus::Active => counts.active += 1,
                UserStatus::Suspended => counts.suspended += 1,
                UserStatus::PendingVerification => counts.pending += 1,
            }
        }

        self.filtered_index_cache = indices;
        self.filtered_counts_cache = counts;
    }
}
