use ea_core::directory::{DirectoryError, UserDirectory};
use ea_core::model::{UserProfile, UserRole, UserStatus};
use ea_core::viewport::ViewportEvent;
use thiserror::Error;
use tracing::{debug, warn};

use crate::state::AppState;

#[derive(Clone, Debug, PartialEq)]
pub enum AppAction {
    Refresh,
    SetQuery(String),
    SetRoleFilter(Option<UserRole>),
    SetStatusFilter(Option<UserStatus>),
    ClearFilters,
    SelectUser(String),
    Scroll(f32),
    ResizeViewport(f32),
    SuspendUser(String),
    ReactivateUser(String),
    ChangeRole(String, UserRole),
    DismissToasts,
}

impl AppAction {
    /// Filter changes move the table back to the top, so frontends must
    /// also reset their native scroll position.
    pub fn resets_scroll(&self) -> bool {
        matches!(
            self,
            AppAction::SetQuery(_)
                | AppAction::SetRoleFilter(_)
                | AppAction::SetStatusFilter(_)
                | AppAction::ClearFilters
        )
    }
}

#[derive(Debug, Error)]
pub enum ActionError {
    #[error(transparent)]
    Directory(#[from] DirectoryError),
}

pub fn dispatch(
    state: &mut AppState,
    directory: &mut dyn UserDirectory,
    action: AppAction,
) -> Result<(), ActionError> {
    debug!(?action, "dispatch");
    match action {
        AppAction::Refresh => {
            refresh(state, directory)?;
            state.status = format!("Loaded {} users", state.records().len());
        }
        AppAction::SetQuery(query) => {
            state.set_query(&query);
        }
        AppAction::SetRoleFilter(role) => {
            state.set_role_filter(role);
        }
        AppAction::SetStatusFilter(status) => {
            state.set_status_filter(status);
        }
        AppAction::ClearFilters => {
            state.clear_filters();
        }
        AppAction::SelectUser(id) => {
            if !state.select(&id) {
                state.status = format!("User {id} is no longer listed");
            }
        }
        AppAction::Scroll(top) => {
            state.apply_viewport(ViewportEvent::Scrolled(top));
        }
        AppAction::ResizeViewport(height) => {
            state.apply_viewport(ViewportEvent::Resized(height));
        }
        AppAction::SuspendUser(id) => {
            let result = directory.set_status(&id, UserStatus::Suspended);
            mutate(state, directory, &id, result, |user| {
                format!("Suspended {}", user.full_name)
            })?;
        }
        AppAction::ReactivateUser(id) => {
            let result = directory.set_status(&id, UserStatus::Active);
            mutate(state, directory, &id, result, |user| {
                format!("Reactivated {}", user.full_name)
            })?;
        }
        AppAction::ChangeRole(id, role) => {
            let result = directory.set_role(&id, role);
            mutate(state, directory, &id, result, |user| {
                format!("{} is now {}", user.full_name, user.role.label())
            })?;
        }
        AppAction::DismissToasts => {
            state.toasts.clear();
        }
    }
    Ok(())
}

/// Re-lists the directory and replaces the table wholesale.
fn refresh(state: &mut AppState, directory: &dyn UserDirectory) -> Result<(), ActionError> {
    match directory.list() {
        Ok(users) => {
            state.set_records(users);
            Ok(())
        }
        Err(err) => {
            state.toasts.error(format!("Failed to load users: {err}"));
            Err(err.into())
        }
    }
}

fn mutate(
    state: &mut AppState,
    directory: &dyn UserDirectory,
    id: &str,
    result: Result<UserProfile, DirectoryError>,
    describe: impl FnOnce(&UserProfile) -> String,
) -> Result<(), ActionError> {
    match result {
        Ok(user) => {
            refresh(state, directory)?;
            state.toasts.success(describe(&user));
            Ok(())
        }
        Err(err) => {
            warn!(id, error = %err, "user mutation failed");
            state.toasts.error(format!("Update failed for {id}: {err}"));
            Err(err.into())
        }
    }
}
