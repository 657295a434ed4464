use ea_core::directory::{DirectoryError, InMemoryDirectory, UserDirectory};
use ea_core::windowed::{WindowedFrame, WindowedRenderer};
use thiserror::Error;
use tracing::{debug, info};

use crate::actions::{dispatch, ActionError, AppAction};
use crate::config::{ConfigError, ConsoleConfig};
use crate::notify::Toast;
use crate::state::{AppState, StatusCounts};

/// Headless console: state plus the directory it talks to.
pub struct AppDriver {
    state: AppState,
    directory: Box<dyn UserDirectory>,
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("load users: {0}")]
    Directory(#[from] DirectoryError),
    #[error(transparent)]
    Action(#[from] ActionError),
}

#[derive(Clone, Debug, PartialEq)]
pub struct AppSnapshot {
    pub total_users: usize,
    pub filtered_users: usize,
    pub counts: StatusCounts,
    pub selected_id: Option<String>,
    pub empty_state: bool,
    pub rendered_rows: usize,
    pub first_index: Option<usize>,
    pub last_index: Option<usize>,
    pub spacer_height: f32,
    pub latest_toast: Option<Toast>,
}

impl Default for AppDriver {
    fn default() -> Self {
        Self::with_directory(Box::new(InMemoryDirectory::default()), AppState::default())
    }
}

impl AppDriver {
    /// Builds a driver and performs the initial fetch.
    pub fn new(
        directory: Box<dyn UserDirectory>,
        renderer: WindowedRenderer,
    ) -> Result<Self, ActionError> {
        let mut driver = Self::with_directory(directory, AppState::new(renderer));
        driver.dispatch(AppAction::Refresh)?;
        Ok(driver)
    }

    /// Wires the directory and renderer described by `config`: the JSON
    /// user file when one is configured, generated sample users otherwise.
    pub fn from_config(config: &ConsoleConfig) -> Result<Self, StartupError> {
        let renderer = config.renderer()?;
        let directory = match &config.data_path {
            Some(path) => InMemoryDirectory::load_from_path(path)?,
            None => {
                info!(count = config.sample_size, "using generated sample users");
                InMemoryDirectory::sample(config.sample_size)
            }
        };
        Ok(Self::new(Box::new(directory), renderer)?)
    }

    pub fn with_sample(count: usize) -> Self {
        let mut driver = Self::with_directory(
            Box::new(InMemoryDirectory::sample(count)),
            AppState::default(),
        );
        if let Err(err) = driver.dispatch(AppAction::Refresh) {
            debug!(error = %err, "initial refresh failed");
        }
        driver
    }

    fn with_directory(directory: Box<dyn UserDirectory>, state: AppState) -> Self {
        Self { state, directory }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn dispatch(&mut self, action: AppAction) -> Result<(), ActionError> {
        dispatch(&mut self.state, self.directory.as_mut(), action)
    }

    pub fn snapshot(&self) -> AppSnapshot {
        let frame = self.state.visible_rows();
        let range = frame.range();
        let empty_state = matches!(frame, WindowedFrame::Empty);

        AppSnapshot {
            total_users: self.state.records().len(),
            filtered_users: self.state.filtered_len(),
            counts: self.state.status_counts(),
            selected_id: self.state.selected_id(),
            empty_state,
            rendered_rows: frame.rows().len(),
            first_index: range.map(|r| r.first),
            last_index: range.map(|r| r.last),
            spacer_height: frame.spacer_height(),
            latest_toast: self.state.toasts.latest().cloned(),
        }
    }
}
