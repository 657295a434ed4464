pub mod actions;
pub mod config;
pub mod driver;
pub mod logging;
pub mod notify;
pub mod state;

#[cfg(feature = "egui-desktop")]
pub mod app;
#[cfg(feature = "dioxus-desktop")]
pub mod dioxus_app;
#[cfg(feature = "egui-desktop")]
mod egui_theme;

#[cfg(feature = "egui-desktop")]
pub use app::launch;
