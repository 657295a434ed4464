//! Core of the estate admin console: fixed-height row windowing, the user
//! record model, client-side filtering and the data-access seam.

pub mod directory;
pub mod filter;
pub mod model;
pub mod viewport;
pub mod virtual_list;
pub mod windowed;
