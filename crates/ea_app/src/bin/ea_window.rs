//! Prints the rows a console viewport would materialize for a user list.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use ea_app::config::{ConfigError, DEFAULT_ROW_HEIGHT};
use ea_core::directory::{DirectoryError, InMemoryDirectory, UserDirectory};
use ea_core::filter::UserTableState;
use ea_core::model::{UserRole, UserStatus};
use ea_core::viewport::ViewportState;
use ea_core::virtual_list::{virtual_window, RowHeight, DEFAULT_OVERSCAN};
use ea_core::windowed::{WindowedFrame, WindowedRenderer, EMPTY_STATE_MESSAGE};
use thiserror::Error;

#[derive(Debug, Parser)]
#[command(name = "ea_window", version, about = "Inspect the windowed user table")]
struct Args {
    /// JSON user file to load.
    #[arg(long, conflicts_with = "sample")]
    data: Option<PathBuf>,
    /// Generate this many sample users instead of loading a file.
    #[arg(long)]
    sample: Option<usize>,
    #[arg(long, default_value_t = 0.0)]
    scroll_top: f32,
    #[arg(long, default_value_t = 480.0)]
    viewport_height: f32,
    #[arg(long, default_value_t = DEFAULT_ROW_HEIGHT)]
    row_height: f32,
    #[arg(long, default_value_t = DEFAULT_OVERSCAN)]
    overscan: usize,
    #[arg(long)]
    query: Option<String>,
    #[arg(long, value_parser = parse_role)]
    role: Option<UserRole>,
    #[arg(long, value_parser = parse_status)]
    status: Option<UserStatus>,
}

#[derive(Debug, Error)]
enum WindowCliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Directory(#[from] DirectoryError),
    #[error("scroll offset and viewport height must be finite and non-negative")]
    Viewport,
    #[error("either --data or --sample is required")]
    NoUsers,
}

fn parse_role(value: &str) -> Result<UserRole, String> {
    UserRole::parse(value).ok_or_else(|| format!("unknown role: {value}"))
}

fn parse_status(value: &str) -> Result<UserStatus, String> {
    UserStatus::parse(value).ok_or_else(|| format!("unknown status: {value}"))
}

fn main() -> ExitCode {
    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), WindowCliError> {
    let row_height = RowHeight::try_new(args.row_height).map_err(ConfigError::from)?;
    if !(args.scroll_top.is_finite() && args.viewport_height.is_finite())
        || args.scroll_top < 0.0
        || args.viewport_height < 0.0
    {
        return Err(WindowCliError::Viewport);
    }

    let directory = match (&args.data, args.sample) {
        (Some(path), _) => InMemoryDirectory::load_from_path(path)?,
        (None, Some(count)) => InMemoryDirectory::sample(count),
        (None, None) => return Err(WindowCliError::NoUsers),
    };

    let mut table = UserTableState::new(directory.list()?);
    if let Some(query) = &args.query {
        table.set_query(query);
    }
    table.set_role_filter(args.role);
    table.set_status_filter(args.status);
    let filtered = table.filtered();

    let renderer = WindowedRenderer::new(row_height).with_overscan(args.overscan);
    let viewport = ViewportState::new(args.scroll_top, args.viewport_height);
    let frame = renderer.render(filtered.as_slice(), viewport, |user, _| {
        format!(
            "{:<10} {:<24} {:<32} {:<9} {}",
            user.id,
            user.full_name,
            user.email,
            user.role.label(),
            user.status.label()
        )
    });

    match frame {
        WindowedFrame::Empty => println!("{EMPTY_STATE_MESSAGE}"),
        WindowedFrame::Unmeasured => println!("viewport not measured; nothing to render"),
        WindowedFrame::Rows(window) => {
            let pads = virtual_window(
                filtered.len(),
                row_height.get(),
                viewport.height,
                viewport.scroll_top,
                args.overscan,
            );
            println!(
                "rows {}..={} of {} spacer={} top_pad={} bottom_pad={}",
                window.range.first,
                window.range.last,
                filtered.len(),
                window.spacer_height,
                pads.top_pad,
                pads.bottom_pad
            );
            for row in window.rows {
                println!("{:>8.1} {}", row.top, row.element);
            }
        }
    }
    Ok(())
}
