use ea_app::actions::{ActionError, AppAction};
use ea_app::config::ConsoleConfig;
use ea_app::driver::{AppDriver, StartupError};
use ea_app::notify::ToastLevel;
use ea_core::directory::{DirectoryError, InMemoryDirectory};
use ea_core::model::{UserRole, UserStatus};

fn measured(count: usize) -> AppDriver {
    let mut driver = AppDriver::with_sample(count);
    driver
        .dispatch(AppAction::ResizeViewport(480.0))
        .expect("resize");
    driver
}

#[test]
fn e2e_win_001_scrolling_materializes_only_the_window() {
    let mut driver = measured(1_000);
    driver.dispatch(AppAction::Scroll(880.0)).expect("scroll");

    let snapshot = driver.snapshot();
    assert_eq!(snapshot.first_index, Some(10));
    assert_eq!(snapshot.last_index, Some(41));
    assert_eq!(snapshot.rendered_rows, 32);
    assert_eq!(snapshot.spacer_height, 44_000.0);
}

#[test]
fn e2e_win_002_bottom_of_list_reaches_last_row() {
    let mut driver = measured(1_000);
    driver.dispatch(AppAction::Scroll(1.0e9)).expect("scroll");

    let snapshot = driver.snapshot();
    assert_eq!(snapshot.last_index, Some(999));
    assert!(snapshot.rendered_rows <= 11 + 2 * 10 + 1);
}

#[test]
fn e2e_flt_001_filter_shrinks_list_and_resets_scroll() {
    let mut driver = measured(1_000);
    driver.dispatch(AppAction::Scroll(30_000.0)).expect("scroll");
    driver
        .dispatch(AppAction::SetStatusFilter(Some(UserStatus::Suspended)))
        .expect("filter");

    let state = driver.state();
    assert_eq!(state.viewport.scroll_top, 0.0);
    assert!(state.filtered_len() < 1_000);

    let snapshot = driver.snapshot();
    assert_eq!(snapshot.first_index, Some(0));
    assert_eq!(snapshot.counts.total, snapshot.counts.suspended);
}

#[test]
fn e2e_flt_002_no_matches_shows_empty_state() {
    let mut driver = measured(100);
    driver
        .dispatch(AppAction::SetQuery("zz-no-such-user".to_string()))
        .expect("query");
    assert!(driver.snapshot().empty_state);

    driver.dispatch(AppAction::ClearFilters).expect("clear");
    let snapshot = driver.snapshot();
    assert!(!snapshot.empty_state);
    assert_eq!(snapshot.filtered_users, 100);
}

#[test]
fn e2e_mut_001_suspend_and_reactivate_refresh_the_list() {
    let mut driver = measured(30);
    driver
        .dispatch(AppAction::SelectUser("u-000002".to_string()))
        .expect("select");
    driver
        .dispatch(AppAction::SuspendUser("u-000002".to_string()))
        .expect("suspend");

    let user = driver.state().selected_user().expect("selection survives refresh");
    assert_eq!(user.status, UserStatus::Suspended);
    let toast = driver.snapshot().latest_toast.expect("toast");
    assert_eq!(toast.level, ToastLevel::Success);

    driver
        .dispatch(AppAction::ReactivateUser("u-000002".to_string()))
        .expect("reactivate");
    let user = driver.state().selected_user().expect("selected");
    assert_eq!(user.status, UserStatus::Active);
}

#[test]
fn e2e_mut_002_change_role_updates_role_filter_results() {
    let mut driver = measured(10);
    driver
        .dispatch(AppAction::SetRoleFilter(Some(UserRole::Admin)))
        .expect("filter");
    let before = driver.snapshot().filtered_users;

    driver
        .dispatch(AppAction::ChangeRole("u-000001".to_string(), UserRole::Admin))
        .expect("change role");

    let snapshot = driver.snapshot();
    assert_eq!(snapshot.filtered_users, before + 1);
    let toast = snapshot.latest_toast.expect("toast");
    assert!(toast.message.ends_with("is now Admin"));
}

#[test]
fn e2e_mut_003_unknown_user_is_an_error_toast() {
    let mut driver = measured(5);
    let err = driver
        .dispatch(AppAction::SuspendUser("u-999999".to_string()))
        .expect_err("missing user");
    assert!(matches!(
        err,
        ActionError::Directory(DirectoryError::NotFound(_))
    ));

    let snapshot = driver.snapshot();
    assert_eq!(
        snapshot.latest_toast.map(|t| t.level),
        Some(ToastLevel::Error)
    );
    driver.dispatch(AppAction::DismissToasts).expect("dismiss");
    assert_eq!(driver.snapshot().latest_toast, None);
}

#[test]
fn e2e_cfg_001_driver_from_config_loads_data_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let data = dir.path().join("users.json");
    InMemoryDirectory::sample(12)
        .save_to_path(&data)
        .expect("save users");

    let config = ConsoleConfig {
        row_height: 30.0,
        overscan: 2,
        data_path: Some(data),
        ..ConsoleConfig::default()
    };
    let mut driver = AppDriver::from_config(&config).expect("driver");
    driver
        .dispatch(AppAction::ResizeViewport(90.0))
        .expect("resize");

    let snapshot = driver.snapshot();
    assert_eq!(snapshot.total_users, 12);
    assert_eq!(snapshot.spacer_height, 360.0);
    assert_eq!(snapshot.first_index, Some(0));
    assert_eq!(snapshot.last_index, Some(5));
}

#[test]
fn e2e_cfg_002_bad_config_fails_startup() {
    let config = ConsoleConfig {
        row_height: -1.0,
        ..ConsoleConfig::default()
    };
    assert!(matches!(
        AppDriver::from_config(&config),
        Err(StartupError::Config(_))
    ));

    let dir = tempfile::tempdir().expect("tempdir");
    let config = ConsoleConfig {
        data_path: Some(dir.path().join("missing.json")),
        ..ConsoleConfig::default()
    };
    assert!(matches!(
        AppDriver::from_config(&config),
        Err(StartupError::Directory(DirectoryError::Io(_)))
    ));
}

#[test]
fn e2e_cfg_003_console_edits_are_saved_to_the_data_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let data = dir.path().join("users.json");
    InMemoryDirectory::sample(12)
        .save_to_path(&data)
        .expect("save users");
    let config = ConsoleConfig {
        data_path: Some(data.clone()),
        ..ConsoleConfig::default()
    };

    let mut driver = AppDriver::from_config(&config).expect("driver");
    driver
        .dispatch(AppAction::SuspendUser("u-000003".to_string()))
        .expect("suspend");
    driver
        .dispatch(AppAction::ChangeRole("u-000003".to_string(), UserRole::Buyer))
        .expect("change role");
    drop(driver);

    let reopened = AppDriver::from_config(&config).expect("reopen");
    let user = reopened
        .state()
        .records()
        .iter()
        .find(|u| u.id == "u-000003")
        .expect("user")
        .clone();
    assert_eq!(user.status, UserStatus::Suspended);
    assert_eq!(user.role, UserRole::Buyer);
}

#[test]
fn e2e_cfg_004_failed_save_is_an_error_toast() {
    let dir = tempfile::tempdir().expect("tempdir");
    let nested = dir.path().join("data");
    let data = nested.join("users.json");
    InMemoryDirectory::sample(4)
        .save_to_path(&data)
        .expect("save users");
    let config = ConsoleConfig {
        data_path: Some(data),
        ..ConsoleConfig::default()
    };
    let mut driver = AppDriver::from_config(&config).expect("driver");

    std::fs::remove_dir_all(&nested).expect("remove dir");
    std::fs::write(&nested, b"blocked").expect("block path");

    let err = driver
        .dispatch(AppAction::SuspendUser("u-000001".to_string()))
        .expect_err("write must fail");
    assert!(matches!(err, ActionError::Directory(DirectoryError::Io(_))));
    let toast = driver.snapshot().latest_toast.expect("toast");
    assert_eq!(toast.level, ToastLevel::Error);
    let user = driver
        .state()
        .records()
        .iter()
        .find(|u| u.id == "u-000001")
        .expect("user")
        .clone();
    assert_eq!(user.status, UserStatus::Active);
}
