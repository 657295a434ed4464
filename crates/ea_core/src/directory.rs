//! Data-access seam for the user table.
//!
//! Panels never hold an ambient query cache. They receive a
//! [`UserDirectory`], mutate through it and re-list to refresh.

use std::path::{Path, PathBuf};

use chrono::{Duration, TimeZone, Utc};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::model::{KycStatus, UserProfile, UserRole, UserStatus};

#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("user not found: {0}")]
    NotFound(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid user data: {0}")]
    Json(#[from] serde_json::Error),
}

pub trait UserDirectory {
    fn list(&self) -> Result<Vec<UserProfile>, DirectoryError>;

    fn set_status(&mut self, id: &str, status: UserStatus) -> Result<UserProfile, DirectoryError>;

    fn set_role(&mut self, id: &str, role: UserRole) -> Result<UserProfile, DirectoryError>;
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InMemoryDirectory {
    users: Vec<UserProfile>,
    /// File every mutation is written back to, when loaded from one.
    backing_path: Option<PathBuf>,
}

impl InMemoryDirectory {
    pub fn new(users: Vec<UserProfile>) -> Self {
        Self {
            users,
            backing_path: None,
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self, DirectoryError> {
        let users: Vec<UserProfile> = serde_json::from_str(json)?;
        Ok(Self::new(users))
    }

    pub fn load_from_path(path: &Path) -> Result<Self, DirectoryError> {
        let content = std::fs::read_to_string(path)?;
        let mut directory = Self::from_json_str(&content)?;
        directory.backing_path = Some(path.to_path_buf());
        info!(path = %path.display(), users = directory.len(), "loaded user directory");
        Ok(directory)
    }

    pub fn save_to_path(&self, path: &Path) -> Result<(), DirectoryError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&self.users)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Deterministic demo data: `count` users cycling through every role,
    /// status and KYC state.
    pub fn sample(count: usize) -> Self {
        const FIRST: [&str; 8] = ["Ada", "Bo", "Cy", "Dana", "Eli", "Fern", "Gus", "Hana"];
        const LAST: [&str; 6] = ["Park", "Lindqvist", "Adams", "Okafor", "Silva", "Tanaka"];
        const KYC: [KycStatus; 4] = [
            KycStatus::NotSubmitted,
            KycStatus::Pending,
            KycStatus::Approved,
            KycStatus::Rejected,
        ];

        let roles = UserRole::all();
        let statuses = UserStatus::all();
        let epoch = Utc.timestamp_opt(1_700_000_000, 0).single().unwrap_or_default();
        let users = (0..count)
            .map(|i| {
                let first = FIRST[i % FIRST.len()];
                let last = LAST[(i / FIRST.len()) % LAST.len()];
                UserProfile {
                    id: format!("u-{i:06}"),
                    full_name: format!("{first} {last}"),
                    email: format!("{}.{}{}@example.com", first.to_lowercase(), last.to_lowercase(), i),
                    role: roles[i % roles.len()],
                    status: statuses[(i / 7) % statuses.len()],
                    kyc: KYC[(i / 3) % KYC.len()],
                    joined_at: epoch + Duration::hours(i as i64),
                }
            })
            .collect();
        Self::new(users)
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    pub fn backing_path(&self) -> Option<&Path> {
        self.backing_path.as_deref()
    }

    /// Applies `change` to one user and writes the list back to the backing
    /// file. A failed write rolls the user back.
    fn update(
        &mut self,
        id: &str,
        change: impl FnOnce(&mut UserProfile),
    ) -> Result<UserProfile, DirectoryError> {
        let slot = self
            .users
            .iter()
            .position(|user| user.id == id)
            .ok_or_else(|| DirectoryError::NotFound(id.to_string()))?;
        let previous = self.users[slot].clone();
        change(&mut self.users[slot]);

        if let Some(path) = &self.backing_path {
            if let Err(err) = self.save_to_path(path) {
                warn!(path = %path.display(), error = %err, "write-back failed");
                self.users[slot] = previous;
                return Err(err);
            }
        }
        Ok(self.users[slot].clone())
    }
}

impl UserDirectory for InMemoryDirectory {
    fn list(&self) -> Result<Vec<UserProfile>, DirectoryError> {
        Ok(self.users.clone())
    }

    fn set_status(&mut self, id: &str, status: UserStatus) -> Result<UserProfile, DirectoryError> {
        self.update(id, |user| {
            debug!(id, from = ?user.status, to = ?status, "set user status");
            user.status = status;
        })
    }

    fn set_role(&mut self, id: &str, role: UserRole) -> Result<UserProfile, DirectoryError> {
        self.update(id, |user| {
            debug!(id, from = ?user.role, to = ?role, "set user role");
            user.role = role;
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn t_dir_001_sample_is_deterministic_and_unique() {
        let a = InMemoryDirectory::sample(500);
        let b = InMemoryDirectory::sample(500);
        assert_eq!(a, b);

        let users = a.list().expect("list");
        let mut ids = users.iter().map(|u| u.id.clone()).collect::<Vec<_>>();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 500);
        assert!(users.iter().any(|u| u.status == UserStatus::Suspended));
    }

    #[test]
    fn t_dir_002_mutations_are_visible_in_list() {
        let mut dir = InMemoryDirectory::sample(10);
        let updated = dir
            .set_status("u-000003", UserStatus::Suspended)
            .expect("suspend");
        assert_eq!(updated.status, UserStatus::Suspended);
        dir.set_role("u-000003", UserRole::Admin).expect("role");

        let listed = dir.list().expect("list");
        let user = listed.iter().find(|u| u.id == "u-000003").expect("user");
        assert_eq!(user.status, UserStatus::Suspended);
        assert_eq!(user.role, UserRole::Admin);
    }

    #[test]
    fn t_dir_003_unknown_user_is_not_found() {
        let mut dir = InMemoryDirectory::sample(2);
        let err = dir
            .set_status("u-missing", UserStatus::Active)
            .expect_err("missing user");
        assert!(matches!(err, DirectoryError::NotFound(id) if id == "u-missing"));
    }

    #[test]
    fn t_dir_004_json_file_round_trip() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested").join("users.json");
        let original = InMemoryDirectory::sample(25);
        original.save_to_path(&path).expect("save");

        let loaded = InMemoryDirectory::load_from_path(&path).expect("load");
        assert_eq!(loaded.list().expect("list"), original.list().expect("list"));
        assert_eq!(loaded.backing_path(), Some(path.as_path()));
    }

    #[test]
    fn t_dir_005_invalid_json_is_rejected() {
        let err = InMemoryDirectory::from_json_str("{ not json").expect_err("invalid");
        assert!(matches!(err, DirectoryError::Json(_)));
    }

    #[test]
    fn t_dir_006_loaded_directory_writes_mutations_back() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("users.json");
        InMemoryDirectory::sample(8).save_to_path(&path).expect("save");

        let mut loaded = InMemoryDirectory::load_from_path(&path).expect("load");
        loaded
            .set_status("u-000002", UserStatus::Suspended)
            .expect("suspend");
        loaded.set_role("u-000004", UserRole::Seller).expect("role");

        let reloaded = InMemoryDirectory::load_from_path(&path).expect("reload");
        let users = reloaded.list().expect("list");
        let suspended = users.iter().find(|u| u.id == "u-000002").expect("user");
        assert_eq!(suspended.status, UserStatus::Suspended);
        let seller = users.iter().find(|u| u.id == "u-000004").expect("user");
        assert_eq!(seller.role, UserRole::Seller);
    }

    #[test]
    fn t_dir_007_failed_write_back_rolls_the_user_back() {
        let dir = tempfile::tempdir().expect("tempdir");
        let nested = dir.path().join("data");
        let path = nested.join("users.json");
        InMemoryDirectory::sample(3).save_to_path(&path).expect("save");
        let mut loaded = InMemoryDirectory::load_from_path(&path).expect("load");

        // Swap the data directory for a plain file so the write cannot land.
        std::fs::remove_dir_all(&nested).expect("remove dir");
        std::fs::write(&nested, b"blocked").expect("block path");

        let err = loaded
            .set_status("u-000001", UserStatus::Suspended)
            .expect_err("write must fail");
        assert!(matches!(err, DirectoryError::Io(_)));
        let users = loaded.list().expect("list");
        let user = users.iter().find(|u| u.id == "u-000001").expect("user");
        assert_eq!(user.status, UserStatus::Active);
    }
}
