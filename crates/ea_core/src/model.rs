use std::fmt;
use std::hash::Hash;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A row the windowed renderer can key. Everything but the id is opaque to
/// windowing.
pub trait Record {
    type Id: Clone + Eq + Hash + fmt::Debug;

    fn id(&self) -> Self::Id;
}

impl<R: Record + ?Sized> Record for &R {
    type Id = R::Id;

    fn id(&self) -> R::Id {
        (**self).id()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Admin,
    Agent,
    Investor,
    Seller,
    Buyer,
}

impl UserRole {
    pub fn all() -> [UserRole; 5] {
        [
            UserRole::Admin,
            UserRole::Agent,
            UserRole::Investor,
            UserRole::Seller,
            UserRole::Buyer,
        ]
    }

    pub fn label(self) -> &'static str {
        match self {
            UserRole::Admin => "Admin",
            UserRole::Agent => "Agent",
            UserRole::Investor => "Investor",
            UserRole::Seller => "Seller",
            UserRole::Buyer => "Buyer",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::all()
            .into_iter()
            .find(|role| role.label().eq_ignore_ascii_case(value))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserStatus {
    Active,
    Suspended,
    PendingVerification,
}

impl UserStatus {
    pub fn all() -> [UserStatus; 3] {
        [
            UserStatus::Active,
            UserStatus::Suspended,
            UserStatus::PendingVerification,
        ]
    }

    pub fn label(self) -> &'static str {
        match self {
            UserStatus::Active => "Active",
            UserStatus::Suspended => "Suspended",
            UserStatus::PendingVerification => "Pending verification",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        let normalized = value.replace(['_', '-'], " ");
        Self::all()
            .into_iter()
            .find(|status| status.label().eq_ignore_ascii_case(&normalized))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KycStatus {
    NotSubmitted,
    Pending,
    Approved,
    Rejected,
}

impl KycStatus {
    pub fn label(self) -> &'static str {
        match self {
            KycStatus::NotSubmitted => "-",
            KycStatus::Pending => "Pending",
            KycStatus::Approved => "Approved",
            KycStatus::Rejected => "Rejected",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub full_name: String,
    pub email: String,
    pub role: UserRole,
    pub status: UserStatus,
    pub kyc: KycStatus,
    pub joined_at: DateTime<Utc>,
}

impl Record for UserProfile {
    type Id = String;

    fn id(&self) -> String {
        self.id.clone()
    }
}
