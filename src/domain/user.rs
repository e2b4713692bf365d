use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use lexideck_macros::Record;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    User,
}

/// Admin-local shadow of a platform user, kept in the admin store.
///
/// Distinct from the API-backed `UserAccount` the users page manages —
/// this one has no relational behavior and no remote counterpart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Record)]
#[record(collection = "users")]
pub struct StaffUser {
    pub id: String,
    pub name: String,
    pub email: String,
    pub avatar: Option<String>,
    pub streak: u32,
    /// Account balance in minor currency units.
    pub balance: i64,
    pub last_study_date: String,
    pub role: Role,
    /// Unix epoch milliseconds, stamped at creation.
    pub created_at: u64,
}

#[derive(Debug, Clone)]
pub struct StaffUserDraft {
    pub name: String,
    pub email: String,
    pub avatar: Option<String>,
    pub streak: u32,
    pub balance: i64,
    pub last_study_date: String,
    pub role: Role,
}

#[derive(Debug, Clone, Default)]
pub struct StaffUserPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub avatar: Option<String>,
    pub streak: Option<u32>,
    pub balance: Option<i64>,
    pub last_study_date: Option<String>,
    pub role: Option<Role>,
}

impl StaffUser {
    pub(crate) fn from_draft(id: String, draft: StaffUserDraft) -> Self {
        StaffUser {
            id,
            name: draft.name,
            email: draft.email,
            avatar: draft.avatar,
            streak: draft.streak,
            balance: draft.balance,
            last_study_date: draft.last_study_date,
            role: draft.role,
            created_at: now_millis(),
        }
    }

    pub(crate) fn merge(&mut self, patch: StaffUserPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(email) = patch.email {
            self.email = email;
        }
        if let Some(avatar) = patch.avatar {
            self.avatar = Some(avatar);
        }
        if let Some(streak) = patch.streak {
            self.streak = streak;
        }
        if let Some(balance) = patch.balance {
            self.balance = balance;
        }
        if let Some(last_study_date) = patch.last_study_date {
            self.last_study_date = last_study_date;
        }
        if let Some(role) = patch.role {
            self.role = role;
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}
