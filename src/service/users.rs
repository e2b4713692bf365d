//! User administration against the platform backend.
//!
//! The users admin page does not touch the local store at all: listing,
//! creation, updates, soft deletes and restores all go through this
//! contract, with server-side pagination, filtering and sorting.

use std::cmp::Ordering as CmpOrdering;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::ServiceError;

/// Account state on the backend. Soft-deleted accounts stay listed (when
/// asked for) and can be restored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    Active,
    Deleted,
}

impl UserStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            UserStatus::Active => "active",
            UserStatus::Deleted => "deleted",
        }
    }
}

/// An API-backed platform user, as the users admin page sees it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserAccount {
    pub id: u64,
    pub username: String,
    pub email: String,
    pub role_name: String,
    pub status: UserStatus,
}

/// Creation payload for a user account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserDraft {
    pub username: String,
    pub email: String,
    pub role_name: String,
}

/// Partial update payload: `Some` fields are applied by the backend.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role_name: Option<String>,
}

/// A sort directive: a field name plus direction, serialized on the wire
/// as `"field"` (ascending) or `"-field"` (descending).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortKey {
    pub field: String,
    pub descending: bool,
}

impl SortKey {
    pub fn ascending(field: impl Into<String>) -> Self {
        SortKey {
            field: field.into(),
            descending: false,
        }
    }

    pub fn descending(field: impl Into<String>) -> Self {
        SortKey {
            field: field.into(),
            descending: true,
        }
    }

    /// Parse the wire form: a leading `-` marks descending.
    pub fn parse(raw: &str) -> Self {
        match raw.strip_prefix('-') {
            Some(field) => SortKey::descending(field),
            None => SortKey::ascending(raw),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.descending {
            write!(f, "-{}", self.field)
        } else {
            write!(f, "{}", self.field)
        }
    }
}

/// Listing parameters. `page` is 1-based; `search` matches email or
/// username.
#[derive(Debug, Clone)]
pub struct UserQuery {
    pub page: u32,
    pub limit: u32,
    pub search: Option<String>,
    pub role: Option<String>,
    pub status: Option<UserStatus>,
    pub sort: Option<SortKey>,
}

impl Default for UserQuery {
    fn default() -> Self {
        UserQuery {
            page: 1,
            limit: 10,
            search: None,
            role: None,
            status: None,
            sort: None,
        }
    }
}

/// One page of a listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u32,
    pub limit: u32,
    pub total: u64,
}

impl<T> Page<T> {
    pub fn total_pages(&self) -> u32 {
        if self.limit == 0 {
            return 0;
        }
        ((self.total + u64::from(self.limit) - 1) / u64::from(self.limit)) as u32
    }
}

/// Contract for the backend's user administration endpoints.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    async fn list(&self, query: &UserQuery) -> Result<Page<UserAccount>, ServiceError>;
    async fn create(&self, draft: &UserDraft) -> Result<UserAccount, ServiceError>;
    async fn update(&self, id: u64, update: &UserUpdate) -> Result<UserAccount, ServiceError>;
    /// Soft delete: the account is marked deleted, not destroyed.
    async fn deactivate(&self, id: u64) -> Result<(), ServiceError>;
    async fn restore(&self, id: u64) -> Result<(), ServiceError>;
}

/// In-memory user directory for tests and single-process use.
///
/// Applies the same filtering/sorting/windowing semantics the backend
/// does, over a shared in-memory account list. Clones share state.
#[derive(Clone, Default)]
pub struct InMemoryUserDirectory {
    accounts: Arc<RwLock<Vec<UserAccount>>>,
    id_seq: Arc<AtomicU64>,
}

impl InMemoryUserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the directory with existing accounts. The id sequence resumes
    /// past the highest seeded id.
    pub fn with_accounts(accounts: Vec<UserAccount>) -> Self {
        let max_id = accounts.iter().map(|a| a.id).max().unwrap_or(0);
        Self {
            accounts: Arc::new(RwLock::new(accounts)),
            id_seq: Arc::new(AtomicU64::new(max_id)),
        }
    }

    fn matches(account: &UserAccount, query: &UserQuery) -> bool {
        if let Some(status) = query.status {
            if account.status != status {
                return false;
            }
        }
        if let Some(role) = &query.role {
            if !account.role_name.eq_ignore_ascii_case(role) {
                return false;
            }
        }
        if let Some(search) = &query.search {
            let needle = search.to_lowercase();
            if !account.email.to_lowercase().contains(&needle)
                && !account.username.to_lowercase().contains(&needle)
            {
                return false;
            }
        }
        true
    }

    fn compare(a: &UserAccount, b: &UserAccount, field: &str) -> CmpOrdering {
        match field {
            "email" => a.email.cmp(&b.email),
            "username" => a.username.cmp(&b.username),
            "role" | "roleName" | "role_name" => a.role_name.cmp(&b.role_name),
            "status" => a.status.as_str().cmp(b.status.as_str()),
            "id" => a.id.cmp(&b.id),
            // Unknown sort fields leave the id order untouched.
            _ => CmpOrdering::Equal,
        }
    }
}

#[async_trait]
impl UserDirectory for InMemoryUserDirectory {
    async fn list(&self, query: &UserQuery) -> Result<Page<UserAccount>, ServiceError> {
        let accounts = self
            .accounts
            .read()
            .map_err(|_| ServiceError::Transport("directory lock poisoned".into()))?;

        let mut matched: Vec<UserAccount> = accounts
            .iter()
            .filter(|a| Self::matches(a, query))
            .cloned()
            .collect();

        matched.sort_by(|a, b| a.id.cmp(&b.id));
        if let Some(sort) = &query.sort {
            matched.sort_by(|a, b| {
                let ordering = Self::compare(a, b, &sort.field);
                if sort.descending {
                    ordering.reverse()
                } else {
                    ordering
                }
            });
        }

        let total = matched.len() as u64;
        let start = (query.page.saturating_sub(1) as usize) * query.limit as usize;
        let items = matched
            .into_iter()
            .skip(start)
            .take(query.limit as usize)
            .collect();

        Ok(Page {
            items,
            page: query.page,
            limit: query.limit,
            total,
        })
    }

    async fn create(&self, draft: &UserDraft) -> Result<UserAccount, ServiceError> {
        let mut accounts = self
            .accounts
            .write()
            .map_err(|_| ServiceError::Transport("directory lock poisoned".into()))?;

        let account = UserAccount {
            id: self.id_seq.fetch_add(1, Ordering::Relaxed) + 1,
            username: draft.username.clone(),
            email: draft.email.clone(),
            role_name: draft.role_name.clone(),
            status: UserStatus::Active,
        };
        accounts.push(account.clone());
        Ok(account)
    }

    async fn update(&self, id: u64, update: &UserUpdate) -> Result<UserAccount, ServiceError> {
        let mut accounts = self
            .accounts
            .write()
            .map_err(|_| ServiceError::Transport("directory lock poisoned".into()))?;

        let account = accounts
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| ServiceError::NotFound(format!("user {}", id)))?;

        if let Some(username) = &update.username {
            account.username = username.clone();
        }
        if let Some(email) = &update.email {
            account.email = email.clone();
        }
        if let Some(role_name) = &update.role_name {
            account.role_name = role_name.clone();
        }
        Ok(account.clone())
    }

    async fn deactivate(&self, id: u64) -> Result<(), ServiceError> {
        let mut accounts = self
            .accounts
            .write()
            .map_err(|_| ServiceError::Transport("directory lock poisoned".into()))?;

        let account = accounts
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| ServiceError::NotFound(format!("user {}", id)))?;
        account.status = UserStatus::Deleted;
        Ok(())
    }

    async fn restore(&self, id: u64) -> Result<(), ServiceError> {
        let mut accounts = self
            .accounts
            .write()
            .map_err(|_| ServiceError::Transport("directory lock poisoned".into()))?;

        let account = accounts
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| ServiceError::NotFound(format!("user {}", id)))?;
        account.status = UserStatus::Active;
        Ok(())
    }
}
