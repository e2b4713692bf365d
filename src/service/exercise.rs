//! Exercise/material content: folders, likes, comments.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::ServiceError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: String,
    pub author_id: u64,
    pub body: String,
}

/// A folder of exercise material on the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Folder {
    pub id: String,
    pub name: String,
    pub description: String,
    pub liked_by: Vec<u64>,
    pub comments: Vec<Comment>,
}

impl Folder {
    pub fn like_count(&self) -> usize {
        self.liked_by.len()
    }
}

/// Contract for the backend's exercise content endpoints.
#[async_trait]
pub trait ExerciseService: Send + Sync {
    async fn folder(&self, id: &str) -> Result<Folder, ServiceError>;
    /// Like (`true`) or unlike (`false`) a folder for a user. Returns the
    /// updated folder.
    async fn set_liked(
        &self,
        folder_id: &str,
        user_id: u64,
        liked: bool,
    ) -> Result<Folder, ServiceError>;
    async fn add_comment(
        &self,
        folder_id: &str,
        author_id: u64,
        body: &str,
    ) -> Result<Comment, ServiceError>;
    async fn delete_folder(&self, id: &str) -> Result<(), ServiceError>;
}

/// In-memory exercise service for tests and single-process use. Clones
/// share state.
#[derive(Clone, Default)]
pub struct InMemoryExerciseService {
    folders: Arc<RwLock<HashMap<String, Folder>>>,
    comment_seq: Arc<AtomicU64>,
}

impl InMemoryExerciseService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_folders(folders: Vec<Folder>) -> Self {
        let map = folders.into_iter().map(|f| (f.id.clone(), f)).collect();
        Self {
            folders: Arc::new(RwLock::new(map)),
            comment_seq: Arc::new(AtomicU64::new(0)),
        }
    }
}

#[async_trait]
impl ExerciseService for InMemoryExerciseService {
    async fn folder(&self, id: &str) -> Result<Folder, ServiceError> {
        let folders = self
            .folders
            .read()
            .map_err(|_| ServiceError::Transport("folder lock poisoned".into()))?;
        folders
            .get(id)
            .cloned()
            .ok_or_else(|| ServiceError::NotFound(format!("folder {}", id)))
    }

    async fn set_liked(
        &self,
        folder_id: &str,
        user_id: u64,
        liked: bool,
    ) -> Result<Folder, ServiceError> {
        let mut folders = self
            .folders
            .write()
            .map_err(|_| ServiceError::Transport("folder lock poisoned".into()))?;
        let folder = folders
            .get_mut(folder_id)
            .ok_or_else(|| ServiceError::NotFound(format!("folder {}", folder_id)))?;

        if liked {
            if !folder.liked_by.contains(&user_id) {
                folder.liked_by.push(user_id);
            }
        } else {
            folder.liked_by.retain(|u| *u != user_id);
        }
        Ok(folder.clone())
    }

    async fn add_comment(
        &self,
        folder_id: &str,
        author_id: u64,
        body: &str,
    ) -> Result<Comment, ServiceError> {
        let mut folders = self
            .folders
            .write()
            .map_err(|_| ServiceError::Transport("folder lock poisoned".into()))?;
        let folder = folders
            .get_mut(folder_id)
            .ok_or_else(|| ServiceError::NotFound(format!("folder {}", folder_id)))?;

        let comment = Comment {
            id: format!("cm-{}", self.comment_seq.fetch_add(1, Ordering::Relaxed) + 1),
            author_id,
            body: body.to_string(),
        };
        folder.comments.push(comment.clone());
        Ok(comment)
    }

    async fn delete_folder(&self, id: &str) -> Result<(), ServiceError> {
        let mut folders = self
            .folders
            .write()
            .map_err(|_| ServiceError::Transport("folder lock poisoned".into()))?;
        folders
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| ServiceError::NotFound(format!("folder {}", id)))
    }
}
