//! # Project Directory
//!
//! Thin CRUD over project records. Basic validation only - the voting
//! core owns every invariant beyond non-empty names and a sane tally.

use std::sync::Arc;

use vb_store::{RecordOp, RecordStore};
use vb_types::{Project, ProjectId};

use crate::clock::Clock;
use crate::error::CoreError;

/// Input for project creation. Names are trimmed; new projects start
/// locked with a zero tally.
#[derive(Debug, Clone, Default)]
pub struct NewProject {
    pub team_name: String,
    pub description: Option<String>,
    pub demo_url: Option<String>,
}

/// Partial field update. Outer `None` leaves a field untouched; for the
/// optional text fields, `Some(None)` clears the value.
#[derive(Debug, Clone, Default)]
pub struct UpdateProject {
    pub team_name: Option<String>,
    pub description: Option<Option<String>>,
    pub demo_url: Option<Option<String>>,
    pub is_locked: Option<bool>,
    pub vote_count: Option<u64>,
}

/// Sort key for project listings. Key names mirror the public API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    CreatedAt,
    UpdatedAt,
    TeamName,
    VoteCount,
}

impl SortKey {
    /// Parse an API sort value; unknown values fall back to `CreatedAt`.
    pub fn parse(value: &str) -> Self {
        match value {
            "teamName" => SortKey::TeamName,
            "voteCount" => SortKey::VoteCount,
            "updatedAt" => SortKey::UpdatedAt,
            _ => SortKey::CreatedAt,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn parse(value: &str) -> Self {
        match value {
            "asc" => SortOrder::Asc,
            _ => SortOrder::Desc,
        }
    }
}

/// Listing filter and pagination. `limit` is capped at [`MAX_PAGE_SIZE`].
#[derive(Debug, Clone)]
pub struct ProjectQuery {
    /// Case-insensitive substring match on team name.
    pub search: Option<String>,
    pub is_locked: Option<bool>,
    pub sort: SortKey,
    pub order: SortOrder,
    pub limit: usize,
    pub offset: usize,
}

pub const MAX_PAGE_SIZE: usize = 100;
pub const DEFAULT_PAGE_SIZE: usize = 10;

impl Default for ProjectQuery {
    fn default() -> Self {
        Self {
            search: None,
            is_locked: None,
            sort: SortKey::default(),
            order: SortOrder::default(),
            limit: DEFAULT_PAGE_SIZE,
            offset: 0,
        }
    }
}

/// CRUD service for project records.
pub struct ProjectDirectory<S> {
    store: Arc<S>,
    clock: Arc<dyn Clock>,
}

impl<S> Clone for ProjectDirectory<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<S: RecordStore> ProjectDirectory<S> {
    pub fn new(store: Arc<S>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    pub fn create_project(&self, input: NewProject) -> Result<Project, CoreError> {
        let team_name = input.team_name.trim().to_string();
        if team_name.is_empty() {
            return Err(CoreError::InvalidTeamName);
        }
        let description = trim_optional(input.description);
        let demo_url = trim_optional(input.demo_url);

        let now = self.clock.now();
        self.store.with_write(|txn| {
            let project = Project {
                id: txn.allocate_project_id(),
                team_name,
                description,
                demo_url,
                is_locked: true,
                vote_count: 0,
                created_at: now,
                updated_at: now,
            };
            txn.stage(RecordOp::PutProject(project.clone()));
            Ok(project)
        })
    }

    pub fn get_project(&self, id: ProjectId) -> Result<Project, CoreError> {
        self.store
            .with_read(|tables| tables.project(id).cloned())
            .ok_or(CoreError::ProjectNotFound { id })
    }

    pub fn list_projects(&self, query: &ProjectQuery) -> Vec<Project> {
        self.store.with_read(|tables| {
            let needle = query.search.as_deref().map(str::to_lowercase);
            let mut results: Vec<Project> = tables
                .projects()
                .filter(|p| match &needle {
                    Some(needle) => p.team_name.to_lowercase().contains(needle),
                    None => true,
                })
                .filter(|p| match query.is_locked {
                    Some(locked) => p.is_locked == locked,
                    None => true,
                })
                .cloned()
                .collect();

            // Input order is ascending id; the sort is stable, so equal
            // keys keep that order.
            match query.sort {
                SortKey::CreatedAt => results.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
                SortKey::UpdatedAt => results.sort_by(|a, b| a.updated_at.cmp(&b.updated_at)),
                SortKey::TeamName => results.sort_by(|a, b| a.team_name.cmp(&b.team_name)),
                SortKey::VoteCount => results.sort_by(|a, b| a.vote_count.cmp(&b.vote_count)),
            }
            if query.order == SortOrder::Desc {
                results.reverse();
            }

            results
                .into_iter()
                .skip(query.offset)
                .take(query.limit.min(MAX_PAGE_SIZE))
                .collect()
        })
    }

    pub fn update_project(
        &self,
        id: ProjectId,
        update: UpdateProject,
    ) -> Result<Project, CoreError> {
        let team_name = match update.team_name {
            Some(name) => {
                let name = name.trim().to_string();
                if name.is_empty() {
                    return Err(CoreError::InvalidTeamName);
                }
                Some(name)
            }
            None => None,
        };

        let now = self.clock.now();
        self.store.with_write(|txn| {
            let mut project = txn
                .tables()
                .project(id)
                .cloned()
                .ok_or(CoreError::ProjectNotFound { id })?;

            if let Some(name) = team_name {
                project.team_name = name;
            }
            if let Some(description) = update.description {
                project.description = trim_optional(description);
            }
            if let Some(demo_url) = update.demo_url {
                project.demo_url = trim_optional(demo_url);
            }
            if let Some(is_locked) = update.is_locked {
                project.is_locked = is_locked;
            }
            if let Some(vote_count) = update.vote_count {
                project.vote_count = vote_count;
            }
            project.updated_at = now;

            txn.stage(RecordOp::PutProject(project.clone()));
            Ok(project)
        })
    }

    /// Delete a project, returning the deleted record. Its vote rows are
    /// left in place (no cascade).
    pub fn delete_project(&self, id: ProjectId) -> Result<Project, CoreError> {
        self.store.with_write(|txn| {
            let project = txn
                .tables()
                .project(id)
                .cloned()
                .ok_or(CoreError::ProjectNotFound { id })?;
            txn.stage(RecordOp::DeleteProject(id));
            Ok(project)
        })
    }
}

fn trim_optional(value: Option<String>) -> Option<String> {
    value.and_then(|s| {
        let trimmed = s.trim().to_string();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed)
        }
    })
}
