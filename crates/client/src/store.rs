//! Subscribable cache of projects and their tasks.

use timekeep_core::models::project::{CreateProject, Project, ProjectWithTasks};
use timekeep_core::models::task::{CreateTask, Task};
use tokio::sync::watch;

use crate::api::TrackerApi;
use crate::error::ClientError;

/// Local mirror of the server's project list.
///
/// Every mutation goes to the server first and is applied to the cache only
/// once the server confirms it, except [`ProjectStore::add_time`], which
/// updates the cache optimistically and then reconciles with the server's
/// task. A failed call leaves the cache as it was before the call.
///
/// Views observe the cache through [`ProjectStore::subscribe`].
pub struct ProjectStore<A> {
    api: A,
    projects: watch::Sender<Vec<ProjectWithTasks>>,
}

impl<A: TrackerApi> ProjectStore<A> {
    /// Create an empty store. Call [`ProjectStore::init`] to load it.
    pub fn new(api: A) -> Self {
        let (projects, _) = watch::channel(Vec::new());
        Self { api, projects }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Receive every future snapshot of the cache.
    pub fn subscribe(&self) -> watch::Receiver<Vec<ProjectWithTasks>> {
        self.projects.subscribe()
    }

    /// A copy of the current cache.
    pub fn snapshot(&self) -> Vec<ProjectWithTasks> {
        self.projects.borrow().clone()
    }

    /// Look up a cached task by id.
    pub fn task(&self, task_id: &str) -> Option<Task> {
        self.projects
            .borrow()
            .iter()
            .flat_map(|entry| entry.tasks.iter())
            .find(|task| task.id == task_id)
            .cloned()
    }

    /// Replace the cache with the server's full project list.
    pub async fn init(&self) -> Result<(), ClientError> {
        let projects = self
            .api
            .list_projects()
            .await
            .inspect_err(|e| tracing::warn!(error = %e, "Failed to load projects"))?;

        tracing::debug!(count = projects.len(), "Project cache loaded");
        self.projects.send_replace(projects);
        Ok(())
    }

    /// Create a project and put it at the front of the cache.
    pub async fn add_project(&self, input: CreateProject) -> Result<Project, ClientError> {
        let project = self
            .api
            .create_project(&input)
            .await
            .inspect_err(|e| tracing::warn!(error = %e, "Failed to create project"))?;

        let entry = ProjectWithTasks {
            project: project.clone(),
            tasks: Vec::new(),
        };
        self.projects.send_modify(|projects| projects.insert(0, entry));
        Ok(project)
    }

    /// Delete a project and drop it, tasks included, from the cache.
    pub async fn remove_project(&self, project_id: &str) -> Result<(), ClientError> {
        let removed = self
            .api
            .delete_project(project_id)
            .await
            .inspect_err(
                |e| tracing::warn!(project_id, error = %e, "Failed to delete project"),
            )?;

        if !removed {
            tracing::debug!(project_id, "Project was already gone on the server");
        }
        self.projects
            .send_modify(|projects| projects.retain(|entry| entry.project.id != project_id));
        Ok(())
    }

    /// Create a task and put it at the front of its project's task list.
    pub async fn add_task(&self, input: CreateTask) -> Result<Task, ClientError> {
        let task = self
            .api
            .create_task(&input)
            .await
            .inspect_err(|e| {
                tracing::warn!(project_id = %input.project_id, error = %e, "Failed to create task")
            })?;

        self.projects.send_modify(|projects| {
            if let Some(entry) = projects
                .iter_mut()
                .find(|entry| entry.project.id == task.project_id)
            {
                entry.tasks.insert(0, task.clone());
                sync_total(entry);
            }
        });
        Ok(task)
    }

    /// Delete a task and drop it from the cache.
    pub async fn remove_task(&self, task_id: &str) -> Result<(), ClientError> {
        self.api
            .delete_task(task_id)
            .await
            .inspect_err(|e| tracing::warn!(task_id, error = %e, "Failed to delete task"))?;

        self.projects.send_modify(|projects| {
            for entry in projects.iter_mut() {
                let before = entry.tasks.len();
                entry.tasks.retain(|task| task.id != task_id);
                if entry.tasks.len() != before {
                    sync_total(entry);
                }
            }
        });
        Ok(())
    }

    /// Advance a task's status and store the server's copy.
    pub async fn toggle_task(&self, task_id: &str) -> Result<Task, ClientError> {
        let task = self
            .api
            .toggle_task(task_id)
            .await
            .inspect_err(|e| tracing::warn!(task_id, error = %e, "Failed to toggle task"))?;

        self.replace_task(&task);
        Ok(task)
    }

    /// Add time to a task.
    ///
    /// The delta is applied to the cache before the call. On success the
    /// cached task is replaced with the server's copy; on failure the cached
    /// time goes back to its previous value. A delta that would overflow the
    /// cached total is not applied locally and is left to the server to judge.
    pub async fn add_time(&self, task_id: &str, minutes: i64) -> Result<Task, ClientError> {
        let previous = self.apply_time_delta(task_id, minutes);

        match self.api.add_task_time(task_id, minutes).await {
            Ok(task) => {
                let optimistic = self.task(task_id).map(|cached| cached.time_spent);
                if previous.is_some() && optimistic != Some(task.time_spent) {
                    tracing::debug!(
                        task_id,
                        optimistic = ?optimistic,
                        time_spent = task.time_spent,
                        "Server time differs from optimistic update"
                    );
                }
                self.replace_task(&task);
                Ok(task)
            }
            Err(e) => {
                if let Some(previous) = previous {
                    self.set_time(task_id, previous);
                }
                tracing::warn!(task_id, minutes, error = %e, "Failed to add task time");
                Err(e)
            }
        }
    }

    /// Shift a cached task's time and its project's total. Returns the time
    /// it had before, or `None` when the task is not cached or the sum would
    /// overflow.
    fn apply_time_delta(&self, task_id: &str, minutes: i64) -> Option<i64> {
        let mut previous = None;
        self.projects.send_if_modified(|projects| {
            for entry in projects.iter_mut() {
                if let Some(task) = entry.tasks.iter_mut().find(|task| task.id == task_id) {
                    let Some(updated) = task.time_spent.checked_add(minutes) else {
                        return false;
                    };
                    previous = Some(task.time_spent);
                    task.time_spent = updated;
                    sync_total(entry);
                    return true;
                }
            }
            false
        });
        previous
    }

    fn set_time(&self, task_id: &str, time_spent: i64) {
        self.projects.send_if_modified(|projects| {
            for entry in projects.iter_mut() {
                if let Some(task) = entry.tasks.iter_mut().find(|task| task.id == task_id) {
                    task.time_spent = time_spent;
                    sync_total(entry);
                    return true;
                }
            }
            false
        });
    }

    fn replace_task(&self, task: &Task) {
        self.projects.send_if_modified(|projects| {
            let Some(entry) = projects
                .iter_mut()
                .find(|entry| entry.project.id == task.project_id)
            else {
                return false;
            };
            let Some(slot) = entry.tasks.iter_mut().find(|cached| cached.id == task.id) else {
                return false;
            };
            *slot = task.clone();
            sync_total(entry);
            true
        });
    }
}

/// Recompute a project's total from its cached tasks, as the server does,
/// saturating instead of overflowing.
fn sync_total(entry: &mut ProjectWithTasks) {
    entry.project.total_minutes = entry
        .tasks
        .iter()
        .fold(0i64, |total, task| total.saturating_add(task.time_spent));
}
