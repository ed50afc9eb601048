#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use timekeep_client::{ClientError, TrackerApi};
use timekeep_core::task_status::TaskStatus;
use timekeep_core::models::project::{CreateProject, Project, ProjectWithTasks};
use timekeep_core::models::task::{CreateTask, Task};

/// In-memory [`TrackerApi`] that behaves like the server and can be told to
/// fail every call or to bend the time it reports back.
#[derive(Default)]
pub struct FakeApi {
    projects: Mutex<Vec<ProjectWithTasks>>,
    next_id: AtomicU32,
    failing: AtomicBool,
    /// Extra minutes the "server" adds on every time adjustment.
    time_skew: Mutex<i64>,
}

impl FakeApi {
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn set_time_skew(&self, minutes: i64) {
        *self.time_skew.lock().unwrap() = minutes;
    }

    /// The fake server's own copy of the data.
    pub fn server_projects(&self) -> Vec<ProjectWithTasks> {
        self.projects.lock().unwrap().clone()
    }

    fn check(&self) -> Result<(), ClientError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(ClientError::Api {
                status: 500,
                message: "An internal error occurred".into(),
            });
        }
        Ok(())
    }

    fn id(&self, prefix: &str) -> String {
        format!("{prefix}-{}", self.next_id.fetch_add(1, Ordering::SeqCst))
    }

    fn with_task<F>(&self, id: &str, f: F) -> Result<Task, ClientError>
    where
        F: FnOnce(&mut Task) -> Result<(), ClientError>,
    {
        let mut projects = self.projects.lock().unwrap();
        for entry in projects.iter_mut() {
            if let Some(task) = entry.tasks.iter_mut().find(|task| task.id == id) {
                f(task)?;
                task.updated_at = Utc::now();
                let task = task.clone();
                entry.project.total_minutes = entry.tasks.iter().map(|t| t.time_spent).sum();
                return Ok(task);
            }
        }
        Err(ClientError::NotFound(format!("Task with id {id} not found")))
    }
}

#[async_trait]
impl TrackerApi for FakeApi {
    async fn list_projects(&self) -> Result<Vec<ProjectWithTasks>, ClientError> {
        self.check()?;
        Ok(self.server_projects())
    }

    async fn create_project(&self, input: &CreateProject) -> Result<Project, ClientError> {
        self.check()?;
        let now = Utc::now();
        let project = Project {
            id: self.id("project"),
            name: input.name.trim().to_string(),
            description: input.description.clone(),
            color: input.color.clone(),
            total_minutes: 0,
            created_at: now,
            updated_at: now,
        };
        self.projects.lock().unwrap().insert(
            0,
            ProjectWithTasks {
                project: project.clone(),
                tasks: Vec::new(),
            },
        );
        Ok(project)
    }

    async fn delete_project(&self, id: &str) -> Result<bool, ClientError> {
        self.check()?;
        let mut projects = self.projects.lock().unwrap();
        let before = projects.len();
        projects.retain(|entry| entry.project.id != id);
        Ok(projects.len() != before)
    }

    async fn create_task(&self, input: &CreateTask) -> Result<Task, ClientError> {
        self.check()?;
        let now = Utc::now();
        let task = Task {
            id: self.id("task"),
            project_id: input.project_id.clone(),
            name: input.name.trim().to_string(),
            description: input.description.clone(),
            status: TaskStatus::Active.as_str().to_string(),
            time_spent: 0,
            created_at: now,
            completed_at: None,
            updated_at: now,
        };
        let mut projects = self.projects.lock().unwrap();
        let entry = projects
            .iter_mut()
            .find(|entry| entry.project.id == input.project_id)
            .ok_or_else(|| ClientError::NotFound("Project not found".into()))?;
        entry.tasks.insert(0, task.clone());
        Ok(task)
    }

    async fn delete_task(&self, id: &str) -> Result<bool, ClientError> {
        self.check()?;
        let mut projects = self.projects.lock().unwrap();
        for entry in projects.iter_mut() {
            let before = entry.tasks.len();
            entry.tasks.retain(|task| task.id != id);
            if entry.tasks.len() != before {
                entry.project.total_minutes = entry.tasks.iter().map(|t| t.time_spent).sum();
                return Ok(true);
            }
        }
        Ok(false)
    }

    async fn toggle_task(&self, id: &str) -> Result<Task, ClientError> {
        self.check()?;
        self.with_task(id, |task| {
            let next = TaskStatus::toggled_from(&task.status);
            task.status = next.as_str().to_string();
            task.completed_at = next.is_completed().then(Utc::now);
            Ok(())
        })
    }

    async fn add_task_time(&self, id: &str, minutes: i64) -> Result<Task, ClientError> {
        self.check()?;
        let skew = *self.time_skew.lock().unwrap();
        self.with_task(id, |task| {
            task.time_spent = minutes
                .checked_add(skew)
                .and_then(|delta| task.time_spent.checked_add(delta))
                .ok_or_else(|| ClientError::Api {
                    status: 400,
                    message: "minutes is out of range".into(),
                })?;
            Ok(())
        })
    }
}

pub fn new_project(name: &str) -> CreateProject {
    CreateProject {
        name: name.to_string(),
        description: None,
        color: "#22c55e".to_string(),
    }
}

pub fn new_task(project_id: &str, name: &str) -> CreateTask {
    CreateTask {
        project_id: project_id.to_string(),
        name: name.to_string(),
        description: None,
    }
}
