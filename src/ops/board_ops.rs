use indexmap::IndexMap;
use serde::Serialize;

use crate::model::{Task, TaskStatus};

/// Error type for board operations
#[derive(Debug, thiserror::Error)]
pub enum BoardError {
    #[error("task not found: {0}")]
    TaskNotFound(String),
}

/// The status change a drop produced, i.e. the body of the task update
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusChange {
    #[serde(rename = "taskId")]
    pub task_id: String,
    pub from: TaskStatus,
    #[serde(rename = "status")]
    pub to: TaskStatus,
}

/// Tasks grouped into Kanban columns by status
#[derive(Debug, Clone, Default)]
pub struct Board {
    columns: IndexMap<TaskStatus, Vec<Task>>,
}

impl Board {
    /// Group `tasks` into `columns` (in that order), keeping input order
    /// within each column. A task whose status has no configured column gets
    /// one appended at the end.
    pub fn from_tasks(tasks: Vec<Task>, columns: &[TaskStatus]) -> Self {
        let mut map: IndexMap<TaskStatus, Vec<Task>> =
            columns.iter().map(|s| (*s, Vec::new())).collect();
        for task in tasks {
            map.entry(task.status).or_default().push(task);
        }
        Board { columns: map }
    }

    pub fn columns(&self) -> impl Iterator<Item = (TaskStatus, &[Task])> {
        self.columns.iter().map(|(s, tasks)| (*s, tasks.as_slice()))
    }

    pub fn column(&self, status: TaskStatus) -> &[Task] {
        self.columns.get(&status).map(Vec::as_slice).unwrap_or(&[])
    }

    fn locate(&self, task_id: &str) -> Option<(TaskStatus, usize)> {
        self.columns.iter().find_map(|(status, tasks)| {
            tasks
                .iter()
                .position(|t| t.id == task_id)
                .map(|idx| (*status, idx))
        })
    }

    /// Drop `task_id` onto the `to` column. Dropping on its own column is a
    /// no-op and returns `None`; otherwise the task moves to the bottom of
    /// `to` and the change to send upstream is returned.
    pub fn move_task(&mut self, task_id: &str, to: TaskStatus) -> Result<Option<StatusChange>, BoardError> {
        let (from, idx) = self
            .locate(task_id)
            .ok_or_else(|| BoardError::TaskNotFound(task_id.to_string()))?;
        if from == to {
            return Ok(None);
        }
        let mut task = self
            .columns
            .get_mut(&from)
            .map(|col| col.remove(idx))
            .ok_or_else(|| BoardError::TaskNotFound(task_id.to_string()))?;
        task.status = to;
        self.columns.entry(to).or_default().push(task);
        tracing::debug!(task = task_id, %from, %to, "task moved");
        Ok(Some(StatusChange {
            task_id: task_id.to_string(),
            from,
            to,
        }))
    }
}

/// Parse configured column names, skipping unknown ones
pub fn parse_columns(names: &[String]) -> Vec<TaskStatus> {
    let mut out = Vec::new();
    for name in names {
        match TaskStatus::parse(name) {
            Some(status) if !out.contains(&status) => out.push(status),
            Some(_) => {}
            None => tracing::warn!(column = %name, "unknown board column ignored"),
        }
    }
    if out.is_empty() {
        out.extend(TaskStatus::ALL);
    }
    out
}

/// Subtask completion for a task card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Progress {
    pub completed: usize,
    pub total: usize,
}

impl Progress {
    /// `completed/total`, with the total shown as at least 1
    pub fn ratio(&self) -> String {
        format!("{}/{}", self.completed, self.total.max(1))
    }
}

pub fn progress(task: &Task) -> Progress {
    Progress {
        completed: task.subtasks.iter().filter(|s| s.completed).count(),
        total: task.subtasks.len(),
    }
}
