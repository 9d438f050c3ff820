//! JSON-file task repository.
//!
//! The store owns the task list and its backing file. New tasks are appended,
//! so stored order is creation order and callers can rely on it for display.
//! Every mutation is written straight back to disk.

use std::path::{Path, PathBuf};

use crate::error::{DaybookError, DaybookResult};
use crate::task::{Task, TaskId};

pub const TASKS_FILENAME: &str = "tasks.json";

#[derive(Debug)]
pub struct TaskStore {
    path: PathBuf,
    tasks: Vec<Task>,
}

impl TaskStore {
    /// Load tasks from `path`. A missing or blank file is an empty store.
    pub fn open(path: impl Into<PathBuf>) -> DaybookResult<Self> {
        let path = path.into();

        let tasks = if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            if content.trim().is_empty() {
                Vec::new()
            } else {
                serde_json::from_str(&content).map_err(|e| {
                    DaybookError::Store(format!("could not parse {}: {}", path.display(), e))
                })?
            }
        } else {
            Vec::new()
        };

        tracing::debug!(path = %path.display(), count = tasks.len(), "loaded tasks");
        Ok(TaskStore { path, tasks })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Find the single task whose id starts with `prefix`.
    pub fn find_by_prefix(&self, prefix: &str) -> DaybookResult<&Task> {
        let prefix = prefix.trim().to_lowercase();
        if prefix.is_empty() {
            return Err(DaybookError::TaskNotFound("empty id".into()));
        }

        let found: Vec<&Task> = self
            .tasks
            .iter()
            .filter(|t| t.id.to_string().starts_with(&prefix))
            .collect();

        match found.as_slice() {
            [] => Err(DaybookError::TaskNotFound(prefix)),
            [task] => Ok(*task),
            many => Err(DaybookError::AmbiguousId(prefix, many.len())),
        }
    }

    /// Append a task and persist. The task is dropped again if saving fails.
    pub fn add(&mut self, task: Task) -> DaybookResult<&Task> {
        self.tasks.push(task);

        if let Err(e) = self.save() {
            self.tasks.pop();
            return Err(e);
        }

        let task = self
            .tasks
            .last()
            .ok_or_else(|| DaybookError::Store("task list empty after add".into()))?;
        tracing::debug!(id = %task.id, recurrence = %task.recurrence, "added task");
        Ok(task)
    }

    /// Remove a task and persist.
    ///
    /// Removing a repeating task deletes all of its occurrences, so it needs
    /// `confirmed`; otherwise `ConfirmationRequired` is returned and nothing changes.
    pub fn remove(&mut self, id: &TaskId, confirmed: bool) -> DaybookResult<Task> {
        let index = self
            .tasks
            .iter()
            .position(|t| &t.id == id)
            .ok_or_else(|| DaybookError::TaskNotFound(id.to_string()))?;

        if self.tasks[index].is_recurring() && !confirmed {
            return Err(DaybookError::ConfirmationRequired(
                self.tasks[index].title.clone(),
            ));
        }

        let removed = self.tasks.remove(index);
        if let Err(e) = self.save() {
            self.tasks.insert(index, removed);
            return Err(e);
        }

        tracing::debug!(id = %removed.id, "removed task");
        Ok(removed)
    }

    /// Write the task list via a temporary sibling file, then rename over the target.
    fn save(&self) -> DaybookResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(&self.tasks)
            .map_err(|e| DaybookError::Serialization(e.to_string()))?;

        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, content)?;
        std::fs::rename(&tmp, &self.path)?;

        tracing::debug!(path = %self.path.display(), count = self.tasks.len(), "saved tasks");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::Recurrence;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn store_in(dir: &TempDir) -> TaskStore {
        TaskStore::open(dir.path().join("data").join(TASKS_FILENAME)).unwrap()
    }

    #[test]
    fn missing_file_opens_empty() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        assert!(store.is_empty());
        assert!(!store.path().exists());
    }

    #[test]
    fn blank_file_opens_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(TASKS_FILENAME);
        std::fs::write(&path, "  \n").unwrap();
        assert!(TaskStore::open(&path).unwrap().is_empty());
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(TASKS_FILENAME);
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(TaskStore::open(&path), Err(DaybookError::Store(_))));
    }

    #[test]
    fn add_appends_and_persists_in_order() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);

        store
            .add(Task::new("Gym", date(2024, 1, 15), Recurrence::Weekly).unwrap())
            .unwrap();
        store
            .add(Task::new("Dentist", date(2024, 1, 16), Recurrence::None).unwrap())
            .unwrap();

        let reopened = store_in(&dir);
        let titles: Vec<_> = reopened.tasks().iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["Gym", "Dentist"]);
        assert_eq!(reopened.tasks(), store.tasks());
    }

    #[test]
    fn remove_one_off_without_confirmation() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        let id = store
            .add(Task::new("Dentist", date(2024, 1, 16), Recurrence::None).unwrap())
            .unwrap()
            .id;

        let removed = store.remove(&id, false).unwrap();
        assert_eq!(removed.title, "Dentist");
        assert!(store_in(&dir).is_empty());
    }

    #[test]
    fn remove_recurring_requires_confirmation() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        let id = store
            .add(Task::new("Gym", date(2024, 1, 15), Recurrence::Weekly).unwrap())
            .unwrap()
            .id;

        let err = store.remove(&id, false).unwrap_err();
        assert!(matches!(err, DaybookError::ConfirmationRequired(_)));
        assert_eq!(store.len(), 1);

        store.remove(&id, true).unwrap();
        assert!(store.is_empty());
        assert!(store_in(&dir).is_empty());
    }

    #[test]
    fn remove_keeps_order_of_the_rest() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        let mut ids = Vec::new();
        for title in ["A", "B", "C"] {
            let task = Task::new(title, date(2024, 1, 1), Recurrence::None).unwrap();
            ids.push(store.add(task).unwrap().id);
        }

        store.remove(&ids[1], false).unwrap();
        let titles: Vec<_> = store_in(&dir).tasks().iter().map(|t| t.title.clone()).collect();
        assert_eq!(titles, vec!["A", "C"]);
    }

    #[test]
    fn remove_unknown_id() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        let err = store.remove(&TaskId::new(), true).unwrap_err();
        assert!(matches!(err, DaybookError::TaskNotFound(_)));
    }

    #[test]
    fn find_by_prefix() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        let id = store
            .add(Task::new("Gym", date(2024, 1, 15), Recurrence::Weekly).unwrap())
            .unwrap()
            .id;

        let full = id.to_string();
        assert_eq!(store.find_by_prefix(&full[..8]).unwrap().id, id);
        assert_eq!(store.find_by_prefix(&full.to_uppercase()).unwrap().id, id);
        assert!(matches!(
            store.find_by_prefix("zzzz"),
            Err(DaybookError::TaskNotFound(_))
        ));
        assert!(matches!(
            store.find_by_prefix(""),
            Err(DaybookError::TaskNotFound(_))
        ));
    }

    #[test]
    fn find_by_prefix_reports_ambiguity() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(TASKS_FILENAME);
        std::fs::write(
            &path,
            r#"[
                {"id": "aaaa0000-0000-4000-8000-000000000001", "title": "A", "anchor_date": "2024-01-01"},
                {"id": "aaaa0000-0000-4000-8000-000000000002", "title": "B", "anchor_date": "2024-01-01"}
            ]"#,
        )
        .unwrap();

        let store = TaskStore::open(&path).unwrap();
        assert!(matches!(
            store.find_by_prefix("aaaa"),
            Err(DaybookError::AmbiguousId(_, 2))
        ));
        assert_eq!(store.find_by_prefix("aaaa0000-0000-4000-8000-000000000002").unwrap().title, "B");
    }

    #[test]
    fn legacy_records_load_fail_soft() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(TASKS_FILENAME);
        std::fs::write(
            &path,
            r#"[{"title": "Yoga", "anchor_date": "2024-01-15T07:00:00Z", "recurrence": "sometimes"}]"#,
        )
        .unwrap();

        let store = TaskStore::open(&path).unwrap();
        assert_eq!(store.tasks()[0].recurrence, Recurrence::None);
        assert_eq!(store.tasks()[0].anchor_date, date(2024, 1, 15));
    }

    #[test]
    fn structured_recurrence_degrades_without_dropping_the_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(TASKS_FILENAME);
        std::fs::write(
            &path,
            r#"[
                {"title": "Yoga", "anchor_date": "2024-01-15", "recurrence": {"freq": "weekly", "by": ["mo"]}},
                {"title": "Swim", "anchor_date": "2024-01-16", "recurrence": ["weekly"]},
                {"title": "Gym", "anchor_date": "2024-01-17", "recurrence": "weekly"}
            ]"#,
        )
        .unwrap();

        let store = TaskStore::open(&path).unwrap();
        let repeats: Vec<_> = store.tasks().iter().map(|t| t.recurrence).collect();
        assert_eq!(
            repeats,
            vec![Recurrence::None, Recurrence::None, Recurrence::Weekly]
        );
        assert_eq!(store.tasks()[1].title, "Swim");
    }
}
