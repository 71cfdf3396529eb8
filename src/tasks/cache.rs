use super::{SortController, SortField, Task};
use crate::ClientError;

/// The client's ordered copy of the account's tasks.
///
/// The server is authoritative: `replace_all` discards everything local,
/// and the other mutations are only applied after a server acknowledgment.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskCache {
    tasks: Vec<Task>,
}

impl TaskCache {
    pub fn new() -> Self {
        Self::default()
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

    pub fn get(&self, id: i64) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Replaces the whole list with a server response.
    ///
    /// Records belonging to another account are dropped so the cache only
    /// ever holds the session account's tasks. Returns the number kept.
    pub fn replace_all(&mut self, account_id: i64, tasks: Vec<Task>) -> usize {
        let total = tasks.len();
        self.tasks = tasks
            .into_iter()
            .filter(|t| t.account_id == account_id)
            .collect();

        let dropped = total - self.tasks.len();
        if dropped > 0 {
            log::warn!(target: "todo_client::tasks", "msg=\"dropped foreign tasks\" account_id={} dropped={}", account_id, dropped);
        }
        self.tasks.len()
    }

    /// Applies a confirmed edit. Only `text` and `priority` change.
    ///
    /// # Errors
    /// `ClientError::TaskNotFound` if the id is not cached.
    pub fn update_in_place(&mut self, id: i64, text: &str, priority: u8) -> Result<(), ClientError> {
        let task = self
            .tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(ClientError::TaskNotFound(id))?;
        task.text = text.to_owned();
        task.priority = i64::from(priority);
        Ok(())
    }

    /// Replaces the cached copy of `task`, or appends it if not cached.
    pub fn upsert(&mut self, task: Task) {
        match self.tasks.iter_mut().find(|t| t.id == task.id) {
            Some(existing) => *existing = task,
            None => self.tasks.push(task),
        }
    }

    pub fn sort_by(&mut self, sort: &mut SortController, field: SortField) {
        sort.sort_by(field, &mut self.tasks);
    }

    pub fn clear(&mut self) {
        self.tasks.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cache() -> TaskCache {
        let mut cache = TaskCache::new();
        cache.replace_all(42, vec![Task::mock(5, 3, 100), Task::mock(7, 1, 200)]);
        cache
    }

    #[test]
    fn test_replace_all_discards_previous() {
        let mut cache = cache();
        cache.replace_all(42, vec![Task::mock(9, 2, 300)]);

        assert_eq!(cache.len(), 1);
        assert!(cache.get(5).is_none());
        assert!(cache.get(9).is_some());
    }

    #[test]
    fn test_replace_all_drops_foreign_tasks() {
        let mut foreign = Task::mock(8, 2, 0);
        foreign.account_id = 99;

        let mut cache = TaskCache::new();
        let kept = cache.replace_all(42, vec![Task::mock(5, 3, 0), foreign]);

        assert_eq!(kept, 1);
        assert!(cache.get(8).is_none());
    }

    #[test]
    fn test_replace_all_idempotent() {
        let mut once = TaskCache::new();
        once.replace_all(42, vec![Task::mock(5, 3, 100), Task::mock(7, 1, 200)]);

        let mut twice = once.clone();
        twice.replace_all(42, vec![Task::mock(5, 3, 100), Task::mock(7, 1, 200)]);

        assert_eq!(once, twice);
    }

    #[test]
    fn test_update_in_place_touches_text_and_priority_only() {
        let mut cache = cache();
        let before = cache.get(5).cloned().unwrap();

        cache.update_in_place(5, "new", 2).unwrap();

        let after = cache.get(5).unwrap();
        assert_eq!(after.text, "new");
        assert_eq!(after.priority, 2);
        assert_eq!(after.created_at, before.created_at);
        assert_eq!(after.last_updated_at, before.last_updated_at);
        assert_eq!(after.account_id, before.account_id);
    }

    #[test]
    fn test_update_missing_task() {
        let mut cache = cache();
        assert_eq!(cache.update_in_place(99, "x", 1), Err(ClientError::TaskNotFound(99)));
    }

    #[test]
    fn test_upsert() {
        let mut cache = cache();
        let mut changed = Task::mock(5, 5, 100);
        changed.text = "server copy".to_owned();

        cache.upsert(changed);
        cache.upsert(Task::mock(11, 2, 400));

        assert_eq!(cache.len(), 3);
        assert_eq!(cache.get(5).unwrap().text, "server copy");
        assert_eq!(cache.tasks()[0].id, 5);
    }

    #[test]
    fn test_sort_by_uses_controller() {
        let mut cache = cache();
        let mut sort = SortController::new();

        cache.sort_by(&mut sort, SortField::Priority);
        assert_eq!(cache.tasks()[0].id, 7);

        cache.sort_by(&mut sort, SortField::Priority);
        assert_eq!(cache.tasks()[0].id, 5);
    }
}
