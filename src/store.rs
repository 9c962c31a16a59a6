// 🗃️ Expense Store - Process-lifetime, append-only collection
//
// Held by the router state and shared across requests. Records live until the
// process exits; separate server instances each have their own store.

use crate::expense::{Expense, NewExpense};
use anyhow::{anyhow, Result};
use std::sync::{Arc, RwLock};

/// In-memory store of all expenses, in insertion order
///
/// Cloning is cheap and every clone sees the same collection.
#[derive(Debug, Clone, Default)]
pub struct ExpenseStore {
    expenses: Arc<RwLock<Vec<Expense>>>,
}

impl ExpenseStore {
    /// Create new empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every stored expense, oldest first
    pub fn all(&self) -> Result<Vec<Expense>> {
        let expenses = self
            .expenses
            .read()
            .map_err(|_| anyhow!("expense store lock poisoned"))?;

        Ok(expenses.clone())
    }

    /// Append a new expense and return the stored record
    ///
    /// The id is the collection length + 1, read under the same write lock as
    /// the append so two creates never receive the same id.
    pub fn create(&self, new_expense: NewExpense) -> Result<Expense> {
        let mut expenses = self
            .expenses
            .write()
            .map_err(|_| anyhow!("expense store lock poisoned"))?;

        let expense = new_expense.into_expense(expenses.len() as u64 + 1);
        expenses.push(expense.clone());

        Ok(expense)
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn new_expense(description: &str) -> NewExpense {
        NewExpense {
            amount: 3.5,
            description: description.to_string(),
            category: "Misc".to_string(),
            date: NaiveDate::from_ymd_opt(2025, 3, 14).unwrap(),
        }
    }

    #[test]
    fn test_new_store_is_empty() {
        let store = ExpenseStore::new();

        assert!(store.all().unwrap().is_empty());
    }

    #[test]
    fn test_ids_follow_collection_length() {
        let store = ExpenseStore::new();

        let first = store.create(new_expense("first")).unwrap();
        let second = store.create(new_expense("second")).unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(store.all().unwrap().len(), 2);
    }

    #[test]
    fn test_all_keeps_insertion_order() {
        let store = ExpenseStore::new();
        for name in ["a", "b", "c"] {
            store.create(new_expense(name)).unwrap();
        }

        let descriptions: Vec<String> = store
            .all()
            .unwrap()
            .into_iter()
            .map(|e| e.description)
            .collect();

        assert_eq!(descriptions, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_clones_share_the_collection() {
        let store = ExpenseStore::new();
        let handle = store.clone();

        handle.create(new_expense("shared")).unwrap();

        let expenses = store.all().unwrap();
        assert_eq!(expenses.len(), 1);
        assert_eq!(expenses[0].description, "shared");
    }

    #[test]
    fn test_concurrent_creates_get_distinct_ids() {
        let store = ExpenseStore::new();

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let store = store.clone();
                std::thread::spawn(move || store.create(new_expense(&i.to_string())).unwrap().id)
            })
            .collect();

        let mut ids: Vec<u64> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        ids.sort_unstable();

        assert_eq!(ids, (1..=8).collect::<Vec<u64>>());
    }
}
