use chrono::{DateTime, Utc};
use rand::Rng;
use std::fmt;

pub type ReminderId = u64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reminder {
    pub id: ReminderId,
    pub title: String,
    pub description: String,
    pub due: DateTime<Utc>,
    pub important: bool,
}

/// Form state for a reminder that has not been submitted yet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draft {
    pub title: String,
    pub description: String,
    pub due: Option<DateTime<Utc>>,
    pub important: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftField {
    Title,
    Description,
    Due,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayMode {
    Stable,
    Shuffled,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("missing required fields: {}", join_fields(.0))]
    MissingFields(Vec<DraftField>),
}

/// Reminders of one screen, kept in creation order.
#[derive(Debug)]
pub struct ReminderStore {
    reminders: Vec<Reminder>,
    next_id: ReminderId,
}

impl Draft {
    pub fn missing_fields(&self) -> Vec<DraftField> {
        let mut missing = Vec::new();
        if self.title.is_empty() {
            missing.push(DraftField::Title);
        }
        if self.description.is_empty() {
            missing.push(DraftField::Description);
        }
        if self.due.is_none() {
            missing.push(DraftField::Due);
        }
        missing
    }

    pub fn is_blank(&self) -> bool {
        *self == Draft::default()
    }
}

impl fmt::Display for DraftField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            DraftField::Title => "title",
            DraftField::Description => "description",
            DraftField::Due => "due date",
        };
        f.write_str(label)
    }
}

fn join_fields(fields: &[DraftField]) -> String {
    fields
        .iter()
        .map(|f| f.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

impl Default for ReminderStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ReminderStore {
    pub fn new() -> Self {
        ReminderStore {
            reminders: Vec::new(),
            next_id: 1,
        }
    }

    pub fn reminders(&self) -> &[Reminder] {
        &self.reminders
    }

    pub fn len(&self) -> usize {
        self.reminders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reminders.is_empty()
    }

    pub fn get(&self, id: ReminderId) -> Option<&Reminder> {
        self.reminders.iter().find(|r| r.id == id)
    }

    /// Appends a reminder built from `draft`. Nothing is stored when a
    /// required field is missing.
    pub fn add(&mut self, draft: &Draft) -> Result<ReminderId, ValidationError> {
        let missing = draft.missing_fields();
        let due = match draft.due {
            Some(due) if missing.is_empty() => due,
            _ => return Err(ValidationError::MissingFields(missing)),
        };
        let id = self.next_id;
        self.next_id += 1;
        self.reminders.push(Reminder {
            id,
            title: draft.title.clone(),
            description: draft.description.clone(),
            due,
            important: draft.important,
        });
        Ok(id)
    }

    pub fn remove(&mut self, id: ReminderId) -> Option<Reminder> {
        let idx = self.reminders.iter().position(|r| r.id == id)?;
        Some(self.reminders.remove(idx))
    }

    /// Projects the stored order for display. `Shuffled` draws a new
    /// permutation on every call and leaves storage untouched.
    pub fn display_order<R>(&self, mode: DisplayMode, rng: &mut R) -> Vec<&Reminder>
    where
        R: Rng + ?Sized,
    {
        let mut view: Vec<&Reminder> = self.reminders.iter().collect();
        if mode == DisplayMode::Shuffled {
            shuffle(&mut view, rng);
        }
        view
    }
}

/// Descending Fisher-Yates: each slot `i` swaps with a uniform pick from `0..=i`.
pub fn shuffle<T, R>(items: &mut [T], rng: &mut R)
where
    R: Rng + ?Sized,
{
    for i in (1..items.len()).rev() {
        let j = rng.gen_range(0..=i);
        items.swap(i, j);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn day(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
    }

    fn draft(title: &str, description: &str, due: Option<DateTime<Utc>>, important: bool) -> Draft {
        Draft {
            title: title.into(),
            description: description.into(),
            due,
            important,
        }
    }

    fn ids(view: &[&Reminder]) -> Vec<ReminderId> {
        view.iter().map(|r| r.id).collect()
    }

    #[test]
    fn add_appends_with_draft_importance() {
        let mut store = ReminderStore::new();
        store
            .add(&draft("a", "b", Some(day(2024, 1, 1)), false))
            .unwrap();
        let id = store
            .add(&draft("c", "d", Some(day(2024, 1, 2)), true))
            .unwrap();
        assert_eq!(store.len(), 2);
        let last = store.reminders().last().unwrap();
        assert_eq!(last.id, id);
        assert!(last.important);
        assert_eq!(last.title, "c");
    }

    #[test]
    fn add_rejects_each_missing_field_without_mutating() {
        let mut store = ReminderStore::new();
        let cases = [
            draft("", "desc", Some(day(2024, 1, 1)), false),
            draft("title", "desc", None, true),
            draft("", "", None, false),
        ];
        for case in cases {
            assert!(store.add(&case).is_err());
            assert!(store.is_empty());
        }
        let err = store.add(&Draft::default()).unwrap_err();
        assert_eq!(
            err,
            ValidationError::MissingFields(vec![
                DraftField::Title,
                DraftField::Description,
                DraftField::Due
            ])
        );
        assert_eq!(
            err.to_string(),
            "missing required fields: title, description, due date"
        );
    }

    #[test]
    fn text_is_stored_exactly_as_typed() {
        let mut store = ReminderStore::new();
        let blank = store
            .add(&draft(" ", "2%", Some(day(2024, 1, 1)), false))
            .unwrap();
        let padded = store
            .add(&draft("  Buy milk ", " 2% ", Some(day(2024, 1, 2)), false))
            .unwrap();
        assert_eq!(store.get(blank).unwrap().title, " ");
        let stored = store.get(padded).unwrap();
        assert_eq!(stored.title, "  Buy milk ");
        assert_eq!(stored.description, " 2% ");
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn remove_keeps_relative_order() {
        let mut store = ReminderStore::new();
        for t in ["a", "b", "c", "d"] {
            store.add(&draft(t, t, Some(day(2024, 2, 1)), false)).unwrap();
        }
        let removed = store.remove(2).unwrap();
        assert_eq!(removed.title, "b");
        let titles: Vec<&str> = store.reminders().iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["a", "c", "d"]);
    }

    #[test]
    fn remove_absent_id_is_noop() {
        let mut store = ReminderStore::new();
        store.add(&draft("a", "a", Some(day(2024, 2, 1)), false)).unwrap();
        assert!(store.remove(42).is_none());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn ids_are_not_reused_after_delete() {
        let mut store = ReminderStore::new();
        let d = draft("a", "a", Some(day(2024, 2, 1)), false);
        let first = store.add(&d).unwrap();
        let second = store.add(&d).unwrap();
        store.remove(first);
        let third = store.add(&d).unwrap();
        assert_eq!((first, second, third), (1, 2, 3));
        assert!(store.get(second).is_some());
    }

    #[test]
    fn shuffled_is_permutation_and_storage_stays_stable() {
        let mut store = ReminderStore::new();
        for t in ["a", "b", "c", "d", "e"] {
            store.add(&draft(t, t, Some(day(2024, 3, 1)), false)).unwrap();
        }
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            let mut shuffled = ids(&store.display_order(DisplayMode::Shuffled, &mut rng));
            shuffled.sort_unstable();
            assert_eq!(shuffled, vec![1, 2, 3, 4, 5]);
            assert_eq!(
                ids(&store.display_order(DisplayMode::Stable, &mut rng)),
                vec![1, 2, 3, 4, 5]
            );
        }
    }

    #[test]
    fn shuffle_is_roughly_uniform() {
        let mut store = ReminderStore::new();
        for t in ["a", "b", "c"] {
            store.add(&draft(t, t, Some(day(2024, 3, 1)), false)).unwrap();
        }
        let trials = 3000;
        let mut counts = [[0usize; 3]; 3];
        let mut rng = StdRng::seed_from_u64(2024);
        for _ in 0..trials {
            let view = store.display_order(DisplayMode::Shuffled, &mut rng);
            for (pos, reminder) in view.iter().enumerate() {
                counts[(reminder.id - 1) as usize][pos] += 1;
            }
        }
        for row in counts {
            for count in row {
                assert!((800..=1200).contains(&count), "skewed count {}", count);
            }
        }
    }

    #[test]
    fn shuffle_handles_tiny_slices() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut empty: [u8; 0] = [];
        shuffle(&mut empty, &mut rng);
        let mut one = [9];
        shuffle(&mut one, &mut rng);
        assert_eq!(one, [9]);
    }

    #[test]
    fn end_to_end_add_remove_reject() {
        let mut store = ReminderStore::new();
        let a = store
            .add(&draft("Buy milk", "2%", Some(day(2024, 1, 5)), false))
            .unwrap();
        assert_eq!(a, 1);
        let b = store
            .add(&draft("Call mom", "birthday", Some(day(2024, 1, 6)), true))
            .unwrap();
        assert_eq!(b, 2);
        store.remove(1);
        assert_eq!(store.len(), 1);
        assert_eq!(store.reminders()[0].id, 2);
        assert!(store
            .add(&draft("", "x", Some(day(2024, 1, 7)), false))
            .is_err());
        assert_eq!(store.len(), 1);
        assert_eq!(store.reminders()[0].title, "Call mom");
    }
}
