//! In-memory question selection: pagination, search and the quiz pick.

use std::collections::HashSet;
use std::fmt;

use rand::Rng;

use crate::db::Question;

/// Source of randomness for the quiz pick.
pub trait Picker: Send + Sync {
    /// Returns an index in `0..len`. Never called with `len == 0`.
    fn pick(&self, len: usize) -> usize;
}

pub struct ThreadRngPicker;

impl Picker for ThreadRngPicker {
    fn pick(&self, len: usize) -> usize {
        rand::thread_rng().gen_range(0..len)
    }
}

/// Returns page `page` (1-based) of `items`. Pages before the first or past
/// the last are empty.
pub fn paginate<T>(items: &[T], page: i64, per_page: usize) -> &[T] {
    if page < 1 {
        return &[];
    }
    let start = usize::try_from(page - 1)
        .ok()
        .and_then(|p| p.checked_mul(per_page))
        .unwrap_or(usize::MAX);
    if start >= items.len() {
        return &[];
    }
    let end = start.saturating_add(per_page).min(items.len());
    &items[start..end]
}

/// Case-insensitive substring match on the question text.
pub fn search(questions: Vec<Question>, term: &str) -> Vec<Question> {
    let needle = term.to_lowercase();
    questions
        .into_iter()
        .filter(|q| q.question.to_lowercase().contains(&needle))
        .collect()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuizCategory {
    All,
    Only(i64),
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
#[error("category {id} is outside 0..={max}")]
pub struct CategoryOutOfRange {
    pub id: i64,
    pub max: i64,
}

impl QuizCategory {
    /// `0` selects every category.
    pub fn from_id(id: i64, max: i64) -> Result<Self, CategoryOutOfRange> {
        match id {
            0 => Ok(QuizCategory::All),
            id if (1..=max).contains(&id) => Ok(QuizCategory::Only(id)),
            id => Err(CategoryOutOfRange { id, max }),
        }
    }
}

impl fmt::Display for QuizCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuizCategory::All => f.write_str("all"),
            QuizCategory::Only(id) => write!(f, "{id}"),
        }
    }
}

/// Picks one question whose id is not in `previous`. `None` means the pool is
/// exhausted and the game is over.
pub fn pick_unseen(
    pool: Vec<Question>,
    previous: &HashSet<i64>,
    picker: &dyn Picker,
) -> Option<Question> {
    let mut candidates: Vec<Question> = pool
        .into_iter()
        .filter(|q| !previous.contains(&q.id))
        .collect();
    if candidates.is_empty() {
        return None;
    }
    let index = picker.pick(candidates.len());
    Some(candidates.swap_remove(index))
}
