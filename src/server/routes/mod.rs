mod categories;
mod questions;
mod quizzes;

use std::collections::BTreeMap;

use axum::Json;
use serde::{Deserialize, Serialize};

use crate::db::{Category, Question};
use crate::server::errors::ApiError;

pub use categories::category_router;
pub use questions::questions_router;
pub use quizzes::quiz_router;

pub type ApiResponse<T> = Result<Json<T>, ApiError>;

/// Category id to category type, serialized as a JSON object.
pub type CategoryMap = BTreeMap<i64, String>;

pub fn category_map(categories: Vec<Category>) -> CategoryMap {
    categories.into_iter().map(|c| (c.id, c.kind)).collect()
}

/// Response of every endpoint that returns a list of questions.
#[derive(Serialize, Deserialize, Debug)]
pub struct QuestionList {
    pub success: bool,
    pub questions: Vec<Question>,
    pub total_questions: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categories: Option<CategoryMap>,
    pub current_category: Option<i64>,
}

/// Response carrying a single question, or `null` once a quiz is exhausted.
#[derive(Serialize, Deserialize, Debug)]
pub struct SingleQuestion {
    pub success: bool,
    pub question: Option<Question>,
}
