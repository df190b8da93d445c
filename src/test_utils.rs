//! Helpers shared by the HTTP and storage tests.

use std::sync::Arc;

use axum_test::TestServer;
use sqlx::SqlitePool;

use crate::config::ApiSettings;
use crate::db::queries::questions::{get_all_questions, import_questions};
use crate::db::Question;
use crate::selector::Picker;
use crate::server::app::{build_router, AppState};
use crate::transfer::read_records;

/// Always takes the first remaining candidate.
pub struct FirstPicker;

impl Picker for FirstPicker {
    fn pick(&self, _len: usize) -> usize {
        0
    }
}

pub fn create_test_app(pool: SqlitePool) -> TestServer {
    let state = AppState::new(pool, ApiSettings::default());
    TestServer::new(build_router(state)).expect("Failed to create test server")
}

pub fn create_test_app_with_picker(pool: SqlitePool, picker: Arc<dyn Picker>) -> TestServer {
    let state = AppState::new(pool, ApiSettings::default()).with_picker(picker);
    TestServer::new(build_router(state)).expect("Failed to create test server")
}

/// Loads the bundled 19-question data set and returns it in id order.
pub async fn seed_questions(pool: &SqlitePool) -> Vec<Question> {
    let questions: Vec<Question> = read_records(include_str!("../data/questions.csv").as_bytes())
        .expect("Bundled questions should parse");
    import_questions(pool, questions)
        .await
        .expect("Failed to seed questions");
    get_all_questions(pool)
        .await
        .expect("Failed to read seeded questions")
}

pub async fn find_question(pool: &SqlitePool, id: i64) -> sqlx::Result<Option<Question>> {
    sqlx::query_as::<_, Question>(
        "SELECT id, question, answer, difficulty, category FROM questions WHERE id = ?1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}
