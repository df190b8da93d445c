use std::collections::HashSet;
use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    routing::post,
    Json, Router,
};
use serde::Deserialize;
use serde_aux::field_attributes::deserialize_number_from_string;
use sqlx::SqlitePool;

use crate::{
    config::ApiSettings,
    db::queries::questions::{get_all_questions, get_questions_for_category},
    selector::{pick_unseen, Picker, QuizCategory},
    server::{app::AppState, errors::ApiError},
    telemetry::QUIZ_CNTR,
};

use super::{ApiResponse, SingleQuestion};

#[derive(Deserialize, Debug)]
struct QuizRequest {
    #[serde(default)]
    previous_questions: Vec<i64>,
    quiz_category: QuizCategoryBody,
}

// clients send {"type": "Art", "id": 2}; only the id matters, and it may arrive as a string
#[derive(Deserialize, Debug)]
struct QuizCategoryBody {
    #[serde(deserialize_with = "deserialize_number_from_string")]
    id: i64,
}

async fn next_question(
    State(pool): State<SqlitePool>,
    State(picker): State<Arc<dyn Picker>>,
    State(api): State<ApiSettings>,
    payload: Result<Json<QuizRequest>, JsonRejection>,
) -> ApiResponse<SingleQuestion> {
    let Json(request) = payload?;
    let category = QuizCategory::from_id(request.quiz_category.id, api.max_category_id)?;

    let candidates = match category {
        QuizCategory::All => get_all_questions(&pool).await?,
        QuizCategory::Only(id) => get_questions_for_category(&pool, id).await?,
    };
    let previous: HashSet<i64> = request.previous_questions.into_iter().collect();
    let question = pick_unseen(candidates, &previous, picker.as_ref());

    let outcome = if question.is_some() {
        "served"
    } else {
        "exhausted"
    };
    QUIZ_CNTR
        .with_label_values(&[category.to_string().as_str(), outcome])
        .inc();
    tracing::debug!(%category, asked = previous.len(), outcome, "Quiz round");

    Ok(Json(SingleQuestion {
        success: true,
        question,
    }))
}

pub fn quiz_router() -> Router<AppState> {
    Router::new().route("/quizzes", post(next_question))
}
