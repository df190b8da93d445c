use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    response::{IntoResponse, Response},
    routing::{delete, get},
    Json, Router,
};
use serde_json::Value;
use sqlx::SqlitePool;

use crate::{
    config::ApiSettings,
    db::{
        queries::{
            categories::get_all_categories,
            questions::{self, get_all_questions},
        },
        NewQuestion,
    },
    selector::{paginate, search},
    server::{app::AppState, deserializers::PageQuery, errors::ApiError},
};

use super::{category_map, ApiResponse, QuestionList, SingleQuestion};

const SEARCH_TERM: &str = "searchTerm";

async fn list_questions(
    State(pool): State<SqlitePool>,
    State(api): State<ApiSettings>,
    Query(PageQuery { page }): Query<PageQuery>,
) -> ApiResponse<QuestionList> {
    let questions = get_all_questions(&pool).await?;
    let categories = get_all_categories(&pool).await?;
    let current_page = paginate(&questions, page, api.questions_per_page);

    // categories can only be empty here if foreign keys were off when they were removed
    if categories.is_empty() || current_page.is_empty() {
        return Err(ApiError::NotFound(format!("no questions on page {page}")));
    }
    Ok(Json(QuestionList {
        success: true,
        questions: current_page.to_vec(),
        total_questions: questions.len(),
        categories: Some(category_map(categories)),
        current_category: None,
    }))
}

/// A body with `searchTerm` is a search; anything else is a new question.
async fn search_or_create(
    State(pool): State<SqlitePool>,
    State(api): State<ApiSettings>,
    Query(PageQuery { page }): Query<PageQuery>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(body) = payload?;
    match body.get(SEARCH_TERM) {
        Some(term) => {
            let term = term
                .as_str()
                .ok_or_else(|| ApiError::BadRequest(format!("{SEARCH_TERM} must be a string")))?;
            Ok(search_questions(&pool, &api, term, page).await?.into_response())
        }
        None => Ok(create_question(&pool, body).await?.into_response()),
    }
}

async fn search_questions(
    pool: &SqlitePool,
    api: &ApiSettings,
    term: &str,
    page: i64,
) -> ApiResponse<QuestionList> {
    let matches = search(get_all_questions(pool).await?, term);
    tracing::debug!(term, matches = matches.len(), "Searched questions");
    Ok(Json(QuestionList {
        success: true,
        questions: paginate(&matches, page, api.questions_per_page).to_vec(),
        total_questions: matches.len(),
        categories: None,
        current_category: None,
    }))
}

async fn create_question(pool: &SqlitePool, body: Value) -> ApiResponse<SingleQuestion> {
    let new_question: NewQuestion = serde_json::from_value(body)
        .map_err(|err| ApiError::Unprocessable(format!("invalid question: {err}")))?;
    let question = questions::create_question(pool, &new_question)
        .await
        .map_err(|err| ApiError::Unprocessable(format!("could not store question: {err}")))?;

    tracing::info!(id = question.id, category = question.category, "Created question");
    Ok(Json(SingleQuestion {
        success: true,
        question: Some(question),
    }))
}

async fn delete_question(
    State(pool): State<SqlitePool>,
    Path(id): Path<String>,
) -> ApiResponse<SingleQuestion> {
    let id = id
        .parse::<i64>()
        .map_err(|_| ApiError::Unprocessable(format!("invalid question id {id:?}")))?;
    let deleted = questions::delete_question(&pool, id)
        .await
        .map_err(|err| ApiError::Unprocessable(format!("could not delete question {id}: {err}")))?
        .ok_or_else(|| ApiError::Unprocessable(format!("question {id} does not exist")))?;

    tracing::info!(id, "Deleted question");
    Ok(Json(SingleQuestion {
        success: true,
        question: Some(deleted),
    }))
}

pub fn questions_router() -> Router<AppState> {
    Router::new()
        .route("/questions", get(list_questions).post(search_or_create))
        .route("/questions/{id}", delete(delete_question))
}
