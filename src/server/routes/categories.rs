use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::{
    config::ApiSettings,
    db::queries::{categories::get_all_categories, questions::get_questions_for_category},
    server::{app::AppState, errors::ApiError},
};

use super::{category_map, ApiResponse, CategoryMap, QuestionList};

#[derive(Serialize, Deserialize, Debug)]
pub struct CategoriesResponse {
    pub success: bool,
    pub categories: CategoryMap,
}

async fn get_categories(State(pool): State<SqlitePool>) -> ApiResponse<CategoriesResponse> {
    let categories = get_all_categories(&pool).await?;
    if categories.is_empty() {
        return Err(ApiError::NotFound("no categories".to_owned()));
    }
    Ok(Json(CategoriesResponse {
        success: true,
        categories: category_map(categories),
    }))
}

// Not paginated, unlike GET /questions.
async fn questions_for_category(
    State(pool): State<SqlitePool>,
    State(api): State<ApiSettings>,
    Path(id): Path<String>,
) -> ApiResponse<QuestionList> {
    let category_id = id
        .parse::<i64>()
        .ok()
        .filter(|id| (1..=api.max_category_id).contains(id))
        .ok_or_else(|| ApiError::BadRequest(format!("invalid category id {id:?}")))?;

    let questions = get_questions_for_category(&pool, category_id).await?;
    if questions.is_empty() {
        return Err(ApiError::NotFound(format!(
            "no questions in category {category_id}"
        )));
    }
    Ok(Json(QuestionList {
        success: true,
        total_questions: questions.len(),
        questions,
        categories: None,
        current_category: Some(category_id),
    }))
}

pub fn category_router() -> Router<AppState> {
    Router::new()
        .route("/categories", get(get_categories))
        .route("/categories/{id}/questions", get(questions_for_category))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;

    use super::*;
    use crate::server::errors::ErrorBody;
    use crate::test_utils::{create_test_app, seed_questions};

    #[sqlx::test]
    async fn lists_seeded_categories(pool: SqlitePool) {
        let app = create_test_app(pool);

        let response = app.get("/categories").await;
        response.assert_status_ok();
        let body: CategoriesResponse = response.json();
        assert!(body.success);
        assert_eq!(body.categories.len(), 6);
        assert_eq!(body.categories[&2], "Art");
    }

    #[sqlx::test]
    async fn category_keys_are_json_object_keys(pool: SqlitePool) {
        let app = create_test_app(pool);

        let body: serde_json::Value = app.get("/categories").await.json();
        assert_eq!(body["categories"]["1"], "Science");
        assert_eq!(body["categories"]["6"], "Sports");
    }

    #[sqlx::test]
    async fn no_categories_is_not_found(pool: SqlitePool) {
        sqlx::query("DELETE FROM categories")
            .execute(&pool)
            .await
            .unwrap();
        let app = create_test_app(pool);

        let response = app.get("/categories").await;
        response.assert_status(StatusCode::NOT_FOUND);
        let body: ErrorBody = response.json();
        assert!(!body.success);
        assert_eq!(body.error, 404);
        assert_eq!(body.message, "Not found");
    }

    #[sqlx::test]
    async fn questions_by_category_are_unpaginated(pool: SqlitePool) {
        seed_questions(&pool).await;
        let app = create_test_app(pool);

        let response = app.get("/categories/3/questions").await;
        response.assert_status_ok();
        let body: QuestionList = response.json();
        assert!(body.success);
        assert_eq!(body.current_category, Some(3));
        assert_eq!(body.questions.len(), body.total_questions);
        assert_eq!(body.total_questions, 3);
        assert!(body.questions.iter().all(|q| q.category == 3));
    }

    #[sqlx::test]
    async fn category_listing_ignores_page_size(pool: SqlitePool) {
        seed_questions(&pool).await;
        for n in 0..12 {
            sqlx::query(
                "INSERT INTO questions (question, answer, difficulty, category) VALUES (?1, 'x', 1, 1)",
            )
            .bind(format!("Extra science question {n}"))
            .execute(&pool)
            .await
            .unwrap();
        }
        let app = create_test_app(pool);

        let body: QuestionList = app.get("/categories/1/questions?page=2").await.json();
        assert_eq!(body.total_questions, 15);
        assert_eq!(body.questions.len(), 15);
    }

    #[sqlx::test]
    async fn out_of_range_category_is_bad_request(pool: SqlitePool) {
        seed_questions(&pool).await;
        let app = create_test_app(pool);

        for path in [
            "/categories/8/questions",
            "/categories/0/questions",
            "/categories/-1/questions",
            "/categories/art/questions",
        ] {
            let response = app.get(path).await;
            response.assert_status(StatusCode::BAD_REQUEST);
            let body: ErrorBody = response.json();
            assert_eq!(body.error, 400);
            assert_eq!(body.message, "Bad request");
        }
    }

    #[sqlx::test]
    async fn empty_category_is_not_found(pool: SqlitePool) {
        let app = create_test_app(pool);

        let response = app.get("/categories/4/questions").await;
        response.assert_status(StatusCode::NOT_FOUND);
    }
}
