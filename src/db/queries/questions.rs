use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};

/// A stored question, in the shape it is served to clients.
#[derive(Serialize, Deserialize, FromRow, Clone, Debug, PartialEq)]
pub struct Question {
    pub id: i64,
    pub question: String,
    pub answer: String,
    pub difficulty: i64,
    pub category: i64,
}

#[derive(Deserialize, Clone, Debug)]
pub struct NewQuestion {
    pub question: String,
    pub answer: String,
    pub difficulty: i64,
    pub category: i64,
}

pub async fn get_all_questions(pool: &SqlitePool) -> sqlx::Result<Vec<Question>> {
    sqlx::query_as::<_, Question>(
        r#"
        SELECT id, question, answer, difficulty, category FROM questions ORDER BY id
        "#,
    )
    .fetch_all(pool)
    .await
}

pub async fn get_questions_for_category(
    pool: &SqlitePool,
    category_id: i64,
) -> sqlx::Result<Vec<Question>> {
    sqlx::query_as::<_, Question>(
        r#"
        SELECT id, question, answer, difficulty, category FROM questions
        WHERE questions.category = ?1
        ORDER BY id
        "#,
    )
    .bind(category_id)
    .fetch_all(pool)
    .await
}

/// Inserts the question and returns it with its generated id.
///
/// The insert runs in its own transaction; any error drops the transaction,
/// which rolls it back and hands the connection back to the pool.
pub async fn create_question(pool: &SqlitePool, new: &NewQuestion) -> sqlx::Result<Question> {
    let mut tx = pool.begin().await?;
    let question = sqlx::query_as::<_, Question>(
        r#"
        INSERT INTO questions (question, answer, difficulty, category) VALUES (?1, ?2, ?3, ?4)
        RETURNING id, question, answer, difficulty, category
        "#,
    )
    .bind(&new.question)
    .bind(&new.answer)
    .bind(new.difficulty)
    .bind(new.category)
    .fetch_one(&mut *tx)
    .await?;
    tx.commit().await?;
    Ok(question)
}

/// Deletes the question and returns what was deleted, or `None` if the id is unknown.
pub async fn delete_question(pool: &SqlitePool, id: i64) -> sqlx::Result<Option<Question>> {
    let mut tx = pool.begin().await?;
    let deleted = sqlx::query_as::<_, Question>(
        r#"
        DELETE FROM questions WHERE questions.id = ?1
        RETURNING id, question, answer, difficulty, category
        "#,
    )
    .bind(id)
    .fetch_optional(&mut *tx)
    .await?;
    if deleted.is_some() {
        tx.commit().await?;
    }
    Ok(deleted)
}

/// Upserts questions keeping their ids, all or nothing.
pub async fn import_questions(pool: &SqlitePool, questions: Vec<Question>) -> sqlx::Result<()> {
    let mut tx = pool.begin().await?;
    for question in questions {
        sqlx::query(
            r#"
            INSERT INTO questions (id, question, answer, difficulty, category) VALUES (?1, ?2, ?3, ?4, ?5)
            ON CONFLICT (id) DO UPDATE SET
                question = excluded.question,
                answer = excluded.answer,
                difficulty = excluded.difficulty,
                category = excluded.category
            "#,
        )
        .bind(question.id)
        .bind(question.question)
        .bind(question.answer)
        .bind(question.difficulty)
        .bind(question.category)
        .execute(&mut *tx)
        .await?;
    }
    tx.commit().await
}
