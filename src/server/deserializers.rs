use serde::{Deserialize, Deserializer};

const FIRST_PAGE: i64 = 1;

// a missing or unparseable ?page= falls back to the first page instead of rejecting the request
pub fn deserialize_page<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value
        .and_then(|v| v.trim().parse::<i64>().ok())
        .unwrap_or(FIRST_PAGE))
}

fn first_page() -> i64 {
    FIRST_PAGE
}

#[derive(Deserialize, Debug)]
pub struct PageQuery {
    #[serde(default = "first_page")]
    #[serde(deserialize_with = "deserialize_page")]
    pub page: i64,
}
