use chrono::{DateTime, Utc};
use sqlx::PgPool;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Resource {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub category: String,
    pub thumbnail: Option<String>,
    pub file: Option<String>,
    pub external_link: Option<String>,
    pub author: Option<String>,
    pub tags: String,
    pub is_featured: bool,
    pub is_active: bool,
    pub download_count: i64,
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Resource {
    pub fn category_display(&self) -> String {
        let label = match self.category.as_str() {
            "tutorial" => "Tutorial",
            "documentation" => "Documentation",
            "video" => "Video",
            "article" => "Article",
            "tool" => "Tool",
            "dataset" => "Dataset",
            "paper" => "Research Paper",
            "other" => "Other",
            other => return other.to_string(),
        };
        label.to_string()
    }

    /// Comma separated tags, trimmed, empties dropped.
    pub fn tag_list(&self) -> Vec<String> {
        self.tags
            .split(',')
            .map(|t| t.trim())
            .filter(|t| !t.is_empty())
            .map(String::from)
            .collect()
    }
}

const SELECT_RESOURCE: &str = "\
    SELECT id, title, description, category, thumbnail, file, external_link, author, tags, \
           is_featured, is_active, download_count, sort_order, created_at, updated_at \
    FROM resources";

pub async fn find_active(pool: &PgPool) -> Result<Vec<Resource>, sqlx::Error> {
    let sql = format!("{SELECT_RESOURCE} WHERE is_active ORDER BY sort_order, created_at DESC");
    sqlx::query_as::<_, Resource>(&sql).fetch_all(pool).await
}

pub async fn find_active_by_id(pool: &PgPool, id: i64) -> Result<Option<Resource>, sqlx::Error> {
    let sql = format!("{SELECT_RESOURCE} WHERE is_active AND id = $1");
    sqlx::query_as::<_, Resource>(&sql).bind(id).fetch_optional(pool).await
}

/// Atomically bump the download counter of an active resource.
/// Returns the new count, or `None` when no active resource has that id.
pub async fn increment_download(pool: &PgPool, id: i64) -> Result<Option<i64>, sqlx::Error> {
    let row: Option<(i64,)> = sqlx::query_as(
        "UPDATE resources SET download_count = download_count + 1 \
         WHERE id = $1 AND is_active \
         RETURNING download_count",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(row.map(|r| r.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_list_ignores_blank_entries() {
        let now = Utc::now();
        let r = Resource {
            id: 1,
            title: "Rust book".to_string(),
            description: String::new(),
            category: "paper".to_string(),
            thumbnail: None,
            file: None,
            external_link: None,
            author: None,
            tags: " rust, ,systems,  embedded ".to_string(),
            is_featured: false,
            is_active: true,
            download_count: 0,
            sort_order: 0,
            created_at: now,
            updated_at: now,
        };
        assert_eq!(r.tag_list(), vec!["rust", "systems", "embedded"]);
        assert_eq!(r.category_display(), "Research Paper");
    }
}
