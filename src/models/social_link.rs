use sqlx::PgPool;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct SocialLink {
    pub id: i64,
    pub platform: String,
    pub url: String,
    pub icon_class: String,
    pub is_active: bool,
    pub sort_order: i32,
}

impl SocialLink {
    /// Human label for the platform code; unknown codes are shown as-is.
    pub fn platform_display(&self) -> String {
        let label = match self.platform.as_str() {
            "facebook" => "Facebook",
            "twitter" => "Twitter",
            "instagram" => "Instagram",
            "linkedin" => "LinkedIn",
            "github" => "GitHub",
            "youtube" => "YouTube",
            "discord" => "Discord",
            "email" => "Email",
            "website" => "Website",
            "other" => "Other",
            other => return other.to_string(),
        };
        label.to_string()
    }
}

const SELECT_LINK: &str = "SELECT id, platform, url, icon_class, is_active, sort_order FROM social_links";

pub async fn find_active(pool: &PgPool) -> Result<Vec<SocialLink>, sqlx::Error> {
    let sql = format!("{SELECT_LINK} WHERE is_active ORDER BY sort_order, id");
    sqlx::query_as::<_, SocialLink>(&sql).fetch_all(pool).await
}

pub async fn find_active_by_id(pool: &PgPool, id: i64) -> Result<Option<SocialLink>, sqlx::Error> {
    let sql = format!("{SELECT_LINK} WHERE is_active AND id = $1");
    sqlx::query_as::<_, SocialLink>(&sql).bind(id).fetch_optional(pool).await
}
