use chrono::NaiveDate;
use serde::Serialize;

use crate::models::site_settings::SiteSettings;
use crate::models::social_link::SocialLink;
use crate::models::sponsor::Sponsor;
use crate::models::team_member::{TeamMember, TeamRole};

#[derive(Serialize, Debug, Clone)]
pub struct SponsorResponse {
    pub id: i64,
    pub name: String,
    pub logo: String,
    pub website: Option<String>,
    pub collaboration_agenda: String,
    pub collaboration_date: NaiveDate,
    pub collaboration_date_formatted: String,
    pub is_active: bool,
    pub order: i32,
}

impl From<Sponsor> for SponsorResponse {
    fn from(s: Sponsor) -> Self {
        SponsorResponse {
            id: s.id,
            name: s.name,
            logo: s.logo,
            website: s.website,
            collaboration_agenda: s.collaboration_agenda,
            collaboration_date_formatted: s.collaboration_date.format("%B %Y").to_string(),
            collaboration_date: s.collaboration_date,
            is_active: s.is_active,
            order: s.sort_order,
        }
    }
}

#[derive(Serialize, Debug, Clone)]
pub struct SocialLinkResponse {
    pub id: i64,
    pub platform: String,
    pub platform_display: String,
    pub url: String,
    pub icon_class: String,
    pub is_active: bool,
    pub order: i32,
}

impl From<SocialLink> for SocialLinkResponse {
    fn from(l: SocialLink) -> Self {
        SocialLinkResponse {
            platform_display: l.platform_display(),
            id: l.id,
            platform: l.platform,
            url: l.url,
            icon_class: l.icon_class,
            is_active: l.is_active,
            order: l.sort_order,
        }
    }
}

#[derive(Serialize, Debug, Clone)]
pub struct TeamMemberResponse {
    pub id: i64,
    pub name: String,
    pub role: TeamRole,
    pub role_display: &'static str,
    pub position: String,
    pub email: Option<String>,
    pub quote: Option<String>,
    pub tech_stack: Option<String>,
    pub image: Option<String>,
    pub linkedin_url: Option<String>,
    pub github_url: Option<String>,
    pub twitter_url: Option<String>,
    pub instagram_url: Option<String>,
    pub website_url: Option<String>,
    pub order: i32,
    pub is_active: bool,
}

impl From<TeamMember> for TeamMemberResponse {
    fn from(t: TeamMember) -> Self {
        TeamMemberResponse {
            id: t.id,
            name: t.name,
            role: t.role,
            role_display: t.role.display(),
            position: t.position,
            email: t.email,
            quote: t.quote,
            tech_stack: t.tech_stack,
            image: t.image,
            linkedin_url: t.linkedin_url,
            github_url: t.github_url,
            twitter_url: t.twitter_url,
            instagram_url: t.instagram_url,
            website_url: t.website_url,
            order: t.sort_order,
            is_active: t.is_active,
        }
    }
}

/// Everything the landing page needs in one response.
#[derive(Serialize, Debug)]
pub struct HomeResponse {
    pub site_settings: Option<SiteSettings>,
    pub sponsors: Vec<SponsorResponse>,
    pub mentors: Vec<TeamMemberResponse>,
    pub leads: Vec<TeamMemberResponse>,
    pub social_links: Vec<SocialLinkResponse>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sponsor_date_is_month_and_year() {
        let sponsor = Sponsor {
            id: 1,
            name: "Acme".to_string(),
            logo: "sponsors/acme.png".to_string(),
            website: None,
            collaboration_agenda: "Workshop".to_string(),
            collaboration_date: NaiveDate::from_ymd_opt(2025, 3, 14).unwrap(),
            is_active: true,
            sort_order: 2,
        };
        let json = serde_json::to_value(SponsorResponse::from(sponsor)).unwrap();
        assert_eq!(json["collaboration_date_formatted"], "March 2025");
        assert_eq!(json["collaboration_date"], "2025-03-14");
        assert_eq!(json["order"], 2);
    }

    #[test]
    fn social_link_has_platform_label() {
        let link = SocialLink {
            id: 1,
            platform: "github".to_string(),
            url: "https://github.com/tars".to_string(),
            icon_class: "fab fa-github".to_string(),
            is_active: true,
            sort_order: 0,
        };
        assert_eq!(SocialLinkResponse::from(link).platform_display, "GitHub");
    }
}
