pub mod class;
pub mod domain;
pub mod meeting;
pub mod member;
pub mod resource;
pub mod schedule;
pub mod site_settings;
pub mod social_link;
pub mod sponsor;
pub mod team_member;
pub mod user;
