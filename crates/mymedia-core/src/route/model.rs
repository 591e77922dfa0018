//! Console route table.

use serde::Serialize;
use std::fmt;

/// A view of the administration console.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "route", content = "id", rename_all = "snake_case")]
pub enum Route {
    Home,
    Help,
    Contact,
    Login,
    Register,
    Dashboard,
    AdminUsers,
    AdminTopics,
    AdminReactionTypes,
    AdminContentTypes,
    AdminContents,
    AdminCategories,
    ContentsByCategory(String),
    ContentDetail(String),
}

impl Route {
    /// Parses a request path. Query strings and a trailing slash are ignored.
    pub fn parse(path: &str) -> Option<Self> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let trimmed = path.trim_end_matches('/');
        let segments: Vec<&str> = trimmed
            .split('/')
            .filter(|segment| !segment.is_empty())
            .collect();

        let route = match segments.as_slice() {
            [] => Self::Home,
            ["help"] => Self::Help,
            ["contact"] => Self::Contact,
            ["login"] => Self::Login,
            ["register"] => Self::Register,
            ["dashboard"] => Self::Dashboard,
            ["admin", "users"] => Self::AdminUsers,
            ["admin", "topics"] => Self::AdminTopics,
            ["admin", "reactionType"] => Self::AdminReactionTypes,
            ["admin", "contentType"] => Self::AdminContentTypes,
            ["admin", "content"] => Self::AdminContents,
            ["admin", "category"] => Self::AdminCategories,
            ["contents-by-category", id] => Self::ContentsByCategory((*id).to_string()),
            ["content", id] => Self::ContentDetail((*id).to_string()),
            _ => return None,
        };
        Some(route)
    }

    pub fn path(&self) -> String {
        match self {
            Self::Home => "/".to_string(),
            Self::Help => "/help".to_string(),
            Self::Contact => "/contact".to_string(),
            Self::Login => "/login".to_string(),
            Self::Register => "/register".to_string(),
            Self::Dashboard => "/dashboard".to_string(),
            Self::AdminUsers => "/admin/users".to_string(),
            Self::AdminTopics => "/admin/topics".to_string(),
            Self::AdminReactionTypes => "/admin/reactionType".to_string(),
            Self::AdminContentTypes => "/admin/contentType".to_string(),
            Self::AdminContents => "/admin/content".to_string(),
            Self::AdminCategories => "/admin/category".to_string(),
            Self::ContentsByCategory(id) => format!("/contents-by-category/{id}"),
            Self::ContentDetail(id) => format!("/content/{id}"),
        }
    }

    /// Protected views render only for an authenticated session.
    pub fn is_protected(&self) -> bool {
        !matches!(
            self,
            Self::Home | Self::Help | Self::Contact | Self::Login | Self::Register
        )
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}
