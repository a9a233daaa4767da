//! Static portfolio content and the per-window slices rendered inside content windows.

use platform_host::AssetResolver;
use serde::{Deserialize, Serialize};
use thiserror::Error;

const EMBEDDED_PORTFOLIO: &str = include_str!("../content/portfolio.json");

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("failed to parse portfolio content: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalInfo {
    pub fullname: String,
    pub title: String,
    pub bio: String,
    pub avatar: String,
    pub location: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperienceEntry {
    pub company: String,
    pub position: String,
    pub period: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EducationEntry {
    pub institution: String,
    pub degree: String,
    pub period: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectEntry {
    pub id: u32,
    pub title: String,
    pub description: String,
    pub technologies: Vec<String>,
    pub image: String,
    pub link: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialLinks {
    pub github: String,
    pub linkedin: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortfolioContent {
    pub personal: PersonalInfo,
    pub experience: Vec<ExperienceEntry>,
    pub education: Vec<EducationEntry>,
    pub projects: Vec<ProjectEntry>,
    pub social: SocialLinks,
}

impl PortfolioContent {
    pub fn from_json_str(raw: &str) -> Result<Self, ContentError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Portfolio bundled into the binary at build time.
    pub fn embedded() -> Result<Self, ContentError> {
        Self::from_json_str(EMBEDDED_PORTFOLIO)
    }

    /// First whitespace-separated token of the full name, or `""`.
    pub fn first_name(&self) -> &str {
        self.personal.fullname.split_whitespace().next().unwrap_or("")
    }

    /// Headline shown on the welcome screen and the desktop toast.
    pub fn welcome_headline(&self) -> String {
        match self.first_name() {
            "" => "Welcome.".to_string(),
            first => format!("Welcome, {first}."),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContentKind {
    About,
    Experience,
    Projects,
    Contact,
}

/// Content handle captured once when a window opens.
///
/// Image fields hold public URLs resolved against the asset base at open time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WindowContent {
    About {
        personal: PersonalInfo,
        social: SocialLinks,
    },
    Experience {
        experience: Vec<ExperienceEntry>,
        education: Vec<EducationEntry>,
    },
    Projects {
        projects: Vec<ProjectEntry>,
    },
    Contact {
        email: String,
        location: String,
        social: SocialLinks,
    },
}

impl WindowContent {
    pub fn build(kind: ContentKind, content: &PortfolioContent, assets: &AssetResolver) -> Self {
        match kind {
            ContentKind::About => Self::About {
                personal: PersonalInfo {
                    avatar: assets.image_url(&content.personal.avatar),
                    ..content.personal.clone()
                },
                social: content.social.clone(),
            },
            ContentKind::Experience => Self::Experience {
                experience: content.experience.clone(),
                education: content.education.clone(),
            },
            ContentKind::Projects => Self::Projects {
                projects: content
                    .projects
                    .iter()
                    .map(|project| ProjectEntry {
                        image: assets.image_url(&project.image),
                        ..project.clone()
                    })
                    .collect(),
            },
            ContentKind::Contact => Self::Contact {
                email: content.personal.email.clone(),
                location: content.personal.location.clone(),
                social: content.social.clone(),
            },
        }
    }

    pub fn kind(&self) -> ContentKind {
        match self {
            Self::About { .. } => ContentKind::About,
            Self::Experience { .. } => ContentKind::Experience,
            Self::Projects { .. } => ContentKind::Projects,
            Self::Contact { .. } => ContentKind::Contact,
        }
    }
}
