//! Role Catalog: role name → skill keywords. Read-only after construction and shared
//! across requests as `Arc<RoleCatalog>`.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::matching::tokens::{tokenize_phrases, KeywordSet};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleEntry {
    pub role: String,
    pub skills: Vec<String>,
}

impl RoleEntry {
    /// Whitespace tokens of every skill phrase, unioned.
    pub fn skill_tokens(&self) -> KeywordSet {
        tokenize_phrases(self.skills.iter().map(String::as_str))
    }
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read role catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse role catalog {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("role catalog has no roles")]
    Empty,

    #[error("role catalog contains a role with a blank name")]
    BlankRole,

    #[error("role '{0}' is defined more than once")]
    DuplicateRole(String),

    #[error("role '{0}' has no skills")]
    NoSkills(String),
}

#[derive(Debug, Clone)]
pub struct RoleCatalog {
    entries: Vec<RoleEntry>,
}

impl RoleCatalog {
    /// Validates and normalizes the entries: names are trimmed, skills are trimmed and
    /// lowercased, blank skills dropped. Definition order is kept. Names must be unique
    /// ignoring ASCII case, so a case-insensitive lookup never has two candidates.
    pub fn new(entries: Vec<RoleEntry>) -> Result<Self, CatalogError> {
        if entries.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut seen = HashSet::new();
        let mut normalized = Vec::with_capacity(entries.len());

        for entry in entries {
            let role = entry.role.trim().to_string();
            if role.is_empty() {
                return Err(CatalogError::BlankRole);
            }
            if !seen.insert(role.to_ascii_lowercase()) {
                return Err(CatalogError::DuplicateRole(role));
            }

            let skills: Vec<String> = entry
                .skills
                .iter()
                .map(|s| s.trim().to_lowercase())
                .filter(|s| !s.is_empty())
                .collect();
            if skills.is_empty() {
                return Err(CatalogError::NoSkills(role));
            }

            normalized.push(RoleEntry { role, skills });
        }

        Ok(Self {
            entries: normalized,
        })
    }

    /// The default catalog of 27 roles.
    pub fn builtin() -> Self {
        let entries = BUILTIN_ROLES
            .iter()
            .map(|(role, skills)| RoleEntry {
                role: role.to_string(),
                skills: skills.iter().map(|s| s.to_string()).collect(),
            })
            .collect();
        Self::new(entries).expect("built-in role catalog is valid")
    }

    /// Reads a JSON array of `{"role": ..., "skills": [...]}` objects.
    pub fn from_json_file(path: &Path) -> Result<Self, CatalogError> {
        let raw = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let entries: Vec<RoleEntry> =
            serde_json::from_str(&raw).map_err(|source| CatalogError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        Self::new(entries)
    }

    /// The catalog at `path` if given, otherwise the built-in one.
    pub fn load(path: Option<&Path>) -> Result<Self, CatalogError> {
        let catalog = match path {
            Some(p) => {
                info!("Loading role catalog from {}", p.display());
                Self::from_json_file(p)?
            }
            None => Self::builtin(),
        };
        info!("Role catalog ready with {} roles", catalog.entries.len());
        Ok(catalog)
    }

    /// Looks a role up by exact name, then case-insensitively.
    pub fn get(&self, role: &str) -> Option<&RoleEntry> {
        let role = role.trim();
        self.entries
            .iter()
            .find(|e| e.role == role)
            .or_else(|| self.entries.iter().find(|e| e.role.eq_ignore_ascii_case(role)))
    }

    pub fn entries(&self) -> &[RoleEntry] {
        &self.entries
    }
}

const BUILTIN_ROLES: &[(&str, &[&str])] = &[
    (
        "Software Engineer",
        &[
            "python",
            "java",
            "c++",
            "data structures",
            "algorithms",
            "software development",
            "object-oriented programming",
        ],
    ),
    (
        "Data Scientist",
        &[
            "python",
            "machine learning",
            "data analysis",
            "statistics",
            "pandas",
            "numpy",
            "data visualization",
        ],
    ),
    (
        "Web Developer",
        &[
            "html",
            "css",
            "javascript",
            "react",
            "angular",
            "web development",
            "node.js",
            "frontend",
            "backend",
        ],
    ),
    (
        "DevOps Engineer",
        &[
            "ci/cd",
            "docker",
            "kubernetes",
            "linux",
            "aws",
            "azure",
            "terraform",
            "infrastructure",
            "monitoring",
        ],
    ),
    (
        "Cybersecurity Analyst",
        &[
            "security",
            "vulnerability assessment",
            "penetration testing",
            "network security",
            "firewalls",
            "incident response",
        ],
    ),
    (
        "AI/ML Engineer",
        &[
            "tensorflow",
            "keras",
            "deep learning",
            "nlp",
            "computer vision",
            "scikit-learn",
            "pytorch",
            "data modeling",
        ],
    ),
    (
        "Cloud Engineer",
        &[
            "aws",
            "azure",
            "gcp",
            "cloud computing",
            "terraform",
            "kubernetes",
            "devops",
            "serverless",
        ],
    ),
    (
        "Backend Developer",
        &[
            "node.js",
            "django",
            "flask",
            "spring boot",
            "sql",
            "mongodb",
            "rest api",
            "graphql",
        ],
    ),
    (
        "Frontend Developer",
        &[
            "html", "css", "javascript", "react", "vue.js", "angular", "next.js", "redux",
        ],
    ),
    (
        "Embedded Systems Engineer",
        &[
            "c",
            "c++",
            "embedded c",
            "microcontrollers",
            "rtos",
            "firmware development",
            "pcb design",
        ],
    ),
    (
        "Game Developer",
        &[
            "unity",
            "unreal engine",
            "c#",
            "c++",
            "game design",
            "animation",
            "ai in games",
        ],
    ),
    (
        "Blockchain Developer",
        &[
            "solidity",
            "ethereum",
            "smart contracts",
            "web3",
            "decentralized applications",
            "hyperledger",
        ],
    ),
    (
        "Full Stack Developer",
        &[
            "javascript",
            "react",
            "node.js",
            "express",
            "mongodb",
            "graphql",
            "docker",
            "aws",
        ],
    ),
    (
        "Data Engineer",
        &[
            "big data",
            "hadoop",
            "spark",
            "sql",
            "etl",
            "data pipelines",
            "data lakes",
        ],
    ),
    (
        "Product Manager",
        &[
            "product management",
            "business strategy",
            "project management",
            "agile",
            "scrum",
            "leadership",
        ],
    ),
    (
        "UI/UX Designer",
        &[
            "design",
            "user interface",
            "user experience",
            "wireframing",
            "figma",
            "adobe XD",
            "prototyping",
        ],
    ),
    (
        "Finance Analyst",
        &[
            "financial modeling",
            "budgeting",
            "forecasting",
            "excel",
            "accounting",
            "investment analysis",
            "risk management",
        ],
    ),
    (
        "Electrical Engineer",
        &[
            "circuit design",
            "power systems",
            "electrical testing",
            "pcb design",
            "automation",
            "matlab",
            "embedded systems",
        ],
    ),
    (
        "Mechanical Engineer",
        &[
            "cad",
            "solidworks",
            "autocad",
            "mechanical design",
            "manufacturing",
            "thermodynamics",
            "engineering analysis",
        ],
    ),
    (
        "Civil Engineer",
        &[
            "structural design",
            "construction management",
            "autocad",
            "surveying",
            "building codes",
            "project planning",
        ],
    ),
    (
        "Sales Manager",
        &[
            "sales strategy",
            "lead generation",
            "crm",
            "negotiation",
            "market research",
            "business development",
        ],
    ),
    (
        "Content Writer",
        &[
            "copywriting",
            "creative writing",
            "seo",
            "blogging",
            "editing",
            "proofreading",
            "content strategy",
        ],
    ),
    (
        "Graphic Designer",
        &[
            "adobe photoshop",
            "adobe illustrator",
            "graphic design",
            "branding",
            "typography",
            "visual storytelling",
        ],
    ),
    (
        "Digital Marketer",
        &[
            "seo",
            "sem",
            "google analytics",
            "content marketing",
            "social media",
            "email marketing",
            "ppc",
        ],
    ),
    (
        "Legal Advisor",
        &[
            "legal research",
            "contracts",
            "litigation",
            "compliance",
            "corporate law",
            "intellectual property",
        ],
    ),
    (
        "HR Manager",
        &[
            "recruitment",
            "talent management",
            "employee engagement",
            "performance management",
            "training",
            "onboarding",
        ],
    ),
    (
        "Teacher",
        &[
            "curriculum planning",
            "classroom management",
            "student engagement",
            "lesson planning",
            "assessment",
        ],
    ),
];
