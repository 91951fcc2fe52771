use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("could not read profile {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid profile {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Skill {
    pub name: String,
    pub level: u8, // percent
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Experience {
    pub role: String,
    pub company: String,
    pub period: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Project {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Education {
    pub degree: String,
    pub institution: String,
    pub period: String,
    #[serde(default)]
    pub description: String,
}

// Hand-authored portfolio content the prompts draw on
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Profile {
    #[serde(default)]
    pub skills: Vec<Skill>,
    #[serde(default)]
    pub experiences: Vec<Experience>,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub education: Vec<Education>,
}

impl Profile {
    pub fn load(path: &Path) -> Result<Self, ProfileError> {
        let display = path.display().to_string();
        let raw = std::fs::read_to_string(path).map_err(|source| ProfileError::Read {
            path: display.clone(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| ProfileError::Parse { path: display, source })
    }

    pub fn skill_names(&self) -> Vec<&str> {
        self.skills.iter().map(|s| s.name.as_str()).collect()
    }
}

fn skill(name: &str, level: u8) -> Skill {
    Skill { name: name.to_string(), level }
}

fn project(title: &str, description: &str, tags: &[&str]) -> Project {
    Project {
        title: title.to_string(),
        description: description.to_string(),
        tags: tags.iter().map(|t| t.to_string()).collect(),
    }
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            skills: vec![
                skill("JavaScript", 90),
                skill("TypeScript", 85),
                skill("React", 90),
                skill("Next.js", 80),
                skill("Node.js", 75),
                skill("Tailwind CSS", 95),
                skill("GraphQL", 70),
                skill("Docker", 65),
            ],
            experiences: vec![
                Experience {
                    role: "Lead Developer".into(),
                    company: "Tech Solutions Inc.".into(),
                    period: "2021 - present".into(),
                    description: "Leads a team of five building scalable web applications and CI pipelines.".into(),
                },
                Experience {
                    role: "Frontend Developer".into(),
                    company: "Digital Agency".into(),
                    period: "2018 - 2021".into(),
                    description: "Built responsive, accessible interfaces alongside the UX team.".into(),
                },
                Experience {
                    role: "Junior Developer".into(),
                    company: "StartUp Innovate".into(),
                    period: "2016 - 2018".into(),
                    description: "Shipped SaaS features, fixed bugs and integrated third-party services.".into(),
                },
            ],
            projects: vec![
                project(
                    "E-commerce Application",
                    "Full storefront with cart, checkout and order management.",
                    &["React", "Node.js", "MongoDB", "Stripe"],
                ),
                project(
                    "Analytics Dashboard",
                    "Interactive dashboard for key business metrics.",
                    &["React", "D3.js", "Firebase", "TypeScript"],
                ),
                project(
                    "Fitness Mobile App",
                    "Tracks workouts and training progress.",
                    &["React Native", "Redux", "Firebase", "Expo"],
                ),
                project(
                    "Creative Portfolio",
                    "Gallery site for an artist with fluid animations.",
                    &["Next.js", "GSAP", "Tailwind CSS", "Framer Motion"],
                ),
            ],
            education: vec![
                Education {
                    degree: "MSc Computer Science".into(),
                    institution: "University of Technology".into(),
                    period: "2014 - 2016".into(),
                    description: "Web and mobile application development.".into(),
                },
                Education {
                    degree: "BSc Computer Science".into(),
                    institution: "School of Sciences".into(),
                    period: "2011 - 2014".into(),
                    description: "General computer science, software development track.".into(),
                },
            ],
        }
    }
}
