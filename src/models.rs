use serde::{Deserialize, Serialize};
use tokio::sync::oneshot;

use crate::completion::CompletionError;
use crate::profile::{Profile, Project};
use crate::prompts::{self, Prompt, PromptCategory};
use crate::validation::ContactSubmission;

// Chat completion request format (OpenAI style, sent through the proxy)
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct CompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub max_tokens: u32,
    pub temperature: f32,
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

// Chat completion response format; only the first choice matters
#[derive(Deserialize, Serialize, Clone, Debug, Default)]
pub struct CompletionResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
}

#[derive(Deserialize, Serialize, Clone, Debug)]
pub struct Choice {
    pub message: Option<ChatMessage>,
}

impl CompletionResponse {
    pub fn first_content(self) -> Option<String> {
        self.choices
            .into_iter()
            .next()
            .and_then(|c| c.message)
            .map(|m| m.content)
            .filter(|content| !content.is_empty())
    }
}

// Completion job - prompt + channel the worker answers on
pub struct CompletionJob {
    pub prompt: Prompt,
    pub response_tx: oneshot::Sender<Result<String, CompletionError>>,
}

#[derive(Deserialize, Debug)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: String,
}

#[derive(Serialize, Debug)]
pub struct ChatReply {
    pub reply: String,
    // the visitor's message as it is safe to display
    pub message: String,
    pub fallback: bool,
}

// Content generation requests, one per kind of prompt the site asks for
#[derive(Deserialize, Debug, Clone)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GenerateRequest {
    ProjectDescription {
        title: String,
        description: String,
        #[serde(default)]
        tags: Vec<String>,
    },
    Bio {
        #[serde(default)]
        skills: Vec<String>,
        experience: String,
        focus: String,
    },
    SkillRecommendation {
        // empty means "use the profile's skills"
        #[serde(default)]
        skills: Vec<String>,
    },
    BlogArticle {
        title: String,
        #[serde(default)]
        tags: Vec<String>,
        #[serde(default)]
        excerpt: String,
    },
    Summary,
}

impl GenerateRequest {
    pub fn prompt(&self, profile: &Profile) -> Prompt {
        match self {
            GenerateRequest::ProjectDescription { title, description, tags } => {
                prompts::project_description(&Project {
                    title: title.clone(),
                    description: description.clone(),
                    tags: tags.clone(),
                })
            }
            GenerateRequest::Bio { skills, experience, focus } => {
                prompts::personalized_bio(skills, experience, focus)
            }
            GenerateRequest::SkillRecommendation { skills } if skills.is_empty() => {
                let own: Vec<String> = profile.skills.iter().map(|s| s.name.clone()).collect();
                prompts::skill_recommendations(&own)
            }
            GenerateRequest::SkillRecommendation { skills } => prompts::skill_recommendations(skills),
            GenerateRequest::BlogArticle { title, tags, excerpt } => {
                prompts::blog_article(title, tags, excerpt)
            }
            GenerateRequest::Summary => prompts::professional_summary(profile),
        }
    }
}

#[derive(Serialize, Debug)]
pub struct GenerateReply {
    pub category: PromptCategory,
    pub text: String,
    pub fallback: bool,
}

#[derive(Serialize, Debug)]
pub struct TokenReply {
    pub token: String,
}

#[derive(Serialize, Debug)]
pub struct SessionReply {
    pub client_id: String,
}

#[derive(Serialize, Debug)]
pub struct ContactReceipt {
    pub status: &'static str,
    pub submission: ContactSubmission,
    pub next_token: String,
}
