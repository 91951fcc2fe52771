use serde::Serialize;

use crate::profile::{Profile, Project};

pub const DEFAULT_MAX_TOKENS: u32 = 150;

pub const SYSTEM_PROMPT: &str = "You are a virtual assistant on a web developer's portfolio. \
Answer questions about the developer's skills, experience and projects precisely and professionally.";

/// What a prompt asks for; picks the canned answer when the completion fails.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PromptCategory {
    ProjectDescription,
    Bio,
    SkillRecommendation,
    BlogArticle,
    Summary,
    Other,
}

// Checked in order; first marker found wins
const MARKERS: [(&str, PromptCategory); 5] = [
    ("project description", PromptCategory::ProjectDescription),
    ("professional bio", PromptCategory::Bio),
    ("complementary skills", PromptCategory::SkillRecommendation),
    ("blog article", PromptCategory::BlogArticle),
    ("professional summary", PromptCategory::Summary),
];

impl PromptCategory {
    /// Classifies free text by its marker phrase, ignoring case and punctuation.
    pub fn classify(prompt: &str) -> Self {
        let clean: String = prompt
            .to_lowercase()
            .chars()
            .filter(|c| c.is_alphanumeric() || c.is_whitespace())
            .collect();

        MARKERS
            .iter()
            .find(|(marker, _)| clean.contains(marker))
            .map(|(_, category)| *category)
            .unwrap_or(PromptCategory::Other)
    }

    pub fn fallback(self) -> &'static str {
        match self {
            PromptCategory::ProjectDescription => {
                "This project combines modern technologies into a robust, scalable solution. \
Its architecture keeps performance high and the user experience smooth."
            }
            PromptCategory::Bio => {
                "Web developer with solid front-end and back-end expertise, focused on building fast, \
intuitive applications and keeping up with the latest tools to deliver the best solution."
            }
            PromptCategory::SkillRecommendation => {
                "1. WebAssembly - to speed up compute-heavy web applications.\n\
2. GraphQL - to make API queries leaner and data exchange more efficient.\n\
3. Security engineering - to harden applications and protect user data."
            }
            PromptCategory::BlogArticle => {
                "# Introduction\n\nIn this article we explore the core concepts and best practices of the topic.\n\n\
## Part one: the basics\n\nThe fundamentals are what every deeper skill is built on.\n\n\
## Part two: in practice\n\nTheory pays off once it is applied; here are a few concrete examples.\n\n\
## Conclusion\n\nThese concepts are essential for any developer who wants to keep improving."
            }
            PromptCategory::Summary => {
                "Experienced full-stack developer with deep expertise in JavaScript and its modern frameworks, \
combining technical rigour with a user-centred approach to build fast, accessible web applications."
            }
            PromptCategory::Other => {
                "Sorry, I could not generate a personalised answer. Please try again later or rephrase your request."
            }
        }
    }
}

// Text sent to the completion service with its output cap
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub category: PromptCategory,
    pub text: String,
    pub max_tokens: u32,
}

impl Prompt {
    // Free-form prompt; category inferred from its text
    pub fn new(text: impl Into<String>, max_tokens: u32) -> Self {
        let text = text.into();
        Self { category: PromptCategory::classify(&text), text, max_tokens }
    }

    fn tagged(category: PromptCategory, text: String, max_tokens: u32) -> Self {
        Self { category, text, max_tokens }
    }

    pub fn fallback(&self) -> &'static str {
        self.category.fallback()
    }
}

pub fn project_description(project: &Project) -> Prompt {
    let text = format!(
        "Improve this project description so it is concise but professional and detailed (max 3 sentences):\n\
Title: {}\nCurrent description: {}\nTechnologies: {}",
        project.title,
        project.description,
        project.tags.join(", ")
    );
    Prompt::tagged(PromptCategory::ProjectDescription, text, 100)
}

pub fn personalized_bio(skills: &[String], experience: &str, focus: &str) -> Prompt {
    let text = format!(
        "Write an engaging professional bio for a web developer (max 4 sentences).\n\
Main skills: {}\nExperience: {}\nMain area of expertise: {}",
        skills.join(", "),
        experience,
        focus
    );
    Prompt::tagged(PromptCategory::Bio, text, 120)
}

pub fn skill_recommendations(current_skills: &[String]) -> Prompt {
    let text = format!(
        "Given these web developer skills: {},\n\
recommend 3 complementary skills or technologies to learn next, with one sentence of explanation each.",
        current_skills.join(", ")
    );
    Prompt::tagged(PromptCategory::SkillRecommendation, text, 150)
}

pub fn blog_article(title: &str, tags: &[String], excerpt: &str) -> Prompt {
    let text = format!(
        "Write a complete blog article about \"{title}\".\n\
Use these tags as themes: {}.\n\
Here is the introduction: \"{excerpt}\"\n\n\
Produce Markdown with:\n1. An expanded introduction\n2. 2-3 main sections with subheadings\n\
3. A conclusion\n4. Practical examples where relevant",
        tags.join(", ")
    );
    Prompt::tagged(PromptCategory::BlogArticle, text, 600)
}

pub fn professional_summary(profile: &Profile) -> Prompt {
    let skills = profile
        .skills
        .iter()
        .map(|s| format!("{}: {}%", s.name, s.level))
        .collect::<Vec<_>>()
        .join(", ");
    let experience = profile
        .experiences
        .iter()
        .map(|e| format!("{} at {} ({}): {}", e.role, e.company, e.period, e.description))
        .collect::<Vec<_>>()
        .join("\n\n");
    let education = profile
        .education
        .iter()
        .map(|e| format!("{} at {} ({}): {}", e.degree, e.institution, e.period, e.description))
        .collect::<Vec<_>>()
        .join("\n\n");

    let text = format!(
        "You are an expert CV writer. Write a concise professional summary (max 3 sentences)\n\
for a web developer with these skills: {skills}.\nExperience: {experience}.\nEducation: {education}.\n\
The summary should be punchy and highlight the profile's key strengths."
    );
    Prompt::tagged(PromptCategory::Summary, text, 150)
}

/// Wraps an already-sanitized visitor question in the portfolio context.
pub fn chat(profile: &Profile, question: &str) -> Prompt {
    let experience = profile
        .experiences
        .iter()
        .map(|e| format!("{} at {}", e.role, e.company))
        .collect::<Vec<_>>()
        .join(", ");
    let projects = profile
        .projects
        .iter()
        .map(|p| p.title.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    let text = format!(
        "Skills: {}\nExperience: {experience}\nProjects: {projects}\n\nQuestion: {question}",
        profile.skill_names().join(", ")
    );
    Prompt::new(text, DEFAULT_MAX_TOKENS)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn classify_by_marker() {
        use PromptCategory::*;
        let cases = [
            ("Please write a PROJECT DESCRIPTION.", ProjectDescription),
            ("a professional-bio? no: a professional bio!", Bio),
            ("Recommend complementary skills", SkillRecommendation),
            ("draft a blog article", BlogArticle),
            ("my professional summary", Summary),
            ("what's the weather", Other),
            ("", Other),
        ];
        for (text, expected) in cases {
            assert_eq!(PromptCategory::classify(text), expected, "{text}");
        }
    }

    #[test]
    fn earlier_marker_wins() {
        assert_eq!(
            PromptCategory::classify("blog article with a project description"),
            PromptCategory::ProjectDescription
        );
    }

    #[test]
    fn punctuation_inside_marker_is_dropped() {
        assert_eq!(
            PromptCategory::classify("blog artic-le"),
            PromptCategory::BlogArticle
        );
    }

    #[test]
    fn every_category_has_its_own_fallback() {
        use PromptCategory::*;
        let all = [ProjectDescription, Bio, SkillRecommendation, BlogArticle, Summary, Other];
        for (i, a) in all.iter().enumerate() {
            assert!(!a.fallback().is_empty());
            for b in &all[i + 1..] {
                assert_ne!(a.fallback(), b.fallback());
            }
        }
        assert!(Other.fallback().starts_with("Sorry"));
    }

    #[test]
    fn builders_tag_and_cap_their_prompts() {
        let profile = Profile::default();

        let p = project_description(&profile.projects[0]);
        assert_eq!((p.category, p.max_tokens), (PromptCategory::ProjectDescription, 100));
        assert!(p.text.contains("Technologies: React, Node.js, MongoDB, Stripe"));

        let p = personalized_bio(&strings(&["Rust", "Go"]), "8 years", "backend");
        assert_eq!((p.category, p.max_tokens), (PromptCategory::Bio, 120));
        assert!(p.text.contains("Main skills: Rust, Go"));

        let p = skill_recommendations(&strings(&["React"]));
        assert_eq!((p.category, p.max_tokens), (PromptCategory::SkillRecommendation, 150));

        let p = blog_article("Fast React", &strings(&["React", "Perf"]), "Intro");
        assert_eq!((p.category, p.max_tokens), (PromptCategory::BlogArticle, 600));
        assert!(p.text.contains("\"Fast React\""));

        let p = professional_summary(&profile);
        assert_eq!((p.category, p.max_tokens), (PromptCategory::Summary, 150));
        assert!(p.text.contains("JavaScript: 90%"));
    }

    #[test]
    fn builder_text_classifies_to_its_own_tag() {
        let profile = Profile::default();
        for p in [
            project_description(&profile.projects[1]),
            personalized_bio(&strings(&["Rust"]), "5 years", "systems"),
            skill_recommendations(&strings(&["Rust"])),
            blog_article("Ownership", &strings(&["Rust"]), "Borrowing"),
            professional_summary(&profile),
        ] {
            assert_eq!(PromptCategory::classify(&p.text), p.category);
        }
    }

    #[test]
    fn chat_prompt_carries_context_and_question() {
        let p = chat(&Profile::default(), "What do you build?");
        assert_eq!(p.max_tokens, DEFAULT_MAX_TOKENS);
        assert_eq!(p.category, PromptCategory::Other);
        assert!(p.text.contains("Lead Developer at Tech Solutions Inc."));
        assert!(p.text.ends_with("Question: What do you build?"));
    }
}
