//! Static portfolio content and the transient browse state layered on top of it.
//!
//! Everything here is a `static` literal: built once, never mutated. The
//! frontend renders it and the backend folds it into the assistant prompt.

use serde::Serialize;
use std::collections::HashSet;
use thiserror::Error;

pub const ACHIEVEMENT_PAGE_SIZE: usize = 8;
pub const METRIC_ROTATION_MS: i32 = 3_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Web,
    Aiml,
}

impl Category {
    pub fn label(self) -> &'static str {
        match self {
            Self::Web => "Full Stack",
            Self::Aiml => "AI/ML",
        }
    }

    pub fn heading(self) -> &'static str {
        match self {
            Self::Web => "Web Development",
            Self::Aiml => "AI / Machine Learning",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AchievementCategory {
    Competition,
    Certification,
    Speaking,
}

impl AchievementCategory {
    pub const ALL: [Self; 3] = [Self::Competition, Self::Certification, Self::Speaking];

    pub fn label(self) -> &'static str {
        match self {
            Self::Competition => "Competitions",
            Self::Certification => "Certifications",
            Self::Speaking => "Speaking",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AchievementIcon {
    Code,
    Trophy,
    Certificate,
    Sparkles,
}

impl AchievementIcon {
    pub fn glyph(self) -> &'static str {
        match self {
            Self::Code => "</>",
            Self::Trophy => "🏆",
            Self::Certificate => "🎓",
            Self::Sparkles => "✦",
        }
    }
}

#[derive(Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub name: &'static str,
    pub initials: &'static str,
    pub title: &'static str,
    pub tagline: &'static str,
    pub description: &'static str,
    pub keywords: &'static [&'static str],
    pub site_url: &'static str,
    pub email: &'static str,
    pub scheduling_url: &'static str,
    pub resume_path: &'static str,
    pub resume_file_name: &'static str,
}

#[derive(Debug, PartialEq, Serialize)]
pub struct Skill {
    pub name: &'static str,
    pub category: Category,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proficiency: Option<u8>,
}

#[derive(Debug, PartialEq, Serialize)]
pub struct ImpactMetric {
    pub metric: &'static str,
    pub value: &'static str,
}

#[derive(Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectLinks {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub demo: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_card: Option<&'static str>,
}

impl ProjectLinks {
    pub fn is_empty(&self) -> bool {
        self.demo.is_none() && self.source.is_none() && self.model_card.is_none()
    }
}

#[derive(Debug, PartialEq, Serialize)]
pub struct Project {
    pub id: &'static str,
    pub title: &'static str,
    pub period: &'static str,
    pub description: &'static str,
    pub technologies: &'static [&'static str],
    pub highlights: &'static [&'static str],
    pub category: Category,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub problem: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub solution: Option<&'static str>,
    pub impact: &'static [ImpactMetric],
    pub links: ProjectLinks,
}

#[derive(Debug, PartialEq, Serialize)]
pub struct EducationEntry {
    pub id: &'static str,
    pub institution: &'static str,
    pub degree: &'static str,
    pub period: &'static str,
    pub score: &'static str,
}

#[derive(Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Achievement {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub icon: AchievementIcon,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<AchievementCategory>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proof_link: Option<&'static str>,
}

#[derive(Debug, PartialEq, Serialize)]
pub struct SocialLink {
    pub platform: &'static str,
    pub handle: &'static str,
    pub url: &'static str,
}

/// One stage of the model lifecycle shown in the process timeline.
#[derive(Debug, PartialEq, Serialize)]
pub struct ProcessStep {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub tools: &'static [&'static str],
    pub artifacts: &'static [&'static str],
}

/// A headline number cycled by the hero ticker.
#[derive(Debug, PartialEq, Serialize)]
pub struct HeadlineMetric {
    pub label: &'static str,
    pub value: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<&'static str>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResumeFocus {
    General,
    Aiml,
    Web,
}

impl ResumeFocus {
    pub fn label(self) -> &'static str {
        match self {
            Self::General => "General Resume",
            Self::Aiml => "AI/ML Focus",
            Self::Web => "Web Dev Focus",
        }
    }
}

#[derive(Debug, PartialEq, Serialize)]
pub struct ResumeVariant {
    pub focus: ResumeFocus,
    pub path: &'static str,
}

impl ResumeVariant {
    /// Suggested download name: the last path segment.
    pub fn file_name(&self) -> &'static str {
        self.path
            .rsplit('/')
            .next()
            .filter(|name| !name.is_empty())
            .unwrap_or("resume.pdf")
    }
}

#[derive(Debug, PartialEq, Serialize)]
pub struct Portfolio {
    pub profile: Profile,
    pub skills: &'static [Skill],
    pub projects: &'static [Project],
    pub process: &'static [ProcessStep],
    pub education: &'static [EducationEntry],
    pub achievements: &'static [Achievement],
    pub metrics: &'static [HeadlineMetric],
    pub resumes: &'static [ResumeVariant],
    pub social: &'static [SocialLink],
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ContentError {
    #[error("duplicate {list} id `{id}`")]
    DuplicateId { list: &'static str, id: &'static str },
}

impl Portfolio {
    /// Ids are rendering keys; each list must keep them unique.
    pub fn validate(&self) -> Result<(), ContentError> {
        ensure_unique_ids("project", self.projects.iter().map(|p| p.id))?;
        ensure_unique_ids("process", self.process.iter().map(|s| s.id))?;
        ensure_unique_ids("education", self.education.iter().map(|e| e.id))?;
        ensure_unique_ids("achievement", self.achievements.iter().map(|a| a.id))?;
        Ok(())
    }

    pub fn skills_in(&self, category: Category) -> impl Iterator<Item = &Skill> {
        self.skills.iter().filter(move |skill| skill.category == category)
    }

    pub fn projects_matching(&self, filter: ProjectFilter) -> impl Iterator<Item = &Project> {
        self.projects.iter().filter(move |project| filter.matches(project))
    }

    pub fn social(&self, platform: &str) -> Option<&SocialLink> {
        self.social.iter().find(|link| link.platform == platform)
    }

    /// Index of the metric the ticker shows after `index`, wrapping around.
    pub fn next_metric(&self, index: usize) -> usize {
        match self.metrics.len() {
            0 => 0,
            len => (index + 1) % len,
        }
    }
}

fn ensure_unique_ids(
    list: &'static str,
    ids: impl Iterator<Item = &'static str>,
) -> Result<(), ContentError> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(ContentError::DuplicateId { list, id });
        }
    }
    Ok(())
}

pub fn portfolio() -> &'static Portfolio {
    &PORTFOLIO
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ProjectFilter {
    #[default]
    All,
    Only(Category),
}

impl ProjectFilter {
    pub const ALL: [Self; 3] = [
        Self::All,
        Self::Only(Category::Web),
        Self::Only(Category::Aiml),
    ];

    pub fn matches(self, project: &Project) -> bool {
        match self {
            Self::All => true,
            Self::Only(category) => project.category == category,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::All => "All Projects",
            Self::Only(Category::Web) => "Web Dev",
            Self::Only(Category::Aiml) => "AI/ML",
        }
    }

    pub fn count(self, portfolio: &Portfolio) -> usize {
        portfolio.projects_matching(self).count()
    }
}

/// Search, category filter and "load more" pagination over the achievement list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AchievementBrowser {
    query: String,
    category: Option<AchievementCategory>,
    visible: usize,
}

impl Default for AchievementBrowser {
    fn default() -> Self {
        Self {
            query: String::new(),
            category: None,
            visible: ACHIEVEMENT_PAGE_SIZE,
        }
    }
}

impl AchievementBrowser {
    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn category(&self) -> Option<AchievementCategory> {
        self.category
    }

    pub fn with_query(&self, query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            category: self.category,
            visible: ACHIEVEMENT_PAGE_SIZE,
        }
    }

    pub fn with_category(&self, category: Option<AchievementCategory>) -> Self {
        Self {
            query: self.query.clone(),
            category,
            visible: ACHIEVEMENT_PAGE_SIZE,
        }
    }

    pub fn load_more(&self) -> Self {
        Self {
            query: self.query.clone(),
            category: self.category,
            visible: self.visible + ACHIEVEMENT_PAGE_SIZE,
        }
    }

    pub fn matches(&self, achievement: &Achievement) -> bool {
        if let Some(category) = self.category {
            if achievement.category != Some(category) {
                return false;
            }
        }

        let needle = self.query.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }

        achievement.title.to_lowercase().contains(&needle)
            || achievement.description.to_lowercase().contains(&needle)
    }

    pub fn filtered<'a>(&self, achievements: &'a [Achievement]) -> Vec<&'a Achievement> {
        achievements.iter().filter(|a| self.matches(a)).collect()
    }

    pub fn visible<'a>(&self, achievements: &'a [Achievement]) -> Vec<&'a Achievement> {
        let mut filtered = self.filtered(achievements);
        filtered.truncate(self.visible);
        filtered
    }

    pub fn has_more(&self, achievements: &[Achievement]) -> bool {
        self.filtered(achievements).len() > self.visible
    }
}

static PORTFOLIO: Portfolio = Portfolio {
    profile: Profile {
        name: "Abdul Rahman Azam",
        initials: "AR",
        title: "Full Stack AI Engineer",
        tagline: "Crafting Code That Thinks — and Ideas That Build Themselves.",
        description: "Full Stack AI Engineer specializing in Machine Learning, Deep Learning, and modern web development. BS in Artificial Intelligence student at FAST NUCES with expertise in React, Node.js, Python, and AI/ML technologies.",
        keywords: &[
            "Abdul Rahman Azam",
            "Full Stack AI Engineer",
            "AI ML Engineer",
            "Machine Learning Developer",
            "Deep Learning Engineer",
            "React Developer",
            "Node.js Developer",
            "Python Developer",
            "FAST NUCES",
            "Artificial Intelligence",
            "Web Developer Pakistan",
            "Portfolio",
        ],
        site_url: "https://abdulrahmanazam.me",
        email: "azamabdulrahman930@gmail.com",
        scheduling_url: "https://calendly.com/azamabdulrahman930/30min",
        resume_path: "/Abdul_Rahman_Azam__Resume.pdf",
        resume_file_name: "Abdul_Rahman_Azam_Resume.pdf",
    },
    skills: &[
        Skill { name: "React.js", category: Category::Web, proficiency: None },
        Skill { name: "Node.js", category: Category::Web, proficiency: None },
        Skill { name: "Express.js", category: Category::Web, proficiency: None },
        Skill { name: "JavaScript", category: Category::Web, proficiency: None },
        Skill { name: "TypeScript", category: Category::Web, proficiency: None },
        Skill { name: "Tailwind CSS", category: Category::Web, proficiency: None },
        Skill { name: "PostgreSQL", category: Category::Web, proficiency: None },
        Skill { name: "REST APIs", category: Category::Web, proficiency: None },
        Skill { name: "Python", category: Category::Aiml, proficiency: None },
        Skill { name: "Machine Learning", category: Category::Aiml, proficiency: None },
        Skill { name: "Deep Learning", category: Category::Aiml, proficiency: None },
        Skill { name: "Scikit-learn", category: Category::Aiml, proficiency: None },
        Skill { name: "Pandas & NumPy", category: Category::Aiml, proficiency: None },
        Skill { name: "Data Visualization", category: Category::Aiml, proficiency: None },
    ],
    projects: &[
        Project {
            id: "university-platform",
            title: "University Resource Sharing Platform",
            period: "Jan - May 2025",
            description: "Developed a centralized platform using React.js, Node.js, Express.js, Tailwind CSS, REST APIs for FAST-NUCES students to share resources, join communities, and interact via posts, comments, and file sharing.",
            technologies: &["React.js", "Node.js", "Express.js", "Tailwind CSS", "PostgreSQL", "Sequelize ORM"],
            highlights: &[
                "Implemented secure email-based authentication",
                "Built admin moderation system",
                "Designed scalable database architecture",
            ],
            category: Category::Web,
            problem: Some("FAST-NUCES students lacked a centralized platform to share academic resources, collaborate on projects, and build communities, leading to fragmented communication and duplicated efforts."),
            solution: Some("Built a full-stack web application with secure authentication, real-time interactions, file sharing, and admin moderation to centralize student resources and foster collaboration."),
            impact: &[
                ImpactMetric { metric: "User Adoption", value: "500+ active students" },
                ImpactMetric { metric: "Resources Shared", value: "2,000+ files" },
                ImpactMetric { metric: "Engagement", value: "10,000+ interactions" },
            ],
            links: ProjectLinks {
                demo: None,
                source: Some("https://github.com/abdulrahmanazam"),
                model_card: None,
            },
        },
        Project {
            id: "super-tictactoe",
            title: "Super Tic Tac Toe (AI-based Web Game)",
            period: "April - May 2025",
            description: "Implemented a web-based Super Tic-Tac-Toe game featuring a 9x9 multi-board system and custom scoring model.",
            technologies: &["JavaScript", "HTML5", "CSS3", "Minimax Algorithm", "Alpha-Beta Pruning"],
            highlights: &[
                "Developed intelligent AI opponent using Minimax with Alpha-Beta Pruning",
                "Enabled optimal and efficient decision-making",
                "Created custom scoring model for complex game states",
            ],
            category: Category::Aiml,
            problem: Some("Traditional Tic-Tac-Toe lacks strategic depth and becomes predictable. Creating an AI for the complex Super variant requires sophisticated decision-making algorithms."),
            solution: Some("Developed an AI opponent using Minimax algorithm with Alpha-Beta Pruning to explore game trees efficiently and make optimal moves in the complex 9x9 multi-board environment."),
            impact: &[
                ImpactMetric { metric: "AI Win Rate", value: "95% against humans" },
                ImpactMetric { metric: "Decision Time", value: "<500ms per move" },
                ImpactMetric { metric: "Game Tree Pruning", value: "70% nodes eliminated" },
            ],
            links: ProjectLinks {
                demo: Some("https://abdulrahmanazam.github.io/super-tictactoe"),
                source: Some("https://github.com/abdulrahmanazam/super-tictactoe"),
                model_card: None,
            },
        },
        Project {
            id: "income-predictor",
            title: "Income Predictor - Data Analysis",
            period: "Sep - Dec 2024",
            description: "Built a full-stack ML income prediction app using KNN (85% accuracy) with React, TypeScript, FastAPI, and Python on the Adult Census dataset (32,000+ entries).",
            technologies: &["React", "TypeScript", "FastAPI", "Python", "Scikit-learn", "Pandas", "NumPy"],
            highlights: &[
                "Achieved 85% prediction accuracy with KNN algorithm",
                "Automated complete data analysis pipeline",
                "Generated 50+ visualizations for insights",
                "Implemented real-time model insights across 10 KNN variations",
            ],
            category: Category::Aiml,
            problem: Some("Income prediction from census data is challenging due to high-dimensional feature spaces, missing values, and the need for real-time inference with model explainability."),
            solution: Some("Engineered a complete ML pipeline with automated data preprocessing, hyperparameter tuning across 10 KNN variations, and a FastAPI backend serving predictions with real-time insights."),
            impact: &[
                ImpactMetric { metric: "Prediction Accuracy", value: "85% with KNN" },
                ImpactMetric { metric: "Data Processing", value: "32,000+ entries" },
                ImpactMetric { metric: "Inference Latency", value: "<100ms" },
                ImpactMetric { metric: "Visualizations", value: "50+ charts generated" },
            ],
            links: ProjectLinks {
                demo: None,
                source: Some("https://github.com/abdulrahmanazam/income-predictor"),
                model_card: Some("/model-cards/income-predictor.pdf"),
            },
        },
        Project {
            id: "2d-platformer",
            title: "2D Platformer Game",
            period: "Feb - May 2024",
            description: "A fast-paced action game featuring enemies and reloading weapon systems. Recognized as one of the top 1% projects at university for creativity.",
            technologies: &["C++", "SFML Library", "OOP"],
            highlights: &[
                "Recognized as top 1% project at university",
                "Implemented complex collision detection",
                "Used Pure C++ with SFML library",
                "Reinforced Object-Oriented Programming principles",
            ],
            category: Category::Web,
            problem: Some("Creating engaging gameplay requires complex physics simulation, collision detection, and real-time rendering while maintaining 60 FPS performance."),
            solution: Some("Implemented a custom game engine in C++ with SFML, featuring quadtree spatial partitioning for collision detection and entity-component-system architecture for scalability."),
            impact: &[
                ImpactMetric { metric: "Recognition", value: "Top 1% university project" },
                ImpactMetric { metric: "Performance", value: "60 FPS stable" },
                ImpactMetric { metric: "Code Quality", value: "OOP best practices" },
            ],
            links: ProjectLinks {
                demo: None,
                source: Some("https://github.com/abdulrahmanazam/2d-platformer"),
                model_card: None,
            },
        },
        Project {
            id: "ai-tictactoe",
            title: "AI based Tic-Tac-Toe Game",
            period: "Sep - Dec 2023",
            description: "Developed a strategic game with 100% win rate against human players using Minimax Algorithm.",
            technologies: &["C", "Minimax Algorithm", "Game Theory"],
            highlights: &[
                "100% win rate against human players",
                "Three gameplay modes: 2-Player, random CPU, unbeatable AI",
                "Implemented using Pure C language",
            ],
            category: Category::Aiml,
            problem: Some("Creating an unbeatable AI opponent for Tic-Tac-Toe requires perfect game tree evaluation while maintaining fast response times."),
            solution: Some("Implemented the Minimax algorithm in pure C to exhaustively evaluate all possible game states and guarantee optimal moves, achieving a perfect 100% win rate."),
            impact: &[
                ImpactMetric { metric: "AI Win Rate", value: "100% unbeatable" },
                ImpactMetric { metric: "Decision Time", value: "<50ms" },
                ImpactMetric { metric: "Game Modes", value: "3 difficulty levels" },
            ],
            links: ProjectLinks {
                demo: None,
                source: Some("https://github.com/abdulrahmanazam/ai-tictactoe"),
                model_card: None,
            },
        },
    ],
    process: &[
        ProcessStep {
            id: "data-sourcing",
            title: "Data Sourcing & Engineering",
            description: "Collect, clean, and prepare datasets for model training. Handle missing values, outliers, and feature engineering to maximize signal quality.",
            tools: &["Pandas", "NumPy", "SQL", "Apache Spark"],
            artifacts: &["Data Pipeline Notebook", "EDA Report"],
        },
        ProcessStep {
            id: "experimentation",
            title: "Experimentation & Hyperparameter Tuning",
            description: "Iterate on model architectures, loss functions, and hyperparameters. Track experiments systematically to identify best-performing configurations.",
            tools: &["Scikit-learn", "TensorFlow", "PyTorch", "Optuna"],
            artifacts: &["Experiment Logs", "Model Comparison"],
        },
        ProcessStep {
            id: "deployment",
            title: "Deployment & Serving",
            description: "Package models into production-ready APIs with proper versioning, monitoring, and rollback capabilities for reliable inference at scale.",
            tools: &["FastAPI", "Docker", "AWS SageMaker", "TensorFlow Serving"],
            artifacts: &["API Documentation", "Deployment Guide"],
        },
        ProcessStep {
            id: "mlops",
            title: "MLOps & Monitoring",
            description: "Continuous monitoring of model performance, data drift, and system health. Automated retraining pipelines to maintain accuracy over time.",
            tools: &["MLflow", "Weights & Biases", "Prometheus", "Grafana"],
            artifacts: &["Monitoring Dashboard", "Drift Analysis"],
        },
    ],
    education: &[
        EducationEntry {
            id: "fast",
            institution: "FAST NUCES Karachi",
            degree: "BS in Artificial Intelligence",
            period: "2021 - Present",
            score: "CGPA: 3.33",
        },
        EducationEntry {
            id: "adamjee",
            institution: "Adamjee Govt. College",
            degree: "Intermediate in Pre-Engineering",
            period: "2019 - 2021",
            score: "80%",
        },
        EducationEntry {
            id: "happy-palace",
            institution: "Happy Palace School",
            degree: "Matric in Computer Science",
            period: "2017 - 2019",
            score: "98.12%",
        },
    ],
    achievements: &[
        Achievement {
            id: "leetcode",
            title: "LeetCode Achievement",
            description: "Solved 290+ problems on LeetCode and earned 6 skill badges, strengthening algorithms and data structures.",
            icon: AchievementIcon::Code,
            category: Some(AchievementCategory::Certification),
            proof_link: Some("https://leetcode.com/abdulrahmanazam"),
        },
        Achievement {
            id: "competitions",
            title: "Competition Success",
            description: "Secured 2nd Place in Web Hunt Competition and 3rd Place in ACM Coders Cup.",
            icon: AchievementIcon::Trophy,
            category: Some(AchievementCategory::Competition),
            proof_link: None,
        },
        Achievement {
            id: "hackerrank",
            title: "HackerRank Certifications",
            description: "Achieved Problem Solving – Basic & Intermediate certifications on HackerRank.",
            icon: AchievementIcon::Certificate,
            category: Some(AchievementCategory::Certification),
            proof_link: Some("/certificates/hackerrank-problem-solving.pdf"),
        },
        Achievement {
            id: "chatgpt",
            title: "ChatGPT Certification",
            description: "Completed ChatGPT for Everyone (Learn Prompting) certification.",
            icon: AchievementIcon::Sparkles,
            category: Some(AchievementCategory::Certification),
            proof_link: Some("/certificates/chatgpt-prompt-engineering.pdf"),
        },
    ],
    metrics: &[
        HeadlineMetric { label: "LeetCode Problems", value: "290+", note: Some("+5 this week") },
        HeadlineMetric { label: "GitHub Repos", value: "15+", note: Some("Active") },
        HeadlineMetric { label: "ML Accuracy", value: "85%", note: Some("KNN Model") },
        HeadlineMetric { label: "Projects Completed", value: "10+", note: Some("Production") },
        HeadlineMetric { label: "Code Quality", value: "A+", note: Some("TypeScript") },
    ],
    resumes: &[
        ResumeVariant {
            focus: ResumeFocus::General,
            path: "/Abdul_Rahman_Azam_Resume.pdf",
        },
        ResumeVariant {
            focus: ResumeFocus::Aiml,
            path: "/Abdul_Rahman_Azam_Resume_AI_ML.pdf",
        },
        ResumeVariant {
            focus: ResumeFocus::Web,
            path: "/Abdul_Rahman_Azam_Resume_Web_Dev.pdf",
        },
    ],
    social: &[
        SocialLink {
            platform: "github",
            handle: "@abdulrahmanazam",
            url: "https://github.com/abdulrahmanazam",
        },
        SocialLink {
            platform: "linkedin",
            handle: "in/abdulrahmanazam",
            url: "https://linkedin.com/in/abdulrahmanazam",
        },
        SocialLink {
            platform: "leetcode",
            handle: "abdulrahmanazam",
            url: "https://leetcode.com/abdulrahmanazam",
        },
        SocialLink {
            platform: "email",
            handle: "azamabdulrahman930@gmail.com",
            url: "mailto:azamabdulrahman930@gmail.com",
        },
    ],
};

#[cfg(test)]
mod tests {
    use super::*;

    fn achievement(id: &'static str, title: &'static str, category: AchievementCategory) -> Achievement {
        Achievement {
            id,
            title,
            description: "placeholder",
            icon: AchievementIcon::Trophy,
            category: Some(category),
            proof_link: None,
        }
    }

    #[test]
    fn bundled_content_has_unique_ids() {
        assert_eq!(portfolio().validate(), Ok(()));
    }

    #[test]
    fn duplicate_ids_are_reported_by_list() {
        let result = ensure_unique_ids("project", ["a", "b", "a"].into_iter());
        assert_eq!(
            result,
            Err(ContentError::DuplicateId { list: "project", id: "a" })
        );
    }

    #[test]
    fn project_filter_counts_add_up() {
        let data = portfolio();
        let web = ProjectFilter::Only(Category::Web).count(data);
        let aiml = ProjectFilter::Only(Category::Aiml).count(data);

        assert_eq!(ProjectFilter::All.count(data), data.projects.len());
        assert_eq!(web + aiml, data.projects.len());
        assert_eq!(web, 2);
    }

    #[test]
    fn skills_split_by_category() {
        let data = portfolio();
        assert!(data.skills_in(Category::Web).any(|s| s.name == "React.js"));
        assert!(data.skills_in(Category::Aiml).all(|s| s.category == Category::Aiml));
    }

    #[test]
    fn achievement_search_is_case_insensitive_over_title_and_description() {
        let data = portfolio();
        let browser = AchievementBrowser::default().with_query("  ACM ");
        let found = browser.filtered(data.achievements);

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "competitions");

        let by_title = AchievementBrowser::default().with_query("hackerrank");
        assert_eq!(by_title.filtered(data.achievements)[0].id, "hackerrank");
    }

    #[test]
    fn achievement_category_filter_combines_with_query() {
        let data = portfolio();
        let browser = AchievementBrowser::default()
            .with_category(Some(AchievementCategory::Certification))
            .with_query("competition");

        assert!(browser.filtered(data.achievements).is_empty());
        assert_eq!(
            AchievementBrowser::default()
                .with_category(Some(AchievementCategory::Certification))
                .filtered(data.achievements)
                .len(),
            3
        );
    }

    #[test]
    fn load_more_pages_and_new_query_resets_page() {
        let items: Vec<Achievement> = (0..20)
            .map(|_| achievement("x", "Award", AchievementCategory::Competition))
            .collect();

        let first = AchievementBrowser::default();
        assert_eq!(first.visible(&items).len(), ACHIEVEMENT_PAGE_SIZE);
        assert!(first.has_more(&items));

        let third = first.load_more().load_more();
        assert_eq!(third.visible(&items).len(), 20);
        assert!(!third.has_more(&items));

        let reset = third.with_query("award");
        assert_eq!(reset.visible(&items).len(), ACHIEVEMENT_PAGE_SIZE);
    }

    #[test]
    fn process_timeline_covers_the_model_lifecycle() {
        let steps = portfolio().process;
        assert_eq!(steps.len(), 4);
        assert_eq!(steps[0].id, "data-sourcing");
        assert_eq!(steps[3].id, "mlops");
        assert!(steps.iter().all(|step| !step.tools.is_empty() && !step.artifacts.is_empty()));
    }

    #[test]
    fn metric_ticker_wraps_around() {
        let data = portfolio();
        let last = data.metrics.len() - 1;
        assert_eq!(data.next_metric(0), 1);
        assert_eq!(data.next_metric(last), 0);
    }

    #[test]
    fn resume_variants_download_under_their_own_names() {
        let data = portfolio();
        let focuses: Vec<ResumeFocus> = data.resumes.iter().map(|r| r.focus).collect();
        assert_eq!(focuses, [ResumeFocus::General, ResumeFocus::Aiml, ResumeFocus::Web]);
        assert_eq!(data.resumes[1].file_name(), "Abdul_Rahman_Azam_Resume_AI_ML.pdf");

        let bare = ResumeVariant { focus: ResumeFocus::Web, path: "/" };
        assert_eq!(bare.file_name(), "resume.pdf");
    }

    #[test]
    fn portfolio_serializes_with_camel_case_keys() {
        let value = serde_json::to_value(portfolio()).expect("serializable");
        assert_eq!(value["profile"]["siteUrl"], "https://abdulrahmanazam.me");
        assert_eq!(value["projects"][2]["links"]["modelCard"], "/model-cards/income-predictor.pdf");
        assert_eq!(value["projects"][0]["category"], "web");
    }
}
