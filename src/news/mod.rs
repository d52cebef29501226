use chrono::NaiveDateTime;

use crate::categorize::Categorizer;

/// Shown in place of an empty description. Never fed to the categorizer.
pub const MISSING_DESCRIPTION: &str = "Read more for full story";

#[derive(Debug, Clone, PartialEq)]
pub struct NewsItem {
    pub title: String,
    pub description: String,
    pub source: String,
    pub url: String,
    pub published_at: Option<NaiveDateTime>,
}

impl NewsItem {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            source: String::new(),
            url: String::new(),
            published_at: None,
        }
    }

    /// Text handed to the categorizer: title and raw description.
    pub fn text(&self) -> String {
        format!("{} {}", self.title, self.description)
    }

    pub fn display_description(&self) -> &str {
        if self.description.trim().is_empty() {
            MISSING_DESCRIPTION
        } else {
            &self.description
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClassifiedArticle {
    pub item: NewsItem,
    pub category: String,
    pub relevance: f64,
}

/// Static per-label display weight in `[0, 1]`. Unknown labels score 0.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RelevanceScores {
    scores: Vec<(String, f64)>,
}

impl RelevanceScores {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn news_defaults() -> Self {
        Self::new()
            .with("inflation", 0.95)
            .with("interest-rate", 0.95)
            .with("investment", 0.85)
            .with("savings", 0.85)
            .with("spending", 0.75)
            .with("general", 0.6)
    }

    /// Set `label`'s weight, clamped into `[0, 1]`. NaN counts as 0.
    pub fn with(mut self, label: impl Into<String>, score: f64) -> Self {
        let label = label.into();
        let score = if score.is_nan() { 0.0 } else { score.clamp(0.0, 1.0) };
        match self.scores.iter_mut().find(|(l, _)| *l == label) {
            Some(entry) => entry.1 = score,
            None => self.scores.push((label, score)),
        }
        self
    }

    pub fn score(&self, label: &str) -> f64 {
        self.scores
            .iter()
            .find(|(l, _)| l == label)
            .map_or(0.0, |(_, s)| *s)
    }
}

#[derive(Debug, Clone)]
pub struct NewsClassifier {
    categorizer: Categorizer,
    relevance: RelevanceScores,
}

impl Default for NewsClassifier {
    fn default() -> Self {
        Self::new(Categorizer::for_news(), RelevanceScores::news_defaults())
    }
}

impl NewsClassifier {
    pub fn new(categorizer: Categorizer, relevance: RelevanceScores) -> Self {
        Self {
            categorizer,
            relevance,
        }
    }

    pub fn classify(&self, item: NewsItem) -> ClassifiedArticle {
        let category = self.categorizer.categorize(&item.text()).to_string();
        let relevance = self.relevance.score(&category);
        ClassifiedArticle {
            item,
            category,
            relevance,
        }
    }

    /// Classify and order by relevance, most relevant first. Equal scores
    /// keep their input order.
    pub fn rank(&self, items: Vec<NewsItem>) -> Vec<ClassifiedArticle> {
        let mut out: Vec<ClassifiedArticle> = items.into_iter().map(|i| self.classify(i)).collect();
        out.sort_by(|a, b| b.relevance.total_cmp(&a.relevance));
        out
    }
}

/// Short age label such as "5m ago"; older than a week shows the date.
pub fn relative_time(published: NaiveDateTime, now: NaiveDateTime) -> String {
    let age = now - published;
    let minutes = age.num_minutes();
    let hours = age.num_hours();
    let days = age.num_days();

    if minutes < 1 {
        "Just now".to_string()
    } else if minutes < 60 {
        format!("{minutes}m ago")
    } else if hours < 24 {
        format!("{hours}h ago")
    } else if days < 7 {
        format!("{days}d ago")
    } else {
        published.format("%Y-%m-%d").to_string()
    }
}
