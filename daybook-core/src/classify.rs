//! Day classification and keyword categories.
//!
//! The month grid shows at most one category per day. Categories come from an
//! ordered rule list; the first rule whose keyword appears in any active
//! task's title wins, so rule order is part of the configuration.

use serde::{Deserialize, Serialize};

use crate::task::Task;

/// Marker shown for categories that have no built-in or configured marker.
pub const FALLBACK_MARKER: &str = "•";

/// How a day renders in the month grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DayKind {
    /// No task occurs on the day.
    Empty,
    /// Only one-off tasks occur on the day.
    OneOff,
    /// At least one repeating task occurs on the day.
    Recurring,
}

impl DayKind {
    /// Classify a day from the tasks active on it.
    pub fn of(active: &[&Task]) -> Self {
        if active.is_empty() {
            DayKind::Empty
        } else if active.iter().any(|t| t.is_recurring()) {
            DayKind::Recurring
        } else {
            DayKind::OneOff
        }
    }
}

/// Maps titles containing `keyword` to `category`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRule {
    pub keyword: String,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marker: Option<String>,
}

impl CategoryRule {
    pub fn new(keyword: &str, category: &str) -> Self {
        CategoryRule {
            keyword: keyword.to_string(),
            category: category.to_string(),
            marker: None,
        }
    }

    /// Configured marker, else the built-in one for the category.
    pub fn marker(&self) -> &str {
        self.marker
            .as_deref()
            .unwrap_or_else(|| builtin_marker(&self.category))
    }

    fn matches(&self, lowercase_title: &str) -> bool {
        let keyword = self.keyword.trim().to_lowercase();
        !keyword.is_empty() && lowercase_title.contains(&keyword)
    }
}

fn builtin_marker(category: &str) -> &'static str {
    match category {
        "fitness" => "💪",
        "study" => "📚",
        "celebration" => "🎉",
        "work" => "💼",
        "health" => "🩺",
        _ => FALLBACK_MARKER,
    }
}

/// Ordered keyword rules. First match wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CategoryRules(Vec<CategoryRule>);

impl Default for CategoryRules {
    fn default() -> Self {
        CategoryRules(vec![
            CategoryRule::new("gym", "fitness"),
            CategoryRule::new("workout", "fitness"),
            CategoryRule::new("running", "fitness"),
            CategoryRule::new("study", "study"),
            CategoryRule::new("exam", "study"),
            CategoryRule::new("birthday", "celebration"),
            CategoryRule::new("meeting", "work"),
            CategoryRule::new("doctor", "health"),
        ])
    }
}

impl CategoryRules {
    pub fn new(rules: Vec<CategoryRule>) -> Self {
        CategoryRules(rules)
    }

    /// Rules from configuration, or the defaults when none are configured.
    pub fn from_config(rules: &[CategoryRule]) -> Self {
        if rules.is_empty() {
            Self::default()
        } else {
            Self::new(rules.to_vec())
        }
    }

    pub fn rules(&self) -> &[CategoryRule] {
        &self.0
    }

    /// First rule whose keyword is a case-insensitive substring of any title.
    /// Blank keywords never match.
    pub fn categorize(&self, tasks: &[&Task]) -> Option<&CategoryRule> {
        let titles: Vec<String> = tasks.iter().map(|t| t.title.to_lowercase()).collect();

        self.0
            .iter()
            .find(|rule| titles.iter().any(|title| rule.matches(title)))
    }
}
