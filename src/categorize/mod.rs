mod defaults;

pub use defaults::{
    news_keywords, transaction_keywords, NEWS_DEFAULT_LABEL, TRANSACTION_DEFAULT_LABEL,
};

use crate::models::Transaction;

/// Ordered `label -> keywords` table. Earlier entries take precedence when
/// keywords overlap across labels.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeywordTable {
    entries: Vec<KeywordEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordEntry {
    label: String,
    /// Stored lowercase.
    keywords: Vec<String>,
}

impl KeywordEntry {
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    fn matches(&self, lowered_text: &str) -> bool {
        self.keywords.iter().any(|k| lowered_text.contains(k.as_str()))
    }
}

impl KeywordTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a whole entry, builder style.
    pub fn with<S: AsRef<str>>(mut self, label: impl Into<String>, keywords: &[S]) -> Self {
        let label = label.into();
        for keyword in keywords {
            self.push(label.clone(), keyword);
        }
        if !self.contains_label(&label) {
            self.entries.push(KeywordEntry {
                label,
                keywords: Vec::new(),
            });
        }
        self
    }

    /// Add one keyword under `label`. A label keeps the position where it
    /// first appeared.
    pub fn push(&mut self, label: impl Into<String>, keyword: impl AsRef<str>) {
        let label = label.into();
        let keyword = keyword.as_ref().to_lowercase();
        match self.entries.iter_mut().find(|e| e.label == label) {
            Some(entry) => {
                if !entry.keywords.contains(&keyword) {
                    entry.keywords.push(keyword);
                }
            }
            None => self.entries.push(KeywordEntry {
                label,
                keywords: vec![keyword],
            }),
        }
    }

    pub fn entries(&self) -> &[KeywordEntry] {
        &self.entries
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.label.as_str())
    }

    pub fn contains_label(&self, label: &str) -> bool {
        self.entries.iter().any(|e| e.label == label)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// First label in `table` with a keyword occurring in `text`
/// (case-insensitive), or `default_label` when nothing matches.
pub fn categorize<'a>(text: &str, table: &'a KeywordTable, default_label: &'a str) -> &'a str {
    let lowered = text.to_lowercase();
    table
        .entries
        .iter()
        .find(|entry| entry.matches(&lowered))
        .map_or(default_label, |entry| entry.label.as_str())
}

#[derive(Debug, Clone)]
pub struct Categorizer {
    table: KeywordTable,
    default_label: String,
}

impl Categorizer {
    pub fn new(table: KeywordTable, default_label: impl Into<String>) -> Self {
        Self {
            table,
            default_label: default_label.into(),
        }
    }

    pub fn for_transactions() -> Self {
        Self::new(transaction_keywords(), TRANSACTION_DEFAULT_LABEL)
    }

    pub fn for_news() -> Self {
        Self::new(news_keywords(), NEWS_DEFAULT_LABEL)
    }

    pub fn table(&self) -> &KeywordTable {
        &self.table
    }

    pub fn default_label(&self) -> &str {
        &self.default_label
    }

    pub fn categorize(&self, text: &str) -> &str {
        categorize(text, &self.table, &self.default_label)
    }

    /// Fill in the category of every uncategorized transaction from its
    /// description. Returns how many were filled.
    pub fn categorize_batch(&self, transactions: &mut [Transaction]) -> usize {
        let mut filled = 0;
        for txn in transactions.iter_mut() {
            if !txn.is_categorized() {
                txn.category = self.categorize(&txn.description).to_string();
                filled += 1;
            }
        }
        filled
    }
}
