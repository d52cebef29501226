use super::KeywordTable;

pub const TRANSACTION_DEFAULT_LABEL: &str = "Other";
pub const NEWS_DEFAULT_LABEL: &str = "general";

/// Keyword table for transaction descriptions. "gas" is listed under both
/// Utilities and Transport; Utilities wins.
pub fn transaction_keywords() -> KeywordTable {
    KeywordTable::new()
        .with(
            "Groceries",
            &["grocery", "supermarket", "food", "walmart", "target", "kroger"],
        )
        .with(
            "Utilities",
            &["electric", "water", "gas", "internet", "phone", "utility"],
        )
        .with(
            "Transport",
            &["uber", "lyft", "gas", "fuel", "parking", "metro", "bus"],
        )
        .with(
            "Entertainment",
            &["movie", "netflix", "spotify", "concert", "theater"],
        )
        .with(
            "Dining Out",
            &["restaurant", "cafe", "starbucks", "mcdonald", "pizza"],
        )
        .with("Rent", &["rent", "lease", "apartment"])
        .with("Shopping", &["amazon", "store", "mall", "purchase"])
        .with("Healthcare", &["doctor", "pharmacy", "hospital", "medical"])
        .with("Education", &["school", "tuition", "book", "course"])
}

/// Keyword table for finance news (title and description joined).
pub fn news_keywords() -> KeywordTable {
    KeywordTable::new()
        .with("inflation", &["inflation", "price", "cost of living"])
        .with(
            "interest-rate",
            &["interest rate", "rbi", "central bank", "rate cut", "rate hike"],
        )
        .with(
            "investment",
            &["saving", "investment", "portfolio", "mutual fund"],
        )
        .with("spending", &["spend", "expense", "budget"])
        .with("general", &["money", "budget", "financial"])
}
