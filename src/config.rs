use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::path::{Path, PathBuf};

use crate::ledger::{DashboardOptions, DEFAULT_WINDOW_MONTHS, MAX_WINDOW_MONTHS};

pub const TRANSACTIONS_FILE: &str = "transactions.csv";
pub const BUDGETS_FILE: &str = "budgets.csv";
pub const KEYWORDS_FILE: &str = "keywords.csv";
pub const NEWS_FILE: &str = "news.csv";

pub const DEFAULT_BREAKDOWN_DAYS: u64 = 30;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub data_dir: PathBuf,
    pub window_months: usize,
    pub breakdown_days: u64,
    pub anchor: NaiveDate,
}

impl Config {
    pub fn new(data_dir: PathBuf, anchor: NaiveDate) -> Self {
        Self {
            data_dir,
            window_months: DEFAULT_WINDOW_MONTHS,
            breakdown_days: DEFAULT_BREAKDOWN_DAYS,
            anchor,
        }
    }

    /// Defaults, then `--data-dir`, `--months`, `--days` and `--anchor`
    /// overrides from `args`.
    pub fn from_args(args: &[String]) -> Result<Self> {
        let data_dir = match flag_value(args, "--data-dir")? {
            Some(dir) => PathBuf::from(expand_home(dir)),
            None => default_data_dir()?,
        };
        let mut config = Self::new(data_dir, chrono::Local::now().date_naive());

        if let Some(months) = flag_value(args, "--months")? {
            let window: usize = months
                .parse()
                .with_context(|| format!("Invalid --months value: {months}"))?;
            if window > MAX_WINDOW_MONTHS {
                anyhow::bail!("--months must be at most {MAX_WINDOW_MONTHS}, got {window}");
            }
            config.window_months = window;
        }
        if let Some(days) = flag_value(args, "--days")? {
            config.breakdown_days = days
                .parse()
                .with_context(|| format!("Invalid --days value: {days}"))?;
        }
        if let Some(anchor) = flag_value(args, "--anchor")? {
            config.anchor = NaiveDate::parse_from_str(anchor, "%Y-%m-%d")
                .with_context(|| format!("Invalid --anchor date (want YYYY-MM-DD): {anchor}"))?;
        }

        Ok(config)
    }

    pub fn dashboard_options(&self) -> DashboardOptions {
        DashboardOptions {
            window_months: self.window_months,
            anchor: self.anchor,
            breakdown_days: self.breakdown_days,
        }
    }

    pub fn transactions_path(&self) -> PathBuf {
        self.data_dir.join(TRANSACTIONS_FILE)
    }

    pub fn budgets_path(&self) -> PathBuf {
        self.data_dir.join(BUDGETS_FILE)
    }

    pub fn keywords_path(&self) -> PathBuf {
        self.data_dir.join(KEYWORDS_FILE)
    }

    pub fn news_path(&self) -> PathBuf {
        self.data_dir.join(NEWS_FILE)
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

pub fn default_data_dir() -> Result<PathBuf> {
    let proj_dirs = directories::ProjectDirs::from("com", "fintrack", "FinTrack")
        .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
    Ok(proj_dirs.data_dir().to_path_buf())
}

/// Value following `flag`. `None` when the flag is absent; an error when it
/// is present with nothing after it.
pub(crate) fn flag_value<'a>(args: &'a [String], flag: &str) -> Result<Option<&'a str>> {
    let Some(pos) = args.iter().position(|a| a == flag) else {
        return Ok(None);
    };
    match args.get(pos + 1) {
        Some(value) if !value.starts_with("--") => Ok(Some(value.as_str())),
        _ => anyhow::bail!("Missing value for {flag}"),
    }
}

/// Strip `--flag value` pairs, leaving positional arguments.
pub(crate) fn positional(args: &[String]) -> Vec<&str> {
    let mut out = Vec::new();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if arg.starts_with("--") {
            if VALUE_FLAGS.contains(&arg.as_str()) {
                iter.next();
            }
            continue;
        }
        out.push(arg.as_str());
    }
    out
}

const VALUE_FLAGS: &[&str] = &["--data-dir", "--months", "--days", "--anchor"];

pub(crate) fn expand_home(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
        format!("{home}/{rest}")
    } else {
        path.to_string()
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
