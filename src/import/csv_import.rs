use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use std::collections::HashSet;
use std::path::Path;
use std::str::FromStr;

use crate::categorize::KeywordTable;
use crate::models::{Budget, BudgetPeriod, Transaction, TransactionType};
use crate::news::NewsItem;

/// Header-addressed view over one CSV file.
struct Sheet {
    headers: Vec<String>,
    rows: Vec<csv::StringRecord>,
}

impl Sheet {
    fn read(path: &Path) -> Result<Self> {
        let mut rdr = csv::ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::All)
            .from_path(path)
            .with_context(|| format!("Failed to open CSV file: {}", path.display()))?;

        let headers = rdr
            .headers()
            .with_context(|| format!("Failed to read CSV header: {}", path.display()))?
            .iter()
            .map(|h| h.trim().to_lowercase())
            .collect();

        let mut rows = Vec::new();
        for result in rdr.records() {
            let record = result
                .with_context(|| format!("Failed to read CSV record: {}", path.display()))?;
            if record.iter().all(|f| f.is_empty()) {
                continue;
            }
            rows.push(record);
        }

        Ok(Self { headers, rows })
    }

    fn column(&self, name: &str) -> Result<usize> {
        col_index(&self.headers, name).with_context(|| format!("Missing column '{name}'"))
    }
}

fn col_index(headers: &[String], name: &str) -> Option<usize> {
    headers.iter().position(|h| h == name)
}

fn field(row: &csv::StringRecord, col: usize) -> &str {
    row.get(col).unwrap_or("")
}

fn optional_field(row: &csv::StringRecord, col: Option<usize>) -> &str {
    col.and_then(|c| row.get(c)).unwrap_or("")
}

pub struct CsvLoader;

impl CsvLoader {
    /// Columns: `id,date,type,amount,category,description`. `category` and
    /// `description` may be absent.
    pub fn transactions(path: &Path) -> Result<Vec<Transaction>> {
        let sheet = Sheet::read(path)?;
        let id_col = sheet.column("id")?;
        let date_col = sheet.column("date")?;
        let type_col = sheet.column("type")?;
        let amount_col = sheet.column("amount")?;
        let category_col = col_index(&sheet.headers, "category");
        let description_col = col_index(&sheet.headers, "description");

        let mut seen = HashSet::new();
        let mut transactions = Vec::with_capacity(sheet.rows.len());
        for (i, row) in sheet.rows.iter().enumerate() {
            let line = i + 2;
            let id = field(row, id_col);
            if id.is_empty() {
                anyhow::bail!("Row {line}: missing id");
            }
            if !seen.insert(id.to_string()) {
                tracing::warn!(id, line, "duplicate transaction id, keeping the first");
                continue;
            }

            let date_str = field(row, date_col);
            let date = parse_datetime(date_str)
                .with_context(|| format!("Row {line}: failed to parse date '{date_str}'"))?;

            let type_str = field(row, type_col);
            let kind = TransactionType::parse(type_str).with_context(|| {
                format!("Row {line}: unknown transaction type '{type_str}'")
            })?;

            let amount = parse_decimal(field(row, amount_col))
                .with_context(|| format!("Row {line}: failed to parse amount"))?;

            let txn = Transaction::new(id, kind, amount, date)
                .with_context(|| format!("Row {line}: invalid transaction"))?
                .with_category(optional_field(row, category_col))
                .with_description(optional_field(row, description_col));
            transactions.push(txn);
        }

        tracing::debug!(count = transactions.len(), path = %path.display(), "loaded transactions");
        Ok(transactions)
    }

    /// Columns: `id,category,limit,period,start,end`.
    pub fn budgets(path: &Path) -> Result<Vec<Budget>> {
        let sheet = Sheet::read(path)?;
        let id_col = sheet.column("id")?;
        let category_col = sheet.column("category")?;
        let limit_col = sheet.column("limit")?;
        let period_col = sheet.column("period")?;
        let start_col = sheet.column("start")?;
        let end_col = sheet.column("end")?;

        let mut budgets = Vec::with_capacity(sheet.rows.len());
        for (i, row) in sheet.rows.iter().enumerate() {
            let line = i + 2;
            let period_str = field(row, period_col);
            let period = BudgetPeriod::parse(period_str)
                .with_context(|| format!("Row {line}: unknown budget period '{period_str}'"))?;
            let limit = parse_decimal(field(row, limit_col))
                .with_context(|| format!("Row {line}: failed to parse limit"))?;
            let start = parse_date(field(row, start_col))
                .with_context(|| format!("Row {line}: failed to parse start date"))?;
            let end = parse_date(field(row, end_col))
                .with_context(|| format!("Row {line}: failed to parse end date"))?;

            let budget = Budget::new(
                field(row, id_col),
                field(row, category_col),
                limit,
                period,
                start,
                end,
            )
            .with_context(|| format!("Row {line}: invalid budget"))?;
            budgets.push(budget);
        }

        tracing::debug!(count = budgets.len(), path = %path.display(), "loaded budgets");
        Ok(budgets)
    }

    /// Columns: `category,keyword`, one keyword per row, in precedence order.
    pub fn keyword_table(path: &Path) -> Result<KeywordTable> {
        let sheet = Sheet::read(path)?;
        let category_col = sheet.column("category")?;
        let keyword_col = sheet.column("keyword")?;

        let mut table = KeywordTable::new();
        for (i, row) in sheet.rows.iter().enumerate() {
            let category = field(row, category_col);
            if category.is_empty() {
                anyhow::bail!("Row {}: missing category", i + 2);
            }
            let keyword = field(row, keyword_col);
            if keyword.is_empty() {
                tracing::warn!(line = i + 2, category, "skipping row with empty keyword");
                continue;
            }
            table.push(category, keyword);
        }

        tracing::debug!(labels = table.len(), path = %path.display(), "loaded keyword table");
        Ok(table)
    }

    /// Columns: `title,description,source,url,published`; only `title` is
    /// required.
    pub fn news(path: &Path) -> Result<Vec<NewsItem>> {
        let sheet = Sheet::read(path)?;
        let title_col = sheet.column("title")?;
        let description_col = col_index(&sheet.headers, "description");
        let source_col = col_index(&sheet.headers, "source");
        let url_col = col_index(&sheet.headers, "url");
        let published_col = col_index(&sheet.headers, "published");

        let mut items = Vec::with_capacity(sheet.rows.len());
        for (i, row) in sheet.rows.iter().enumerate() {
            let published = optional_field(row, published_col);
            let published_at = if published.is_empty() {
                None
            } else {
                match parse_datetime(published) {
                    Ok(dt) => Some(dt),
                    Err(e) => {
                        tracing::warn!(line = i + 2, error = %e, "ignoring unparseable publish date");
                        None
                    }
                }
            };

            items.push(NewsItem {
                title: field(row, title_col).to_string(),
                description: optional_field(row, description_col).to_string(),
                source: optional_field(row, source_col).to_string(),
                url: optional_field(row, url_col).to_string(),
                published_at,
            });
        }

        tracing::debug!(count = items.len(), path = %path.display(), "loaded news");
        Ok(items)
    }
}

fn parse_date(s: &str) -> Result<NaiveDate> {
    for fmt in &["%Y-%m-%d", "%m/%d/%Y", "%m-%d-%Y", "%m/%d/%y"] {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Ok(d);
        }
    }
    anyhow::bail!("Could not parse date: {}", s)
}

/// Date with optional time of day. A bare date is taken as midnight.
fn parse_datetime(s: &str) -> Result<NaiveDateTime> {
    for fmt in &[
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y-%m-%dT%H:%M",
    ] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(dt);
        }
    }
    let date = parse_date(s)?;
    Ok(date.and_time(chrono::NaiveTime::MIN))
}

fn parse_decimal(s: &str) -> Result<Decimal> {
    let cleaned = s
        .replace(['$', ','], "")
        .replace('(', "-")
        .replace(')', "")
        .trim()
        .to_string();
    if cleaned.is_empty() {
        anyhow::bail!("Empty amount");
    }
    Decimal::from_str(&cleaned)
        .or_else(|_| Decimal::from_str(&cleaned.replace('"', "")))
        .with_context(|| format!("Failed to parse '{}' as decimal", s))
}

#[cfg(test)]
#[path = "csv_import_tests.rs"]
mod tests;
