#![allow(clippy::unwrap_used)]

use super::*;
use rust_decimal_macros::dec;
use std::io::Write;

fn make_csv_file(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

// ── parse_decimal ─────────────────────────────────────────────

#[test]
fn test_parse_decimal_basic() {
    assert_eq!(parse_decimal("100.50").unwrap(), dec!(100.50));
    assert_eq!(parse_decimal("-42.99").unwrap(), dec!(-42.99));
}

#[test]
fn test_parse_decimal_with_currency() {
    assert_eq!(parse_decimal("$1,234.56").unwrap(), dec!(1234.56));
    assert_eq!(parse_decimal("-$99.99").unwrap(), dec!(-99.99));
}

#[test]
fn test_parse_decimal_parentheses_negative() {
    assert_eq!(parse_decimal("(500.00)").unwrap(), dec!(-500.00));
}

#[test]
fn test_parse_decimal_empty_is_error() {
    assert!(parse_decimal("").is_err());
    assert!(parse_decimal("  ").is_err());
}

#[test]
fn test_parse_decimal_quoted() {
    assert_eq!(parse_decimal("\"100.00\"").unwrap(), dec!(100.00));
}

#[test]
fn test_parse_decimal_invalid() {
    assert!(parse_decimal("not_a_number").is_err());
}

// ── parse_date / parse_datetime ───────────────────────────────

#[test]
fn test_parse_date_formats() {
    assert_eq!(parse_date("2024-01-15").unwrap(), ymd(2024, 1, 15));
    assert_eq!(parse_date("01/15/2024").unwrap(), ymd(2024, 1, 15));
    assert_eq!(parse_date("01-15-2024").unwrap(), ymd(2024, 1, 15));
    assert!(parse_date("15th Jan").is_err());
}

#[test]
fn test_parse_datetime_with_time() {
    let dt = parse_datetime("2024-01-15 18:30:05").unwrap();
    assert_eq!(dt, ymd(2024, 1, 15).and_hms_opt(18, 30, 5).unwrap());
    let dt = parse_datetime("2024-01-15T07:45").unwrap();
    assert_eq!(dt, ymd(2024, 1, 15).and_hms_opt(7, 45, 0).unwrap());
}

#[test]
fn test_parse_datetime_bare_date_is_midnight() {
    let dt = parse_datetime("2024-01-15").unwrap();
    assert_eq!(dt, ymd(2024, 1, 15).and_hms_opt(0, 0, 0).unwrap());
}

// ── Transactions ──────────────────────────────────────────────

#[test]
fn test_load_transactions() {
    let file = make_csv_file(
        "id,date,type,amount,category,description\n\
         t1,2024-01-05,income,100,Income,Salary\n\
         t2,2024-01-10 14:00,expense,\"$1,040.00\",Groceries,Kroger run\n",
    );
    let txns = CsvLoader::transactions(file.path()).unwrap();
    assert_eq!(txns.len(), 2);
    assert_eq!(txns[0].id, "t1");
    assert_eq!(txns[0].kind, TransactionType::Income);
    assert_eq!(txns[0].amount, dec!(100));
    assert_eq!(txns[0].category, "Income");
    assert_eq!(txns[1].amount, dec!(1040.00));
    assert_eq!(txns[1].description, "Kroger run");
    assert_eq!(txns[1].date, ymd(2024, 1, 10).and_hms_opt(14, 0, 0).unwrap());
}

#[test]
fn test_load_transactions_header_order_and_case() {
    let file = make_csv_file(
        "Description,Amount,Type,Date,ID\n\
         Netflix,15.99,Expense,2024-02-01,n1\n",
    );
    let txns = CsvLoader::transactions(file.path()).unwrap();
    assert_eq!(txns[0].id, "n1");
    assert_eq!(txns[0].description, "Netflix");
    assert!(txns[0].category.is_empty());
    assert!(txns[0].is_expense());
}

#[test]
fn test_load_transactions_missing_column() {
    let file = make_csv_file("id,date,amount\nt1,2024-01-01,5\n");
    let err = CsvLoader::transactions(file.path()).unwrap_err();
    assert!(format!("{err:#}").contains("type"));
}

#[test]
fn test_load_transactions_rejects_non_positive_amount() {
    let file = make_csv_file("id,date,type,amount\nt1,2024-01-01,expense,-5\n");
    let err = CsvLoader::transactions(file.path()).unwrap_err();
    assert!(format!("{err:#}").contains("Row 2"));
}

#[test]
fn test_load_transactions_rejects_unknown_type() {
    let file = make_csv_file("id,date,type,amount\nt1,2024-01-01,transfer,5\n");
    assert!(CsvLoader::transactions(file.path()).is_err());
}

#[test]
fn test_load_transactions_rejects_bad_date() {
    let file = make_csv_file("id,date,type,amount\nt1,yesterday,income,5\n");
    let err = CsvLoader::transactions(file.path()).unwrap_err();
    assert!(format!("{err:#}").contains("yesterday"));
}

#[test]
fn test_load_transactions_skips_duplicate_ids() {
    let file = make_csv_file(
        "id,date,type,amount\n\
         t1,2024-01-01,income,5\n\
         t1,2024-01-02,income,7\n",
    );
    let txns = CsvLoader::transactions(file.path()).unwrap();
    assert_eq!(txns.len(), 1);
    assert_eq!(txns[0].amount, dec!(5));
}

#[test]
fn test_load_transactions_header_only() {
    let file = make_csv_file("id,date,type,amount\n");
    assert!(CsvLoader::transactions(file.path()).unwrap().is_empty());
}

#[test]
fn test_load_transactions_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    assert!(CsvLoader::transactions(&dir.path().join("nope.csv")).is_err());
}

// ── Budgets ───────────────────────────────────────────────────

#[test]
fn test_load_budgets() {
    let file = make_csv_file(
        "id,category,limit,period,start,end\n\
         b1,Groceries,50,monthly,2024-01-01,2024-01-31\n\
         b2,Travel,$3000,Yearly,01/01/2024,12/31/2024\n",
    );
    let budgets = CsvLoader::budgets(file.path()).unwrap();
    assert_eq!(budgets.len(), 2);
    assert_eq!(budgets[0].category, "Groceries");
    assert_eq!(budgets[0].limit_amount, dec!(50));
    assert_eq!(budgets[0].end_date, ymd(2024, 1, 31));
    assert_eq!(budgets[1].period, BudgetPeriod::Yearly);
    assert_eq!(budgets[1].limit_amount, dec!(3000));
}

#[test]
fn test_load_budgets_rejects_inverted_range() {
    let file = make_csv_file(
        "id,category,limit,period,start,end\n\
         b1,Groceries,50,monthly,2024-02-01,2024-01-31\n",
    );
    assert!(CsvLoader::budgets(file.path()).is_err());
}

#[test]
fn test_load_budgets_rejects_unknown_period() {
    let file = make_csv_file(
        "id,category,limit,period,start,end\n\
         b1,Groceries,50,weekly,2024-01-01,2024-01-07\n",
    );
    let err = CsvLoader::budgets(file.path()).unwrap_err();
    assert!(format!("{err:#}").contains("weekly"));
}

// ── Keyword tables ────────────────────────────────────────────

#[test]
fn test_load_keyword_table_preserves_order() {
    let file = make_csv_file(
        "category,keyword\n\
         Coffee,Starbucks\n\
         Groceries,kroger\n\
         Coffee,espresso\n",
    );
    let table = CsvLoader::keyword_table(file.path()).unwrap();
    let labels: Vec<&str> = table.labels().collect();
    assert_eq!(labels, vec!["Coffee", "Groceries"]);
    assert_eq!(
        table.entries()[0].keywords(),
        &["starbucks".to_string(), "espresso".to_string()]
    );
    assert_eq!(
        crate::categorize::categorize("ESPRESSO BAR", &table, "Other"),
        "Coffee"
    );
}

#[test]
fn test_load_keyword_table_requires_category() {
    let file = make_csv_file("category,keyword\n,orphan\n");
    assert!(CsvLoader::keyword_table(file.path()).is_err());
}

#[test]
fn test_load_keyword_table_skips_empty_keywords() {
    let file = make_csv_file(
        "category,keyword
         Catchall,
         Coffee,starbucks
",
    );
    let table = CsvLoader::keyword_table(file.path()).unwrap();
    let labels: Vec<&str> = table.labels().collect();
    assert_eq!(labels, vec!["Coffee"]);
    assert_eq!(
        crate::categorize::categorize("Kroger run", &table, "Other"),
        "Other"
    );
}

// ── News ──────────────────────────────────────────────────────

#[test]
fn test_load_news() {
    let file = make_csv_file(
        "title,description,source,url,published\n\
         Inflation eases,Prices fell,Wire,https://example.com/a,2024-05-20 10:00\n\
         Markets,,Desk,,not a date\n",
    );
    let items = CsvLoader::news(file.path()).unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].title, "Inflation eases");
    assert_eq!(items[0].source, "Wire");
    assert_eq!(
        items[0].published_at,
        Some(ymd(2024, 5, 20).and_hms_opt(10, 0, 0).unwrap())
    );
    assert!(items[1].description.is_empty());
    assert_eq!(items[1].display_description(), crate::news::MISSING_DESCRIPTION);
    assert_eq!(items[1].published_at, None);
}

#[test]
fn test_load_news_placeholder_not_categorized() {
    let file = make_csv_file("title,description
Market wrap,
");
    let items = CsvLoader::news(file.path()).unwrap();
    let classifier = crate::news::NewsClassifier::new(
        crate::categorize::Categorizer::new(
            crate::categorize::KeywordTable::new().with("stories", &["story"]),
            "general",
        ),
        crate::news::RelevanceScores::news_defaults(),
    );
    let article = classifier.classify(items.into_iter().next().unwrap());
    assert_eq!(article.category, "general");
    assert_eq!(article.item.display_description(), crate::news::MISSING_DESCRIPTION);
}

#[test]
fn test_load_news_title_only() {
    let file = make_csv_file("title\nRate hike ahead\n");
    let items = CsvLoader::news(file.path()).unwrap();
    assert_eq!(items[0].title, "Rate hike ahead");
    assert!(items[0].url.is_empty());
}
