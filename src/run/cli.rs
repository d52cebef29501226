use anyhow::Result;
use std::path::PathBuf;

use crate::categorize::{Categorizer, TRANSACTION_DEFAULT_LABEL};
use crate::config::{self, Config};
use crate::import::CsvLoader;
use crate::ledger::{self, BudgetUsage, Dashboard, MonthlyTotal, TransactionFilter};
use crate::models::{Budget, Transaction};
use crate::news::{relative_time, NewsClassifier};
use crate::report::{format_amount, format_percent, truncate};

pub fn as_cli(args: &[String]) -> Result<()> {
    let command = args.get(1).map(String::as_str).unwrap_or("summary");
    let rest = args.get(2..).unwrap_or_default();
    tracing::info!(command, "dispatch");

    match command {
        "summary" | "s" => cli_summary(&Config::from_args(rest)?),
        "monthly" | "m" => cli_monthly(&Config::from_args(rest)?),
        "categories" | "c" => {
            let all = rest.iter().any(|a| a == "--all");
            cli_categories(&Config::from_args(rest)?, all)
        }
        "budgets" | "b" => cli_budgets(&Config::from_args(rest)?),
        "categorize" => cli_categorize(&Config::from_args(rest)?, rest),
        "news" => cli_news(&Config::from_args(rest)?, rest),
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        "--version" | "-V" | "version" => {
            println!("fintrack {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        other => {
            print_usage();
            anyhow::bail!("Unknown command: {other}");
        }
    }
}

fn print_usage() {
    println!("FinTrack — personal finance summaries from CSV ledgers");
    println!();
    println!("Usage: fintrack [command] [options]");
    println!();
    println!("Commands:");
    println!("  summary                       Totals, monthly trend, breakdown and budgets (default)");
    println!("  monthly                       Income/expense per month over the trailing window");
    println!("  categories [--all]            Expense breakdown for the last N days (--all: every transaction)");
    println!("  budgets                       Budget usage per category and overall");
    println!("  categorize <text...>          Show the category a description would get");
    println!("  news [file.csv]               Classify and rank news articles");
    println!("  --help, -h                    Show this help");
    println!("  --version, -V                 Show version");
    println!();
    println!("Options:");
    println!("  --data-dir <dir>              Directory holding transactions.csv, budgets.csv,");
    println!("                                keywords.csv and news.csv");
    println!("  --months <n>                  Trailing window length (default 6)");
    println!("  --days <n>                    Breakdown window in days (default 30)");
    println!("  --anchor <YYYY-MM-DD>         Date the windows end on (default today)");
}

// ── Loading ──────────────────────────────────────────────────

fn load_categorizer(config: &Config) -> Result<Categorizer> {
    let path = config.keywords_path();
    if path.exists() {
        let table = CsvLoader::keyword_table(&path)?;
        Ok(Categorizer::new(table, TRANSACTION_DEFAULT_LABEL))
    } else {
        Ok(Categorizer::for_transactions())
    }
}

fn load_transactions(config: &Config) -> Result<Vec<Transaction>> {
    let path = config.transactions_path();
    if !path.exists() {
        anyhow::bail!(
            "No transactions found at {} (use --data-dir to point elsewhere)",
            path.display()
        );
    }
    let mut txns = CsvLoader::transactions(&path)?;
    let filled = load_categorizer(config)?.categorize_batch(&mut txns);
    if filled > 0 {
        tracing::info!(filled, "auto-categorized transactions");
    }
    Ok(txns)
}

fn load_budgets(config: &Config) -> Result<Vec<Budget>> {
    let path = config.budgets_path();
    if !path.exists() {
        tracing::warn!(path = %path.display(), "no budgets file");
        return Ok(Vec::new());
    }
    CsvLoader::budgets(&path)
}

// ── Commands ─────────────────────────────────────────────────

fn cli_summary(config: &Config) -> Result<()> {
    let txns = load_transactions(config)?;
    let budgets = load_budgets(config)?;
    let dash = Dashboard::build(&txns, &budgets, &config.dashboard_options());

    println!("FinTrack — as of {}", config.anchor);
    println!("{}", "─".repeat(40));
    println!("  Income:     {}", format_amount(dash.totals.total_income));
    println!("  Expenses:   {}", format_amount(dash.totals.total_expense));
    println!("  Balance:    {}", format_amount(dash.totals.balance));
    println!("  Total Txns: {}", txns.len());

    println!();
    print_monthly(&dash.monthly);

    if !dash.expense_breakdown.is_empty() {
        println!();
        println!("Spending, last {} days:", config.breakdown_days);
        for (name, amount) in &dash.expense_breakdown {
            println!("  {:<24} {}", truncate(name, 24), format_amount(*amount));
        }
    }

    if !dash.budgets.is_empty() {
        println!();
        println!("Budgets:");
        for status in &dash.budgets {
            print_usage_line(&status.category, &status.usage);
        }
        print_usage_line("All budgets", &dash.overall);
        for status in dash.exceeded_budgets() {
            println!(
                "  ! {} exceeded by {}",
                status.category,
                format_amount(status.usage.overage)
            );
        }
    }

    Ok(())
}

fn cli_monthly(config: &Config) -> Result<()> {
    let txns = load_transactions(config)?;
    let series = ledger::monthly_series(&txns, config.window_months, config.anchor);
    print_monthly(&series);
    Ok(())
}

fn cli_categories(config: &Config, all: bool) -> Result<()> {
    let txns = load_transactions(config)?;
    let by_category = if all {
        ledger::category_totals(&txns)
    } else {
        let filter =
            TransactionFilter::expenses().last_days(config.anchor, config.breakdown_days);
        ledger::category_totals(filter.apply(&txns))
    };

    if by_category.is_empty() {
        println!("No transactions in range");
        return Ok(());
    }
    for (name, amount) in &by_category {
        println!("  {:<24} {}", truncate(name, 24), format_amount(*amount));
    }
    Ok(())
}

fn cli_budgets(config: &Config) -> Result<()> {
    let txns = load_transactions(config)?;
    let budgets = load_budgets(config)?;
    if budgets.is_empty() {
        println!("No budgets");
        return Ok(());
    }

    println!(
        "{:<20} {:>12} {:>12} {:>6} {:>12}",
        "Category", "Spent", "Limit", "Used", "Remaining"
    );
    println!("{}", "─".repeat(66));
    for budget in &budgets {
        let usage = ledger::budget_usage(&txns, budget);
        println!(
            "{:<20} {:>12} {:>12} {:>6} {:>12}",
            truncate(&budget.category, 20),
            format_amount(usage.spent),
            format_amount(usage.limit),
            format_percent(usage.percentage),
            format_amount(usage.remaining),
        );
        if usage.is_exceeded() {
            println!("  ! exceeded by {}", format_amount(usage.overage));
        }
    }
    let overall = ledger::aggregate_budget_usage(&txns, &budgets);
    println!("{}", "─".repeat(66));
    println!(
        "{:<20} {:>12} {:>12} {:>6} {:>12}",
        "All budgets",
        format_amount(overall.spent),
        format_amount(overall.limit),
        format_percent(overall.percentage),
        format_amount(overall.remaining),
    );
    Ok(())
}

fn cli_categorize(config: &Config, args: &[String]) -> Result<()> {
    let text = config::positional(args).join(" ");
    if text.trim().is_empty() {
        anyhow::bail!("Usage: fintrack categorize <text...>");
    }
    let categorizer = load_categorizer(config)?;
    println!("{}", categorizer.categorize(&text));
    Ok(())
}

fn cli_news(config: &Config, args: &[String]) -> Result<()> {
    let path = match config::positional(args).first() {
        Some(file) => PathBuf::from(config::expand_home(file)),
        None => config.news_path(),
    };
    let items = CsvLoader::news(&path)?;
    let ranked = NewsClassifier::default().rank(items);
    if ranked.is_empty() {
        println!("No articles");
        return Ok(());
    }

    let now = chrono::Local::now().naive_local();
    for article in &ranked {
        let age = article
            .item
            .published_at
            .map(|p| relative_time(p, now))
            .unwrap_or_else(|| "Recently".to_string());
        println!(
            "[{:<13}] {:.2}  {}  ({}, {})",
            article.category,
            article.relevance,
            truncate(&article.item.title, 60),
            if article.item.source.is_empty() {
                "unknown source"
            } else {
                article.item.source.as_str()
            },
            age,
        );
        println!("                  {}", truncate(article.item.display_description(), 72));
    }
    Ok(())
}

// ── Output helpers ───────────────────────────────────────────

fn print_monthly(series: &[MonthlyTotal]) {
    println!(
        "{:<8} {:>14} {:>14} {:>14}",
        "Month", "Income", "Expenses", "Net"
    );
    for m in series {
        println!(
            "{:<8} {:>14} {:>14} {:>14}",
            m.month.to_string(),
            format_amount(m.income),
            format_amount(m.expense),
            format_amount(m.net),
        );
    }
}

fn print_usage_line(label: &str, usage: &BudgetUsage) {
    println!(
        "  {:<20} {} of {} ({}), {} left",
        truncate(label, 20),
        format_amount(usage.spent),
        format_amount(usage.limit),
        format_percent(usage.percentage),
        format_amount(usage.remaining),
    );
}
