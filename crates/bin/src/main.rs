//! Fairvalue CLI binary.
//!
//! Reconstructs statements from SEC company-facts documents and values the
//! company with every registered method.

use clap::{Parser, Subcommand};
use fairvalue::data::{FactMap, JsonFileFactSource, JsonFileQuoteSource, Quote};
use fairvalue::statements::{
    ConceptTable, FinancialStatements, ReconstructionConfig, StatementKind, reconstruct,
};
use fairvalue::valuation::{
    ComprehensiveValuation, ManualOverrides, ValuationCategory, ValuationConfig, ValuationEngine,
    available_methods,
};
use fairvalue::{Analysis, Analyzer};
use serde_json::json;
use std::path::{Path, PathBuf};
use std::process;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "fairvalue")]
#[command(about = "Fairvalue: intrinsic value from reported financial facts", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Reconstruct statements from a company-facts file
    Statements {
        /// Company-facts JSON file
        facts: PathBuf,

        /// Statement to print (income, balance or cash-flow); all when omitted
        #[arg(long)]
        kind: Option<String>,

        /// Fiscal-year-end month (1-12); inferred when omitted
        #[arg(long)]
        fiscal_year_end_month: Option<u32>,
    },

    /// Value a company from its company-facts file
    Value {
        /// Company-facts JSON file
        facts: PathBuf,

        /// Current share price
        #[arg(long)]
        price: f64,

        /// Shares outstanding
        #[arg(long)]
        shares: f64,

        /// Current P/E ratio
        #[arg(long)]
        pe: Option<f64>,

        /// Valuation configuration JSON file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Fiscal-year-end month (1-12); inferred when omitted
        #[arg(long)]
        fiscal_year_end_month: Option<u32>,

        /// Operating cash flow, used when not reported
        #[arg(long)]
        operating_cashflow: Option<f64>,

        /// Shareholder equity, used when not reported
        #[arg(long)]
        shareholder_equity: Option<f64>,

        /// Current PEG ratio
        #[arg(long)]
        peg_ratio: Option<f64>,

        /// Earnings growth as a fraction (0.12 = 12%)
        #[arg(long)]
        earnings_growth: Option<f64>,

        /// Output format (json or text)
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Analyze several symbols from a facts directory and a quotes file
    Batch {
        /// Directory holding {SYMBOL}.json company-facts files
        #[arg(long)]
        facts_dir: PathBuf,

        /// JSON object mapping symbol to quote
        #[arg(long)]
        quotes: PathBuf,

        /// Valuation configuration JSON file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Output format (json or text)
        #[arg(long, default_value = "text")]
        format: String,

        /// Symbols to analyze
        #[arg(required = true)]
        symbols: Vec<String>,
    },

    /// List the valuation methods
    Methods {
        /// Output format (json or text)
        #[arg(long, default_value = "text")]
        format: String,
    },
}

#[tokio::main]
async fn main() {
    init_tracing();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Logs go to stderr so JSON on stdout stays machine readable.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("fairvalue=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Statements {
            facts,
            kind,
            fiscal_year_end_month,
        } => {
            print_statements(&facts, kind.as_deref(), fiscal_year_end_month).await?;
        }
        Commands::Value {
            facts,
            price,
            shares,
            pe,
            config,
            fiscal_year_end_month,
            operating_cashflow,
            shareholder_equity,
            peg_ratio,
            earnings_growth,
            format,
        } => {
            let overrides = ManualOverrides {
                operating_cash_flow: operating_cashflow,
                shareholder_equity,
                peg_ratio,
                earnings_growth,
            };
            let mut quote = Quote::new(symbol_from_path(&facts), price, shares);
            if let Some(pe) = pe {
                quote = quote.with_pe_ratio(pe);
            }
            value_company(
                &facts,
                quote,
                config.as_deref(),
                fiscal_year_end_month,
                &overrides,
                &format,
            )
            .await?;
        }
        Commands::Batch {
            facts_dir,
            quotes,
            config,
            format,
            symbols,
        } => {
            batch(facts_dir, quotes, config.as_deref(), &symbols, &format).await?;
        }
        Commands::Methods { format } => {
            list_methods(&format)?;
        }
    }

    Ok(())
}

fn symbol_from_path(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().to_uppercase())
        .unwrap_or_default()
}

async fn load_facts(path: &Path) -> Result<FactMap, Box<dyn std::error::Error>> {
    let json = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
    Ok(FactMap::from_company_facts_json(&json)?)
}

async fn load_valuation_config(path: Option<&Path>) -> Result<ValuationConfig, Box<dyn std::error::Error>> {
    match path {
        Some(path) => {
            let json = tokio::fs::read_to_string(path)
                .await
                .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
            Ok(ValuationConfig::from_json(&json)?)
        }
        None => Ok(ValuationConfig::default()),
    }
}

fn reconstruction_config(fiscal_year_end_month: Option<u32>) -> ReconstructionConfig {
    let config = ReconstructionConfig::default();
    match fiscal_year_end_month {
        Some(month) => config.with_fiscal_year_end_month(month),
        None => config,
    }
}

fn parse_kind(name: &str) -> Result<StatementKind, Box<dyn std::error::Error>> {
    match name.to_lowercase().as_str() {
        "income" => Ok(StatementKind::Income),
        "balance" => Ok(StatementKind::Balance),
        "cash-flow" | "cashflow" | "cash_flow" => Ok(StatementKind::CashFlow),
        _ => Err(format!("Unknown statement kind: {} (expected income, balance or cash-flow)", name).into()),
    }
}

async fn print_statements(
    path: &Path,
    kind: Option<&str>,
    fiscal_year_end_month: Option<u32>,
) -> Result<(), Box<dyn std::error::Error>> {
    let kind = kind.map(parse_kind).transpose()?;
    let facts = load_facts(path).await?;
    let statements = reconstruct(
        &facts,
        &reconstruction_config(fiscal_year_end_month),
        &ConceptTable::standard(),
    )?;

    let output = match kind {
        Some(kind) => serde_json::to_string_pretty(statements.get(kind))?,
        None => serde_json::to_string_pretty(&statements)?,
    };
    println!("{}", output);
    Ok(())
}

async fn value_company(
    path: &Path,
    quote: Quote,
    config: Option<&Path>,
    fiscal_year_end_month: Option<u32>,
    overrides: &ManualOverrides,
    format: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let engine = ValuationEngine::new(load_valuation_config(config).await?)?;
    let facts = load_facts(path).await?;
    let statements = reconstruct(
        &facts,
        &reconstruction_config(fiscal_year_end_month),
        &ConceptTable::standard(),
    )?;

    let valuation = engine.value(&statements, &quote, overrides);
    let category = engine.categorize(&valuation);

    let is_json = format.to_lowercase() == "json";
    if is_json {
        let output = json!({
            "symbol": quote.symbol,
            "valuation": valuation,
            "category": category,
            "warnings": statements.warnings().collect::<Vec<_>>(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        output_valuation_text(&quote.symbol, &statements, &valuation, category.as_ref());
    }
    Ok(())
}

fn output_valuation_text(
    symbol: &str,
    statements: &FinancialStatements,
    valuation: &ComprehensiveValuation,
    category: Option<&ValuationCategory>,
) {
    println!("\n╔══════════════════════════════════════════════════════════════╗");
    println!("║{:^62}║", format!("INTRINSIC VALUE: {}", symbol));
    println!("╚══════════════════════════════════════════════════════════════╝\n");

    println!(
        "Statements: {} annual / {} quarterly income periods, FYE month {}",
        statements.income.annual.len(),
        statements.income.quarterly.len(),
        statements.fiscal_year_end_month
    );
    let warnings: Vec<_> = statements.warnings().collect();
    if !warnings.is_empty() {
        println!("Data quality warnings:");
        for warning in warnings {
            println!("  ! {}", warning);
        }
    }
    println!();

    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("{:<32} {:>12} {:>10}  Note", "Method", "Value", "Confidence");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    for result in &valuation.valuations {
        println!(
            "{:<32} {:>12.2} {:>10}  {}",
            result.method.to_string(),
            result.value,
            result.confidence.to_string(),
            result.missing_data.as_deref().unwrap_or("")
        );
    }
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n");

    println!("Current price:   {:>12.2}", valuation.current_price);
    println!("Fair value:      {:>12.2}", valuation.average_intrinsic_value);
    println!("Upside:          {:>11.1}%", valuation.upside_percent);
    println!("Recommendation:  {:>12}", valuation.recommendation.to_string());
    match category {
        Some(category) => println!(
            "Category:        {} ({:+.1}% vs fair value, {} confidence)",
            category.level, category.discount_premium_percent, category.confidence
        ),
        None => println!("Category:        n/a (no positive fair value)"),
    }
    println!();
}

async fn batch(
    facts_dir: PathBuf,
    quotes: PathBuf,
    config: Option<&Path>,
    symbols: &[String],
    format: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let analyzer = Analyzer::with_config(
        JsonFileFactSource::new(facts_dir),
        JsonFileQuoteSource::new(quotes),
        ReconstructionConfig::default(),
        load_valuation_config(config).await?,
    )?;

    info!(symbols = symbols.len(), "analyzing batch");
    let results = analyzer.analyze_many(symbols).await;

    let is_json = format.to_lowercase() == "json";
    if is_json {
        let output: Vec<_> = symbols
            .iter()
            .zip(&results)
            .map(|(symbol, result)| match result {
                Ok(analysis) => json!({
                    "symbol": analysis.symbol,
                    "valuation": analysis.valuation,
                    "category": analysis.category,
                }),
                Err(e) => json!({ "symbol": symbol, "error": e.to_string() }),
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("\n╔══════════════════════════════════════════════════════════════╗");
        println!("║{:^62}║", "BATCH VALUATION");
        println!("╚══════════════════════════════════════════════════════════════╝\n");
        println!(
            "{:<8} {:>10} {:>12} {:>9}  {:<12} Category",
            "Symbol", "Price", "Fair Value", "Upside", "Call"
        );
        println!("─────────────────────────────────────────────────────────────────");
        for (symbol, result) in symbols.iter().zip(&results) {
            match result {
                Ok(analysis) => print_batch_row(analysis),
                Err(e) => println!("{:<8} error: {}", symbol.to_uppercase(), e),
            }
        }
        println!();
    }
    Ok(())
}

fn print_batch_row(analysis: &Analysis) {
    let valuation = &analysis.valuation;
    let level = analysis
        .category
        .as_ref()
        .map_or_else(|| "n/a".to_string(), |c| c.level.to_string());
    let note = if analysis.quote_unavailable() { "  (no quote)" } else { "" };
    println!(
        "{:<8} {:>10.2} {:>12.2} {:>8.1}%  {:<12} {}{}",
        analysis.symbol,
        valuation.current_price,
        valuation.average_intrinsic_value,
        valuation.upside_percent,
        valuation.recommendation.to_string(),
        level,
        note
    );
}

fn list_methods(format: &str) -> Result<(), Box<dyn std::error::Error>> {
    let methods = available_methods();

    if format.to_lowercase() == "json" {
        println!("{}", serde_json::to_string_pretty(&methods)?);
        return Ok(());
    }

    println!("Valuation methods:\n");
    for info in methods {
        println!("{:<32} [{}] {}", info.name, info.base_confidence, info.description);
        println!("{:<32} needs: {}", "", info.required_inputs.join(", "));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_kind() {
        assert_eq!(parse_kind("income").unwrap(), StatementKind::Income);
        assert_eq!(parse_kind("Cash-Flow").unwrap(), StatementKind::CashFlow);
        assert!(parse_kind("equity").is_err());
    }

    #[test]
    fn test_symbol_from_path() {
        assert_eq!(symbol_from_path(Path::new("/data/facts/aapl.json")), "AAPL");
    }

    #[test]
    fn test_cli_parses_value_overrides() {
        let cli = Cli::try_parse_from([
            "fairvalue",
            "value",
            "acme.json",
            "--price",
            "10",
            "--shares",
            "1000",
            "--peg-ratio",
            "1.5",
        ])
        .unwrap();
        match cli.command {
            Commands::Value { peg_ratio, format, .. } => {
                assert_eq!(peg_ratio, Some(1.5));
                assert_eq!(format, "text");
            }
            _ => panic!("expected value command"),
        }
    }
}
