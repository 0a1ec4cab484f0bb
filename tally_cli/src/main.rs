//! # Tally CLI Application
//!
//! Renders a dashboard context in the terminal: the category breakdown as a
//! bar table, the asset/debt trend month by month, and the settlement
//! shortcuts. Useful for checking a context document without launching the
//! GUI.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::info;

use tally_core::breakdown::BreakdownView;
use tally_core::context::{load_context, DashboardContext, SettleDirection};
use tally_core::errors::TallyResult;
use tally_core::money::format_currency;
use tally_core::port::RenderPort;
use tally_core::presenter::{ChartPresenter, Outcome};
use tally_core::toast::Severity;
use tally_core::trend::TrendView;

const RULE: &str = "══════════════════════════════════════════════";

#[derive(Parser)]
#[command(
    name = "tally",
    version,
    about = "Render a finance dashboard context in the terminal"
)]
struct Args {
    /// Context document to render (JSON). Sample data when omitted.
    context: Option<PathBuf>,

    /// Print the sanitized context as JSON after the tables
    #[arg(long)]
    json: bool,
}

/// Terminal render surface. Notifications go to stderr so the tables stay
/// pipeable.
struct TextSurface {
    symbol: String,
}

impl RenderPort for TextSurface {
    fn render_donut(&mut self, view: &BreakdownView) -> TallyResult<()> {
        println!("{RULE}");
        println!("  SPENDING BY CATEGORY");
        println!("{RULE}");
        match view {
            BreakdownView::Placeholder(message) => println!("  {message}"),
            BreakdownView::Chart {
                slices,
                formatted_total,
                ..
            } => {
                for slice in slices {
                    let bar = "█".repeat((slice.percent / 4.0).round() as usize);
                    println!(
                        "  {:<14} {:>12}  {:>5.1}%  {}",
                        slice.name, slice.formatted_amount, slice.percent, bar
                    );
                }
                println!();
                println!("  Total: {formatted_total}");
            }
        }
        println!();
        Ok(())
    }

    fn render_line_series(&mut self, view: &TrendView) -> TallyResult<()> {
        println!("{RULE}");
        println!("  ASSETS VS DEBTS");
        println!("{RULE}");
        match view {
            TrendView::Placeholder(message) => println!("  {message}"),
            TrendView::Chart { points, footer, .. } => {
                for point in points {
                    println!(
                        "  {:<6} assets {:>12}   debts {:>12}",
                        point.month, point.asset_label, point.debt_label
                    );
                }
                if let Some(footer) = footer {
                    let latest = points.last().map(|p| p.asset).unwrap_or(0.0);
                    println!();
                    println!("  {}", footer.label_for(latest, &self.symbol));
                }
            }
        }
        println!();
        Ok(())
    }

    fn show_notification(&mut self, message: &str, severity: Severity) -> TallyResult<()> {
        eprintln!("[{}] {}", severity.label().to_uppercase(), message);
        Ok(())
    }
}

fn print_settlements(context: &DashboardContext) {
    if context.settlements.is_empty() {
        return;
    }
    println!("{RULE}");
    println!("  SETTLE UP");
    println!("{RULE}");
    for shortcut in &context.settlements {
        let amount = format_currency(shortcut.amount, &context.base_currency_symbol, 2);
        match shortcut.direction {
            SettleDirection::CounterpartyOwes => {
                println!("  {} owes you {}", shortcut.counterparty, amount);
            }
            SettleDirection::UserOwes => {
                println!("  You owe {} {}", shortcut.counterparty, amount);
            }
        }
    }
    println!();
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let context = match &args.context {
        Some(path) => match load_context(path) {
            Ok(context) => {
                info!(path = %path.display(), "context loaded");
                context
            }
            Err(e) => {
                eprintln!("Error: {e}");
                if let Ok(json) = serde_json::to_string_pretty(&e) {
                    eprintln!();
                    eprintln!("Error JSON:");
                    eprintln!("{json}");
                }
                return ExitCode::FAILURE;
            }
        },
        None => DashboardContext::sample(),
    };

    let presenter = ChartPresenter::from_context(&context);
    let mut surface = TextSurface {
        symbol: context.base_currency_symbol.clone(),
    };

    let (breakdown, trend) = presenter.present_context(&context, &mut surface);
    print_settlements(&context);

    if breakdown == Outcome::Placeholder || trend == Outcome::Placeholder {
        let _ = presenter.notify(
            "Some sections had no data to chart",
            Severity::Info,
            &mut surface,
        );
    }

    if args.json {
        if let Ok(json) = serde_json::to_string_pretty(&context) {
            println!("Context JSON:");
            println!("{json}");
        }
    }

    ExitCode::SUCCESS
}
