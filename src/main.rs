use cambio::currencies::CURRENCIES;
use cambio::{config, convert, CurrencyContext, HttpRateSource, RateCache, RateFetcher};
use clap::{Parser, Subcommand};
use dotenv::dotenv;
use std::process;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "cambio", about = "Currency conversion against cached exchange rates")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Convert an amount between two currencies
    Convert {
        amount: f64,
        from: String,
        to: String,
    },
    /// List all rates for a base currency (default: the selected currency)
    List { base: Option<String> },
    /// Show the supported currency set
    Currencies,
    /// Select the display currency (persisted across runs)
    Use { code: String },
    /// Force a rate refresh for the selected currency
    Refresh,
}

#[tokio::main]
async fn main() {
    dotenv().ok();
    env_logger::init();

    let source = match HttpRateSource::from_env() {
        Ok(source) => source,
        Err(e) => {
            eprintln!("Failed to build rate client: {}", e);
            process::exit(1);
        }
    };
    let fetcher = RateFetcher::new(Arc::new(source), RateCache::new(config::cache_file()));

    let cli = Cli::parse();
    match cli.command {
        Command::Convert { amount, from, to } => {
            let from = from.to_uppercase();
            let to = to.to_uppercase();
            // Fetch with the source currency as base so the direct rate
            // applies and cross-multiplication is only needed for display.
            let result = fetcher.fetch_rates(&from).await;
            report_fetch(result.error.as_ref().map(|e| e.to_string()), result.stale);
            let converted = convert(amount, &from, &to, &result.snapshot);
            println!("{} {} is {:.2} {}", amount, from, converted, to);
        }
        Command::List { base } => {
            let ctx = CurrencyContext::new(fetcher, config::prefs_file());
            let base = base
                .unwrap_or_else(|| ctx.currency().code.to_string())
                .to_uppercase();
            let result = ctx.fetcher().fetch_rates(&base).await;
            report_fetch(result.error.as_ref().map(|e| e.to_string()), result.stale);
            if result.snapshot.is_empty() {
                process::exit(1);
            }
            println!("Exchange rates for {}:", base);
            let mut entries: Vec<_> = result.snapshot.rates.iter().collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));
            for (code, rate) in entries {
                println!("{}: {}", code, rate);
            }
        }
        Command::Currencies => {
            for c in CURRENCIES {
                println!("{}  {:4} {}", c.code, c.symbol, c.name);
            }
        }
        Command::Use { code } => {
            let mut ctx = CurrencyContext::new(fetcher, config::prefs_file());
            let before = ctx.currency().code;
            ctx.set_currency(&code).await;
            if ctx.currency().code == before && !code.eq_ignore_ascii_case(before) {
                eprintln!("Unknown currency: {}", code);
                process::exit(1);
            }
            println!("Display currency set to {}", ctx.currency().code);
        }
        Command::Refresh => {
            let mut ctx = CurrencyContext::new(fetcher, config::prefs_file());
            ctx.refresh().await;
            match ctx.error() {
                Some(e) => {
                    eprintln!("Refresh failed: {}", e);
                    process::exit(1);
                }
                None => println!(
                    "Fetched {} rates for {}",
                    ctx.snapshot().rates.len(),
                    ctx.currency().code
                ),
            }
        }
    }
}

fn report_fetch(error: Option<String>, stale: bool) {
    if let Some(e) = error {
        if stale {
            eprintln!("Warning: rate fetch failed, using cached rates: {}", e);
        } else {
            eprintln!("Error fetching exchange rates: {}", e);
        }
    }
}
