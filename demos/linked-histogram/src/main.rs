mod chart;
mod data;
mod histogram;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use brushwork_highlight::HighlightConfig;
use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::Value;
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use crate::chart::LinkedChart;
use crate::data::DemoData;

/// Linked brushing between a monthly bar chart and a histogram of the
/// selected months
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// JSON file whose fields override the highlight configuration
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Seed for the generated data
    #[arg(long, global = true, default_value_t = 3)]
    seed: u64,

    /// Log interaction details
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a scripted session: highlight months, a random y range, clear,
    /// highlight everything, then brush and drag
    Session,

    /// Brush between two chart x pixel positions
    Brush {
        #[arg(long)]
        from: f64,

        #[arg(long)]
        to: f64,
    },
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "warn" }));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

/// Merge the fields of a JSON object over the default chart configuration
fn load_config(path: Option<&Path>) -> anyhow::Result<HighlightConfig> {
    let defaults = LinkedChart::default_config();
    let Some(path) = path else {
        return Ok(defaults);
    };

    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    let overrides: Value = serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse config file {}", path.display()))?;
    let Value::Object(overrides) = overrides else {
        anyhow::bail!("Config file {} must contain a JSON object", path.display());
    };

    let mut config = serde_json::to_value(&defaults)?;
    if let Value::Object(fields) = &mut config {
        fields.extend(overrides);
    }
    let config: HighlightConfig = serde_json::from_value(config)?;
    info!("Loaded highlight config from {}", path.display());
    Ok(config)
}

fn run_session(chart: &mut LinkedChart, rng: &mut StdRng) -> anyhow::Result<()> {
    println!("== initial\n{}", chart.report()?);

    for _ in 0..3 {
        let month = chart.highlight_next_month()?;
        println!("== highlight {month}\n{}", chart.report()?);
    }

    let area = chart.highlight_random_y_range(rng)?;
    println!(
        "== highlight random y range {:?}..{:?}\n{}",
        area.bottom,
        area.top,
        chart.report()?
    );

    chart.clear()?;
    println!("== clear highlight\n{}", chart.report()?);

    chart.highlight_everything()?;
    println!("== highlight everything\n{}", chart.report()?);

    let times = chart.data().times.clone();
    let (from, to) = (chart.pixel_for(times[2]) - 2.0, chart.pixel_for(times[5]) + 2.0);
    chart.gesture(from, to);
    println!("== brush {from:.1} -> {to:.1}\n{}", chart.report()?);

    let grab = (from + to) / 2.0;
    let month_width = chart.pixel_for(times[6]) - chart.pixel_for(times[5]);
    chart.gesture(grab, grab + month_width);
    println!(
        "== drag {grab:.1} -> {:.1}\n{}",
        grab + month_width,
        chart.report()?
    );
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut rng = StdRng::seed_from_u64(cli.seed);
    let data = DemoData::generate(&mut rng)?;
    let config = load_config(cli.config.as_deref())?;
    let mut chart = LinkedChart::new(data, config)?;

    match cli.command.unwrap_or(Commands::Session) {
        Commands::Session => run_session(&mut chart, &mut rng)?,
        Commands::Brush { from, to } => {
            chart.gesture(from, to);
            println!("{}", chart.report()?);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_config_merges_over_defaults() {
        let path = std::env::temp_dir().join("brushwork-demo-config-test.json");
        let mut file = fs::File::create(&path).unwrap();
        write!(file, r#"{{"enableY": true, "opacity": 0.5}}"#).unwrap();

        let config = load_config(Some(&path)).unwrap();
        assert!(config.enable_y);
        assert!(config.drag);
        assert_eq!(config.opacity, 0.5);
        assert_eq!(config.color, "#829AE3");
        assert_eq!(config.geometry.inner_width, 750.0);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_load_config_rejects_non_object() {
        let path = std::env::temp_dir().join("brushwork-demo-config-array.json");
        fs::write(&path, "[1, 2]").unwrap();
        assert!(load_config(Some(&path)).is_err());
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_cli_parses_brush() {
        let cli = Cli::parse_from(["linked-histogram", "brush", "--from", "100", "--to", "300"]);
        assert!(matches!(
            cli.command,
            Some(Commands::Brush { from, to }) if from == 100.0 && to == 300.0
        ));
        assert_eq!(cli.seed, 3);
    }
}
