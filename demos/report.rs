use abreport::{api::error::GetError, backend::rest::Server, report::store::PromoteError, ReportStore};
use anyhow::Result;

struct Args {
    server: String,
    experiment: String,
    promote: Option<String>,
}

impl Args {
    pub fn from_env() -> Result<Self> {
        let mut args = pico_args::Arguments::from_env();
        Ok(Args {
            server: args
                .opt_value_from_str(["-s", "--server"])?
                .unwrap_or_else(|| "http://127.0.0.1:8080/api/v1".to_string()),
            experiment: args.value_from_str(["-e", "--experiment"])?,
            promote: args.opt_value_from_str(["-p", "--promote"])?,
        })
    }
}

fn main() -> Result<()> {
    let args = Args::from_env()?;
    let mut client = Server::new(&args.server);
    let mut store = ReportStore::new();

    match store.load(&mut client, &args.experiment.as_str().into()) {
        Ok(()) => {}
        Err(GetError::DoesNotExist(id)) => {
            println!("The experiment {} does not exist.", id);
            return Ok(());
        }
        Err(GetError::Storage(err)) => {
            println!("Failed to load the report:\n {}", err);
            return Ok(());
        }
    }

    let vm = store.view_model();
    if let Some(summary) = &vm.summary {
        println!("[{}] {}", summary.icon, summary.legend);
    }
    if !vm.has_enough_sessions {
        println!("No sessions have been recorded yet.");
    }
    for row in &vm.detail {
        let marker = if row.is_winner { " <- winner" } else { "" };
        println!(
            "{:>12}: {:>5} sessions, {:>5} clicks, improvement {:+.1}%{}",
            row.name,
            row.sessions,
            row.clicks,
            row.improvement * 100.0,
            marker
        );
    }
    if let Some(chart) = &vm.chart {
        println!(
            "{} series over {} days",
            chart.series.len(),
            chart.labels.len()
        );
    }

    if let Some(variant) = args.promote {
        match store.promote(&mut client, &variant.as_str().into()) {
            Ok(()) => println!(
                "Promoted {} on experiment {}.",
                variant,
                store.experiment().map(|e| e.name.as_str()).unwrap_or("?")
            ),
            Err(PromoteError::InFlight) => {
                println!("A promotion is already in flight.");
            }
            Err(PromoteError::NoExperiment) => {
                println!("Load an experiment before promoting a variant.");
            }
            Err(PromoteError::Request(err)) => {
                println!("Failed to promote {}:\n {}", variant, err);
            }
        }
    }

    Ok(())
}
