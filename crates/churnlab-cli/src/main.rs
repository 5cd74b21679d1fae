use std::path::PathBuf;

use anyhow::Result;
use clap::{Arg, ArgAction, ArgMatches, Command, ValueHint};
use log::LevelFilter;

use churnlab::config::PipelineConfig;
use churnlab::pipeline;
use churnlab::simulation;
use churnlab_cli::{load_pipeline_config, print_console_report, write_artifacts};

use rand::rngs::StdRng;
use rand::SeedableRng;

fn main() -> Result<()> {
    env_logger::Builder::default()
        .filter_level(LevelFilter::Error)
        .parse_env(env_logger::Env::default().filter_or("CHURNLAB_LOG", "error,churnlab=info"))
        .init();

    let matches = Command::new("churnlab")
        .version(clap::crate_version!())
        .about("Synthetic subscription-churn simulation and model evaluation")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("run")
                .about("Run the full pipeline: simulate, train both models, evaluate")
                .arg(
                    Arg::new("config")
                        .short('c')
                        .long("config")
                        .help("Path to a pipeline JSON configuration file")
                        .value_parser(clap::value_parser!(PathBuf))
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("customers")
                        .short('n')
                        .long("customers")
                        .help("Population size. Overrides the configuration file.")
                        .value_parser(clap::value_parser!(usize)),
                )
                .arg(
                    Arg::new("seed")
                        .short('s')
                        .long("seed")
                        .help("Random seed. Overrides the configuration file.")
                        .value_parser(clap::value_parser!(u64)),
                )
                .arg(
                    Arg::new("test_fraction")
                        .long("test-fraction")
                        .help("Held-out fraction in (0, 1). Overrides the configuration file.")
                        .value_parser(clap::value_parser!(f64)),
                )
                .arg(
                    Arg::new("output_dir")
                        .short('o')
                        .long("output-dir")
                        .help("Directory for plot and report artifacts")
                        .default_value("plots")
                        .value_parser(clap::value_parser!(PathBuf))
                        .value_hint(ValueHint::DirPath),
                )
                .arg(
                    Arg::new("no_report")
                        .long("no-report")
                        .help("Disable HTML report generation.")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("simulate")
                .about("Generate a synthetic population and write it to CSV")
                .arg(
                    Arg::new("customers")
                        .short('n')
                        .long("customers")
                        .help("Population size")
                        .default_value("1000")
                        .value_parser(clap::value_parser!(usize)),
                )
                .arg(
                    Arg::new("seed")
                        .short('s')
                        .long("seed")
                        .help("Random seed")
                        .default_value("42")
                        .value_parser(clap::value_parser!(u64)),
                )
                .arg(
                    Arg::new("output_file")
                        .short('o')
                        .long("output")
                        .help("Path of the CSV file to write")
                        .default_value("population.csv")
                        .value_parser(clap::value_parser!(PathBuf))
                        .value_hint(ValueHint::FilePath),
                ),
        )
        .get_matches();

    match matches.subcommand() {
        Some(("run", sub_m)) => handle_run(sub_m),
        Some(("simulate", sub_m)) => handle_simulate(sub_m),
        _ => unreachable!("Subcommand is required by CLI configuration"),
    }
}

fn handle_run(matches: &ArgMatches) -> Result<()> {
    let mut config = if let Some(config_path) = matches.get_one::<PathBuf>("config") {
        log::info!("[churnlab] Using config: {:?}", config_path);
        load_pipeline_config(config_path)?
    } else {
        PipelineConfig::default()
    };

    if let Some(&n) = matches.get_one::<usize>("customers") {
        config.n_customers = n;
    }
    if let Some(&seed) = matches.get_one::<u64>("seed") {
        config.seed = seed;
    }
    if let Some(&fraction) = matches.get_one::<f64>("test_fraction") {
        config.test_fraction = fraction;
    }

    let run = match pipeline::run(&config) {
        Ok(run) => run,
        Err(e) => {
            log::error!("Pipeline failed: {:#}", e);
            std::process::exit(1)
        }
    };

    print_console_report(&run);

    let output_dir: &PathBuf = matches.get_one("output_dir").unwrap();
    let written = write_artifacts(&run, output_dir, !matches.get_flag("no_report"))?;
    for path in &written {
        eprintln!("[churnlab] Wrote {}", path.display());
    }

    Ok(())
}

fn handle_simulate(matches: &ArgMatches) -> Result<()> {
    let n: usize = *matches.get_one("customers").unwrap();
    let seed: u64 = *matches.get_one("seed").unwrap();
    let output: &PathBuf = matches.get_one("output_file").unwrap();

    let mut rng = StdRng::seed_from_u64(seed);
    let records = match simulation::generate(n, &mut rng) {
        Ok(records) => records,
        Err(e) => {
            log::error!("Simulation failed: {:#}", e);
            std::process::exit(1)
        }
    };

    churnlab::io::write_population_csv(output, &records)?;
    eprintln!("[churnlab] Wrote {} customers to {}", n, output.display());
    Ok(())
}
