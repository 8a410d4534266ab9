use std::path::PathBuf;

use clap::{Arg, Command};

use benchplot::data::matcher::Variant;
use benchplot::pipeline::{self, Config};

fn main() {
    env_logger::init();

    let matches = Command::new("benchplot")
        .about("Builds charts from parallel merge sort benchmark logs")
        .arg(
            Arg::new("log")
                .value_name("LOG")
                .required(true)
                .help("Path to the benchmark log file"),
        )
        .arg(
            Arg::new("output")
                .value_name("DIR_OR_PREFIX")
                .help("Output directory, or dir/prefix to prefix chart filenames"),
        )
        .arg(
            Arg::new("variant")
                .long("variant")
                .value_name("VARIANT")
                .value_parser(["threads", "depth", "threshold"])
                .default_value("threads")
                .help("Which dimension the log sweeps"),
        )
        .arg(
            Arg::new("export-table")
                .long("export-table")
                .value_name("PATH")
                .help("Also write the parsed table as columnar JSON"),
        )
        .get_matches();

    let variant = matches
        .get_one::<String>("variant")
        .and_then(|name| Variant::from_name(name))
        .unwrap_or(Variant::Threads);

    let cfg = Config {
        variant,
        log_path: matches
            .get_one::<String>("log")
            .map(PathBuf::from)
            .unwrap_or_default(),
        output: matches.get_one::<String>("output").cloned(),
        export_table: matches.get_one::<String>("export-table").map(PathBuf::from),
    };

    // All failures surface here as one user-facing line; missing input
    // files are reported inside the pipeline and are not failures.
    if let Err(err) = pipeline::run(&cfg) {
        eprintln!("Error: {:#}", err);
    }
}
