use pse_cli::{cli, logging, run};

fn main() {
    let matches = cli().get_matches();

    let level = matches
        .get_one::<String>("log-level")
        .map_or("warn", String::as_str);
    logging::init_tracing(level, matches.get_flag("log-json"));

    match run(&matches) {
        Ok(report) => println!("{report}"),
        Err(err) => {
            eprintln!("error: {err:#}");
            std::process::exit(1);
        }
    }
}
