use clap::Parser;
use prsu::{escalate, ident, shell, Config, Error, EXIT_PERMISSION_DENIED};
use std::process;

fn main() {
    let config = Config::parse();

    let _guard = match prsu_log::sync_logger("prsu", config.debug) {
        Ok(guard) => guard,
        Err(err) => {
            eprintln!("prsu: failed to set up logging: {}", err);
            process::exit(EXIT_PERMISSION_DENIED);
        }
    };

    // All policy lives below main; this is the only place a result
    // turns into a process exit code.
    if let Err(err) = run(&config) {
        eprintln!("prsu: {}", err);
        process::exit(err.exit_code());
    }
}

fn run(config: &Config) -> Result<(), Error> {
    escalate::escalate(config)?;
    let user = ident::switch(&config.user)?;
    shell::exec(config, &user)
}
