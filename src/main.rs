mod argsets;
mod command;

use anyhow::{anyhow, Result};
use env_logger::Env;

use battery_alert::constants::{defaults, envvars};
use battery_alert::helpers::load_dotenv;
use battery_alert::Config;

const CMD_SERVE: &str = "serve";
const CMD_CHECK: &str = "check";

enum Cmd {
    Serve,
    Check(argsets::CheckArgs),
}

fn parse_args() -> Result<Cmd> {
    let mut args = pico_args::Arguments::from_env();
    let cmd = match args.subcommand()?.as_deref() {
        None | Some(CMD_SERVE) => Cmd::Serve,
        Some(CMD_CHECK) => Cmd::Check(argsets::CheckArgs {
            dry_run: args.contains("--dry-run"),
        }),
        Some(other) => {
            return Err(anyhow!(
                "Unknown subcommand '{other}'; must be one of 'serve', 'check'"
            ))
        }
    };
    let rest = args.finish();
    if !rest.is_empty() {
        return Err(anyhow!("Unexpected arguments: {rest:?}"));
    }
    Ok(cmd)
}

fn main() -> Result<()> {
    load_dotenv();
    env_logger::Builder::from_env(Env::default().filter_or(envvars::LOG_LEVEL, defaults::LOG_LEVEL))
        .init();

    let cmd = parse_args()?;
    let config = Config::from_env()?;
    log::debug!("Loaded {config:?}");

    match cmd {
        Cmd::Serve => command::serve(config),
        Cmd::Check(args) => command::check(&config, args),
    }
}
