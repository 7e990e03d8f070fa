use anyhow::Context;
use clap::Parser;
use log::{error, info};
use magnum_opus::session::{self, Session};
use magnum_opus::transport::{Process, Remote};
use magnum_opus::{Error, Solver, SystemClock, Transport};
use std::path::PathBuf;

/// Plays the magnum opus sudoku rounds and drops into an interactive session afterwards.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Challenge program to spawn locally
    #[arg(long, default_value = "./magnum_opus.py")]
    process: PathBuf,

    /// Arguments passed to the local challenge
    #[arg(last = true)]
    process_args: Vec<String>,

    /// Hosted challenge to connect to over TLS instead, e.g. magnum-opus.chals.sekai.team:1337
    #[arg(long, value_name = "HOST:PORT", value_parser = parse_endpoint)]
    remote: Option<Endpoint>,

    /// Number of puzzles to answer
    #[arg(long, default_value_t = session::ROUNDS)]
    rounds: usize,
}

#[derive(Clone, Debug)]
struct Endpoint {
    host: String,
    port: u16,
}

fn parse_endpoint(s: &str) -> Result<Endpoint, String> {
    let (host, port) = s
        .rsplit_once(':')
        .ok_or_else(|| format!("expected HOST:PORT, got `{}`", s))?;
    if host.is_empty() {
        return Err(format!("missing host in `{}`", s));
    }
    let port = port
        .parse()
        .map_err(|err| format!("invalid port `{}`: {}", port, err))?;
    Ok(Endpoint {
        host: host.to_owned(),
        port,
    })
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    match &args.remote {
        Some(Endpoint { host, port }) => {
            let remote = Remote::connect(host, *port)
                .with_context(|| format!("failed to connect to {}:{}", host, port))?;
            play(remote, args.rounds)
        }
        None => {
            let process = Process::spawn(&args.process, &args.process_args)
                .with_context(|| format!("failed to start {}", args.process.display()))?;
            play(process, args.rounds)
        }
    }
}

fn play<T: Transport>(transport: T, rounds: usize) -> anyhow::Result<()> {
    let mut session = Session::new(transport, Solver, SystemClock).with_rounds(rounds);
    match session.run() {
        Ok(report) => info!("all {} answers accepted so far", report.rounds.len()),
        Err(Error::Rejected { round, .. }) => error!("Wrong answer (round {})", round),
        Err(err) => return Err(err).context("session aborted"),
    }
    session
        .into_transport()
        .interactive()
        .context("interactive session failed")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_parsing() {
        let endpoint = parse_endpoint("magnum-opus.chals.sekai.team:1337").unwrap();
        assert_eq!(endpoint.host, "magnum-opus.chals.sekai.team");
        assert_eq!(endpoint.port, 1337);
        assert!(parse_endpoint("localhost").is_err());
        assert!(parse_endpoint(":1337").is_err());
        assert!(parse_endpoint("localhost:http").is_err());
    }

    #[test]
    fn defaults() {
        let args = Args::try_parse_from(&["magnum-opus"]).unwrap();
        assert_eq!(args.process, PathBuf::from("./magnum_opus.py"));
        assert!(args.process_args.is_empty());
        assert!(args.remote.is_none());
        assert_eq!(args.rounds, 10);

        let args =
            Args::try_parse_from(&["magnum-opus", "--rounds", "3", "--", "python3", "-u"]).unwrap();
        assert_eq!(args.rounds, 3);
        assert_eq!(args.process_args, ["python3", "-u"]);
    }
}
