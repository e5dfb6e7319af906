//! Writes the control points of one patch to a JSON file.
//!
//! Usage:
//! ```text
//! cargo run                                   # curtain preset -> control_points.txt
//! cargo run -- chair                          # chair preset
//! cargo run -- curtain --seed 7 --output out.json
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use drapery::sink::DEFAULT_OUTPUT;
use drapery::{JsonFileSink, Patch, PatchKind, PointSink};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{error, info};

#[derive(Debug)]
struct Args {
    kind: PatchKind,
    seed: Option<u64>,
    output: PathBuf,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Args, String> {
    let mut parsed = Args {
        kind: PatchKind::default(),
        seed: None,
        output: PathBuf::from(DEFAULT_OUTPUT),
    };
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--seed" => {
                let value = args.next().ok_or("--seed requires a value")?;
                let seed = value
                    .parse::<u64>()
                    .map_err(|e| format!("invalid seed `{value}`: {e}"))?;
                parsed.seed = Some(seed);
            }
            "--output" | "-o" => {
                parsed.output = args.next().ok_or("--output requires a path")?.into();
            }
            other => parsed.kind = other.parse::<PatchKind>().map_err(|e| e.to_string())?,
        }
    }
    Ok(parsed)
}

fn main() -> ExitCode {
    // Default: WARN for everything, INFO for drapery.
    // Override with RUST_LOG env var (e.g. RUST_LOG=drapery=debug).
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("drapery=info".parse().unwrap_or_default());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let args = match parse_args(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(message) => {
            error!("{message}");
            return ExitCode::FAILURE;
        }
    };

    let patch = Patch::preset(args.kind);
    info!(kind = %args.kind, seed = ?args.seed, "generating patch");
    let points = match args.seed {
        Some(seed) => patch.generate(&mut StdRng::seed_from_u64(seed)),
        None => patch.generate(&mut rand::rng()),
    };

    let mut sink = JsonFileSink::new(args.output);
    if let Err(e) = sink.write(&points) {
        error!("{e}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Result<Args, String> {
        parse_args(list.iter().map(|s| (*s).to_owned()))
    }

    #[test]
    fn defaults_to_curtain() {
        let parsed = args(&[]).unwrap();
        assert_eq!(parsed.kind, PatchKind::Curtain);
        assert_eq!(parsed.seed, None);
        assert_eq!(parsed.output, PathBuf::from("control_points.txt"));
    }

    #[test]
    fn selects_chair_with_options() {
        let parsed = args(&["chair", "--seed", "9", "-o", "out.json"]).unwrap();
        assert_eq!(parsed.kind, PatchKind::Chair);
        assert_eq!(parsed.seed, Some(9));
        assert_eq!(parsed.output, PathBuf::from("out.json"));
    }

    #[test]
    fn rejects_bad_input() {
        assert!(args(&["table"]).is_err());
        assert!(args(&["--seed"]).is_err());
        assert!(args(&["--seed", "abc"]).is_err());
        assert!(args(&["--output"]).is_err());
    }
}
