use crate::cli::ScanArgs;
use crate::error::{CliError, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;
use trajscan::core::analysis::pairs::{PairSelector, ThresholdCondition};
use trajscan::workflows::scan::ScanConfig;

/// The scan parameters as they appear in a TOML config file.
///
/// Every field is optional; missing values fall back to CLI flags (which in
/// turn take precedence when both are given).
#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileConfig {
    pub trajectory: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub pair: Option<String>,
    pub cutoff: Option<f64>,
    pub condition: Option<String>,
    pub render_heatmaps: Option<bool>,
    pub dump_all_frames: Option<bool>,
}

impl FileConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            CliError::Config(format!("Cannot read config file '{}': {}", path.display(), e))
        })?;
        toml::from_str(&content).map_err(|e| {
            CliError::Config(format!("Invalid config file '{}': {}", path.display(), e))
        })
    }
}

/// The fully resolved inputs for one `scan` invocation.
#[derive(Debug)]
pub struct AppConfig {
    pub trajectory: PathBuf,
    pub output: PathBuf,
    pub scan: ScanConfig,
}

/// Merges the config file (if any) with CLI arguments into a validated
/// [`AppConfig`]. CLI values override file values.
pub fn build_config(args: &ScanArgs) -> Result<AppConfig> {
    let file_config = if let Some(config_path) = &args.config {
        debug!("Loading scan defaults from {:?}", config_path);
        FileConfig::from_file(config_path)?
    } else {
        FileConfig::default()
    };

    let trajectory = args
        .trajectory
        .clone()
        .or(file_config.trajectory)
        .ok_or_else(|| missing("trajectory", "--trajectory"))?;
    let output = args
        .output
        .clone()
        .or(file_config.output)
        .ok_or_else(|| missing("output", "--output"))?;

    let pair_str = args
        .pair
        .clone()
        .or(file_config.pair)
        .ok_or_else(|| missing("pair", "--pair"))?;
    let pair: PairSelector = pair_str
        .parse()
        .map_err(|e: <PairSelector as std::str::FromStr>::Err| CliError::Argument(e.to_string()))?;

    let cutoff = args
        .cutoff
        .or(file_config.cutoff)
        .ok_or_else(|| missing("cutoff", "--cutoff"))?;
    if !cutoff.is_finite() || cutoff <= 0.0 {
        return Err(CliError::Argument(format!(
            "Cutoff distance must be a positive number, got {}",
            cutoff
        )));
    }

    let condition_str = args
        .condition
        .clone()
        .or(file_config.condition)
        .ok_or_else(|| missing("condition", "--condition"))?;
    let condition: ThresholdCondition = condition_str
        .parse()
        .map_err(|e: <ThresholdCondition as std::str::FromStr>::Err| {
            CliError::Argument(e.to_string())
        })?;

    let mut scan = ScanConfig::new(pair, cutoff, condition);
    scan.render_heatmaps = if args.no_heatmaps {
        false
    } else {
        file_config.render_heatmaps.unwrap_or(true)
    };
    scan.dump_all_frames = if args.no_frame_dump {
        false
    } else {
        file_config.dump_all_frames.unwrap_or(true)
    };

    Ok(AppConfig {
        trajectory,
        output,
        scan,
    })
}

fn missing(key: &str, flag: &str) -> CliError {
    CliError::Config(format!(
        "Missing required parameter '{}': set it in the config file or pass {}",
        key, flag
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands};
    use clap::Parser;
    use std::fs;

    fn scan_args(extra: &[&str]) -> ScanArgs {
        let mut argv = vec!["trajscan", "scan"];
        argv.extend_from_slice(extra);
        let cli = Cli::parse_from(argv);
        match cli.command {
            Commands::Scan(args) => args,
            _ => panic!("Expected 'scan' subcommand"),
        }
    }

    #[test]
    fn cli_only_arguments_build_a_config() {
        let args = scan_args(&[
            "-t", "XDATCAR", "-o", "out", "-p", "C-Br", "-d", "2.5", "-c", "less",
        ]);
        let config = build_config(&args).unwrap();

        assert_eq!(config.trajectory, PathBuf::from("XDATCAR"));
        assert_eq!(config.output, PathBuf::from("out"));
        assert_eq!(config.scan.pair.to_string(), "C-Br");
        assert_eq!(config.scan.cutoff, 2.5);
        assert_eq!(config.scan.condition, ThresholdCondition::Below);
        assert!(config.scan.render_heatmaps);
        assert!(config.scan.dump_all_frames);
    }

    #[test]
    fn file_values_fill_in_missing_flags() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("scan.toml");
        fs::write(
            &config_path,
            r#"
trajectory = "from_file/XDATCAR"
output = "from_file/out"
pair = "C-Br"
cutoff = 3.0
condition = "greater"
render-heatmaps = false
"#,
        )
        .unwrap();

        let args = scan_args(&["--config", config_path.to_str().unwrap()]);
        let config = build_config(&args).unwrap();

        assert_eq!(config.trajectory, PathBuf::from("from_file/XDATCAR"));
        assert_eq!(config.scan.cutoff, 3.0);
        assert_eq!(config.scan.condition, ThresholdCondition::Above);
        assert!(!config.scan.render_heatmaps);
        assert!(config.scan.dump_all_frames);
    }

    #[test]
    fn cli_flags_override_file_values() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("scan.toml");
        fs::write(
            &config_path,
            r#"
trajectory = "from_file/XDATCAR"
output = "from_file/out"
pair = "O-H"
cutoff = 1.0
condition = "less"
"#,
        )
        .unwrap();

        let args = scan_args(&[
            "--config",
            config_path.to_str().unwrap(),
            "-p",
            "C-Br",
            "-d",
            "2.5",
            "--no-frame-dump",
        ]);
        let config = build_config(&args).unwrap();

        assert_eq!(config.scan.pair.to_string(), "C-Br");
        assert_eq!(config.scan.cutoff, 2.5);
        assert!(!config.scan.dump_all_frames);
    }

    #[test]
    fn missing_required_parameter_is_a_config_error() {
        let args = scan_args(&["-t", "XDATCAR", "-o", "out", "-p", "C-Br", "-d", "2.5"]);
        let err = build_config(&args).unwrap_err();
        assert!(matches!(err, CliError::Config(msg) if msg.contains("condition")));
    }

    #[test]
    fn invalid_pair_and_condition_are_argument_errors() {
        let args = scan_args(&[
            "-t", "X", "-o", "o", "-p", "CBr", "-d", "2.5", "-c", "less",
        ]);
        assert!(matches!(
            build_config(&args).unwrap_err(),
            CliError::Argument(_)
        ));

        let args = scan_args(&[
            "-t", "X", "-o", "o", "-p", "C-Br", "-d", "2.5", "-c", "between",
        ]);
        assert!(matches!(
            build_config(&args).unwrap_err(),
            CliError::Argument(_)
        ));
    }

    #[test]
    fn nonpositive_cutoff_is_rejected_up_front() {
        let args = scan_args(&[
            "-t", "X", "-o", "o", "-p", "C-Br", "--cutoff=-1.0", "-c", "less",
        ]);
        assert!(matches!(
            build_config(&args).unwrap_err(),
            CliError::Argument(msg) if msg.contains("positive")
        ));
    }

    #[test]
    fn unknown_config_keys_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("scan.toml");
        fs::write(&config_path, "cuttoff = 2.5\n").unwrap();

        let args = scan_args(&["--config", config_path.to_str().unwrap()]);
        assert!(matches!(
            build_config(&args).unwrap_err(),
            CliError::Config(_)
        ));
    }
}
