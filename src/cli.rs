use std::path::PathBuf;

use clap::Parser;

/// Household load profile and backup generator economics.
///
/// Without `--scenario` or `--preset` the `abuja` preset is used.
#[derive(Debug, Parser)]
#[command(author, version, about)]
pub struct Args {
    /// Load the scenario from a TOML file.
    #[clap(long, conflicts_with = "preset")]
    pub scenario: Option<PathBuf>,

    /// Use a built-in preset: abuja, lagos, continuous or evening.
    #[clap(long)]
    pub preset: Option<String>,

    /// Write appliances.csv, hourly.csv and summary.csv into this directory.
    #[clap(long = "export-dir")]
    pub export_dir: Option<PathBuf>,

    /// Print the full report as JSON instead of text.
    #[clap(long)]
    pub json: bool,

    /// Start the REST API server after the run.
    #[cfg(feature = "api")]
    #[clap(long)]
    pub serve: bool,

    /// API server port.
    #[cfg(feature = "api")]
    #[clap(long, default_value = "3000")]
    pub port: u16,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_no_source() {
        let args = Args::try_parse_from(["backup-power-sim"]).unwrap();
        assert!(args.scenario.is_none());
        assert!(args.preset.is_none());
        assert!(!args.json);
    }

    #[test]
    fn scenario_and_preset_are_mutually_exclusive() {
        let res = Args::try_parse_from([
            "backup-power-sim",
            "--scenario",
            "scenarios/abuja.toml",
            "--preset",
            "lagos",
        ]);
        assert!(res.is_err());
    }

    #[test]
    fn parses_export_dir_and_json() {
        let args =
            Args::try_parse_from(["backup-power-sim", "--preset", "lagos", "--export-dir", "out", "--json"])
                .unwrap();
        assert_eq!(args.preset.as_deref(), Some("lagos"));
        assert_eq!(args.export_dir, Some(PathBuf::from("out")));
        assert!(args.json);
    }
}
