// src/cli.rs

use crate::config::{Config, SpinMode};
use crate::convert::ConvertOptions;
use crate::physics::operations::WrapMode;
use clap::{ArgAction, Parser};

/// Convert a VESTA structure file (<seed>.vesta) into a CASTEP cell file (<out>.cell)
#[derive(Parser, Debug)]
#[command(name = "vesta2cell", version, about)]
pub struct Cli {
    /// Seed name of the input .vesta file
    #[arg(short, long)]
    pub seed: String,

    /// Seed name of the output .cell file (defaults to the input seed)
    #[arg(short, long)]
    pub out: Option<String>,

    /// Treatment of spin
    #[arg(long, value_enum)]
    pub spin: Option<SpinMode>,

    /// How expanded positions are folded back into the cell
    #[arg(long, value_enum)]
    pub wrap: Option<WrapMode>,

    /// Store the given --spin/--wrap as defaults for later runs
    #[arg(long)]
    pub save_defaults: bool,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, conflicts_with = "quiet")]
    pub verbose: u8,

    /// Less log output (-q warnings only, -qq errors only)
    #[arg(short, long, action = ArgAction::Count)]
    pub quiet: u8,
}

impl Cli {
    pub fn output_seed(&self) -> &str {
        self.out.as_deref().unwrap_or(&self.seed)
    }

    /// Command-line flags win over persisted defaults.
    pub fn options(&self, config: &Config) -> ConvertOptions {
        ConvertOptions {
            spin: self.spin.unwrap_or(config.default_spin),
            wrap: self.wrap.unwrap_or(config.wrap_mode),
        }
    }

    pub fn merged_config(&self, config: &Config) -> Config {
        let opts = self.options(config);
        Config {
            default_spin: opts.spin,
            wrap_mode: opts.wrap,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["vesta2cell", "-s", "Fe"]).unwrap();
        assert_eq!(cli.output_seed(), "Fe");
        let opts = cli.options(&Config::default());
        assert_eq!(opts.spin, SpinMode::Nospin);
        assert_eq!(opts.wrap, WrapMode::SinglePass);
    }

    #[test]
    fn test_flags_override_config() {
        let cli = Cli::try_parse_from([
            "vesta2cell", "--seed", "Fe", "-o", "Fe_afm", "--spin", "noncollinear", "--wrap", "modulo",
        ])
        .unwrap();
        let config = Config {
            default_spin: SpinMode::Collinear,
            wrap_mode: WrapMode::SinglePass,
        };

        assert_eq!(cli.output_seed(), "Fe_afm");
        let opts = cli.options(&config);
        assert_eq!(opts.spin, SpinMode::Noncollinear);
        assert_eq!(opts.wrap, WrapMode::Modulo);
    }

    #[test]
    fn test_config_used_when_flag_absent() {
        let cli = Cli::try_parse_from(["vesta2cell", "-s", "Fe"]).unwrap();
        let config = Config {
            default_spin: SpinMode::Noncollinear,
            wrap_mode: WrapMode::Modulo,
        };
        assert_eq!(cli.merged_config(&config), config);
    }

    #[test]
    fn test_seed_is_required() {
        assert!(Cli::try_parse_from(["vesta2cell"]).is_err());
    }

    #[test]
    fn test_unknown_spin_rejected() {
        assert!(Cli::try_parse_from(["vesta2cell", "-s", "Fe", "--spin", "up"]).is_err());
    }
}
