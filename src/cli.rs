use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "fsl")]
#[command(
    version,
    about = "Figma Style Library - Deduplicate design styles into a reusable variant hierarchy",
    long_about = "Figma Style Library (FSL)\n\nModes:\n- analyze: extract decoration/text/padding/layout styles from a Figma node (URL or saved JSON), deduplicate them, and report the resulting library with Flutter snippets.\n\nUse --help on any subcommand for details."
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(
        long,
        global = true,
        value_name = "PATH",
        help = "Optional config file (TOML) to set defaults for optimization thresholds/timeouts; CLI flags override config"
    )]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build a deduplicated style library from a Figma node tree
    Analyze {
        #[arg(
            long,
            help = "Input resource (Figma URL with node-id, or a saved Figma nodes/node JSON file)"
        )]
        input: String,

        #[arg(long, value_enum, default_value = "json", help = "Output format")]
        format: OutputFormat,

        #[arg(long, short, help = "Output file path (stdout if omitted)")]
        output: Option<PathBuf>,

        #[arg(long, help = "Disable automatic optimization passes while extracting")]
        no_auto_optimize: bool,

        #[arg(
            long,
            default_value_t = fsl_lib::styles::DEFAULT_OPTIMIZE_THRESHOLD,
            value_name = "N",
            help = "Run an automatic optimization pass after every N new styles"
        )]
        optimize_threshold: usize,

        #[arg(
            long,
            default_value_t = fsl_lib::styles::DEFAULT_SIMILAR_THRESHOLD,
            value_name = "X",
            help = "Minimum similarity (0-1] for the similar-styles report"
        )]
        similar_threshold: f64,
    },
}

#[derive(Clone, Copy, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Json,
    Pretty,
}

pub fn parse() -> Cli {
    Cli::parse()
}

#[cfg(test)]
mod tests {
    use super::{Cli, Commands, OutputFormat};
    use clap::Parser;

    #[test]
    fn analyze_command_uses_defaults() {
        let cli = Cli::parse_from(["fsl", "analyze", "--input", "design.json"]);

        assert!(!cli.verbose);
        assert!(cli.config.is_none());

        match cli.command {
            Commands::Analyze {
                input,
                format,
                output,
                no_auto_optimize,
                optimize_threshold,
                similar_threshold,
            } => {
                assert_eq!(input, "design.json");
                assert!(matches!(format, OutputFormat::Json));
                assert!(output.is_none());
                assert!(!no_auto_optimize);
                assert_eq!(optimize_threshold, 20);
                assert!((similar_threshold - 0.8).abs() < f64::EPSILON);
            }
        }
    }

    #[test]
    fn analyze_command_respects_overrides() {
        let cli = Cli::parse_from([
            "fsl",
            "--verbose",
            "analyze",
            "--input",
            "https://www.figma.com/design/ABC/Name?node-id=1-2",
            "--format",
            "pretty",
            "--output",
            "library.json",
            "--no-auto-optimize",
            "--optimize-threshold",
            "5",
            "--similar-threshold",
            "0.9",
            "--config",
            "fsl.toml",
        ]);

        assert!(cli.verbose);
        assert_eq!(
            cli.config.as_deref(),
            Some(std::path::Path::new("fsl.toml"))
        );

        match cli.command {
            Commands::Analyze {
                format,
                output,
                no_auto_optimize,
                optimize_threshold,
                similar_threshold,
                ..
            } => {
                assert!(matches!(format, OutputFormat::Pretty));
                assert_eq!(
                    output.as_deref(),
                    Some(std::path::Path::new("library.json"))
                );
                assert!(no_auto_optimize);
                assert_eq!(optimize_threshold, 5);
                assert!((similar_threshold - 0.9).abs() < f64::EPSILON);
            }
        }
    }
}
