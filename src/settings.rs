use std::path::Path;
use std::time::Duration;

use fsl_lib::config::LibraryConfig;
use fsl_lib::{Config, FslError};

/// Tracks which CLI flags were explicitly provided vs. defaulted.
#[derive(Debug, Default)]
pub struct AnalyzeFlagSources {
    pub optimize_threshold: bool,
    pub similar_threshold: bool,
}

impl AnalyzeFlagSources {
    pub fn from_args(args: &[String]) -> Self {
        Self {
            optimize_threshold: flag_present(args, "--optimize-threshold"),
            similar_threshold: flag_present(args, "--similar-threshold"),
        }
    }
}

/// Checks if a flag was present in the command-line arguments.
pub fn flag_present(args: &[String], flag: &str) -> bool {
    args.iter()
        .any(|arg| arg == flag || arg.starts_with(&format!("{flag}=")))
}

/// Resolved settings after merging CLI args and config file.
#[derive(Debug, Clone, Copy)]
pub struct ResolvedAnalyzeSettings {
    pub auto_optimize: bool,
    pub optimize_threshold: usize,
    pub similar_threshold: f64,
    pub request_timeout: Duration,
}

/// Merge CLI arguments with config file, preferring CLI when flags are present.
///
/// `--no-auto-optimize` only ever disables; it cannot re-enable a config that
/// turned auto-optimization off.
pub fn resolve_analyze_settings(
    cli_no_auto_optimize: bool,
    cli_optimize_threshold: usize,
    cli_similar_threshold: f64,
    config: &Config,
    flags: &AnalyzeFlagSources,
) -> Result<ResolvedAnalyzeSettings, FslError> {
    let library = LibraryConfig {
        auto_optimize: config.library.auto_optimize && !cli_no_auto_optimize,
        optimize_threshold: if flags.optimize_threshold {
            cli_optimize_threshold
        } else {
            config.library.optimize_threshold
        },
        similar_threshold: if flags.similar_threshold {
            cli_similar_threshold
        } else {
            config.library.similar_threshold
        },
    };

    let merged = Config {
        library,
        timeouts: config.timeouts.clone(),
    };
    merged.validate()?;

    Ok(ResolvedAnalyzeSettings {
        auto_optimize: merged.library.auto_optimize,
        optimize_threshold: merged.library.optimize_threshold,
        similar_threshold: merged.library.similar_threshold,
        request_timeout: merged.timeouts.request,
    })
}

/// Load config from a TOML file, central config, or return defaults.
/// Priority: explicit path > ~/.config/fsl/config.toml > defaults
pub fn load_config(path: Option<&Path>) -> Result<Config, FslError> {
    let cfg = Config::load(path).map_err(|e| {
        let loc = path
            .map(|p| p.display().to_string())
            .or_else(|| Config::central_config_path().map(|p| p.display().to_string()))
            .unwrap_or_else(|| "defaults".to_string());
        FslError::Config(format!("Failed to read config {}: {}", loc, e))
    })?;

    cfg.validate().map_err(|e| {
        let prefix = path
            .map(|p| format!("Invalid config ({}): {}", p.display(), e))
            .unwrap_or_else(|| format!("Invalid config: {}", e));
        FslError::Config(prefix)
    })?;
    Ok(cfg)
}

/// Format effective config as a single-line string.
pub fn format_effective_config(
    settings: &ResolvedAnalyzeSettings,
    config_source: Option<&Path>,
) -> String {
    let source = config_source
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "defaults".to_string());
    format!(
        "Effective config [{source}]: auto_optimize={} (every {} styles), similar_threshold={:.2}, request_timeout={}s",
        settings.auto_optimize,
        settings.optimize_threshold,
        settings.similar_threshold,
        settings.request_timeout.as_secs()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use fsl_lib::config::Timeouts;

    fn config() -> Config {
        Config {
            library: LibraryConfig {
                auto_optimize: true,
                optimize_threshold: 7,
                similar_threshold: 0.6,
            },
            timeouts: Timeouts {
                request: Duration::from_secs(9),
            },
        }
    }

    #[test]
    fn resolve_analyze_settings_prefers_config_when_flags_absent() {
        let flags = AnalyzeFlagSources::default();
        let resolved = resolve_analyze_settings(false, 20, 0.8, &config(), &flags).unwrap();

        assert!(resolved.auto_optimize);
        assert_eq!(resolved.optimize_threshold, 7);
        assert!((resolved.similar_threshold - 0.6).abs() < f64::EPSILON);
        assert_eq!(resolved.request_timeout, Duration::from_secs(9));
    }

    #[test]
    fn resolve_analyze_settings_prefers_cli_when_flags_present() {
        let args: Vec<String> = [
            "fsl",
            "analyze",
            "--optimize-threshold=3",
            "--similar-threshold",
            "0.95",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();
        let flags = AnalyzeFlagSources::from_args(&args);
        assert!(flags.optimize_threshold && flags.similar_threshold);

        let resolved = resolve_analyze_settings(true, 3, 0.95, &config(), &flags).unwrap();
        assert!(!resolved.auto_optimize);
        assert_eq!(resolved.optimize_threshold, 3);
        assert!((resolved.similar_threshold - 0.95).abs() < f64::EPSILON);
    }

    #[test]
    fn resolve_analyze_settings_rejects_out_of_range_threshold() {
        let flags = AnalyzeFlagSources {
            optimize_threshold: false,
            similar_threshold: true,
        };
        let err = resolve_analyze_settings(false, 20, 1.5, &config(), &flags).unwrap_err();
        assert!(matches!(err, FslError::Config(msg) if msg.contains("similar_threshold")));
    }

    #[test]
    fn format_effective_config_includes_all_fields() {
        let summary = format_effective_config(
            &ResolvedAnalyzeSettings {
                auto_optimize: false,
                optimize_threshold: 12,
                similar_threshold: 0.9,
                request_timeout: Duration::from_secs(45),
            },
            Some(Path::new("fsl.toml")),
        );
        assert!(summary.contains("auto_optimize=false"));
        assert!(summary.contains("every 12 styles"));
        assert!(summary.contains("similar_threshold=0.90"));
        assert!(summary.contains("request_timeout=45s"));
        assert!(summary.contains("fsl.toml"));
    }
}
