use std::fmt::Write as FmtWrite;
use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use fsl_lib::output::FSL_OUTPUT_VERSION;
use fsl_lib::{ErrorOutput, FslError, FslOutput};

use crate::cli::OutputFormat;

/// How many definitions the human-readable view lists before truncating.
const PRETTY_STYLE_LIMIT: usize = 20;

/// Write output in the requested format.
pub fn write_output(
    body: &FslOutput,
    format: OutputFormat,
    output: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    match format {
        OutputFormat::Json => write_json_output(body, output.as_deref())?,
        OutputFormat::Pretty => write_pretty_output(body, output.as_deref())?,
    };
    Ok(())
}

/// Render an error and return the appropriate exit code.
pub fn render_error(err: FslError, format: OutputFormat, output: Option<PathBuf>) -> ExitCode {
    let error_payload = err.to_payload();
    let payload = FslOutput::Error(ErrorOutput {
        version: FSL_OUTPUT_VERSION.to_string(),
        message: Some(error_payload.message.clone()),
        error: error_payload,
    });

    match format {
        OutputFormat::Json => {
            let content =
                serde_json::to_string(&payload).unwrap_or_else(|_| "{\"mode\":\"error\"}".into());
            if let Some(path) = output {
                if let Err(write_err) = std::fs::write(&path, &content) {
                    eprintln!("Failed to write error output: {}", write_err);
                    println!("{content}");
                }
            } else {
                println!("{content}");
            }
        }
        OutputFormat::Pretty => {
            if let Err(write_err) = write_pretty_output(&payload, output.as_deref()) {
                eprintln!("Failed to write error output: {}", write_err);
            }
        }
    };

    ExitCode::from(2)
}

/// Write JSON output to file or stdout.
fn write_json_output(body: &FslOutput, output: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let content = serde_json::to_string(body)?;
    if let Some(path) = output {
        std::fs::write(path, content)?;
    } else {
        println!("{content}");
    }
    Ok(())
}

/// Write pretty output to file or stdout.
fn write_pretty_output(body: &FslOutput, output: Option<&Path>) -> io::Result<()> {
    let stdout_is_tty = std::io::stdout().is_terminal();
    let use_human = output.is_none() && stdout_is_tty;

    if use_human {
        let content = format_pretty(body, true);
        println!("{content}");
        return Ok(());
    }

    // Non-tty or file output: keep JSON shape for pipelines/files.
    let content =
        serde_json::to_string_pretty(body).unwrap_or_else(|_| "{\"mode\":\"error\"}".to_string());
    if let Some(path) = output {
        std::fs::write(path, &content)?;
    } else {
        println!("{content}");
    }
    Ok(())
}

/// Format output for human consumption in a terminal.
pub fn format_pretty(body: &FslOutput, colorize: bool) -> String {
    match body {
        FslOutput::Analyze(out) => {
            let mut buf = String::new();
            let header = color("[ANALYZE]", "36", colorize);
            writeln!(
                buf,
                "{} {} styles from {} nodes",
                header,
                out.report.total_styles,
                out.nodes.len()
            )
            .ok();
            writeln!(
                buf,
                "Input: {} (kind: {:?})",
                out.input.value, out.input.kind
            )
            .ok();
            writeln!(
                buf,
                "Report: {} duplicates removed, {} variants, depth {}, memory reduction {}",
                out.report.duplicates_removed,
                out.report.variants_created,
                out.report.hierarchy_depth,
                out.report.memory_reduction
            )
            .ok();
            if out.auto_optimizations.enabled {
                writeln!(
                    buf,
                    "Auto-optimize: {} runs (every {} styles)",
                    out.auto_optimizations.runs, out.auto_optimizations.threshold
                )
                .ok();
            }

            if !out.styles.is_empty() {
                writeln!(buf, "Styles:").ok();
                for def in out.styles.iter().take(PRETTY_STYLE_LIMIT) {
                    let id = color(def.id.as_str(), "33", colorize);
                    let parent = def
                        .parent_id
                        .as_ref()
                        .map(|p| format!(" <- {}", p))
                        .unwrap_or_default();
                    writeln!(buf, "- {} x{}{}", id, def.usage_count, parent).ok();
                    for line in def.generated_code.lines() {
                        writeln!(buf, "    {}", line).ok();
                    }
                }
                if out.styles.len() > PRETTY_STYLE_LIMIT {
                    writeln!(
                        buf,
                        "... {} more",
                        out.styles.len() - PRETTY_STYLE_LIMIT
                    )
                    .ok();
                }
            }

            if !out.similar.is_empty() {
                writeln!(
                    buf,
                    "Similar styles (>= {:.2}):",
                    out.similar_threshold
                )
                .ok();
                for pair in &out.similar {
                    let others: Vec<&str> = pair.similar.iter().map(|id| id.as_str()).collect();
                    writeln!(buf, "- {}: {}", pair.id, others.join(", ")).ok();
                }
            }
            buf
        }
        FslOutput::Error(out) => {
            let mut buf = String::new();
            let header = color("[ERROR]", "31", colorize);
            let message = out
                .message
                .as_deref()
                .unwrap_or_else(|| out.error.message.as_str());
            writeln!(buf, "{} {}", header, message).ok();
            if let Some(remediation) = &out.error.remediation {
                writeln!(buf, "Hint: {}", remediation).ok();
            }
            buf
        }
    }
}

/// Apply ANSI color codes when enabled.
fn color(text: &str, code: &str, colorize: bool) -> String {
    if colorize {
        format!("\x1b[{}m{}\x1b[0m", code, text)
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fsl_lib::output::{AutoOptimizationSummary, LibraryOutput, ResourceDescriptor, SimilarStyles};
    use fsl_lib::styles::{PaddingProps, StyleInput, StyleStore};
    use fsl_lib::ResourceKind;

    fn analyze_output() -> FslOutput {
        let mut store = StyleStore::new();
        let a = store
            .add(&StyleInput::Padding(PaddingProps::uniform(8.0)))
            .expect("add");
        let b = store
            .add(&StyleInput::Padding(PaddingProps {
                left: 12.0,
                ..PaddingProps::uniform(8.0)
            }))
            .expect("add");
        let report = store.optimize_library();

        FslOutput::Analyze(LibraryOutput {
            version: FSL_OUTPUT_VERSION.to_string(),
            input: ResourceDescriptor {
                kind: ResourceKind::File,
                value: "design.json".into(),
            },
            styles: store.all_styles().cloned().collect(),
            hierarchy: store.style_hierarchy(),
            nodes: vec![],
            report,
            auto_optimizations: AutoOptimizationSummary::from(store.auto_maintenance()),
            similar_threshold: 0.5,
            similar: vec![SimilarStyles {
                id: a,
                similar: vec![b],
            }],
        })
    }

    #[test]
    fn render_error_always_returns_fatal_exit_code() {
        let code = render_error(
            FslError::Config("boom".to_string()),
            OutputFormat::Json,
            None,
        );
        assert_eq!(code, ExitCode::from(2));
    }

    #[test]
    fn format_pretty_lists_styles_and_code() {
        let pretty = format_pretty(&analyze_output(), false);
        assert!(pretty.contains("[ANALYZE] 2 styles from 0 nodes"));
        assert!(pretty.contains("Input: design.json"));
        assert!(pretty.contains("paddingStyle1 x1"));
        assert!(pretty.contains("EdgeInsets.all(8)"));
        assert!(pretty.contains("Auto-optimize: 0 runs"));
        assert!(pretty.contains("Similar styles (>= 0.50):"));
        assert!(pretty.contains("- paddingStyle1: paddingStyle2"));
    }

    #[test]
    fn format_pretty_handles_errors() {
        let output = FslOutput::Error(ErrorOutput {
            version: FSL_OUTPUT_VERSION.to_string(),
            message: Some("bad input".to_string()),
            error: fsl_lib::error::ErrorPayload {
                category: fsl_lib::error::ErrorCategory::Config,
                message: "bad input".to_string(),
                remediation: Some("check flags".to_string()),
            },
        });

        let pretty = format_pretty(&output, false);
        assert!(pretty.contains("[ERROR] bad input"));
        assert!(pretty.contains("Hint: check flags"));
    }
}
