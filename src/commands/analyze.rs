use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use fsl_lib::figma::{extract_styles, fetch_node, parse_document, FigmaNodeData};
use fsl_lib::output::{AutoOptimizationSummary, SimilarStyles, FSL_OUTPUT_VERSION};
use fsl_lib::{
    parse_resource, FslError, FslOutput, LibraryOutput, ParsedResource, ResourceDescriptor,
    ResourceKind, StyleStore,
};
use tracing::{debug, info};

use crate::cli::OutputFormat;
use crate::formatting::{render_error, write_output};
use crate::settings::{
    format_effective_config, load_config, resolve_analyze_settings, AnalyzeFlagSources,
    ResolvedAnalyzeSettings,
};

/// Run the analyze command.
#[allow(clippy::too_many_arguments)]
pub async fn run_analyze(
    raw_args: &[String],
    config_path: Option<PathBuf>,
    verbose: bool,
    input: String,
    format: OutputFormat,
    output: Option<PathBuf>,
    no_auto_optimize: bool,
    optimize_threshold: usize,
    similar_threshold: f64,
) -> ExitCode {
    let config = match load_config(config_path.as_deref()) {
        Ok(cfg) => cfg,
        Err(err) => return render_error(err, format, output.clone()),
    };
    let flag_sources = AnalyzeFlagSources::from_args(raw_args);
    let settings = match resolve_analyze_settings(
        no_auto_optimize,
        optimize_threshold,
        similar_threshold,
        &config,
        &flag_sources,
    ) {
        Ok(s) => s,
        Err(err) => return render_error(err, format, output.clone()),
    };
    if verbose {
        eprintln!(
            "{}",
            format_effective_config(&settings, config_path.as_deref())
        );
        eprintln!("Parsing input resource\u{2026}");
    }

    let input_res = match parse_resource(&input) {
        Ok(res) => res,
        Err(err) => return render_error(FslError::Config(err.to_string()), format, output.clone()),
    };

    if verbose {
        eprintln!("Loading design nodes\u{2026}");
    }
    let roots = match load_roots(&input_res, settings.request_timeout).await {
        Ok(roots) => roots,
        Err(err) => return render_error(err, format, output.clone()),
    };

    let library = match build_library(&input_res, &roots, &settings) {
        Ok(lib) => lib,
        Err(err) => return render_error(err, format, output.clone()),
    };
    if verbose {
        eprintln!(
            "Extracted {} styles from {} nodes",
            library.styles.len(),
            library.nodes.len()
        );
    }

    let body = FslOutput::Analyze(library);
    if let Err(err) = write_output(&body, format, output.clone()) {
        return render_error(FslError::Unknown(err.to_string()), format, output);
    }
    ExitCode::SUCCESS
}

async fn load_roots(
    resource: &ParsedResource,
    timeout: Duration,
) -> Result<Vec<FigmaNodeData>, FslError> {
    match resource.kind {
        ResourceKind::File => {
            let path = PathBuf::from(&resource.value);
            let raw = std::fs::read_to_string(&path)?;
            parse_document(&raw).map_err(|e| {
                FslError::Config(format!(
                    "Invalid Figma JSON in {}: {}",
                    path.display(),
                    e
                ))
            })
        }
        ResourceKind::Figma => {
            let info = resource.figma_info.as_ref().ok_or_else(|| {
                FslError::Config(format!("Figma file key missing in {}", resource.value))
            })?;
            let node_id = info.node_id.as_deref().ok_or_else(|| {
                FslError::Config(format!(
                    "Figma URL missing node-id in query: {}",
                    resource.value
                ))
            })?;
            debug!(file_key = %info.file_key, node_id, "fetching Figma node");
            let node = fetch_node(&info.file_key, node_id, timeout).await?;
            Ok(vec![node])
        }
    }
}

/// Extract every root into a fresh store and assemble the report.
fn build_library(
    resource: &ParsedResource,
    roots: &[FigmaNodeData],
    settings: &ResolvedAnalyzeSettings,
) -> Result<LibraryOutput, FslError> {
    let mut store = StyleStore::new();
    store.set_auto_optimization(settings.auto_optimize, settings.optimize_threshold);

    let mut nodes = Vec::new();
    for root in roots {
        nodes.extend(extract_styles(&mut store, root)?);
    }
    let report = store.optimize_library();
    info!(
        styles = store.len(),
        nodes = nodes.len(),
        "style library built"
    );

    Ok(LibraryOutput {
        version: FSL_OUTPUT_VERSION.to_string(),
        input: ResourceDescriptor {
            kind: resource.kind,
            value: resource.value.clone(),
        },
        styles: store.all_styles().cloned().collect(),
        hierarchy: store.style_hierarchy(),
        nodes,
        report,
        auto_optimizations: AutoOptimizationSummary::from(store.auto_maintenance()),
        similar_threshold: settings.similar_threshold,
        similar: similar_styles(&store, settings.similar_threshold),
    })
}

/// For each definition, the other definitions that are near but not exact matches.
fn similar_styles(store: &StyleStore, threshold: f64) -> Vec<SimilarStyles> {
    store
        .all_styles()
        .filter_map(|def| {
            let similar: Vec<_> = store
                .find_similar_values(&def.properties, threshold)
                .into_iter()
                .filter(|id| *id != def.id)
                .collect();
            (!similar.is_empty()).then(|| SimilarStyles {
                id: def.id.clone(),
                similar,
            })
        })
        .collect()
}
