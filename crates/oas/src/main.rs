mod collect;

use std::process::ExitCode;

use anyhow::{Context, bail};
use camino::Utf8PathBuf;
use clap::Parser;
use collect::{PathCollector, RefCollector};
use oas_db::{CheckConfig, Diagnostic, File, check_file, load};
use oas_errors::Renderer;
use oas_model::{KindSet, NodeKind};
use oas_traverse::{PathFormat, traverse, walk};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(version, about = "Inspect OpenAPI 3.0 and 3.1 documents")]
enum Options {
    /// Report problems in a document.
    Check {
        path: Utf8PathBuf,
        /// JSON file with the check configuration.
        #[arg(long)]
        config: Option<Utf8PathBuf>,
    },
    /// Print the path of every node of a document.
    Paths {
        path: Utf8PathBuf,
        /// `pointer`, `dotted` or `json-path`.
        #[arg(long, default_value_t = PathFormat::Pointer)]
        format: PathFormat,
        /// Only print nodes of this kind. May be repeated.
        #[arg(long = "kind")]
        kinds: Vec<NodeKind>,
    },
    /// Print every `$ref` of a document with its path.
    Refs { path: Utf8PathBuf },
}

fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    match Options::parse() {
        Options::Check { path, config } => {
            let config = match config {
                Some(config_path) => {
                    let text = std::fs::read_to_string(&config_path)
                        .with_context(|| format!("failed to read `{config_path}`"))?;
                    CheckConfig::from_json(&text)
                        .with_context(|| format!("invalid configuration in `{config_path}`"))?
                }
                None => CheckConfig::default(),
            };
            tracing::debug!(?config, "loaded configuration");

            let file = read(path)?;
            let diagnostics = check_file(&file, &config);
            report(&file, &diagnostics);

            Ok(if diagnostics.is_empty() { ExitCode::SUCCESS } else { ExitCode::FAILURE })
        }
        Options::Paths { path, format, kinds } => {
            let file = read(path)?;
            let loaded = match load(&file) {
                Ok(loaded) => loaded,
                Err(err) => {
                    report(&file, &[err.into_diagnostic(None)]);
                    return Ok(ExitCode::FAILURE);
                }
            };

            let interest =
                if kinds.is_empty() { KindSet::ALL } else { kinds.into_iter().collect() };
            let paths = match &loaded.document {
                Some(document) => {
                    let mut collector = PathCollector::new(interest, format);
                    let Ok(()) = traverse(document, &mut collector);
                    collector.paths
                }
                None if interest.contains(NodeKind::Value) => {
                    walk(&loaded.ast).map(|(path, _)| path.format(format)).collect()
                }
                None => Vec::new(),
            };

            for path in paths {
                println!("{path}");
            }
            Ok(ExitCode::SUCCESS)
        }
        Options::Refs { path } => {
            let file = read(path)?;
            let loaded = match load(&file) {
                Ok(loaded) => loaded,
                Err(err) => {
                    report(&file, &[err.into_diagnostic(None)]);
                    return Ok(ExitCode::FAILURE);
                }
            };
            let Some(document) = &loaded.document else {
                match &loaded.version {
                    Err(reason) => bail!("`{}` is not an OpenAPI document: {reason}", file.path()),
                    Ok(version) => bail!("`{}` did not build as OpenAPI {version}", file.path()),
                }
            };

            let mut collector = RefCollector::default();
            let Ok(()) = traverse(document, &mut collector);
            for (path, target) in collector.refs {
                println!("{path}\t{target}");
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn read(path: Utf8PathBuf) -> anyhow::Result<File> {
    let text =
        std::fs::read_to_string(&path).with_context(|| format!("failed to read `{path}`"))?;
    Ok(File::new(path, text))
}

fn report(file: &File, diagnostics: &[Diagnostic]) {
    let renderer = Renderer::styled();
    for diagnostic in diagnostics {
        eprintln!("{}", diagnostic.render(&renderer, file.path().as_str(), file.text()));
    }
}
