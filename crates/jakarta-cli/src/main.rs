use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use jakarta_config::{init_tracing, load_for_workspace, JakartaConfig};
use jakarta_lsp::{
    CancellationToken, FileSystemDocuments, JakartaDiagnosticsParams, JakartaLanguageService,
};
use lsp_types::{DiagnosticSeverity, NumberOrString, Uri};
use serde::Serialize;

#[derive(Parser)]
#[command(
    name = "jakarta-lint",
    version,
    about = "Check Java sources against Jakarta EE rules"
)]
struct Cli {
    /// Config file (defaults to `jakarta.toml` or `.jakarta/config.toml` in
    /// the current directory)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Emit JSON suitable for CI
    #[arg(long)]
    json: bool,
    /// Java files to check
    #[arg(required = true)]
    files: Vec<PathBuf>,
}

#[derive(Debug, Serialize)]
struct Report {
    files: Vec<FileReport>,
    summary: Summary,
}

#[derive(Debug, Serialize)]
struct FileReport {
    path: PathBuf,
    diagnostics: Vec<ReportedDiagnostic>,
}

/// One-based line and UTF-16 column.
#[derive(Debug, Serialize)]
struct ReportedDiagnostic {
    line: u32,
    column: u32,
    severity: &'static str,
    code: Option<String>,
    source: Option<String>,
    message: String,
}

#[derive(Debug, Default, Serialize)]
struct Summary {
    errors: usize,
    warnings: usize,
}

fn main() {
    let cli = Cli::parse();
    let exit_code = match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{:#}", err);
            2
        }
    };

    std::process::exit(exit_code);
}

fn run(cli: Cli) -> Result<i32> {
    let config = load_config(cli.config.as_deref())?;
    init_tracing(&config.logging);

    let mut paths = Vec::with_capacity(cli.files.len());
    let mut uris = Vec::with_capacity(cli.files.len());
    for file in &cli.files {
        let path = file
            .canonicalize()
            .with_context(|| format!("cannot open {}", file.display()))?;
        uris.push(file_uri(&path)?);
        paths.push(file.clone());
    }

    tracing::debug!(target: "jakarta.cli", files = uris.len(), "checking files");
    let service =
        JakartaLanguageService::from_config(&config.diagnostics, Arc::new(FileSystemDocuments))?;
    let published = service
        .diagnostics(
            JakartaDiagnosticsParams {
                uris,
                document_format: None,
            },
            &CancellationToken::new(),
        )?;

    let mut summary = Summary::default();
    let files = paths
        .into_iter()
        .zip(published)
        .map(|(path, item)| {
            let diagnostics = item
                .diagnostics
                .into_iter()
                .map(|diag| {
                    let severity = match diag.severity {
                        Some(DiagnosticSeverity::WARNING) => {
                            summary.warnings += 1;
                            "warning"
                        }
                        Some(DiagnosticSeverity::INFORMATION) => "info",
                        Some(DiagnosticSeverity::HINT) => "hint",
                        _ => {
                            summary.errors += 1;
                            "error"
                        }
                    };
                    ReportedDiagnostic {
                        line: diag.range.start.line + 1,
                        column: diag.range.start.character + 1,
                        severity,
                        code: diag.code.map(|code| match code {
                            NumberOrString::String(code) => code,
                            NumberOrString::Number(code) => code.to_string(),
                        }),
                        source: diag.source,
                        message: diag.message,
                    }
                })
                .collect();
            FileReport { path, diagnostics }
        })
        .collect();

    let report = Report { files, summary };
    print_report(&report, cli.json)?;
    Ok(if report.summary.errors > 0 { 1 } else { 0 })
}

fn load_config(explicit: Option<&Path>) -> Result<JakartaConfig> {
    if let Some(path) = explicit {
        return Ok(JakartaConfig::load_from_path(path)?);
    }
    let cwd = std::env::current_dir().context("cannot determine the current directory")?;
    let (config, _) = load_for_workspace(&cwd)?;
    Ok(config)
}

fn file_uri(path: &Path) -> Result<Uri> {
    let url = url::Url::from_file_path(path)
        .map_err(|()| anyhow!("cannot build a file URI for {}", path.display()))?;
    url.as_str()
        .parse()
        .map_err(|err| anyhow!("invalid URI {url}: {err:?}"))
}

fn print_report(report: &Report, json: bool) -> Result<()> {
    if json {
        let out = serde_json::to_string_pretty(report)?;
        println!("{out}");
        return Ok(());
    }

    for file in &report.files {
        for d in &file.diagnostics {
            println!(
                "{}:{}:{}: {} {} {}",
                file.path.display(),
                d.line,
                d.column,
                d.severity,
                d.code
                    .as_ref()
                    .map(|c| format!("[{c}]"))
                    .unwrap_or_default(),
                d.message
            );
        }
    }
    println!(
        "summary: {} errors, {} warnings",
        report.summary.errors, report.summary.warnings
    );
    Ok(())
}
