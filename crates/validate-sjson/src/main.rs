mod error_conversion;

use anyhow::{Context, Result};
use clap::Parser;
use sjson::{
    Document, Error, ParseOptions, Value, breadcrumbs, materialize_all, parse_strict,
    parse_with_options, query_at, structured,
};
use sjson_error_reporting::DiagnosticMessage;
use sjson_source_map::SourceContext;
use std::fs;
use std::path::PathBuf;
use std::process;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use error_conversion::parse_error_to_diagnostic;

/// Parse an SJSON document and report its problems
#[derive(Parser, Debug)]
#[command(name = "validate-sjson")]
#[command(about = "Parse SJSON documents and materialize their tables", long_about = None)]
struct Args {
    /// Path to the SJSON document
    #[arg(long, value_name = "FILE")]
    input: PathBuf,

    /// Stop at the first fatal error
    #[arg(long)]
    strict: bool,

    /// Materialize table sections and report their diagnostics too
    #[arg(long)]
    materialize: bool,

    /// Print the (raw or materialized) tree as JSON on stdout
    #[arg(long)]
    json: bool,

    /// Include node ids, ranges, kinds and comments in `--json` output
    #[arg(long, requires = "json")]
    annotate: bool,

    /// Print the nodes under a 1-based LINE:COL position
    #[arg(long, value_name = "LINE:COL", value_parser = parse_position)]
    query: Option<(usize, usize)>,

    /// Record parent links so breadcrumbs can be shown
    #[arg(long)]
    back_references: bool,
}

/// `LINE:COL`, 1-based, to a 0-based pair.
fn parse_position(text: &str) -> std::result::Result<(usize, usize), String> {
    let (line, column) = text
        .split_once(':')
        .ok_or_else(|| format!("expected LINE:COL, got `{text}`"))?;
    let line: usize = line.trim().parse().map_err(|e| format!("bad line: {e}"))?;
    let column: usize = column
        .trim()
        .parse()
        .map_err(|e| format!("bad column: {e}"))?;
    if line == 0 || column == 0 {
        return Err("line and column start at 1".to_string());
    }
    Ok((line - 1, column - 1))
}

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match run() {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            process::exit(1);
        }
    }
}

/// Returns whether the document is free of errors.
fn run() -> Result<bool> {
    let args = Args::parse();

    let content = fs::read_to_string(&args.input)
        .with_context(|| format!("Failed to read input file: {}", args.input.display()))?;
    let path = args.input.display().to_string();

    let mut ctx = SourceContext::new();
    let file_id = ctx.add_file(path.clone(), Some(content.clone()));
    let options = ParseOptions::new()
        .with_origin(path.clone())
        .with_file_id(file_id)
        .with_back_references(args.back_references || args.query.is_some());

    let doc = if args.strict {
        match parse_strict(&content, &options) {
            Ok(doc) => doc,
            Err(Error::Parse(error)) => {
                let diagnostic = parse_error_to_diagnostic(&error, file_id);
                eprint!("{}", diagnostic.to_text(Some(&ctx)));
                return Ok(false);
            }
        }
    } else {
        parse_with_options(&content, &options)
    };

    let materialized = args.materialize.then(|| materialize_all(&doc));
    let diagnostics: &[DiagnosticMessage] = match &materialized {
        Some(m) => &m.diagnostics,
        None => doc.diagnostics(),
    };
    debug!(count = diagnostics.len(), "reporting diagnostics");
    for diagnostic in diagnostics {
        eprint!("{}", diagnostic.to_text(Some(&ctx)));
    }

    let tree = match &materialized {
        Some(m) => m.to_value(),
        None => doc.root().clone(),
    };

    if args.json {
        let json = if args.annotate {
            doc.annotate(&tree)
        } else {
            serde_json::to_value(&tree).context("Failed to serialize document")?
        };
        println!("{}", serde_json::to_string_pretty(&json)?);
    }

    if let Some((line, column)) = args.query {
        print_query(&doc, &tree, line, column);
    }

    let clean = !diagnostics.iter().any(DiagnosticMessage::is_error);
    if clean && !args.json && args.query.is_none() {
        println!("✓ No errors in {}", path);
    }
    Ok(clean)
}

fn print_query(doc: &Document, tree: &Value, line: usize, column: usize) {
    println!("Nodes at {}:{}", line + 1, column + 1);
    for node in query_at(doc, line, column) {
        let range = node.range;
        let trail = breadcrumbs(doc, node.id)
            .map(|b| b.text())
            .unwrap_or_default();
        println!(
            "  #{} {:?} depth {} [{}:{}-{}:{}] {}",
            node.id.0,
            node.kind,
            node.depth,
            range.start.row + 1,
            range.start.column + 1,
            range.end.row + 1,
            range.end.column + 1,
            trail
        );
    }

    let hits = structured::query_at(tree, line, column);
    if let Some(hit) = hits.first() {
        println!("Structured path: {}", hit.breadcrumbs.text());
    }
}
