use anyhow::{anyhow, Context, Result};
use clap::{Args, Parser, Subcommand};
use search_core::{
    paginate, DocId, Document, DocumentStatus, RequestQueue, SearchConfig, SearchServer,
    StopWords,
};
use serde::{Deserialize, Serialize};
use walkdir::WalkDir;

use std::fs::{self, File};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "search-cli")]
#[command(about = "Rank short text documents with TF-IDF", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Read stop words, documents and a query as lines and print the top documents
    Search {
        /// Input file; stdin when omitted
        #[arg(long)]
        input: Option<PathBuf>,
        /// Print one JSON object per result instead of the text form
        #[arg(long, default_value_t = false)]
        json: bool,
        #[command(flatten)]
        tuning: Tuning,
    },
    /// Index JSON/JSONL documents and run every query line through the request queue
    Batch {
        /// Document file (.json or .jsonl) or a directory containing them
        #[arg(long)]
        docs: PathBuf,
        /// Space-delimited stop words
        #[arg(long, default_value = "")]
        stop_words: String,
        /// Query file, one query per line; stdin when omitted
        #[arg(long)]
        queries: Option<PathBuf>,
        /// Only return documents with this status
        #[arg(long, default_value_t = DocumentStatus::Active)]
        status: DocumentStatus,
        /// Results per printed page
        #[arg(long, default_value_t = 2)]
        page_size: usize,
        #[arg(long, default_value_t = false)]
        json: bool,
        #[command(flatten)]
        tuning: Tuning,
    },
}

/// Engine tunables. Flags override the config file, which overrides the defaults.
#[derive(Args, Debug, Clone, Default)]
pub struct Tuning {
    /// JSON file with `max_result_document_count` and/or `request_window`
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Maximum number of documents returned per query
    #[arg(long)]
    pub max_results: Option<usize>,
    /// Number of recent requests tracked by the request queue
    #[arg(long)]
    pub window: Option<usize>,
}

impl Tuning {
    pub fn resolve(&self) -> Result<SearchConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let json = fs::read_to_string(path)
                    .with_context(|| format!("reading config {}", path.display()))?;
                SearchConfig::from_json_str(&json)
                    .with_context(|| format!("parsing config {}", path.display()))?
            }
            None => SearchConfig::default(),
        };
        if let Some(max_results) = self.max_results {
            config.max_result_document_count = max_results;
        }
        if let Some(window) = self.window {
            config.request_window = window;
        }
        config.validate()?;
        Ok(config)
    }
}

/// Document record accepted by `batch`.
#[derive(Debug, Deserialize)]
pub struct InputDoc {
    pub id: DocId,
    #[serde(alias = "body")]
    pub text: String,
    #[serde(default)]
    pub status: DocumentStatus,
    #[serde(default)]
    pub rating: i32,
}

#[derive(Serialize)]
struct QueryOutput<'a> {
    query: &'a str,
    results: &'a [Document],
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BatchSummary {
    pub queries: usize,
    pub failed: usize,
    pub no_result_requests: usize,
}

pub fn run(cli: Cli, stdin: impl BufRead, out: &mut impl Write) -> Result<()> {
    match cli.command {
        Commands::Search { input, json, tuning } => {
            let config = tuning.resolve()?;
            match input {
                Some(path) => {
                    let f = File::open(&path)
                        .with_context(|| format!("opening input {}", path.display()))?;
                    run_search(BufReader::new(f), out, config, json)
                }
                None => run_search(stdin, out, config, json),
            }
        }
        Commands::Batch { docs, stop_words, queries, status, page_size, json, tuning } => {
            let config = tuning.resolve()?;
            let mut server = SearchServer::with_config(StopWords::parse(&stop_words), config)?;
            for doc in load_documents(&docs)? {
                server
                    .add_document(doc.id, &doc.text, doc.status, doc.rating)
                    .with_context(|| format!("indexing {}", docs.display()))?;
            }
            tracing::info!(num_docs = server.document_count(), "documents indexed");

            let opts = BatchOptions { status, page_size, json };
            let summary = match queries {
                Some(path) => {
                    let f = File::open(&path)
                        .with_context(|| format!("opening queries {}", path.display()))?;
                    run_batch(&server, BufReader::new(f), out, &opts)?
                }
                None => run_batch(&server, stdin, out, &opts)?,
            };
            tracing::info!(
                queries = summary.queries,
                failed = summary.failed,
                no_result_requests = summary.no_result_requests,
                "batch complete"
            );
            Ok(())
        }
    }
}

/// Line protocol: stop words, document count, that many documents, one query.
/// Documents get sequential ids from 0, status `Active` and rating 0.
pub fn run_search<R: BufRead, W: Write>(
    mut reader: R,
    out: &mut W,
    config: SearchConfig,
    json: bool,
) -> Result<()> {
    let stop_words = read_line(&mut reader)?.unwrap_or_default();
    let count_line = read_line(&mut reader)?.ok_or_else(|| anyhow!("missing document count"))?;
    let document_count: DocId = count_line
        .trim()
        .parse()
        .with_context(|| format!("invalid document count {count_line:?}"))?;

    let mut server = SearchServer::with_config(StopWords::parse(&stop_words), config)?;
    for id in 0..document_count {
        let text = read_line(&mut reader)?
            .ok_or_else(|| anyhow!("expected {document_count} documents, got {id}"))?;
        server.add_document(id, &text, DocumentStatus::Active, 0)?;
    }

    let query = read_line(&mut reader)?.unwrap_or_default();
    for doc in server.find_top_documents(&query)? {
        write_document(out, &doc, json)?;
    }
    Ok(())
}

pub struct BatchOptions {
    pub status: DocumentStatus,
    pub page_size: usize,
    pub json: bool,
}

/// Run each non-blank query line through a request queue and print the results.
/// Rejected queries are logged and skipped.
pub fn run_batch<R: BufRead, W: Write>(
    server: &SearchServer,
    queries: R,
    out: &mut W,
    opts: &BatchOptions,
) -> Result<BatchSummary> {
    let mut queue = RequestQueue::new(server);
    let mut summary = BatchSummary::default();

    for line in queries.lines() {
        let line = line?;
        let query = line.trim_end_matches('\r');
        if query.trim().is_empty() {
            continue;
        }
        summary.queries += 1;
        let results = match queue.add_find_request_by_status(query, opts.status) {
            Ok(results) => results,
            Err(err) => {
                tracing::error!(query, %err, "skipping query");
                summary.failed += 1;
                continue;
            }
        };

        if opts.json {
            let json = serde_json::to_string(&QueryOutput { query, results: &results })?;
            writeln!(out, "{json}")?;
            continue;
        }
        writeln!(out, "query: {query}")?;
        let pages = paginate(&results, opts.page_size);
        let num_pages = pages.len();
        for (i, page) in pages.into_iter().enumerate() {
            writeln!(out, "page {}/{}", i + 1, num_pages)?;
            for doc in page {
                writeln!(out, "{doc}")?;
            }
        }
    }

    summary.no_result_requests = queue.no_result_requests();
    writeln!(out, "no-result requests: {}", summary.no_result_requests)?;
    Ok(summary)
}

/// Load documents from a `.json` (array or single object) or `.jsonl` file, or from
/// every such file under a directory, in path order.
pub fn load_documents(path: &Path) -> Result<Vec<InputDoc>> {
    let mut files: Vec<PathBuf> = Vec::new();
    if path.is_dir() {
        for entry in WalkDir::new(path).sort_by_file_name().into_iter().filter_map(|e| e.ok()) {
            let p = entry.path();
            if p.is_file() && matches!(extension(p), Some("json" | "jsonl")) {
                files.push(p.to_path_buf());
            }
        }
    } else {
        files.push(path.to_path_buf());
    }

    let mut docs = Vec::new();
    for file in files {
        if extension(&file) == Some("jsonl") {
            read_jsonl(&file, &mut docs)?;
        } else {
            read_json(&file, &mut docs)?;
        }
    }
    Ok(docs)
}

fn read_jsonl(file: &Path, docs: &mut Vec<InputDoc>) -> Result<()> {
    let f = File::open(file).with_context(|| format!("opening {}", file.display()))?;
    for (n, line) in BufReader::new(f).lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let doc: InputDoc = serde_json::from_str(&line)
            .with_context(|| format!("{}:{}", file.display(), n + 1))?;
        docs.push(doc);
    }
    Ok(())
}

fn read_json(file: &Path, docs: &mut Vec<InputDoc>) -> Result<()> {
    let f = File::open(file).with_context(|| format!("opening {}", file.display()))?;
    let json: serde_json::Value = serde_json::from_reader(BufReader::new(f))
        .with_context(|| format!("parsing {}", file.display()))?;
    match json {
        serde_json::Value::Array(arr) => {
            for v in arr {
                docs.push(serde_json::from_value(v)?);
            }
        }
        serde_json::Value::Object(_) => docs.push(serde_json::from_value(json)?),
        _ => tracing::warn!(file = %file.display(), "ignoring non-document json"),
    }
    Ok(())
}

fn extension(path: &Path) -> Option<&str> {
    path.extension().and_then(|s| s.to_str())
}

fn read_line<R: BufRead>(reader: &mut R) -> Result<Option<String>> {
    let mut line = String::new();
    if reader.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    let trimmed = line.trim_end_matches(['\n', '\r']).len();
    line.truncate(trimmed);
    Ok(Some(line))
}

fn write_document<W: Write>(out: &mut W, doc: &Document, json: bool) -> Result<()> {
    if json {
        writeln!(out, "{}", serde_json::to_string(doc)?)?;
    } else {
        writeln!(out, "{doc}")?;
    }
    Ok(())
}
