// glossa-cli: shared utilities for CLI tools.

use std::io::{self, BufRead};
use std::path::{Path, PathBuf};
use std::process;

use tracing::debug;
use tracing_subscriber::EnvFilter;

use glossa_core::rule::DimensionValues;
use glossa_morph::MorphHandle;

/// Grammar document looked up in the current directory.
const GRAMMAR_FILE: &str = "grammar.json";

/// Phonology document looked up in the current directory.
const PHONOLOGY_FILE: &str = "phonology.json";

/// Environment variable holding the log filter.
const LOG_ENV: &str = "GLOSSA_LOG";

/// Install a stderr log subscriber filtered by `GLOSSA_LOG` (default `warn`).
pub fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    // A subscriber may already be installed by an embedding process.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

/// Paths given with `-g/--grammar` and `-p/--phonology`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentPaths {
    pub grammar: Option<String>,
    pub phonology: Option<String>,
}

/// Pull the document options out of the command line.
///
/// Returns `(paths, remaining_args)`.
pub fn parse_document_paths(args: &[String]) -> (DocumentPaths, Vec<String>) {
    let (grammar, rest) = take_option(args, "-g", "--grammar");
    let (phonology, rest) = take_option(&rest, "-p", "--phonology");
    (DocumentPaths { grammar, phonology }, rest)
}

/// Load the grammar and phonology documents and build a handle.
///
/// Each document is searched for in this order:
/// 1. the command-line path (if provided)
/// 2. `GLOSSA_GRAMMAR` / `GLOSSA_PHONOLOGY`
/// 3. `grammar.json` / `phonology.json` in the current directory
pub fn load_handle(paths: &DocumentPaths) -> Result<MorphHandle, String> {
    let grammar_path = locate(paths.grammar.as_deref(), "GLOSSA_GRAMMAR", GRAMMAR_FILE)?;
    let phonology_path = locate(paths.phonology.as_deref(), "GLOSSA_PHONOLOGY", PHONOLOGY_FILE)?;
    debug!(grammar = %grammar_path.display(), phonology = %phonology_path.display(), "loading documents");

    let grammar = read(&grammar_path)?;
    let phonology = read(&phonology_path)?;
    let handle = MorphHandle::from_json(&grammar, &phonology)
        .map_err(|e| format!("failed to load {}: {e}", grammar_path.display()))?;

    for rejected in &handle.grammar().rejected_rules {
        eprintln!("warning: skipped {}", rejected.reason);
    }
    Ok(handle)
}

fn locate(explicit: Option<&str>, env_var: &str, file_name: &str) -> Result<PathBuf, String> {
    let mut candidates = Vec::new();
    if let Some(p) = explicit {
        candidates.push(PathBuf::from(p));
    }
    if let Ok(p) = std::env::var(env_var) {
        candidates.push(PathBuf::from(p));
    }
    if let Ok(cwd) = std::env::current_dir() {
        candidates.push(cwd.join(file_name));
    }

    if let Some(found) = candidates.iter().find(|p| p.is_file()) {
        return Ok(found.clone());
    }
    Err(format!(
        "could not find {file_name} in any of the search paths:\n{}",
        candidates
            .iter()
            .map(|p| format!("  - {}", p.display()))
            .collect::<Vec<_>>()
            .join("\n")
    ))
}

fn read(path: &Path) -> Result<String, String> {
    std::fs::read_to_string(path).map_err(|e| format!("failed to read {}: {e}", path.display()))
}

/// Remove `SHORT VALUE`, `LONG VALUE` or `LONG=VALUE` from `args`. The last
/// occurrence wins.
///
/// Returns `(value, remaining_args)`.
pub fn take_option(args: &[String], short: &str, long: &str) -> (Option<String>, Vec<String>) {
    let (mut values, rest) = take_repeated(args, short, long);
    (values.pop(), rest)
}

/// Like [`take_option`], collecting every occurrence in order.
pub fn take_repeated(args: &[String], short: &str, long: &str) -> (Vec<String>, Vec<String>) {
    let mut values = Vec::new();
    let mut remaining = Vec::new();
    let mut iter = args.iter();
    let long_eq = format!("{long}=");

    while let Some(arg) = iter.next() {
        if let Some(val) = arg.strip_prefix(&long_eq) {
            values.push(val.to_string());
        } else if arg == short || arg == long {
            match iter.next() {
                Some(val) => values.push(val.clone()),
                None => fatal(&format!("{arg} requires a value")),
            }
        } else {
            remaining.push(arg.clone());
        }
    }

    (values, remaining)
}

/// Parse `--dim` values of the form `DIM=VAL` into a dimension map.
pub fn parse_dimensions(specs: &[String]) -> Result<DimensionValues, String> {
    let mut dims = DimensionValues::new();
    for spec in specs {
        match spec.split_once('=') {
            Some((dim, val)) if !dim.is_empty() && !val.is_empty() => {
                dims.insert(dim.to_string(), val.to_string());
            }
            _ => return Err(format!("invalid dimension {spec:?}, expected DIM=VAL")),
        }
    }
    Ok(dims)
}

/// Positional words, or stdin lines (one word per line) when there are none.
pub fn for_each_word(args: &[String], mut f: impl FnMut(&str)) {
    let words: Vec<&String> = args.iter().filter(|a| !a.starts_with('-')).collect();
    if !words.is_empty() {
        for word in words {
            f(word);
        }
        return;
    }

    for line in io::stdin().lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(e) => {
                eprintln!("error reading stdin: {e}");
                break;
            }
        };
        let word = line.trim();
        if !word.is_empty() {
            f(word);
        }
    }
}

/// Print an error message and exit with code 1.
pub fn fatal(msg: &str) -> ! {
    eprintln!("error: {msg}");
    process::exit(1);
}

/// Check if `--help` or `-h` is in the args.
pub fn wants_help(args: &[String]) -> bool {
    args.iter().any(|a| a == "--help" || a == "-h")
}
