// glossa-paradigm: Paradigm tables for words.
//
// Prints one row per enabled rule of the part of speech, each applied to
// the bare root. With --matrix, prints the typology-aware form for every
// combination of the part of speech's dimensions instead.
//
// Usage:
//   glossa-paradigm --pos POS [--matrix] [WORD...]
//
// Options:
//   -g, --grammar PATH     Grammar document (default: $GLOSSA_GRAMMAR or ./grammar.json)
//   -p, --phonology PATH   Phonology document (default: $GLOSSA_PHONOLOGY or ./phonology.json)
//   -P, --pos POS          Part of speech of the words
//   -m, --matrix           Print the inflection matrix
//   -h, --help             Print help

use std::io::{self, Write};

use glossa_core::rule::DimensionValues;

fn format_dims(dims: &DimensionValues) -> String {
    if dims.is_empty() {
        return "-".to_string();
    }
    dims.iter()
        .map(|(d, v)| format!("{d}={v}"))
        .collect::<Vec<_>>()
        .join(",")
}

fn main() {
    glossa_cli::init_logging();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let (paths, args) = glossa_cli::parse_document_paths(&args);
    let (pos, args) = glossa_cli::take_option(&args, "-P", "--pos");

    if glossa_cli::wants_help(&args) {
        println!("glossa-paradigm: Paradigm tables for words.");
        println!();
        println!("Usage: glossa-paradigm --pos POS [--matrix] [WORD...]");
        println!();
        println!("If WORD arguments are given, prints a table for each word.");
        println!("Otherwise reads words from stdin (one per line).");
        println!();
        println!("Options:");
        println!("  -g, --grammar PATH     Grammar document");
        println!("  -p, --phonology PATH   Phonology document");
        println!("  -P, --pos POS          Part of speech of the words");
        println!("  -m, --matrix           Print the inflection matrix");
        println!("  -h, --help             Print this help");
        return;
    }

    let matrix = args.iter().any(|a| a == "--matrix" || a == "-m");
    let pos = pos.unwrap_or_else(|| glossa_cli::fatal("--pos is required"));
    let handle = glossa_cli::load_handle(&paths).unwrap_or_else(|e| glossa_cli::fatal(&e));

    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());

    glossa_cli::for_each_word(&args, |word| {
        let _ = writeln!(out, "{word}:");
        if matrix {
            let cells = handle.inflection_matrix(word, word, &pos);
            if cells.is_empty() {
                let _ = writeln!(out, "  (no dimensions for {pos})");
            }
            for cell in cells {
                let mark = if cell.outcome.applied { ' ' } else { '*' };
                let _ = writeln!(
                    out,
                    "  {:<28} {mark}{:<20} {}",
                    format_dims(&cell.dimension_values),
                    cell.outcome.result,
                    cell.outcome.trace
                );
            }
        } else {
            let cells = handle.paradigm(word, &pos);
            if cells.is_empty() {
                let _ = writeln!(out, "  (no rules for {pos})");
            }
            for cell in cells {
                let mark = if cell.applied { ' ' } else { '*' };
                let _ = writeln!(
                    out,
                    "  {:<8} {:<28} {mark}{:<20} {}",
                    cell.tag,
                    format_dims(&cell.dimension_values),
                    cell.result,
                    cell.trace
                );
            }
        }
    });
}
