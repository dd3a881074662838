// glossa-inflect: Typology-aware inflection of words.
//
// Inflects each word for one dimension-value combination, combining rules
// the way the grammar's typology says, and prints the form with its trace.
//
// Usage:
//   glossa-inflect --pos POS [--entry ID] [--dim DIM=VAL]... [WORD...]
//
// Options:
//   -g, --grammar PATH     Grammar document (default: $GLOSSA_GRAMMAR or ./grammar.json)
//   -p, --phonology PATH   Phonology document (default: $GLOSSA_PHONOLOGY or ./phonology.json)
//   -P, --pos POS          Part of speech of the words
//   -e, --entry ID         Lexicon entry id, used for irregular overrides
//   -D, --dim DIM=VAL      Requested dimension value (repeatable)
//   -h, --help             Print help

use std::io::{self, Write};

fn main() {
    glossa_cli::init_logging();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let (paths, args) = glossa_cli::parse_document_paths(&args);
    let (pos, args) = glossa_cli::take_option(&args, "-P", "--pos");
    let (entry, args) = glossa_cli::take_option(&args, "-e", "--entry");
    let (dim_specs, args) = glossa_cli::take_repeated(&args, "-D", "--dim");

    if glossa_cli::wants_help(&args) {
        println!("glossa-inflect: Typology-aware inflection of words.");
        println!();
        println!("Usage: glossa-inflect --pos POS [--entry ID] [--dim DIM=VAL]... [WORD...]");
        println!();
        println!("If WORD arguments are given, inflects each word.");
        println!("Otherwise reads words from stdin (one per line).");
        println!();
        println!("Options:");
        println!("  -g, --grammar PATH     Grammar document");
        println!("  -p, --phonology PATH   Phonology document");
        println!("  -P, --pos POS          Part of speech of the words");
        println!("  -e, --entry ID         Lexicon entry id, used for irregular overrides");
        println!("  -D, --dim DIM=VAL      Requested dimension value (repeatable)");
        println!("  -h, --help             Print this help");
        return;
    }

    let pos = pos.unwrap_or_else(|| glossa_cli::fatal("--pos is required"));
    let dims = glossa_cli::parse_dimensions(&dim_specs).unwrap_or_else(|e| glossa_cli::fatal(&e));
    let handle = glossa_cli::load_handle(&paths).unwrap_or_else(|e| glossa_cli::fatal(&e));

    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());

    glossa_cli::for_each_word(&args, |word| {
        // Without an entry id the word itself stands in for one.
        let entry_id = entry.as_deref().unwrap_or(word);
        let outcome = handle.inflect(word, entry_id, &pos, &dims);
        if outcome.applied {
            let _ = writeln!(out, "{word} -> {}", outcome.result);
        } else {
            let _ = writeln!(out, "{word} -> (unchanged)");
        }
        let _ = writeln!(out, "  {}", outcome.trace);
    });
}
