// glossa-derive: Derived forms of words.
//
// Applies one derivation rule to each word and prints the derived form.
// Without --rule, lists the grammar's derivation rules.
//
// Usage:
//   glossa-derive [--rule ID] [WORD...]
//
// Options:
//   -g, --grammar PATH     Grammar document (default: $GLOSSA_GRAMMAR or ./grammar.json)
//   -p, --phonology PATH   Phonology document (default: $GLOSSA_PHONOLOGY or ./phonology.json)
//   -r, --rule ID          Derivation rule id
//   -h, --help             Print help

use std::io::{self, Write};

fn main() {
    glossa_cli::init_logging();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let (paths, args) = glossa_cli::parse_document_paths(&args);
    let (rule_id, args) = glossa_cli::take_option(&args, "-r", "--rule");

    if glossa_cli::wants_help(&args) {
        println!("glossa-derive: Derived forms of words.");
        println!();
        println!("Usage: glossa-derive [--rule ID] [WORD...]");
        println!();
        println!("If WORD arguments are given, derives each word.");
        println!("Otherwise reads words from stdin (one per line).");
        println!("Without --rule, lists the available derivation rules.");
        println!();
        println!("Options:");
        println!("  -g, --grammar PATH     Grammar document");
        println!("  -p, --phonology PATH   Phonology document");
        println!("  -r, --rule ID          Derivation rule id");
        println!("  -h, --help             Print this help");
        return;
    }

    let handle = glossa_cli::load_handle(&paths).unwrap_or_else(|e| glossa_cli::fatal(&e));

    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());

    let Some(rule_id) = rule_id else {
        for rule in &handle.grammar().derivation_rules {
            let _ = writeln!(
                out,
                "{}: {} ({} -> {}) {}",
                rule.rule_id, rule.name, rule.source_pos_id, rule.target_pos_id, rule.semantic_note
            );
        }
        return;
    };
    if handle.grammar().derivation_rule(&rule_id).is_none() {
        glossa_cli::fatal(&format!("no derivation rule with id {rule_id}"));
    }

    glossa_cli::for_each_word(&args, |word| match handle.derive(word, &rule_id) {
        Ok(outcome) => {
            let _ = writeln!(out, "{word} -> {}", outcome.result);
            let _ = writeln!(out, "  {}", outcome.trace);
        }
        Err(e) => glossa_cli::fatal(&e.to_string()),
    });
}
