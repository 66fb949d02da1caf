use crate::index::{Reference, Result, SymbolIndex};
use std::io::{self, Write};
use std::time::Instant;

pub fn repl(index: &SymbolIndex) -> Result<()> {
    println!("Commands: find <prefix> | get <key> | scopes | stats | help | quit");
    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        print!("docdex> ");
        io::stdout().flush()?;
        line.clear();
        if stdin.read_line(&mut line)? == 0 {
            println!();
            break;
        }
        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        let mut parts = input.splitn(2, char::is_whitespace);
        let cmd = parts.next().unwrap_or("").trim();
        let rest = parts.next().unwrap_or("").trim();
        match cmd {
            "quit" | "q" => break,
            "help" => print_help(),
            "find" | "f" => run_prefix_query(index, rest),
            "get" | "g" => {
                if rest.is_empty() {
                    println!("usage: get <key>");
                    continue;
                }
                let t0 = Instant::now();
                let refs = index.lookup_exact(rest);
                crate::logger::log_debug(&format!(
                    "[repl] get '{}': {} reference(s) in {}us",
                    rest,
                    refs.len(),
                    t0.elapsed().as_micros()
                ));
                if refs.is_empty() {
                    println!("no matches for '{}'", rest);
                } else {
                    print_references(rest, &refs);
                }
            }
            "scopes" => print_scopes(index),
            "stats" => print_stats(index),
            _ => println!("unknown command: '{}'", input),
        }
    }
    Ok(())
}

/// One-shot prefix query for the CLI path; also backs the REPL `find` command.
pub fn run_prefix_query(index: &SymbolIndex, prefix: &str) {
    let t0 = Instant::now();
    let hits = index.lookup_prefix(prefix);
    crate::logger::log_debug(&format!(
        "[query] prefix '{}': {} hit(s) in {}us",
        prefix,
        hits.len(),
        t0.elapsed().as_micros()
    ));
    if hits.is_empty() {
        println!("no matches for prefix '{}'", prefix);
        return;
    }
    let mut current_key: Option<&str> = None;
    for (key, reference) in hits.iter().copied() {
        if current_key != Some(key) {
            println!("{}", key);
            current_key = Some(key);
        }
        print_reference_line(reference);
    }
    println!("({} references)", hits.len());
}

fn print_help() {
    println!("Commands:");
    println!("  find <prefix> | f  - list symbols starting with <prefix> (empty lists all)");
    println!("  get <key> | g      - show every reference for an exact symbol name");
    println!("  scopes             - list owning scopes with reference counts");
    println!("  stats              - index size summary");
    println!("  help               - show this message");
    println!("  quit | q           - exit");
}

fn print_references(key: &str, refs: &[&Reference]) {
    println!("{} ({} reference(s))", key, refs.len());
    for reference in refs {
        print_reference_line(reference);
    }
}

fn print_reference_line(reference: &Reference) {
    let scope = reference.scope.as_deref().unwrap_or("-");
    println!(
        "  {:<50} [{}] -> {}",
        reference.label, scope, reference.locator
    );
}

fn print_scopes(index: &SymbolIndex) {
    let scopes = index.scopes();
    if scopes.is_empty() {
        println!("no scoped symbols");
        return;
    }
    for (scope, count) in &scopes {
        println!("  {:<40} {}", scope, count);
    }
    println!("({} scopes)", scopes.len());
}

fn print_stats(index: &SymbolIndex) {
    println!(
        "{} entries, {} references, {} scopes",
        index.len(),
        index.reference_count(),
        index.scopes().len()
    );
}
