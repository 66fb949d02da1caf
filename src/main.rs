mod index;
mod interactive;
mod loader;
mod logger;
mod tui;

use index::Result;

const USAGE: &str =
    "usage: docdex [--verbose|-v] [--tui] [--log <file>] <searchdata.js|search-dir> [prefix]";

fn main() -> Result<()> {
    let mut verbose = false;
    let mut use_tui = false;
    let mut log_path: Option<String> = None;
    let mut data_path: Option<String> = None;
    let mut query: Option<String> = None;

    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--verbose" | "-v" => {
                verbose = true;
            }
            "--tui" => {
                use_tui = true;
            }
            "--log" => {
                if let Some(path) = iter.next() {
                    log_path = Some(path);
                } else {
                    eprintln!("{}", USAGE);
                    std::process::exit(1);
                }
            }
            _ => {
                if data_path.is_none() {
                    data_path = Some(arg);
                } else if query.is_none() {
                    query = Some(arg);
                } else {
                    eprintln!("{}", USAGE);
                    std::process::exit(1);
                }
            }
        }
    }

    let data_path = match data_path {
        Some(p) => p,
        None => {
            eprintln!("{}", USAGE);
            std::process::exit(1);
        }
    };
    if !std::path::Path::new(&data_path).exists() {
        eprintln!("search data not found: {}", data_path);
        std::process::exit(1);
    }

    match &log_path {
        Some(path) => logger::global().init(path, verbose)?,
        None => logger::global().set_verbose(verbose),
    }

    let index = loader::load_index(std::path::Path::new(&data_path))?;
    if verbose {
        println!(
            "[docdex] {} | {} entries, {} references",
            data_path,
            index.len(),
            index.reference_count()
        );
    }

    if let Some(prefix) = query {
        interactive::run_prefix_query(&index, &prefix);
        return Ok(());
    }

    if use_tui {
        tui::run_tui(index, verbose)?;
        return Ok(());
    }

    println!("Loaded {} symbols. Type 'help' for commands.", index.len());
    interactive::repl(&index)?;
    Ok(())
}
