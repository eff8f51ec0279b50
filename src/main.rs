use std::{fs::read_to_string, path::PathBuf, process::ExitCode, rc::Rc, time::Instant};

use clap::Parser;
use log::{info, LevelFilter};
use pl0c::{
    ast::ast::Block, display_error, get_line_at_position, lexer::lexer::tokenize, parser::parser::parse,
    scope_checker::scope_checker::scope_check,
};

#[derive(Parser)]
#[command(name = "pl0c")]
#[command(about = "Check scoping of a PL/0 style block program")]
#[command(version)]
struct Cli {
    /// Source file to check
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// Print every resolved identifier use after a successful check
    #[arg(long)]
    dump_uses: bool,

    /// Log at debug level regardless of RUST_LOG
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut logger = env_logger::Builder::from_default_env();
    if cli.verbose {
        logger.filter_level(LevelFilter::Debug);
    }
    logger.init();

    let source = match read_to_string(&cli.input) {
        Ok(source) => source,
        Err(error) => {
            eprintln!("Error: failed to read {}: {}", cli.input.display(), error);
            return ExitCode::FAILURE;
        }
    };

    if run(&cli, &source) {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

/// Runs the pipeline, printing diagnostics. Returns whether the program passed.
fn run(cli: &Cli, source: &str) -> bool {
    let file_name = cli
        .input
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| cli.input.display().to_string());

    let start = Instant::now();

    let tokens = match tokenize(source.to_string(), Some(file_name.clone())) {
        Ok(tokens) => tokens,
        Err(error) => {
            display_error(&error, source, &cli.input);
            return false;
        }
    };
    info!("Tokenized in {:?}", start.elapsed());

    let parse_start = Instant::now();
    let ast = match parse(tokens, Rc::new(file_name)) {
        Ok(ast) => ast,
        Err(error) => {
            display_error(&error, source, &cli.input);
            return false;
        }
    };
    info!("Parsed in {:?}", parse_start.elapsed());

    let check_start = Instant::now();
    let checked = scope_check(ast);
    info!("Scope checked in {:?}", check_start.elapsed());

    match checked {
        Ok(block) => {
            if cli.dump_uses {
                dump_uses(&block, source);
            }
            info!("Total time: {:?}", start.elapsed());
            true
        }
        Err(errors) => {
            for error in errors.iter() {
                display_error(error, source, &cli.input);
            }
            eprintln!("{} error(s) found", errors.len());
            false
        }
    }
}

fn dump_uses(block: &Block, source: &str) {
    block.for_each_ident_use(|ident| {
        let location = match get_line_at_position(source, ident.get_position().0) {
            Some((line, _, column)) => format!("{}:{}", line, column + 1),
            None => String::from("?:?"),
        };

        match &ident.id_use {
            Some(id_use) => println!("{} {} -> {}", location, ident.name, id_use),
            None => println!("{} {} -> unresolved", location, ident.name),
        }
    });
}
