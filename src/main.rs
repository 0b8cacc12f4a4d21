use std::fs::{self, File};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::thread;

use anyhow::{anyhow, Context, Result};
use clap::Parser as ClapParser;
use clap::Subcommand;
use env_logger::Builder;
use log::{debug, info};

use rox::ast_printer::AstPrinter;
use rox::interpreter::MAX_CALL_DEPTH;
use rox::scanner::scan_tokens;
use rox::session::{RunError, Session, EXIT_STATIC};

#[derive(ClapParser, Debug)]
#[command(version, about = "Tree-walking interpreter for the rox scripting language", long_about = None)]
pub struct Cli {
    /// What to do; starts an interactive prompt when omitted
    #[command(subcommand)]
    commands: Option<Commands>,

    /// Enable logging to app.log
    #[arg(long, global = true)]
    log: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Tokenizes a file, printing each token
    Tokenize {
        filename: PathBuf,

        /// Print the tokens as a JSON array instead
        #[arg(long)]
        json: bool,
    },

    /// Parses a file as a single expression and prints its AST
    Parse {
        filename: PathBuf,

        /// Parse the file as a whole program, printing one statement per line
        #[arg(long)]
        program: bool,
    },

    /// Evaluates a file as a single expression and prints the result
    Evaluate { filename: PathBuf },

    /// Runs a file as a program
    Run { filename: PathBuf },

    /// Reads and runs one line at a time from stdin
    Repl,
}

fn read_file(filename: &Path) -> Result<String> {
    info!("Reading file: {:?}", filename);

    let source: String =
        fs::read_to_string(filename).with_context(|| format!("Failed to read file {:?}", filename))?;

    info!("Read {} bytes from {:?}", source.len(), filename);

    Ok(source)
}

fn init_logger() -> Result<()> {
    let log_file = File::create("app.log").context("Failed to create app.log")?;

    Builder::new()
        .format(|buf, record| {
            // Strip the crate prefix from module paths
            let module = record
                .module_path()
                .unwrap_or("<unnamed>")
                .strip_prefix("rox::")
                .unwrap_or(record.module_path().unwrap_or("<unnamed>"));
            writeln!(
                buf,
                "[{}:{}] - {}",
                module,
                record.line().unwrap_or(0),
                record.args()
            )
        })
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .filter(None, log::LevelFilter::Debug) // overridable with RUST_LOG
        .parse_default_env()
        .init();

    info!("Logger initialized, writing to app.log");
    Ok(())
}

/// Print every diagnostic of a failed run and return its exit status.
fn report(error: &RunError) -> i32 {
    debug!("Run failed: {:?}", error);

    for diagnostic in error.diagnostics() {
        eprintln!("{}", diagnostic);
    }

    error.exit_code()
}

fn tokenize(filename: &Path, json: bool) -> Result<i32> {
    let source = read_file(filename)?;
    let (tokens, errors) = scan_tokens(&source);

    for error in &errors {
        eprintln!("{}", error);
    }

    if json {
        let dump = serde_json::to_string_pretty(&tokens).context("Failed to serialize tokens")?;
        println!("{}", dump);
    } else {
        for token in &tokens {
            println!("{}", token);
        }
    }

    Ok(if errors.is_empty() { 0 } else { EXIT_STATIC })
}

fn repl() -> Result<i32> {
    info!("Starting REPL");

    let mut session = Session::new();
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print!("> ");
        io::stdout().flush().context("Failed to flush prompt")?;

        let Some(line) = lines.next() else {
            break;
        };
        let line: String = line.context("Failed to read from stdin")?;

        if let Err(e) = session.run(&line) {
            report(&e);
        }
    }

    println!();
    Ok(0)
}

/// Host stack for the interpreter thread, sized so that `MAX_CALL_DEPTH`
/// nested calls fit even in debug builds.
const INTERPRETER_STACK_SIZE: usize = 64 * 1024 * 1024;

fn main() -> Result<()> {
    let args: Cli = Cli::parse();

    if args.log {
        init_logger()?;
    } else {
        env_logger::Builder::new()
            .filter_level(log::LevelFilter::Off)
            .init();
    }

    info!("CLI arguments: {:?}", args);
    debug!("Call depth limited to {}", MAX_CALL_DEPTH);

    let code: i32 = thread::Builder::new()
        .name("rox".into())
        .stack_size(INTERPRETER_STACK_SIZE)
        .spawn(move || execute(args))
        .context("Failed to spawn interpreter thread")?
        .join()
        .map_err(|_| anyhow!("Interpreter thread panicked"))??;

    if code != 0 {
        debug!("Exiting with code {}", code);
        std::process::exit(code);
    }

    Ok(())
}

fn execute(args: Cli) -> Result<i32> {
    let code: i32 = match args.commands.unwrap_or(Commands::Repl) {
        Commands::Tokenize { filename, json } => tokenize(&filename, json)?,

        Commands::Parse {
            filename,
            program: true,
        } => {
            let source = read_file(&filename)?;
            match Session::new().parse_program(&source) {
                Ok(statements) => {
                    for stmt in &statements {
                        println!("{}", AstPrinter::print_stmt(stmt));
                    }
                    0
                }
                Err(e) => report(&e),
            }
        }

        Commands::Parse { filename, .. } => {
            let source = read_file(&filename)?;
            match Session::new().parse_expression(&source) {
                Ok(expr) => {
                    println!("{}", AstPrinter::print(&expr));
                    0
                }
                Err(e) => report(&e),
            }
        }

        Commands::Evaluate { filename } => {
            let source = read_file(&filename)?;
            match Session::new().evaluate_expression(&source) {
                Ok(value) => {
                    println!("{}", value);
                    0
                }
                Err(e) => report(&e),
            }
        }

        Commands::Run { filename } => {
            let source = read_file(&filename)?;
            match Session::new().run(&source) {
                Ok(()) => {
                    info!("Program executed successfully");
                    0
                }
                Err(e) => report(&e),
            }
        }

        Commands::Repl => repl()?,
    };

    Ok(code)
}
