use anyhow::{Context, Result};
use realtybook::cli;
use realtybook::config::Config;
use realtybook::context::{AppContext, StandardContext};
use realtybook::controller::RecordController;
use std::env;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    let binary_name = args.first().map(String::as_str).unwrap_or("realtybook");

    if args.iter().skip(1).any(|a| a == "--help" || a == "-h") {
        cli::print_help(binary_name);
        return Ok(());
    }

    let mut root: Option<PathBuf> = None;
    let mut rest = args.iter().skip(1);
    while let Some(arg) = rest.next() {
        match arg.as_str() {
            "--root" | "-r" => {
                let path = rest.next().context("--root needs a path")?;
                root = Some(PathBuf::from(path));
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                cli::print_help(binary_name);
                std::process::exit(2);
            }
        }
    }

    let ctx: Arc<dyn AppContext> = Arc::new(StandardContext::new(root));
    let config = Config::load_or_default(ctx.as_ref());
    if let Err(e) = realtybook::logging::init(ctx.as_ref(), config.log_level) {
        eprintln!("Logging disabled: {:#}", e);
    }
    log::info!("Starting realtybook v{}", env!("CARGO_PKG_VERSION"));

    let mut controller = RecordController::open(ctx, &config)?;
    run(&mut controller, &config)
}

fn print_views(controller: &RecordController) {
    print!("{}", cli::render_persons(controller.store()));
    print!("{}", cli::render_listings(controller.store()));
}

fn run(controller: &mut RecordController, config: &Config) -> Result<()> {
    if config.show_lists_after_command {
        print_views(controller);
    }

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut lines = stdin.lock().lines();
    loop {
        print!("> ");
        stdout.flush()?;
        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        match controller.execute(&line) {
            Ok(result) => {
                println!("{}", result.feedback);
                if result.exit {
                    break;
                }
                if result.show_help {
                    println!("{}", cli::command_reference());
                } else if config.show_lists_after_command {
                    print_views(controller);
                }
            }
            Err(e) => println!("{}", e),
        }
    }
    log::info!("Shutting down");
    Ok(())
}
