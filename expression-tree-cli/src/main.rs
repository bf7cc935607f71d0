mod command;

use crate::command::{execute, Command, Reply};
use anyhow::{Context, Result};
use clap::Parser;
use clap_verbosity_flag::Verbosity;
use expression_tree::session::{Settings, TreeContext};
use log::{debug, info};
use std::fs::File;
use std::io;
use std::io::{BufRead, BufReader, Write};
use std::path::PathBuf;

/// Builds, prints and evaluates arithmetic expression trees
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Arguments {
    /// File with one command per line. Commands are read from standard input if omitted
    script: Option<PathBuf>,
    /// Notation to select before the first command
    #[clap(short, long)]
    format: Option<String>,
    /// Fold constant subexpressions when building trees
    #[clap(long)]
    optimize: bool,
    #[clap(flatten)]
    verbose: Verbosity,
}

fn main() -> Result<()> {
    let args = Arguments::parse();
    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .init();
    debug!("{:?}", args);

    let mut session = TreeContext::with_settings(Settings {
        optimize: args.optimize,
    });
    if let Some(format) = &args.format {
        session
            .format(format)
            .with_context(|| format!("could not select format {:?}", format))?;
    }

    let interactive = args.script.is_none();
    let reader: Box<dyn BufRead> = match &args.script {
        Some(path) => Box::new(BufReader::new(
            File::open(path).with_context(|| format!("could not open script {:?}", path))?,
        )),
        None => Box::new(io::stdin().lock()),
    };

    run(&mut session, reader, interactive)
}

fn run(session: &mut TreeContext, reader: Box<dyn BufRead>, interactive: bool) -> Result<()> {
    prompt(interactive)?;
    for (index, line) in reader.lines().enumerate() {
        let line = line.context("could not read command")?;
        if !line.trim().is_empty() {
            let reply = line
                .parse::<Command>()
                .and_then(|command| execute(session, command));
            match reply {
                Ok(Reply::Output(output)) => println!("{}", output),
                Ok(Reply::Silent) => {}
                Ok(Reply::Quit) => break,
                Err(error) if interactive => eprintln!("error: {:#}", error),
                Err(error) => eprintln!("error on line {}: {:#}", index + 1, error),
            }
        }
        prompt(interactive)?;
    }
    info!("Session ended in state {}", session.state());
    Ok(())
}

fn prompt(interactive: bool) -> Result<()> {
    if interactive {
        print!("> ");
        io::stdout().flush().context("could not write prompt")?;
    }
    Ok(())
}
