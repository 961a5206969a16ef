use std::env;
use std::fs;

use miette::IntoDiagnostic;
use miette::NamedSource;
use miette::Report;
use miette::WrapErr;
use tracing_subscriber::EnvFilter;

use blparse::{lexer, parser, printer};

mod stages;
use stages::Stages;

fn main() -> miette::Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("blparse=warn,warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let mut stage: Option<Stages> = None;
    let mut single = false;
    let mut filename: Option<String> = None;

    for arg in env::args().skip(1) {
        match arg.as_str() {
            "-h" | "--help" => {
                stages::print_help();
                return Ok(());
            }
            "-v" | "--version" => {
                println!("{} v{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
                return Ok(());
            }
            "--single" => single = true,
            option if option.starts_with("--") => {
                let stage_str = &option["--".len()..];
                match stage_str.parse::<Stages>() {
                    Err(()) => {
                        stages::print_help();
                        miette::bail!("Unexpected option \"{option}\"");
                    }
                    Ok(new_stage) => {
                        stage = Some(stage.map_or(new_stage, |old| old.max(new_stage)));
                    }
                }
            }
            other => match filename {
                None => filename = Some(other.to_string()),
                Some(existing) => {
                    stages::print_help();
                    miette::bail!("Passed multiple filenames! {existing} and {other}");
                }
            },
        };
    }

    let Some(filename) = filename else {
        stages::print_help();
        miette::bail!("Must provide a filename");
    };
    let stage = stage.unwrap_or(Stages::Render);
    tracing::debug!(file = %filename, %stage, single, "starting");

    let source = fs::read_to_string(&filename)
        .into_diagnostic()
        .wrap_err_with(|| format!("error reading {filename}"))?;
    let with_source =
        |report: Report| report.with_source_code(NamedSource::new(&filename, source.clone()));

    let tokens = lexer::lex(&source).map_err(|e| with_source(Report::new(e)))?;

    if stage == Stages::Lex {
        for token in tokens.iter() {
            println!("{}\t{}", token.span, token.inner);
        }
        return Ok(());
    }

    let tree = if single {
        parser::parse_statement(tokens)
    } else {
        parser::parse(tokens)
    }
    .map_err(|e| with_source(Report::new(e)))?;

    if stage == Stages::Parse {
        println!("{tree:#?}");
        return Ok(());
    }

    printer::pretty_print(&tree);
    Ok(())
}
