//! Line-oriented driver: the only presentation surface of the core.
//!
//! One command per line; every command runs to completion before the next
//! is read, so the dataset slot has one writer and no overlapping readers.

use std::io::Write;

use colored::Colorize;

use chart_validator::{ChartKind, Renderer, validate};
use dataset_store::DatasetStore;
use model_engine::{EngineConfig, OllamaEngine};
use prompt_composer::{AskOptions, SpinnerProgress, ask_with_opts};

use crate::render::JsonRenderer;

const HELP: &str = "\
commands:
  load <path>            load a delimited file (csv/tsv, header row required)
  columns                list the loaded columns and their types
  ask <question>         ask the local model, grounded in the loaded table
  ask! <question>        ask without table context
  plot <kind> <x> [y]    validate a chart request (bar|scatter|line|box)
  models                 list models installed on the local engine
  health                 probe the local engine
  quit";

pub async fn run() -> anyhow::Result<()> {
    println!("tabletalk: ask a local model about your data. `help` for commands.");

    let mut store = DatasetStore::new();
    let stdin = std::io::stdin();

    loop {
        print!("{} ", "tabletalk>".bold());
        std::io::stdout().flush()?;

        let mut line = String::new();
        if stdin.read_line(&mut line)? == 0 {
            break; // EOF
        }
        let line = line.trim();
        let (cmd, rest) = match line.split_once(char::is_whitespace) {
            Some((c, r)) => (c, r.trim()),
            None => (line, ""),
        };

        match cmd {
            "" => {}
            "help" => println!("{HELP}"),
            "quit" | "exit" => break,
            "load" => cmd_load(&mut store, rest),
            "columns" => cmd_columns(&store),
            "ask" => cmd_ask(&store, rest, true).await,
            "ask!" => cmd_ask(&store, rest, false).await,
            "plot" => cmd_plot(&store, rest),
            "models" => cmd_models().await,
            "health" => cmd_health().await,
            other => eprintln!("{}", format!("unknown command: {other} (try `help`)").red()),
        }
    }

    Ok(())
}

fn cmd_load(store: &mut DatasetStore, path: &str) {
    if path.is_empty() {
        eprintln!("{}", "usage: load <path>".red());
        return;
    }
    match store.load(path.as_ref()) {
        Ok(table) => {
            let s = table.summary();
            println!(
                "{}",
                format!("loaded {} rows x {} columns", s.rows, s.columns.len()).green()
            );
            cmd_columns(store);
        }
        Err(e) => eprintln!("{}", e.to_string().red()),
    }
}

fn cmd_columns(store: &DatasetStore) {
    let columns = store.current_columns();
    if columns.is_empty() {
        println!("no dataset loaded");
        return;
    }
    for (name, ty) in columns {
        println!("  {name}: {ty}");
    }
}

async fn cmd_ask(store: &DatasetStore, question: &str, with_context: bool) {
    if question.is_empty() {
        eprintln!("{}", "usage: ask <question>".red());
        return;
    }

    let opts = AskOptions {
        include_context: Some(with_context),
        budget_bytes: None,
    };
    let progress = SpinnerProgress::new();
    match ask_with_opts(question, store, opts, &progress).await {
        Ok(answer) => {
            println!("{}", answer.text);
            if answer.truncated {
                println!("{}", "note: table context was truncated to fit the budget".yellow());
            }
            if answer.context_omitted {
                println!(
                    "{}",
                    "note: table context omitted, header alone exceeds the budget".yellow()
                );
            }
        }
        Err(e) => eprintln!("{}", e.to_string().red()),
    }
}

fn cmd_plot(store: &DatasetStore, args: &str) {
    let parts: Vec<&str> = args.split_whitespace().collect();
    let [kind, columns @ ..] = parts.as_slice() else {
        eprintln!("{}", "usage: plot <kind> <x> [y]".red());
        return;
    };
    let kind: ChartKind = match kind.parse() {
        Ok(k) => k,
        Err(e) => {
            eprintln!("{}", e.red());
            return;
        }
    };

    let table = store.current_table();
    tracing::debug!(%kind, ?columns, "chart request");
    match validate(kind, columns, table.as_deref()) {
        Ok(spec) => {
            if let Some(table) = table.as_deref() {
                match JsonRenderer.render(&spec, table) {
                    Ok(path) => println!(
                        "{}",
                        format!("{} -> {}", spec.title(), path.display()).green()
                    ),
                    Err(e) => eprintln!("{}", e.to_string().red()),
                }
            }
        }
        Err(e) => eprintln!("{}", e.to_string().red()),
    }
}

async fn cmd_models() {
    match engine() {
        Ok(engine) => match engine.installed_models().await {
            Ok(models) if models.is_empty() => println!("no models installed"),
            Ok(models) => {
                for m in models {
                    println!("  {m}");
                }
            }
            Err(e) => eprintln!("{}", e.to_string().red()),
        },
        Err(e) => eprintln!("{}", e.to_string().red()),
    }
}

async fn cmd_health() {
    match engine() {
        Ok(engine) => {
            let status = engine.health().await;
            let line = format!(
                "{} ({}): {} [{} ms]",
                status.endpoint, status.model, status.message, status.latency_ms
            );
            if status.ok {
                println!("{}", line.green());
            } else {
                println!("{}", line.red());
            }
        }
        Err(e) => eprintln!("{}", e.to_string().red()),
    }
}

fn engine() -> Result<OllamaEngine, model_engine::ModelError> {
    OllamaEngine::new(EngineConfig::from_env()?)
}
