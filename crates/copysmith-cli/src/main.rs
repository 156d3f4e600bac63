mod report;

use anyhow::{Context, Result, bail};
use copysmith_config::Config;
use copysmith_engine::content::CompiledMarkers;
use copysmith_engine::markdown::render_html;
use copysmith_engine::slash::{SlashCommand, filter_combined_commands};
use copysmith_engine::{classify_message, markdown_to_structure, normalize_markdown};
use std::io::Read;
use std::{env, fs, process};

const USAGE: &str = "Usage: copysmith <command> [args]

Commands:
  normalize [FILE]              print canonical markdown
  html [FILE]                   print the rich-text projection as HTML
  parse [--streaming] [FILE]    show how an assistant message is rendered
  commands [QUERY]              list slash commands matching QUERY

FILE defaults to stdin.";

/// Marker syntax and user shortcuts from the config file, or the defaults.
struct Settings {
    markers: CompiledMarkers,
    shortcuts: Vec<SlashCommand>,
}

impl Settings {
    fn load() -> Result<Self> {
        match Config::load()? {
            Some(config) => {
                log::info!("Using config from {}", Config::config_path().display());
                Ok(Self {
                    markers: config.compiled_markers()?,
                    shortcuts: config.user_commands()?,
                })
            }
            None => {
                log::debug!("No config file, using default markers");
                Ok(Self {
                    markers: CompiledMarkers::default(),
                    shortcuts: Vec::new(),
                })
            }
        }
    }
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some("-") | None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read stdin")?;
            Ok(buf)
        }
        Some(path) => fs::read_to_string(path).with_context(|| format!("Failed to read {path}")),
    }
}

fn run(args: &[String]) -> Result<()> {
    let Some(command) = args.first() else {
        bail!("missing command");
    };
    let rest = &args[1..];

    match command.as_str() {
        "normalize" => {
            let input = read_input(rest.first().map(String::as_str))?;
            print!("{}", normalize_markdown(&input));
        }
        "html" => {
            let input = read_input(rest.first().map(String::as_str))?;
            println!("{}", render_html(&markdown_to_structure(&input)));
        }
        "parse" => {
            let streaming = rest.iter().any(|a| a == "--streaming");
            let file = rest.iter().find(|a| !a.starts_with("--"));
            let input = read_input(file.map(String::as_str))?;
            let settings = Settings::load()?;
            let view = classify_message(&input, &settings.markers, streaming);
            print!("{}", report::render_view(&view));
        }
        "commands" => {
            let query = rest.join(" ");
            let settings = Settings::load()?;
            let matches = filter_combined_commands(&query, &settings.shortcuts);
            if matches.is_empty() {
                eprintln!("No commands match '{query}'");
            }
            print!("{}", report::render_commands(matches));
        }
        "-h" | "--help" | "help" => println!("{USAGE}"),
        other => bail!("unknown command '{other}'"),
    }
    Ok(())
}

fn main() {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    if let Err(e) = run(&args) {
        eprintln!("Error: {e:#}");
        eprintln!("{USAGE}");
        process::exit(1);
    }
}
