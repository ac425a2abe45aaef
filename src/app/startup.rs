//! Application startup: arguments, configuration, logging, then the command

use clap::{CommandFactory, FromArgMatches};
use std::io::IsTerminal;
use tokio::io::AsyncBufReadExt;

use super::cli::{Args, Command, ConfigResult};
use super::console::Console;
use super::desk::ScanDesk;
use super::display;
use crate::core::error_handling::{log_error_with_context, operator_message};
use crate::core::logging::init_logging;
use crate::core::styles::{palette_to_clap, StyleRole};
use crate::core::validation::validate_selection_date;
use crate::manifest::{load_manifest, LoaderOptions, ManifestSource};
use crate::scan::CodeNormalizer;

/// Color guess for help output, before the configuration is known
fn help_color_hint() -> bool {
    let mut enabled = std::io::stdout().is_terminal();
    for arg in std::env::args() {
        match arg.as_str() {
            "--color" | "-g" => enabled = true,
            "--no-color" | "-n" => enabled = false,
            _ => {}
        }
    }
    enabled
}

/// Run the application and return the process exit code
pub async fn startup() -> i32 {
    let matches = Args::command()
        .styles(palette_to_clap(help_color_hint()))
        .get_matches();
    let mut args = Args::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    if let Err(e) = args.load_config_file().await {
        eprintln!("Error: {}", operator_message(&e, "Configuration loading"));
        return 1;
    }

    let color = args.color_enabled();
    let log_file = args.log_file_path();
    if let Err(e) = init_logging(
        args.log_level.as_deref(),
        args.log_format.as_deref(),
        log_file.as_deref(),
        color,
    ) {
        eprintln!("Error: could not initialise logging: {}", e);
        return 1;
    }
    log::debug!("Resolved arguments: {:?}", args);

    let (source, options, normalizer) = match resolve_settings(&args) {
        Ok(settings) => settings,
        Err(e) => {
            log_error_with_context(&e, "Configuration");
            return 1;
        }
    };

    match args.command_or_default() {
        Command::Flights { date } => list_flights(&source, &options, date.as_deref(), color).await,
        Command::Check {
            date,
            flight,
            codes,
        } => check_codes(&source, &options, normalizer, &date, &flight, codes, color).await,
        Command::Scan { date, flight } => {
            run_console(source, options, normalizer, date, flight, log_file.is_some(), color)
                .await
        }
    }
}

fn resolve_settings(args: &Args) -> ConfigResult<(ManifestSource, LoaderOptions, CodeNormalizer)> {
    let source = args.manifest_source()?;
    let options = args.loader_options()?;
    let normalizer = args.code_normalizer()?;
    Ok((source, options, normalizer))
}

async fn load_desk(
    source: &ManifestSource,
    options: &LoaderOptions,
    normalizer: CodeNormalizer,
    color: bool,
) -> Option<ScanDesk> {
    log::info!("Loading manifest from {}", source);
    let load = load_manifest(source, options).await;
    println!("{}", display::status_line(&load.status, color));
    if load.store.is_empty() {
        return None;
    }
    Some(ScanDesk::new(load, normalizer))
}

async fn list_flights(
    source: &ManifestSource,
    options: &LoaderOptions,
    date: Option<&str>,
    color: bool,
) -> i32 {
    let Some(desk) = load_desk(source, options, CodeNormalizer::trim_only(), color).await else {
        return 1;
    };

    let date = date.map(|d| validate_selection_date(d).unwrap_or_else(|_| d.to_string()));
    let flights = desk.flights(date.as_deref());
    println!(
        "{}",
        display::flights_heading(date.as_deref(), flights.len(), color)
    );
    if !flights.is_empty() {
        if let Err(e) = display::flights_table(&flights, color).print_tty(color) {
            log::error!("Could not print flights: {}", e);
            return 1;
        }
    }
    0
}

async fn check_codes(
    source: &ManifestSource,
    options: &LoaderOptions,
    normalizer: CodeNormalizer,
    date: &str,
    flight: &str,
    codes: Vec<String>,
    color: bool,
) -> i32 {
    let Some(mut desk) = load_desk(source, options, normalizer, color).await else {
        return 1;
    };

    match desk.select(date, flight).map(display::selection_line) {
        Ok(line) => println!("{}", StyleRole::Ok.paint(&line, color)),
        Err(e) => {
            eprintln!("{}", StyleRole::Failure.paint(&e.to_string(), color));
            return 1;
        }
    }

    let codes = if codes.is_empty() {
        match read_stdin_lines().await {
            Ok(lines) => lines,
            Err(e) => {
                log::error!("Could not read codes from stdin: {}", e);
                return 1;
            }
        }
    } else {
        codes
    };

    for code in &codes {
        if let Some(outcome) = desk.accept_code(code) {
            println!("{}", display::outcome_line(&outcome, color));
        }
    }
    println!("{}", display::counter_line(&desk.summary(), color));
    0
}

async fn read_stdin_lines() -> std::io::Result<Vec<String>> {
    let mut lines = tokio::io::BufReader::new(tokio::io::stdin()).lines();
    let mut codes = Vec::new();
    while let Some(line) = lines.next_line().await? {
        codes.push(line);
    }
    Ok(codes)
}

async fn run_console(
    source: ManifestSource,
    options: LoaderOptions,
    normalizer: CodeNormalizer,
    date: Option<String>,
    flight: Option<String>,
    log_to_file: bool,
    color: bool,
) -> i32 {
    log::info!("Loading manifest from {}", source);
    let load = load_manifest(&source, &options).await;
    let mut console = Console::new(ScanDesk::new(load, normalizer), source, options, color);

    if let (Some(date), Some(flight)) = (date, flight) {
        match console
            .desk_mut()
            .select(&date, &flight)
            .map(display::selection_line)
        {
            Ok(line) => println!("{}", StyleRole::Ok.paint(&line, color)),
            Err(e) => println!("{}", StyleRole::Warn.paint(&e.to_string(), color)),
        }
    }

    match console.run(log_to_file).await {
        Ok(()) => 0,
        Err(e) => {
            log::error!("Console failed: {}", e);
            1
        }
    }
}
