// Copyright (C) 2025 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

#![deny(elided_lifetimes_in_paths)]

use std::{path::PathBuf, process::exit};

use clap::Subcommand;
use colored::Colorize;
use log::{debug, LevelFilter};
use strum::IntoEnumIterator;
use regmodel::{
    ArchitectureKind,
    CallingConvention,
    ConfigRoot,
    OperatingSystem,
    Platform,
    RegisterId,
    TargetError,
    TargetInfo,
    TargetResult,
};

#[derive(clap::Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,

    #[arg(short, long, global = true)]
    architectuur: Option<String>,

    #[arg(short, long, global = true)]
    besturingssysteem: Option<String>,

    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[arg(short, long, global = true)]
    verbose: bool,
}

impl Args {
    pub fn parse_args() -> Self {
        use clap::Parser;
        Self::parse()
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Toont de registertabel van het doel.
    Registers,

    /// Toont welke registers argumenten ontvangen.
    Argumenten {
        #[arg(long)]
        conventie: Option<String>,
    },

    /// Toont welke aanroepconventies het doel ondersteunt.
    Conventies,

    /// Bouwt een registerverzameling uit namen.
    Set {
        #[arg(required = true)]
        namen: Vec<String>,
    },
}

fn main() {
    let args = Args::parse_args();

    if let Err(e) = run(args) {
        eprintln!("{}: {}", "fout".red().bold(), e.to_string().bold());
        exit(1);
    }
}

fn run(args: Args) -> TargetResult<()> {
    initialize_logger();
    apply_log_level(max_log_level(args.verbose, None));

    let config = match &args.config {
        Some(path) => ConfigRoot::load(path)?,
        None => ConfigRoot::default(),
    };

    apply_log_level(max_log_level(args.verbose, Some(&config)));

    let platform = select_platform(&args, &config)?;
    debug!("Platform {platform} gekozen");

    let target = platform.select()?;

    match args.command {
        Commands::Registers => {
            print_registers(target.as_ref());
        }

        Commands::Argumenten { conventie } => {
            let convention = match conventie {
                Some(name) => name.parse::<CallingConvention>().map_err(|_| TargetError::UnknownCallingConvention { name })?,
                None => config.calling_convention()?,
            };

            target.validate_convention(convention)?;
            print_arguments(target.as_ref(), convention);
        }

        Commands::Conventies => {
            print_conventions(target.as_ref());
        }

        Commands::Set { namen } => {
            print_set(target.as_ref(), &namen)?;
        }
    }

    Ok(())
}

/// The logger lets debug records through, and the global maximum of [`apply_log_level`] decides
/// what is actually printed. It is installed before the configuration is read, so that reading it
/// can be logged too.
fn initialize_logger() {
    env_logger::builder()
        .filter_level(LevelFilter::Debug)
        .parse_default_env()
        .init();
}

/// `RUST_LOG` takes precedence over both `--verbose` and the configuration.
fn apply_log_level(level: LevelFilter) {
    if std::env::var_os(env_logger::DEFAULT_FILTER_ENV).is_none() {
        log::set_max_level(level);
    }
}

fn max_log_level(verbose: bool, config: Option<&ConfigRoot>) -> LevelFilter {
    if verbose || config.is_some_and(|config| config.log.debug) {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    }
}

/// Command line options take precedence over the configuration, which takes precedence over the host.
fn select_platform(args: &Args, config: &ConfigRoot) -> TargetResult<Platform> {
    let configured = match (&args.architectuur, &args.besturingssysteem) {
        (Some(..), Some(..)) => None,
        _ => Some(config.platform()?),
    };

    let architecture = match &args.architectuur {
        Some(name) => ArchitectureKind::parse(name)?,
        None => configured.map(|p| p.architecture()).ok_or(TargetError::UnknownHost)?,
    };

    let operating_system = match &args.besturingssysteem {
        Some(name) => OperatingSystem::parse(name)?,
        None => configured.map(|p| p.operating_system()).ok_or(TargetError::UnknownHost)?,
    };

    Ok(Platform::new(architecture, operating_system))
}

fn print_registers(target: &dyn TargetInfo) {
    println!("{} {} ({} woord(en))", "Registers van".bold(), target.platform().to_string().bold().cyan(), target.word_count());
    println!();

    for info in target.registers() {
        let mut flags = Vec::new();
        if target.is_byte_register(info.id()) {
            flags.push("byte".green());
        }
        if target.is_callee_saved(info.id()) {
            flags.push("callee-saved".yellow());
        }
        if target.is_reserved(info.id()) {
            flags.push("gereserveerd".red());
        }

        let flags: Vec<String> = flags.iter().map(ToString::to_string).collect();

        println!(
            "{id:>4}  {name:<8} {kind:<8} {encoding:>3}  {aliases:<24} {flags}",
            id = info.id().to_string().dimmed(),
            name = info.name().bold(),
            kind = info.kind().to_string(),
            encoding = info.encoding(),
            aliases = info.aliases().join(", "),
            flags = flags.join(" "),
        );
    }
}

fn print_arguments(target: &dyn TargetInfo, convention: CallingConvention) {
    let names = |ids: &[RegisterId]| -> String {
        ids.iter()
            .map(|id| target.register_name(*id).unwrap_or("?"))
            .collect::<Vec<_>>()
            .join(", ")
    };

    println!("{} {} op {}", "Aanroepconventie".bold(), convention.to_string().cyan(), target.platform().to_string().bold());
    println!();
    println!("  {:<28} {}", "gehele getallen:", names(target.integer_argument_registers()));
    println!("  {:<28} {}", "drijvende-kommagetallen:", names(target.float_argument_registers()));
    println!("  {:<28} {}", "alle gehele argumenten:", names(&target.full_integer_argument_registers(convention)));
    println!("  {:<28} {}", "volgorde:", target.argument_order(convention));

    match target.fixed_return_buffer(convention) {
        Some(buffer) => println!(
            "  {:<28} {} (argument {})",
            "retourbuffer:",
            target.register_name(buffer.register).unwrap_or("?").green(),
            buffer.argument_slot,
        ),
        None => println!("  {:<28} {}", "retourbuffer:", "gewoon argument".dimmed()),
    }

    let platform = target.platform();
    println!("  {:<28} {}", "variabele argumenten:", yes_no(platform.supports_native_varargs()));
    println!("  {:<28} {}", "gesplitste argumenten:", yes_no(platform.splits_arguments()));
    println!("  {:<28} {}", "apple-arm64-abi:", yes_no(platform.is_apple_arm64()));
    println!("  {:<28} {}", "unix-x86-abi:", yes_no(platform.is_unix_x86()));
}

fn yes_no(value: bool) -> colored::ColoredString {
    if value { "ja".green() } else { "nee".dimmed() }
}

fn print_conventions(target: &dyn TargetInfo) {
    println!("{} {}", "Aanroepconventies op".bold(), target.platform().to_string().bold().cyan());
    println!();

    for convention in CallingConvention::iter() {
        let status = if target.supports_convention(convention) {
            "ondersteund".green()
        } else {
            "niet ondersteund".red()
        };

        println!("  {:<28} {status}", convention.to_string());
    }
}

fn print_set(target: &dyn TargetInfo, names: &[String]) -> TargetResult<()> {
    let description = target.describe_set(names)?;

    println!("{} {}", description.display.bold(), format!("({} registers)", description.count).dimmed());
    for (kind, bits) in &description.per_kind {
        println!("  {:<8} {bits:#018x}", kind.to_string());
    }

    Ok(())
}
