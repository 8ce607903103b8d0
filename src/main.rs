mod debug_report;

use deinflector::{DEFAULT_MAX_DEPTH, ResolveOptions, languages};
use log::{LevelFilter, Log, Metadata, Record};
use std::io::{self, IsTerminal, Read};

const DEBUG_ENV: &str = "DEINFLECTOR_DEBUG_RULES";
const DEFAULT_LANGUAGE: &str = "en";

fn main() {
    let config = match parse_args() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
    };

    if config.verbose || std::env::var_os(DEBUG_ENV).is_some_and(|v| !v.is_empty() && v != "0") {
        StderrLogger::install(LevelFilter::Trace);
    }

    let deinflector = languages::builtin();
    if config.list_languages {
        debug_report::print_languages(deinflector.languages(), config.color);
        return;
    }

    let Some(language) = deinflector.language(&config.language) else {
        eprintln!("error: unsupported language '{}' (see --list-languages)", config.language);
        std::process::exit(1);
    };
    match deinflector.deinflect_verbose_with(language.iso, config.input.trim(), &config.options) {
        Ok(details) => debug_report::print_run(language, &details, config.color),
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(1);
        }
    }
}

/// Writes every enabled record to stderr as `LEVEL target: message`.
struct StderrLogger;

static LOGGER: StderrLogger = StderrLogger;

impl StderrLogger {
    fn install(level: LevelFilter) {
        if log::set_logger(&LOGGER).is_ok() {
            log::set_max_level(level);
        }
    }
}

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record<'_>) {
        if self.enabled(record.metadata()) {
            eprintln!("{:<5} {}: {}", record.level(), record.target(), record.args());
        }
    }

    fn flush(&self) {}
}

struct CliConfig {
    input: String,
    language: String,
    options: ResolveOptions,
    list_languages: bool,
    color: bool,
    verbose: bool,
}

fn parse_args() -> Result<CliConfig, String> {
    let mut input: Option<String> = None;
    let mut language = DEFAULT_LANGUAGE.to_string();
    let mut options = ResolveOptions::default();
    let mut list_languages = false;
    let mut color = io::stdout().is_terminal();
    let mut verbose = false;
    let mut args = std::env::args().skip(1).peekable();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            "-V" | "--version" => {
                println!("deinflector {}", env!("CARGO_PKG_VERSION"));
                std::process::exit(0);
            }
            "--color" => color = true,
            "--no-color" => color = false,
            "-v" | "--verbose" => verbose = true,
            "--list-languages" => list_languages = true,
            "-l" | "--language" => {
                language = args.next().ok_or_else(|| "error: --language expects a value".to_string())?;
            }
            "--max-depth" => {
                let value = args.next().ok_or_else(|| "error: --max-depth expects a value".to_string())?;
                options.max_depth = parse_count("--max-depth", &value)?;
            }
            "--step-budget" => {
                let value = args.next().ok_or_else(|| "error: --step-budget expects a value".to_string())?;
                options.step_budget = Some(parse_count("--step-budget", &value)?);
            }
            "--input" | "-i" => {
                let value = args.next().ok_or_else(|| "error: --input expects a value".to_string())?;
                if input.is_some() {
                    return Err("error: input provided multiple times".to_string());
                }
                input = Some(value);
            }
            "--" => {
                let rest = args.collect::<Vec<_>>().join(" ");
                if !rest.trim().is_empty() {
                    if input.is_some() {
                        return Err("error: input provided multiple times".to_string());
                    }
                    input = Some(rest);
                }
                break;
            }
            _ if arg.starts_with("--language=") => {
                language = arg.trim_start_matches("--language=").to_string();
            }
            _ if arg.starts_with("--max-depth=") => {
                options.max_depth = parse_count("--max-depth", arg.trim_start_matches("--max-depth="))?;
            }
            _ if arg.starts_with("--step-budget=") => {
                options.step_budget = Some(parse_count("--step-budget", arg.trim_start_matches("--step-budget="))?);
            }
            _ if arg.starts_with("--input=") => {
                let value = arg.trim_start_matches("--input=");
                if input.is_some() {
                    return Err("error: input provided multiple times".to_string());
                }
                input = Some(value.to_string());
            }
            _ if arg.starts_with('-') => {
                return Err(format!("error: unknown option '{arg}'"));
            }
            _ => {
                let rest = std::iter::once(arg).chain(args).collect::<Vec<_>>().join(" ");
                if input.is_some() {
                    return Err("error: input provided multiple times".to_string());
                }
                input = Some(rest);
                break;
            }
        }
    }

    if list_languages {
        let input = input.unwrap_or_default();
        return Ok(CliConfig { input, language, options, list_languages, color, verbose });
    }

    let input = match input {
        Some(value) => value,
        None => read_stdin_input()?,
    };

    if input.trim().is_empty() {
        return Err(format!("error: no input provided\n\n{}", help_text()));
    }

    Ok(CliConfig { input, language, options, list_languages, color, verbose })
}

fn read_stdin_input() -> Result<String, String> {
    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer).map_err(|err| format!("error: failed to read stdin: {err}"))?;
    Ok(buffer)
}

fn parse_count(flag: &str, value: &str) -> Result<usize, String> {
    value.parse().map_err(|_| format!("error: invalid {flag} '{value}' (expected a non-negative integer)"))
}

fn print_help() {
    println!("{}", help_text());
}

fn help_text() -> String {
    format!(
        "deinflector {version}

Rule-based deinflection: lists the candidate dictionary forms of a word.

Usage:
  deinflector [OPTIONS] [--] <input...>
  deinflector [OPTIONS] --input <text>

Options:
  -i, --input <text>         Text to deinflect. If omitted, reads remaining args
                             or stdin when no args are provided.
  -l, --language <iso>       Language to deinflect in. Default: {default_language}
  --max-depth <n>            Maximum number of chained transforms.
                             Default: {default_depth}
  --step-budget <n>          Stop after <n> rule evaluations per variant.
  --list-languages           List the built-in languages and exit.
  --color                    Force ANSI color output.
  --no-color                 Disable ANSI color output.
  -v, --verbose              Log every rule application to stderr
                             (same as {debug_env}=1).
  -h, --help                 Show this help message.
  -V, --version              Print version information.

Exit codes:
  0  Success.
  1  Internal error (e.g. unsupported language).
  2  Invalid arguments or missing input.
",
        version = env!("CARGO_PKG_VERSION"),
        default_language = DEFAULT_LANGUAGE,
        default_depth = DEFAULT_MAX_DEPTH,
        debug_env = DEBUG_ENV,
    )
}
