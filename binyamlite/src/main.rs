//! yamlite command-line tool for checking, merging, and transcoding yamlite documents.
//!
//! Usage: yamlite [OPTIONS] [FILE]
//!
//! Options:
//!   -t, --to <FORMAT>        Output format (yamlite, json, yaml, toml, cbor, diag)
//!   -o, --output <FILE>      Write output to specified file
//!   -d, --defaults <FILE>    Merge the input over this yamlite document
//!   --check                  Check if input is valid (exit 0 if valid, 1 if invalid)
//!   -v, --verbose            Raise log verbosity (repeatable)
//!   -h, --help               Print help
//!   -V, --version            Print version

use libyamlite::{
    encode, load_or_default, merge_mappings, parse_with_filename, Format, Mapping, Value,
};
use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;
use std::process;

mod logging;
mod transcode;

/// Output format selected with -t.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Output {
    Yamlite,
    Json,
    Yaml,
    Toml,
    Cbor,
    CborDiag,
}

fn parse_output(s: &str) -> Option<Output> {
    match s {
        "yamlite" => Some(Output::Yamlite),
        "json" => Some(Output::Json),
        "yaml" | "yml" => Some(Output::Yaml),
        "toml" => Some(Output::Toml),
        "cbor" => Some(Output::Cbor),
        "diag" => Some(Output::CborDiag),
        _ => None,
    }
}

fn output_name(output: Output) -> &'static str {
    match output {
        Output::Yamlite => "yamlite",
        Output::Json => "JSON",
        Output::Yaml => "YAML",
        Output::Toml => "TOML",
        Output::Cbor => "CBOR",
        Output::CborDiag => "CBOR diagnostic notation",
    }
}

fn main() {
    let args: Vec<String> = std::env::args().collect();

    let mut output = Output::Yamlite;
    let mut output_file: Option<&str> = None;
    let mut defaults_file: Option<&str> = None;
    let mut check_only = false;
    let mut verbosity = 0;
    let mut input_path: Option<&str> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => {
                print_help();
                return;
            }
            "-V" | "--version" => {
                println!("yamlite {}", env!("CARGO_PKG_VERSION"));
                return;
            }
            "-t" | "--to" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("Error: -t requires a format argument");
                    process::exit(1);
                }
                output = match parse_output(&args[i]) {
                    Some(o) => o,
                    None => {
                        eprintln!("Error: Unknown format: {}", args[i]);
                        process::exit(1);
                    }
                };
            }
            "-o" | "--output" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("Error: --output requires an argument");
                    process::exit(1);
                }
                output_file = Some(&args[i]);
            }
            "-d" | "--defaults" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("Error: --defaults requires an argument");
                    process::exit(1);
                }
                defaults_file = Some(&args[i]);
            }
            "--check" => {
                check_only = true;
            }
            "-v" | "--verbose" => {
                verbosity += 1;
            }
            "-" => {
                // Explicit stdin
                // input_path stays None, which means stdin
            }
            arg if arg.starts_with('-') => {
                eprintln!("Error: Unknown option: {}", arg);
                process::exit(1);
            }
            _ => {
                if input_path.is_some() {
                    eprintln!("Error: Multiple input paths not supported");
                    process::exit(1);
                }
                input_path = Some(&args[i]);
            }
        }
        i += 1;
    }

    logging::init(verbosity);

    if check_only && defaults_file.is_some() {
        eprintln!("Error: --check and --defaults are mutually exclusive");
        process::exit(1);
    }

    let defaults = defaults_file.map(read_defaults);

    // A file merged over defaults goes through the library loader, which
    // falls back to the defaults when the file cannot be read or parsed.
    if let (Some(defaults), Some(path)) = (&defaults, input_path) {
        let loaded = load_or_default(path, defaults);
        log::debug!("configuration source: {:?}", loaded.source);
        let exit_code = output_value(&Value::Mapping(loaded.config), output, output_file);
        process::exit(exit_code);
    }

    let input = match input_path {
        Some(path) => match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                eprintln!("Error reading {}: {}", path, e);
                process::exit(1);
            }
        },
        None => {
            let mut buffer = String::new();
            if let Err(e) = io::stdin().read_to_string(&mut buffer) {
                eprintln!("Error reading stdin: {}", e);
                process::exit(1);
            }
            buffer
        }
    };

    let exit_code = process_input(
        &input,
        input_path,
        defaults.as_ref(),
        output,
        output_file,
        check_only,
    );
    process::exit(exit_code);
}

/// Read the defaults document. Unlike the input, defaults must be valid.
fn read_defaults(path: &str) -> Mapping {
    let input = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            eprintln!("Error reading {}: {}", path, e);
            process::exit(1);
        }
    };
    match parse_with_filename(&input, Some(&file_name(path))) {
        Ok(doc) => doc,
        Err(e) => {
            eprintln!("{}: {}", path, e);
            process::exit(1);
        }
    }
}

fn file_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string())
}

fn process_input(
    input: &str,
    input_file: Option<&str>,
    defaults: Option<&Mapping>,
    output: Output,
    output_file: Option<&str>,
    check_only: bool,
) -> i32 {
    let label = input_file.unwrap_or("<stdin>");
    let filename = input_file.map(file_name);

    let doc = match parse_with_filename(input, filename.as_deref()) {
        Ok(doc) => doc,
        Err(e) => match defaults {
            Some(defaults) if !check_only => {
                log::warn!("Config parse failed ({}): {}. Using defaults.", label, e);
                return output_value(&Value::Mapping(defaults.clone()), output, output_file);
            }
            _ => {
                eprintln!("{}: {}", label, e);
                return 1;
            }
        },
    };

    if check_only {
        println!("{}: ok", label);
        return 0;
    }

    let doc = match defaults {
        Some(defaults) => merge_mappings(defaults.clone(), doc),
        None => doc,
    };
    output_value(&Value::Mapping(doc), output, output_file)
}

fn output_value(value: &Value, output: Output, output_file: Option<&str>) -> i32 {
    let result = match output {
        Output::Yamlite => encode(value, Format::Yamlite).map_err(|e| e.to_string()),
        Output::Json => encode(value, Format::Json).map_err(|e| e.to_string()),
        Output::Yaml => transcode::yaml::encode(value),
        Output::Toml => transcode::toml::encode(value),
        Output::Cbor => match transcode::cbor::encode(value) {
            Ok(bytes) => {
                write_binary_output(&bytes, output_file);
                return 0;
            }
            Err(e) => Err(e),
        },
        // Encode to CBOR bytes first so the notation reflects the wire encoding
        Output::CborDiag => transcode::cbor::encode(value)
            .and_then(|bytes| transcode::cbor::diagnostic(&bytes)),
    };

    match result {
        Ok(text) => {
            write_text_output(&text, output_file);
            0
        }
        Err(e) => {
            eprintln!("Error: Cannot convert to {}: {}", output_name(output), e);
            1
        }
    }
}

fn write_text_output(output: &str, output_file: Option<&str>) {
    if let Some(path) = output_file {
        if let Err(e) = fs::write(path, output) {
            eprintln!("Error writing {}: {}", path, e);
            process::exit(1);
        }
    } else {
        print!("{}", output);
        // Ensure output ends with newline
        if !output.ends_with('\n') {
            println!();
        }
    }
}

fn write_binary_output(output: &[u8], output_file: Option<&str>) {
    if let Some(path) = output_file {
        if let Err(e) = fs::write(path, output) {
            eprintln!("Error writing {}: {}", path, e);
            process::exit(1);
        }
    } else {
        // Write raw bytes to stdout
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        if let Err(e) = handle.write_all(output) {
            eprintln!("Error writing to stdout: {}", e);
            process::exit(1);
        }
    }
}

fn print_help() {
    println!(
        "yamlite - yamlite command-line tool

USAGE:
    yamlite [OPTIONS] [FILE]

ARGS:
    [FILE]    Input file (reads from stdin if not provided or '-')

OPTIONS:
    -t, --to <FORMAT>        Output format [default: yamlite]
                             Supported: yamlite, json, yaml, toml, cbor, diag

    -o, --output <FILE>      Write output to specified file

    -d, --defaults <FILE>    Deep-merge the input over this yamlite document.
                             If the input cannot be read or parsed, the
                             defaults are written instead and a warning is
                             logged.

    --check                  Check if input is valid (exit 0 if valid, 1 if invalid)

    -v, --verbose            Raise log verbosity (repeatable). Without it the
                             level comes from YAMLITE_LOG (off, error, warn,
                             info, debug, trace) and defaults to warn.

    -h, --help               Print help

    -V, --version            Print version

EXAMPLES:
    # Validate a config file
    yamlite --check config.yaml

    # Normalize a config file
    yamlite config.yaml

    # Merge a config file over defaults and print JSON
    yamlite -d defaults.yaml -t json config.yaml

    # Convert to TOML
    yamlite -t toml config.yaml -o config.toml

    # View CBOR in diagnostic notation (RFC 8949 §8)
    yamlite -t diag config.yaml
"
    );
}
