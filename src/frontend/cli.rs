use crate::analysis::HierarchyPrinter;
use crate::core::loader::{build_registry, expand_patterns};
use crate::errors::{ChainError, ErrorKind, EXIT_SUCCESS};
use crate::frontend::config::{Config, CONFIG_FILE_NAMES};
use crate::infrastructure::logging::init_logging;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use tracing::{debug, info};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliConfig {
    pub type_name: String,
    /// Positionals after the type name; accepted and ignored
    pub ignored: Vec<String>,
    pub registries: Vec<String>,
    pub no_builtins: bool,
    pub output: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub verbose: bool,
    pub help: bool,
    /// Write a default `.typechainrc` into the working directory
    pub init: bool,
}

pub struct Cli {
    config: CliConfig,
}

impl Cli {
    pub fn new(config: CliConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CliConfig {
        &self.config
    }

    /// Explicit `--config` file, else the nearest discovered one
    pub fn load_config(&self) -> Result<Config, ChainError> {
        match &self.config.config {
            Some(path) => Config::load(path),
            None => Config::discover(),
        }
    }

    /// Print the chain for the requested type into `out`, or into the
    /// `--output` file when one was given. Returns the number of lines.
    pub fn run<W: Write>(&self, config: &Config, out: &mut W) -> Result<usize, ChainError> {
        if !self.config.ignored.is_empty() {
            debug!(ignored = ?self.config.ignored, "Extra arguments ignored");
        }

        let builtins = config.registry.builtins && !self.config.no_builtins;

        // Config-file registries resolve against the config's directory,
        // command-line ones against the working directory.
        let mut paths = expand_patterns(&config.registry.files, config.base_dir())?;
        paths.extend(expand_patterns(&self.config.registries, None)?);
        let registry = build_registry(builtins, &paths)?;

        info!(type_name = %self.config.type_name, types = registry.len(), "Resolving ancestry");
        let printer = HierarchyPrinter::new(registry);

        match &self.config.output {
            Some(path) => {
                // No output file for a name that does not resolve
                printer.resolve(&self.config.type_name)?;
                let file = File::create(path).map_err(|e| {
                    ChainError::io(format!("Failed to create {}", path.display()), &e)
                })?;
                let mut writer = BufWriter::new(file);
                printer.print(&self.config.type_name, &mut writer)
            }
            None => printer.print(&self.config.type_name, out),
        }
    }
}

pub fn usage(prog: &str) -> String {
    format!(
        "typechain - print the superclass chain of a type\n\n\
        USAGE:\n    {prog} [OPTIONS] <fully-qualified-type-name> [ignored...]\n\n\
        Options must come before the type name; everything after it is ignored.\n\n\
        OPTIONS:\n    \
        -h, --help              Print help information\n    \
        -r, --registry <PATH>   Load extra types from a .toml/.json file or glob (repeatable)\n    \
        --no-builtins           Do not seed the registry with the built-in hierarchy\n    \
        -o, --output <FILE>     Write the chain to FILE instead of stdout\n    \
        -c, --config <FILE>     Use FILE instead of discovering .typechainrc\n    \
        -v, --verbose           Enable debug logging on stderr\n    \
        --init                  Write a default .typechainrc here and exit\n\n\
        EXAMPLES:\n    \
        {prog} java.io.FileNotFoundException\n    \
        {prog} -r types/*.toml com.acme.PaymentException\n    \
        {prog} -o exceptions_hierarchy.facts java.security.NoSuchAlgorithmException",
    )
}

/// Parse arguments, excluding the program name. Options end at the first
/// positional, which is the type name; the rest is kept only as `ignored`.
pub fn parse_args<I, S>(args: I) -> Result<CliConfig, ChainError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let args: Vec<String> = args.into_iter().map(Into::into).collect();
    let mut config = CliConfig::default();
    let mut positionals = Vec::new();
    let mut i = 0;

    let value_of = |i: usize, option: &str| -> Result<String, ChainError> {
        args.get(i).cloned().ok_or_else(|| {
            ChainError::new(ErrorKind::MissingOptionValue { option: option.to_string() })
        })
    };

    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => config.help = true,
            "-v" | "--verbose" => config.verbose = true,
            "--no-builtins" => config.no_builtins = true,
            "--init" => config.init = true,
            "-r" | "--registry" => {
                i += 1;
                config.registries.push(value_of(i, "--registry")?);
            }
            "-o" | "--output" => {
                i += 1;
                config.output = Some(PathBuf::from(value_of(i, "--output")?));
            }
            "-c" | "--config" => {
                i += 1;
                config.config = Some(PathBuf::from(value_of(i, "--config")?));
            }
            "--" => {
                positionals.extend(args[i + 1..].iter().cloned());
                break;
            }
            opt if opt.starts_with('-') && opt.len() > 1 => {
                return Err(ChainError::new(ErrorKind::UnknownOption { option: opt.to_string() }));
            }
            _ => {
                positionals.extend(args[i..].iter().cloned());
                break;
            }
        }
        i += 1;
    }

    if config.help || config.init {
        return Ok(config);
    }

    let mut positionals = positionals.into_iter();
    config.type_name = positionals.next().ok_or_else(ChainError::missing_argument)?;
    config.ignored = positionals.collect();

    Ok(config)
}

/// Save the default configuration as `.typechainrc` in the working directory.
/// An existing file is never overwritten.
pub fn init_config() -> Result<PathBuf, ChainError> {
    let cwd = std::env::current_dir()
        .map_err(|e| ChainError::config(format!("Cannot read current directory: {}", e)))?;
    let path = cwd.join(CONFIG_FILE_NAMES[0]);
    if path.exists() {
        return Err(ChainError::config(format!("{} already exists", path.display())));
    }
    Config::default().save(&path)?;
    Ok(path)
}

/// Entry point for the CLI binary. Returns the process exit code.
pub fn main() -> i32 {
    let mut args = std::env::args();
    let prog = args.next().unwrap_or_else(|| "typechain".to_string());

    let cli_config = match parse_args(args) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {}\n\n{}", e, usage(&prog));
            return e.exit_code();
        }
    };

    if cli_config.help {
        println!("{}", usage(&prog));
        return EXIT_SUCCESS;
    }

    if cli_config.init {
        return match init_config() {
            Ok(path) => {
                println!("Wrote {}", path.display());
                EXIT_SUCCESS
            }
            Err(e) => {
                eprintln!("error: {}", e);
                e.exit_code()
            }
        };
    }

    let cli = Cli::new(cli_config);
    let config = match cli.load_config() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {}", e);
            return e.exit_code();
        }
    };

    let log_config = match config.log_config(cli.config().verbose) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {}", e);
            return e.exit_code();
        }
    };
    let guard = init_logging(log_config);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let code = match cli.run(&config, &mut out) {
        Ok(lines) => {
            debug!(lines, "Done");
            EXIT_SUCCESS
        }
        Err(e) => {
            debug!(error = %e.kind, exit_code = e.exit_code(), "Run failed");
            eprintln!("error: {}", e);
            e.exit_code()
        }
    };

    // Flush buffered log lines before the process exits
    drop(guard);
    code
}
