//! CLI for hashing and verifying content with any registered algorithm.
//!
//! ## Usage
//!
//! ```bash
//! # Hash content with xxHash (default)
//! hk hash "some content"
//!
//! # Pick an algorithm by registry key
//! hk hash --algorithm blake3 "some content"
//! hk hash -a siphash --key-hex 000102030405060708090a0b0c0d0e0f "some content"
//!
//! # Hash file contents
//! hk hash --file path/to/file.txt
//!
//! # Verify a previously produced hash
//! hk verify -a blake3 "some content" <HASH>
//!
//! # Passwords (Argon2id by default, see --config)
//! hk password hash "longenough1"
//! echo "longenough1" | hk password hash -
//! hk password verify "longenough1" <HASH>
//!
//! # Generate shell completions
//! source <(COMPLETE=bash hk)
//! ```

use std::fs;
use std::io::{self, BufRead, IsTerminal};
use std::path::{Path, PathBuf};

use clap::{ArgAction, CommandFactory, Parser, Subcommand, ValueHint};
use clap_complete::Shell;
use color_eyre::eyre::{Result, WrapErr, eyre};
use tracing_subscriber::{filter::EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use hashkit::{HashAlgorithm, HashingConfig, available_algorithms, create_service};

/// Hash and verify content with interchangeable algorithms
#[derive(Parser)]
#[command(name = "hk", version, about, long_about = None)]
#[command(after_help = AFTER_HELP)]
struct Cli {
    /// TOML file with cost parameters (falls back to $HASHKIT_CONFIG)
    #[arg(long, global = true, value_name = "PATH", value_hint = ValueHint::FilePath)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Hash content
    Hash {
        /// Content to hash (use "-" to read from stdin)
        #[arg(value_name = "CONTENT")]
        content: Option<String>,

        /// Hash contents of a file instead of direct content
        #[arg(
            short,
            long,
            value_name = "PATH",
            value_hint = ValueHint::FilePath,
            conflicts_with = "content"
        )]
        file: Option<PathBuf>,

        #[command(flatten)]
        algorithm: AlgorithmArgs,
    },

    /// Verify content against a hash
    Verify {
        /// Content to verify
        content: String,

        /// Hash previously produced by `hk hash`
        expected: String,

        #[command(flatten)]
        algorithm: AlgorithmArgs,
    },

    /// Password hashing with the length policy applied
    #[command(subcommand)]
    Password(PasswordCommand),

    /// List registered algorithm keys
    List,
}

#[derive(Subcommand)]
enum PasswordCommand {
    /// Hash a password (use "-" to read from stdin)
    Hash {
        #[arg(value_name = "PASSWORD")]
        password: Option<String>,
    },

    /// Verify a password against a stored hash
    Verify {
        password: String,
        expected: String,
    },
}

#[derive(clap::Args)]
struct AlgorithmArgs {
    /// Registry key of the algorithm (see `hk list`)
    #[arg(short, long, default_value = "xxhash")]
    algorithm: String,

    /// Seed for murmur3 and xxhash
    #[arg(long)]
    seed: Option<u64>,

    /// Key as hex (siphash needs exactly 16 bytes)
    #[arg(long, value_name = "HEX")]
    key_hex: Option<String>,

    /// Output size in bytes, where the algorithm supports it
    #[arg(long, value_name = "BYTES")]
    size: Option<usize>,

    /// Use the unsalted Base64 digest instead of `hash` output
    #[arg(long)]
    base64: bool,
}

const AFTER_HELP: &str = "\
SHELL COMPLETIONS:
  Enable tab completions by adding one line to your shell config:

  Bash (~/.bashrc):
    source <(COMPLETE=bash hk)

  Zsh (~/.zshrc):
    source <(COMPLETE=zsh hk)

  Fish (~/.config/fish/config.fish):
    COMPLETE=fish hk | source

EXAMPLES:
  hk hash \"hello world\"                 # xxHash of string
  hk hash -a blake3 --file Cargo.toml    # BLAKE3 of file contents
  hk hash -a blake2 \"hello world\"       # Base64(salt || BLAKE2b digest)
  hk verify -a blake3 \"hello world\" <HASH>
  hk password hash \"longenough1\"        # Argon2id password hash
  echo \"longenough1\" | hk password hash -
";

fn main() -> Result<()> {
    // Check for shell completion generation before parsing args
    if let Ok(shell_name) = std::env::var("COMPLETE") {
        return generate_completions(&shell_name);
    }

    color_eyre::install()?;
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        println!();
        return Ok(());
    };

    let config = HashingConfig::load_or_default(cli.config.as_deref())?;

    match command {
        Command::Hash {
            content,
            file,
            algorithm,
        } => {
            let content = get_content(content.as_deref(), file.as_deref())?;
            let service = build_service(&config, &algorithm)?;
            let output = if algorithm.base64 {
                service.encode_to_base64_hash(content.as_bytes())?
            } else {
                service.hash(&content)?
            };
            println!("{output}");
        }
        Command::Verify {
            content,
            expected,
            algorithm,
        } => {
            let service = build_service(&config, &algorithm)?;
            if algorithm.base64 {
                service.verify_base64_hash(content.as_bytes(), &expected)?;
            } else {
                service.verify(&content, &expected)?;
            }
            println!("OK");
        }
        Command::Password(PasswordCommand::Hash { password }) => {
            let password = get_content(password.as_deref(), None)?;
            let credential = config.password_service().hash_password(&password)?;
            println!("{}", credential.hash());
        }
        Command::Password(PasswordCommand::Verify { password, expected }) => {
            config
                .password_service()
                .verify_password(&password, &expected)?;
            println!("OK");
        }
        Command::List => {
            for key in available_algorithms() {
                println!("{key}");
            }
        }
    }

    Ok(())
}

/// Resolve the algorithm, then layer config and flags on top.
fn build_service(config: &HashingConfig, args: &AlgorithmArgs) -> Result<hashkit::HashService> {
    let mut service = config.apply(create_service(&args.algorithm)?);

    if let Some(seed) = args.seed {
        service = service.with_seed(seed);
    }
    if let Some(size) = args.size {
        service = service.with_hash_size(size);
    }
    if let Some(ref key) = args.key_hex {
        let key = hex::decode(key).wrap_err("--key-hex must be hex")?;
        service = service.with_key(&key)?;
    }

    tracing::debug!(algorithm = %service.algorithm(), "service ready");
    Ok(service)
}

/// Get content from positional arg, file, or stdin.
fn get_content(content: Option<&str>, file: Option<&Path>) -> Result<String> {
    if let Some(path) = file {
        return fs::read_to_string(path)
            .wrap_err_with(|| format!("Failed to read file '{}'", path.display()));
    }

    match content {
        Some("-") => read_from_stdin(),
        Some(content) => Ok(content.to_string()),
        None => {
            if !io::stdin().is_terminal() {
                read_from_stdin()
            } else {
                Err(eyre!(
                    "No content provided. Use positional argument, --file, or pipe to stdin."
                ))
            }
        }
    }
}

/// Read content from stdin.
fn read_from_stdin() -> Result<String> {
    let stdin = io::stdin();
    let mut content = String::new();

    for line in stdin.lock().lines() {
        let line = line.wrap_err("Failed to read from stdin")?;
        if !content.is_empty() {
            content.push('\n');
        }
        content.push_str(&line);
    }

    if content.is_empty() {
        return Err(eyre!("Empty input from stdin"));
    }

    Ok(content)
}

/// Sets up tracing to stderr.
///
/// `RUST_LOG` wins when set; otherwise the filter comes from the `-v` count.
fn init_tracing(verbose: u8) {
    if verbose == 0 && std::env::var_os("RUST_LOG").is_none() {
        return;
    }

    let base_filter = match std::env::var("RUST_LOG") {
        Ok(filter) => filter,
        Err(_) => match verbose {
            1 => "warn,hk=debug,hashkit=debug".to_string(),
            2 => "info,hk=trace,hashkit=trace".to_string(),
            _ => "trace".to_string(),
        },
    };

    let filter = EnvFilter::try_new(&base_filter).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_level(true)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();
}

/// Generate shell completions.
fn generate_completions(shell_name: &str) -> Result<()> {
    let shell = match shell_name.to_lowercase().as_str() {
        "bash" => Shell::Bash,
        "zsh" => Shell::Zsh,
        "fish" => Shell::Fish,
        "powershell" => Shell::PowerShell,
        "elvish" => Shell::Elvish,
        _ => {
            return Err(eyre!(
                "Unknown shell: {shell_name}. Supported: bash, zsh, fish, powershell, elvish"
            ));
        }
    };

    clap_complete::generate(shell, &mut Cli::command(), "hk", &mut io::stdout());
    Ok(())
}
