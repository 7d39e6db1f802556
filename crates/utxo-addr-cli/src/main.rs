use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use log::{debug, LevelFilter};
use std::fs;
use std::path::{Path, PathBuf};
use utxo_addr_address::{
    AddressContext, NetworkParameters, NetworkRegistry, ScriptSource, DEFAULT_NETWORK,
};

#[derive(Parser, Debug)]
#[command(
    name = "utxo-addr",
    about = "Build, parse and convert Bitcoin-family addresses"
)]
struct Args {
    /// Network to encode and decode under
    #[arg(short = 'n', long = "network", default_value = DEFAULT_NETWORK, global = true)]
    network: String,

    /// JSON array of extra network parameters to register
    #[arg(long = "networks-file", global = true)]
    networks_file: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Silence all log output
    #[arg(short = 'q', long = "quiet", default_value_t = false, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Base58Check P2PKH from a public key or 20-byte key hash (hex)
    P2pkh { key: String },
    /// Bech32 P2WPKH from a public key or 20-byte key hash (hex)
    P2wpkh { key: String },
    /// P2PKH in the network's preferred encoding
    Pkh { key: String },
    /// Base58Check P2SH from a script
    P2sh(ScriptArgs),
    /// Bech32 P2WSH from a script
    P2wsh(ScriptArgs),
    /// P2SH in the network's preferred encoding
    Sh(ScriptArgs),
    /// Versioned payload of an address (hex)
    Parse { address: String },
    /// Bare hash of an address (hex)
    ParseHash { address: String },
    /// Format, kind, hash and locking script of an address
    Inspect { address: String },
    /// Locking script for an address (hex)
    ToScript { address: String },
    /// Address for a standard locking script (hex)
    FromScript { script: String },
    /// List known networks
    Networks,
}

#[derive(clap::Args, Debug)]
struct ScriptArgs {
    /// Script assembly, e.g. "OP_2 <key> <key> OP_2 OP_CHECKMULTISIG"
    script: String,

    /// Treat SCRIPT as serialized script hex
    #[arg(long = "hex", default_value_t = false, conflicts_with = "hash")]
    hex: bool,

    /// Treat SCRIPT as an existing script hash (hex)
    #[arg(long = "hash", default_value_t = false)]
    hash: bool,
}

impl ScriptArgs {
    /// Run `build` with the script in the form the flags select.
    fn with_source<T>(
        &self,
        build: impl FnOnce(ScriptSource<'_>) -> utxo_addr_core::Result<T>,
    ) -> Result<T> {
        if !self.hex && !self.hash {
            return build(ScriptSource::Asm(&self.script)).context("building script address");
        }

        let bytes = decode_hex("script", &self.script)?;
        let source = if self.hash {
            ScriptSource::Hash(&bytes)
        } else {
            ScriptSource::Bytes(&bytes)
        };
        build(source).context("building script address")
    }
}

fn decode_hex(what: &str, s: &str) -> Result<Vec<u8>> {
    hex::decode(s.trim()).with_context(|| format!("{} is not valid hex: '{}'", what, s))
}

fn init_logging(verbose: u8, quiet: bool) {
    let level = if quiet {
        LevelFilter::Off
    } else {
        match verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    };

    env_logger::Builder::new()
        .filter_level(level)
        .format_timestamp(None)
        .parse_default_env()
        .init();
}

/// Built-in networks plus any loaded from `path`.
fn load_registry(path: Option<&Path>) -> Result<NetworkRegistry> {
    let mut registry = NetworkRegistry::builtin();

    if let Some(path) = path {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let networks: Vec<NetworkParameters> = serde_json::from_str(&text)
            .with_context(|| format!("failed to parse {}", path.display()))?;

        for params in networks {
            let name = params.name.clone();
            registry
                .register(params)
                .with_context(|| format!("failed to register network '{}'", name))?;
        }
    }

    Ok(registry)
}

fn describe_network(params: &NetworkParameters, active: bool) -> String {
    format!(
        "{} {}\tp2pkh=0x{:02x}\tp2sh=0x{:02x}\tbech32={}\tcashaddr={}",
        if active { "*" } else { " " },
        params.name,
        params.p2pkh_version,
        params.p2sh_version,
        params.bech32_hrp.as_deref().unwrap_or("-"),
        params.cashaddr_prefix.as_deref().unwrap_or("-"),
    )
}

/// Execute one command, returning the lines to print.
fn execute(ctx: &AddressContext, registry: &NetworkRegistry, command: &Command) -> Result<Vec<String>> {
    let line = match command {
        Command::P2pkh { key } => ctx.make_p2pkh_address(&decode_hex("key", key)?)?,
        Command::P2wpkh { key } => ctx.make_p2wpkh_address(&decode_hex("key", key)?)?,
        Command::Pkh { key } => ctx.make_pkh_address(&decode_hex("key", key)?)?,
        Command::P2sh(script) => script.with_source(|s| ctx.make_p2sh_address(s))?,
        Command::P2wsh(script) => script.with_source(|s| ctx.make_p2wsh_address(s))?,
        Command::Sh(script) => script.with_source(|s| ctx.make_sh_address(s))?,
        Command::Parse { address } => hex::encode(ctx.parse(address)?),
        Command::ParseHash { address } => hex::encode(ctx.parse_hash(address)?),
        Command::Inspect { address } => {
            let format = ctx.decode(address)?.format();
            let parsed = ctx
                .parse_address(address)
                .with_context(|| format!("address is not valid on {}", ctx.network().name))?;
            return Ok(vec![
                format!("format: {:?}", format),
                format!("kind:   {:?}", parsed.kind()),
                format!("hash:   {}", hex::encode(parsed.hash())),
                format!("script: {}", hex::encode(parsed.script_pubkey())),
            ]);
        }
        Command::ToScript { address } => hex::encode(ctx.to_output_script(address)?),
        Command::FromScript { script } => {
            ctx.from_output_script(&decode_hex("script", script)?)?
        }
        Command::Networks => {
            let active = &ctx.network().name;
            return Ok(registry
                .iter()
                .map(|params| describe_network(params, &params.name == active))
                .collect());
        }
    };
    Ok(vec![line])
}

fn run(args: &Args) -> Result<Vec<String>> {
    let registry = load_registry(args.networks_file.as_deref())?;
    let network = registry
        .get(&args.network)
        .with_context(|| format!("cannot select network '{}'", args.network))?
        .clone();
    debug!("using network {}", network.name);

    let ctx = AddressContext::new(network)?;
    execute(&ctx, &registry, &args.command)
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose, args.quiet);

    match run(&args) {
        Ok(lines) => {
            for line in lines {
                println!("{}", line);
            }
        }
        Err(err) => {
            eprintln!("Error: {:#}", err);
            std::process::exit(1);
        }
    }
}
