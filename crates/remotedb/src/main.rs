use clap::Parser;
use remotedb::{RemoteDbConfig, RemoteDbModule};
use remotedb_core::{
    Attribute, AttributeType, AuthorizeModule, AuthorizeOutcome, RequestContext,
};
use std::process;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// remotedb - remote HTTP user database lookup tool
///
/// Runs one authorization lookup against the configured remote database and
/// prints the attributes it would inject into the request.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(name = "remotedb")]
struct Cli {
    /// Username to look up
    #[arg(value_name = "USERNAME", required_unless_present = "validate")]
    username: Option<String>,

    /// Calling-Station-Id to send with the lookup (typically a MAC address)
    #[arg(short, long, default_value = "")]
    mac: String,

    /// Path to configuration file
    #[arg(short, long, value_name = "CONFIG", default_value = "remotedb.json")]
    config_path: String,

    /// Validate configuration and exit (doesn't perform a lookup)
    #[arg(long)]
    validate: bool,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Load or create configuration (without logging first)
    let config = match RemoteDbConfig::from_file(&cli.config_path) {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing_subscriber::registry()
                .with(EnvFilter::new("info"))
                .with(tracing_subscriber::fmt::layer())
                .init();

            if cli.validate {
                eprintln!("Configuration validation failed: {}", e);
                process::exit(1);
            }

            warn!("Could not load config file from: {}", cli.config_path);
            info!("Creating example configuration at: {}", cli.config_path);

            let example_config = RemoteDbConfig::example();
            if let Err(e) = example_config.to_file(&cli.config_path) {
                error!("Error creating example config: {}", e);
                process::exit(1);
            }

            info!("Please edit {} and run again", cli.config_path);
            process::exit(0);
        }
    };

    if cli.validate {
        println!("Configuration validated successfully!");
        println!();
        println!("Configuration summary:");
        println!("  Endpoint: {}", config.endpoint());
        println!("  Timeout: {}s", config.timeout);
        println!("  Log level: {}", config.log_level.as_deref().unwrap_or("info"));
        process::exit(0);
    }

    // Initialize tracing with configured log level
    let log_level = config.log_level.as_deref().unwrap_or("info");
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level)))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // required_unless_present guarantees a username past this point
    let Some(username) = cli.username else {
        error!("A username is required");
        process::exit(2);
    };

    info!("Looking up {} at {}", username, config.endpoint());

    let module = match RemoteDbModule::new(config) {
        Ok(module) => module,
        Err(e) => {
            error!("Failed to create lookup client: {}", e);
            process::exit(1);
        }
    };

    let mut request = RequestContext::new();
    match Attribute::string(AttributeType::UserName, username.as_str()) {
        Ok(attr) => request.attributes.add(attr),
        Err(e) => {
            error!("Invalid username: {}", e);
            process::exit(2);
        }
    }
    if !cli.mac.is_empty() {
        match Attribute::string(AttributeType::CallingStationId, cli.mac.as_str()) {
            Ok(attr) => request.attributes.add(attr),
            Err(e) => {
                error!("Invalid calling station id: {}", e);
                process::exit(2);
            }
        }
    }

    match module.authorize(&mut request) {
        AuthorizeOutcome::Success => {
            println!("Lookup succeeded for {}", username);
            println!();
            println!("Control attributes:");
            for attr in request.control.iter() {
                print_attribute(attr);
            }
            println!("Reply attributes:");
            for attr in request.reply.iter() {
                print_attribute(attr);
            }
        }
        AuthorizeOutcome::NotApplicable => {
            println!("Nothing to look up (no username in request)");
        }
        AuthorizeOutcome::Failure => {
            error!("Lookup failed for {}", username);
            process::exit(1);
        }
    }
}

fn print_attribute(attr: &Attribute) {
    let attr_type = AttributeType::from_u16(attr.attr_type);
    let name = attr_type
        .map(|t| format!("{:?}", t))
        .unwrap_or_else(|| format!("Attr-{}", attr.attr_type));

    // The tunnel type attributes are integers; everything else this module
    // produces is a string.
    let is_integer = matches!(
        attr_type,
        Some(AttributeType::TunnelType | AttributeType::TunnelMediumType)
    );

    if is_integer {
        if let Ok(value) = attr.as_integer() {
            println!("  {} = {}", name, value);
            return;
        }
    }
    if let Ok(value) = attr.as_string() {
        println!("  {} = {}", name, value);
    } else {
        println!("  {} = {:?}", name, attr.value);
    }
}
