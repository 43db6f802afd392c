//! Main entry point for the delivery quoter service.
//!
//! This binary answers one delivery quote request per invocation. The
//! request JSON arrives as the positional argument or on stdin, and the
//! reply JSON is written to stdout so callers can capture it directly.
//! Logging goes to stderr.

use clap::Parser;
use quoter_config::{Config, ConfigError};
use quoter_engine::QuoteEngine;
use quoter_model::implementations::fs::create_source;
use quoter_model::ModelStore;
use quoter_types::{DeliveryQuote, DeliveryRequest, ErrorResponse};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tokio::io::AsyncReadExt;

const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Command-line arguments for the quoter service.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
	/// Path to configuration file (defaults to config.toml)
	#[arg(short, long)]
	config: Option<PathBuf>,

	/// Log level (trace, debug, info, warn, error)
	#[arg(short, long, default_value = "warn")]
	log_level: String,

	/// Request JSON; read from stdin when omitted
	request: Option<String>,
}

/// A raw request body together with where it came from.
///
/// The source determines the error message when the body is not JSON, so
/// callers can tell a bad argument from bad piped input.
enum RawRequest {
	Argument(String),
	Stdin(String),
}

impl RawRequest {
	fn body(&self) -> &str {
		match self {
			RawRequest::Argument(body) | RawRequest::Stdin(body) => body,
		}
	}

	fn parse_failure(&self) -> &'static str {
		match self {
			RawRequest::Argument(_) => "Invalid JSON argument",
			RawRequest::Stdin(_) => "Invalid JSON input",
		}
	}
}

/// Main entry point for the quoter service.
///
/// This function:
/// 1. Parses command-line arguments
/// 2. Initializes logging infrastructure
/// 3. Loads configuration from file
/// 4. Reads the request from the argument or stdin
/// 5. Quotes the request and prints the reply to stdout
#[tokio::main]
async fn main() -> ExitCode {
	let args = Args::parse();

	// Initialize tracing with env filter
	use tracing_subscriber::{fmt, EnvFilter};

	let default_directive = args.log_level.to_string();
	let env_filter =
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

	// Stdout carries the reply JSON, so logs go to stderr
	fmt()
		.with_env_filter(env_filter)
		.with_writer(std::io::stderr)
		.with_target(true)
		.init();

	let config_path = args
		.config
		.clone()
		.unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));
	let config = match load_config(&config_path, args.config.is_some()).await {
		Ok(config) => config,
		Err(e) => {
			tracing::error!(path = %config_path.display(), error = %e, "Failed to load configuration");
			return fail(format!("Configuration error: {}", e));
		},
	};
	tracing::info!("Loaded configuration [{}]", config.quoter.id);

	let engine = QuoteEngine::new(config, ModelStore::new(create_source()));

	let raw = match read_request(&args).await {
		Ok(raw) => raw,
		Err(message) => return fail(message),
	};

	match process_request(&engine, &raw).await {
		Ok(quote) => {
			print_reply(&quote);
			ExitCode::SUCCESS
		},
		Err(message) => fail(message),
	}
}

/// Loads configuration, falling back to defaults when the implicit default
/// path does not exist.
///
/// An explicitly passed path must exist; only the implicit default is
/// allowed to be absent, because every section has usable defaults.
async fn load_config(path: &Path, explicit: bool) -> Result<Config, ConfigError> {
	match Config::from_file(path).await {
		Ok(config) => Ok(config),
		Err(ConfigError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound && !explicit => {
			tracing::info!("No configuration file found, using defaults");
			Ok(Config::default())
		},
		Err(e) => Err(e),
	}
}

/// Reads the request body from the positional argument or stdin.
async fn read_request(args: &Args) -> Result<RawRequest, String> {
	if let Some(body) = &args.request {
		return Ok(RawRequest::Argument(body.clone()));
	}

	let mut body = String::new();
	tokio::io::stdin()
		.read_to_string(&mut body)
		.await
		.map_err(|e| format!("Failed to read stdin: {}", e))?;
	Ok(RawRequest::Stdin(body))
}

/// Parses the raw body and quotes it.
///
/// Parsing happens in two stages so the error distinguishes a body that is
/// not JSON at all from JSON that is not a valid request.
async fn process_request(engine: &QuoteEngine, raw: &RawRequest) -> Result<DeliveryQuote, String> {
	let value: serde_json::Value =
		serde_json::from_str(raw.body()).map_err(|_| raw.parse_failure().to_string())?;
	let request: DeliveryRequest =
		serde_json::from_value(value).map_err(|e| format!("Invalid request: {}", e))?;

	Ok(engine.quote(&request).await)
}

/// Writes a reply as a single JSON line on stdout.
fn print_reply<T: serde::Serialize>(reply: &T) {
	match serde_json::to_string(reply) {
		Ok(body) => println!("{}", body),
		Err(e) => tracing::error!(error = %e, "Failed to serialize reply"),
	}
}

/// Prints an error envelope and returns the failure exit code.
fn fail(message: String) -> ExitCode {
	print_reply(&ErrorResponse::new(message));
	ExitCode::FAILURE
}
