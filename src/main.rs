//! Flowpanel binary.
//!
//! Runs the flowmeter dashboard, or answers one-off network queries.

use anyhow::Context;
use clap::{Args, Parser, Subcommand, ValueEnum};
use flowpanel::{
    config::{
        DEFAULT_COMMAND_TIMEOUT_SECS, DEFAULT_FLOW_CONFIG_PATH, DEFAULT_FLOW_GPIO_PIN,
        DEFAULT_HOSTAPD_CONF, DEFAULT_LITERS_PER_PULSE, DEFAULT_WIFI_PASSWORD,
    },
    random_locally_administered_mac, start_web_server, AppState, DefaultPulseInput,
    NetworkInspector, NetworkSnapshot, PanelConfig, PulseCounter, PulseInput,
    SystemCommandRunner, WebConfig, DEFAULT_WEB_PORT,
};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn, Level};
use tracing_subscriber::{filter::LevelFilter, EnvFilter, FmtSubscriber};

#[derive(Parser)]
#[command(name = "flowpanel")]
#[command(about = "Flowmeter dashboard and WiFi access-point settings")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = "A Raspberry Pi web panel that counts flowmeter pulses and edits the hostapd access point")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Web server bind address
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Web server port
    #[arg(short, long, default_value_t = DEFAULT_WEB_PORT)]
    port: u16,

    /// Start without attaching the flowmeter pin (useful for non-Pi systems)
    #[arg(long)]
    no_gpio: bool,

    /// BCM pin the flowmeter is wired to
    #[arg(long, default_value_t = DEFAULT_FLOW_GPIO_PIN)]
    gpio_pin: u8,

    /// Liters represented by one flowmeter pulse
    #[arg(long, default_value_t = DEFAULT_LITERS_PER_PULSE)]
    liters_per_pulse: f64,

    /// Password for the WiFi settings page
    #[arg(long, default_value = DEFAULT_WIFI_PASSWORD)]
    wifi_password: String,

    /// File holding the flowmeter settings
    #[arg(long, default_value = DEFAULT_FLOW_CONFIG_PATH)]
    flow_config: PathBuf,

    /// hostapd configuration file
    #[arg(long, default_value = DEFAULT_HOSTAPD_CONF)]
    hostapd_conf: PathBuf,

    /// Directory for the staged hostapd file (defaults to the system temp dir)
    #[arg(long)]
    temp_dir: Option<PathBuf>,

    /// Client WiFi interface
    #[arg(long, default_value = "wlan0")]
    client_interface: String,

    /// Access-point interface
    #[arg(long, default_value = "wlan0_ap")]
    ap_interface: String,

    /// Service restarted after the access point changes
    #[arg(long, default_value = "hostapd")]
    ap_service: String,

    /// Prefix for privileged commands; pass an empty string to run them directly
    #[arg(long, default_value = "sudo")]
    privilege_command: String,

    /// Timeout for external commands in seconds
    #[arg(long, default_value_t = DEFAULT_COMMAND_TIMEOUT_SECS)]
    command_timeout: u64,

    /// Require the WiFi password session for /update_ap as well
    #[arg(long)]
    require_auth_for_update_ap: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the web server (default)
    Serve(ServeArgs),

    /// Print the current network state and exit
    Network(NetworkArgs),

    /// Print a random locally administered MAC address
    RandomMac,
}

#[derive(Args, Default)]
struct ServeArgs {
    /// Static files directory served under /static (optional)
    #[arg(long)]
    static_dir: Option<String>,

    /// Add permissive CORS headers
    #[arg(long)]
    cors: bool,
}

#[derive(Args)]
struct NetworkArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Pretty)]
    format: OutputFormat,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Json,
    Pretty,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing/logging
    init_logging(&cli)?;

    match &cli.command {
        Some(Commands::Serve(args)) => serve_command(&cli, args).await?,
        Some(Commands::Network(args)) => network_command(&cli, args).await?,
        Some(Commands::RandomMac) => println!("{}", random_locally_administered_mac()),
        None => serve_command(&cli, &ServeArgs::default()).await?,
    }

    Ok(())
}

fn init_logging(cli: &Cli) -> anyhow::Result<()> {
    let directives = std::env::var(EnvFilter::DEFAULT_ENV).ok();

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(log_filter(log_level(cli), directives.as_deref()))
        .with_target(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    Ok(())
}

fn log_level(cli: &Cli) -> Level {
    if cli.debug {
        Level::DEBUG
    } else if cli.verbose {
        Level::INFO
    } else {
        Level::WARN
    }
}

/// `level` applies unless `RUST_LOG`-style directives override it.
fn log_filter(level: Level, directives: Option<&str>) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(level).into())
        .parse_lossy(directives.unwrap_or_default())
}

fn panel_config(cli: &Cli) -> PanelConfig {
    let mut config = PanelConfig::default();
    if let Some(dir) = &cli.temp_dir {
        config = config.with_temp_dir(dir.clone());
    }
    config
        .with_wifi_password(cli.wifi_password.clone())
        .with_flow_config_path(cli.flow_config.clone())
        .with_hostapd_conf_path(cli.hostapd_conf.clone())
        .with_client_interface(cli.client_interface.clone())
        .with_ap_interface(cli.ap_interface.clone())
        .with_ap_service(cli.ap_service.clone())
        .with_privilege_command(Some(cli.privilege_command.clone()))
        .with_flow_gpio_pin(cli.gpio_pin)
        .with_liters_per_pulse(cli.liters_per_pulse)
        .with_command_timeout(Duration::from_secs(cli.command_timeout))
        .with_require_auth_for_update_ap(cli.require_auth_for_update_ap)
}

async fn serve_command(cli: &Cli, args: &ServeArgs) -> anyhow::Result<()> {
    info!("Starting flowpanel...");

    let config = panel_config(cli);
    let counter = Arc::new(PulseCounter::new(config.liters_per_pulse));

    // Keep the input alive for as long as the server runs.
    let _pulse_input = if cli.no_gpio {
        warn!("Flowmeter GPIO disabled, liters will stay at zero");
        None
    } else {
        match DefaultPulseInput::attach(config.flow_gpio_pin, Arc::clone(&counter)) {
            Ok(input) => {
                info!("Flowmeter attached to GPIO {}", input.pin());
                Some(input)
            }
            Err(e) => {
                error!("Cannot start pulse counting: {}", e);
                return Err(e).context("flowmeter GPIO initialization failed");
            }
        }
    };

    let web_config = WebConfig::new(&cli.host, cli.port)
        .with_static_path(args.static_dir.clone())
        .with_cors(args.cors);

    info!("Web server configuration:");
    info!("  - Bind address: {}", web_config.bind_address());
    info!("  - CORS enabled: {}", web_config.enable_cors);
    info!("  - Flow config: {:?}", config.flow_config_path);
    info!("  - hostapd config: {:?}", config.hostapd_conf_path);
    if !config.require_auth_for_update_ap {
        warn!("/update_ap accepts changes without the WiFi password");
    }

    let state = AppState::new(config, counter);
    start_web_server(web_config, state).await?;

    Ok(())
}

async fn network_command(cli: &Cli, args: &NetworkArgs) -> anyhow::Result<()> {
    let config = panel_config(cli);
    let runner = Arc::new(SystemCommandRunner::new(config.command_timeout));
    let snapshot = NetworkInspector::from_config(runner, &config).snapshot().await;

    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&snapshot)?),
        OutputFormat::Pretty => print_pretty_snapshot(&snapshot),
    }

    Ok(())
}

fn print_pretty_snapshot(snapshot: &NetworkSnapshot) {
    println!("Network");
    println!("=======");
    println!("  MAC: {}", snapshot.current_mac);
    println!("  Connected to: {}", snapshot.current_ssid);
    if snapshot.ap_status {
        println!("  Access point: UP ({})", snapshot.ap_ssid);
    } else {
        println!("  Access point: DOWN");
    }
    println!();
    println!("Available networks:");
    for ssid in &snapshot.available_networks {
        println!("  {}", ssid);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::try_parse_from(["flowpanel", "--port", "9090", "--no-gpio"]).unwrap();
        assert_eq!(cli.port, 9090);
        assert!(cli.no_gpio);
    }

    #[test]
    fn test_default_values() {
        let cli = Cli::try_parse_from(["flowpanel"]).unwrap();
        assert_eq!(cli.port, DEFAULT_WEB_PORT);
        assert_eq!(cli.host, "0.0.0.0");
        assert_eq!(cli.gpio_pin, 17);
        assert!(cli.command.is_none());

        let config = panel_config(&cli);
        assert_eq!(config.wifi_password, "3333");
        assert_eq!(config.privilege_command.as_deref(), Some("sudo"));
    }

    #[test]
    fn test_log_level_flags() {
        let cases = [
            (vec!["flowpanel"], LevelFilter::WARN),
            (vec!["flowpanel", "--verbose"], LevelFilter::INFO),
            (vec!["flowpanel", "--debug"], LevelFilter::DEBUG),
            (vec!["flowpanel", "-v", "-d"], LevelFilter::DEBUG),
        ];
        for (args, expected) in cases {
            let cli = Cli::try_parse_from(args.clone()).unwrap();
            let filter = log_filter(log_level(&cli), None);
            assert_eq!(filter.max_level_hint(), Some(expected), "{:?}", args);
        }
    }

    #[test]
    fn test_log_filter_env_override() {
        let filter = log_filter(Level::WARN, Some("flowpanel=trace"));
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::TRACE));

        let filter = log_filter(Level::INFO, Some(""));
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::INFO));
    }

    #[test]
    fn test_empty_privilege_command() {
        let cli = Cli::try_parse_from(["flowpanel", "--privilege-command", ""]).unwrap();
        assert!(panel_config(&cli).privilege_command.is_none());
    }

    #[test]
    fn test_network_subcommand_format() {
        let cli = Cli::try_parse_from(["flowpanel", "network", "--format", "json"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Network(NetworkArgs {
                format: OutputFormat::Json
            }))
        ));
    }
}
