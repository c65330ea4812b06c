//! Rackforge CLI entrypoint.
//!
//! This is the main entrypoint for the rackforge command-line tool.

use std::collections::HashMap;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use rackforge::api::{
    ApiClient, DedicatedServerCreateInput, HostProvision, SshKeyCreateInput, SshKeyUpdateInput,
    SslCertificateCreateInput,
};
use rackforge::cli::{
    Cli, Commands, ConfigCommands, HostAddArgs, HostCommands, LoadBalancerCommands,
    LocationCommands, OutputFormatter, SshKeyCommands, SslCommands,
};
use rackforge::config::{self, read_input_json, Settings};
use rackforge::error::{ConfigError, RackforgeError, Result};
use rackforge::storage::{populate_storage, TokenPolicy};

use clap::Parser;
use colored::Colorize;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Main entrypoint.
fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.verbose);

    // Run async runtime
    let runtime = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Failed to create async runtime: {e}");
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(run(cli)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Initializes the logging system.
fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

/// Main async entry point.
async fn run(cli: Cli) -> Result<()> {
    config::load_dotenv()?;

    let formatter = OutputFormatter::new(cli.output).with_fields(cli.fields.clone());

    match cli.command {
        Commands::Host { ref command } => match command {
            HostCommands::List { page } => {
                let client = create_client(&cli)?;
                let hosts = if page.all {
                    client.list_all_hosts().await?
                } else {
                    client.list_hosts(page.page, page.per_page).await?
                };
                eprintln!("{}", formatter.format_list(&hosts)?);
                Ok(())
            }
            HostCommands::Get { id } => {
                let client = create_client(&cli)?;
                let host = client.get_dedicated_server(id).await?;
                eprintln!("{}", formatter.format_item(&host)?);
                Ok(())
            }
            HostCommands::Add(args) => cmd_host_add(&create_client(&cli)?, args, &formatter).await,
            HostCommands::PowerOn { id } => {
                let host = create_client(&cli)?.power_on(id).await?;
                eprintln!("{} Power-on requested for {}", "\u{2713}".green(), host.id);
                Ok(())
            }
            HostCommands::PowerOff { id } => {
                let host = create_client(&cli)?.power_off(id).await?;
                eprintln!("{} Power-off requested for {}", "\u{2713}".green(), host.id);
                Ok(())
            }
            HostCommands::Reboot { id } => {
                let host = create_client(&cli)?.power_cycle(id).await?;
                eprintln!("{} Power cycle requested for {}", "\u{2713}".green(), host.id);
                Ok(())
            }
        },
        Commands::SshKey { ref command } => cmd_ssh_key(&cli, command, &formatter).await,
        Commands::Ssl { ref command } => cmd_ssl(&cli, command, &formatter).await,
        Commands::LoadBalancer { ref command } => {
            cmd_load_balancer(&cli, command, &formatter).await
        }
        Commands::Location { ref command } => cmd_location(&cli, command, &formatter).await,
        Commands::Config { ref command } => cmd_config(&cli, command),
    }
}

/// Orders dedicated servers, building the drive configuration from flags.
async fn cmd_host_add(
    client: &ApiClient,
    args: &HostAddArgs,
    formatter: &OutputFormatter,
) -> Result<()> {
    // Pre-seed from --input, then let flags win.
    let mut input: DedicatedServerCreateInput = match &args.input {
        Some(path) => read_input_json(path)?,
        None => DedicatedServerCreateInput::default(),
    };

    if let Some(model) = args.server_model {
        input.server_model_id = model;
    }
    if let Some(location) = args.location {
        input.location_id = location;
    }
    if let Some(os) = args.operating_system {
        input.operating_system_id = Some(os);
    }
    if !args.ssh_key_fingerprints.is_empty() {
        input.ssh_key_fingerprints = args.ssh_key_fingerprints.clone();
    }
    if !args.hostnames.is_empty() {
        input.hosts = args
            .hostnames
            .iter()
            .map(|hostname| HostProvision {
                hostname: hostname.clone(),
            })
            .collect();
    }

    require_argument(input.server_model_id != 0, "--server-model")?;
    require_argument(input.location_id != 0, "--location")?;
    require_argument(!input.hosts.is_empty(), "--hostname")?;

    let policy = if args.strict_flags {
        TokenPolicy::Strict
    } else {
        TokenPolicy::Lenient
    };
    let drive_slots: HashMap<String, Option<i64>> = args.drive_slots.iter().cloned().collect();

    populate_storage(
        &mut input,
        &drive_slots,
        &args.layouts,
        &args.partitions,
        policy,
    )?;

    let hosts = client.create_dedicated_servers(&input).await?;

    eprintln!("{} Ordered {} dedicated server(s).", "\u{2713}".green(), hosts.len());
    eprintln!("{}", formatter.format_list(&hosts)?);
    Ok(())
}

/// SSH key commands.
async fn cmd_ssh_key(
    cli: &Cli,
    command: &SshKeyCommands,
    formatter: &OutputFormatter,
) -> Result<()> {
    let client = create_client(cli)?;

    match command {
        SshKeyCommands::List { page } => {
            let keys = if page.all {
                client.list_all_ssh_keys().await?
            } else {
                client.list_ssh_keys(page.page, page.per_page).await?
            };
            eprintln!("{}", formatter.format_list(&keys)?);
        }
        SshKeyCommands::Get { fingerprint } => {
            let key = client.get_ssh_key(fingerprint).await?;
            eprintln!("{}", formatter.format_item(&key)?);
        }
        SshKeyCommands::Add {
            name,
            public_key_file,
        } => {
            let public_key = std::fs::read_to_string(public_key_file)?;
            let key = client
                .add_ssh_key(&SshKeyCreateInput {
                    name: name.clone(),
                    public_key: public_key.trim().to_string(),
                })
                .await?;
            eprintln!("{} Registered SSH key {}", "\u{2713}".green(), key.fingerprint);
        }
        SshKeyCommands::Update { fingerprint, name } => {
            let key = client
                .update_ssh_key(fingerprint, &SshKeyUpdateInput { name: name.clone() })
                .await?;
            eprintln!("{} Renamed SSH key {}", "\u{2713}".green(), key.fingerprint);
        }
        SshKeyCommands::Delete { fingerprint, yes } => {
            if !confirm(*yes, &format!("Delete SSH key {fingerprint}?"))? {
                eprintln!("Deletion cancelled.");
                return Ok(());
            }
            client.delete_ssh_key(fingerprint).await?;
            eprintln!("{} Deleted SSH key {fingerprint}", "\u{2713}".green());
        }
    }

    Ok(())
}

/// SSL certificate commands.
async fn cmd_ssl(cli: &Cli, command: &SslCommands, formatter: &OutputFormatter) -> Result<()> {
    let client = create_client(cli)?;

    match command {
        SslCommands::List { page } => {
            let certificates = if page.all {
                client.list_all_ssl_certificates().await?
            } else {
                client
                    .list_ssl_certificates(page.page, page.per_page)
                    .await?
            };
            eprintln!("{}", formatter.format_list(&certificates)?);
        }
        SslCommands::Get { id } => {
            let certificate = client.get_ssl_certificate(id).await?;
            eprintln!("{}", formatter.format_item(&certificate)?);
        }
        SslCommands::Add {
            name,
            public_key_file,
            private_key_file,
            chain_file,
        } => {
            let input = SslCertificateCreateInput {
                name: name.clone(),
                public_key: std::fs::read_to_string(public_key_file)?,
                private_key: std::fs::read_to_string(private_key_file)?,
                chain_key: chain_file
                    .as_ref()
                    .map(std::fs::read_to_string)
                    .transpose()?,
            };
            let certificate = client.add_ssl_certificate(&input).await?;
            eprintln!(
                "{} Uploaded SSL certificate {} ({})",
                "\u{2713}".green(),
                certificate.name,
                certificate.id
            );
        }
    }

    Ok(())
}

/// Load balancer commands.
async fn cmd_load_balancer(
    cli: &Cli,
    command: &LoadBalancerCommands,
    formatter: &OutputFormatter,
) -> Result<()> {
    let client = create_client(cli)?;

    match command {
        LoadBalancerCommands::List { page } => {
            let balancers = if page.all {
                client.list_all_load_balancers().await?
            } else {
                client.list_load_balancers(page.page, page.per_page).await?
            };
            eprintln!("{}", formatter.format_list(&balancers)?);
        }
        LoadBalancerCommands::Get { id } => {
            let balancer = client.get_load_balancer(id).await?;
            eprintln!("{}", formatter.format_item(&balancer)?);
        }
        LoadBalancerCommands::Delete { id, yes } => {
            if !confirm(
                *yes,
                &format!("Deleting load balancer {id} is IRREVERSIBLE. Continue?"),
            )? {
                eprintln!("Deletion cancelled.");
                return Ok(());
            }
            client.delete_load_balancer(id).await?;
            eprintln!("{} Deleted load balancer {id}", "\u{2713}".green());
        }
    }

    Ok(())
}

/// Provisioning catalog commands.
async fn cmd_location(
    cli: &Cli,
    command: &LocationCommands,
    formatter: &OutputFormatter,
) -> Result<()> {
    let client = create_client(cli)?;

    match command {
        LocationCommands::List => {
            let locations = client.list_locations().await?;
            eprintln!("{}", formatter.format_list(&locations)?);
        }
        LocationCommands::ServerModels { location_id } => {
            let models = client.list_server_models(*location_id).await?;
            eprintln!("{}", formatter.format_list(&models)?);
        }
        LocationCommands::DriveModels {
            location_id,
            server_model_id,
        } => {
            let models = client
                .list_drive_models(*location_id, *server_model_id)
                .await?;
            eprintln!("{}", formatter.format_list(&models)?);
        }
    }

    Ok(())
}

/// Local settings commands.
fn cmd_config(cli: &Cli, command: &ConfigCommands) -> Result<()> {
    let path = settings_path(cli.config.as_ref())?;
    let mut settings = Settings::load(&path)?;
    let profile_name = cli
        .profile
        .clone()
        .unwrap_or_else(|| settings.active_profile.clone());

    match command {
        ConfigCommands::Show => {
            eprintln!("Settings file: {}", path.display());
            eprintln!("Active profile: {}", settings.active_profile);

            let mut names: Vec<&String> = settings.profiles.keys().collect();
            names.sort();
            for name in names {
                let profile = &settings.profiles[name];
                eprintln!("\n[{name}]");
                eprintln!(
                    "  endpoint: {}",
                    profile.endpoint.as_deref().unwrap_or("(default)")
                );
                eprintln!(
                    "  token: {}",
                    profile.token.as_deref().map_or_else(
                        || String::from("(unset)"),
                        mask_token
                    )
                );
            }
        }
        ConfigCommands::SetToken { token } => {
            settings.profile_mut(&profile_name).token = Some(token.clone());
            settings.save(&path)?;
            eprintln!("{} Token stored for profile '{profile_name}'", "\u{2713}".green());
        }
        ConfigCommands::SetEndpoint { endpoint } => {
            settings.profile_mut(&profile_name).endpoint = Some(endpoint.clone());
            settings.save(&path)?;
            eprintln!(
                "{} Endpoint stored for profile '{profile_name}'",
                "\u{2713}".green()
            );
        }
        ConfigCommands::UseProfile { name } => {
            if !settings.profiles.contains_key(name) {
                return Err(RackforgeError::Config(ConfigError::UnknownProfile {
                    name: name.clone(),
                }));
            }
            settings.active_profile = name.clone();
            settings.save(&path)?;
            eprintln!("{} Active profile set to '{name}'", "\u{2713}".green());
        }
    }

    Ok(())
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Resolves the settings file path.
fn settings_path(cli_config: Option<&PathBuf>) -> Result<PathBuf> {
    cli_config.map_or_else(Settings::default_path, |path| Ok(path.clone()))
}

/// Creates an API client from settings, profile and environment.
fn create_client(cli: &Cli) -> Result<ApiClient> {
    let path = settings_path(cli.config.as_ref())?;
    let settings = Settings::load(&path)?;

    let profile = cli.profile.as_deref();
    let token = settings.resolve_token(profile)?;
    let endpoint = settings.resolve_endpoint(profile)?;
    debug!("Using endpoint: {endpoint}");

    Ok(ApiClient::new(&token)?.with_endpoint(endpoint))
}

/// Fails with a missing-argument error unless the condition holds.
fn require_argument(present: bool, name: &str) -> Result<()> {
    if present {
        Ok(())
    } else {
        Err(RackforgeError::Config(ConfigError::MissingArgument {
            name: name.to_string(),
        }))
    }
}

/// Asks for confirmation unless it was pre-approved with a flag.
fn confirm(pre_approved: bool, prompt: &str) -> Result<bool> {
    if pre_approved {
        return Ok(true);
    }

    eprint!("{prompt} [y/N]: ");
    std::io::stderr().flush()?;

    let mut answer = String::new();
    std::io::stdin().read_line(&mut answer)?;

    Ok(answer.trim().eq_ignore_ascii_case("y"))
}

/// Masks an API token, keeping only its tail visible.
fn mask_token(token: &str) -> String {
    if token.len() <= 4 {
        return "****".to_string();
    }
    format!("****{}", &token[token.len() - 4..])
}
