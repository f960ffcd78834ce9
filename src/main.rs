use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use snapkeep::cli::{
    handle_audit_command, handle_plan_command, handle_policy_command, handle_prune_command,
    AuditArgs, PlanArgs, PolicyArgs, PruneArgs,
};
use snapkeep::config::{paths::SnapkeepPaths, settings::Settings};

const LOG_ENV: &str = "SNAPKEEP_LOG";

#[derive(Parser)]
#[command(
    name = "snapkeep",
    version,
    about = "Grandfather-father-son retention for tarsnap archives",
    long_about = "snapkeep lists your tarsnap archives, keeps the ones a set of \
                  retention rules asks for (everything recent, then one per day, \
                  week, month and year), and deletes the rest in a single batch."
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show which archives would be kept and which deleted
    Plan(PlanArgs),

    /// Delete archives no retention rule keeps
    Prune(PruneArgs),

    /// Show the effective retention rules
    Policy(PolicyArgs),

    /// Show recent deletions from the audit log
    Audit(AuditArgs),

    /// Write the default settings file
    Init,

    /// Show current configuration and paths
    Config,
}

fn init_tracing(verbose: u8) {
    let fallback = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(fallback));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Initialize paths and settings
    let paths = SnapkeepPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    match cli.command {
        Some(Commands::Plan(args)) => handle_plan_command(&settings, args)?,
        Some(Commands::Prune(args)) => handle_prune_command(&paths, &settings, args)?,
        Some(Commands::Policy(args)) => handle_policy_command(&settings, args)?,
        Some(Commands::Audit(args)) => handle_audit_command(&paths, args)?,
        Some(Commands::Init) => {
            println!("Initializing snapkeep at: {}", paths.base_dir().display());
            settings.save(&paths)?;
            println!("Initialization complete!");
            println!();
            println!("Default retention rules have been written:");
            for spec in &settings.rules {
                println!(
                    "  - keep {} within {}",
                    format!("{:?}", spec.keep).to_lowercase(),
                    spec.within
                );
            }
            println!();
            println!("Run 'snapkeep plan' to preview what would be deleted.");
        }
        Some(Commands::Config) => {
            println!("snapkeep Configuration");
            println!("======================");
            println!("Config directory: {}", paths.base_dir().display());
            println!("Settings file:    {}", paths.settings_file().display());
            println!("Audit log:        {}", paths.audit_log().display());
            println!("Initialized:      {}", paths.is_initialized());
            println!();
            println!("Settings:");
            println!(
                "  Archiver:        {} {}",
                settings.archiver.program,
                settings.archiver.args.join(" ")
            );
            println!("  Rules:           {}", settings.rules.len());
            println!("  Audit enabled:   {}", settings.audit.enabled);
            println!("  Audit dry runs:  {}", settings.audit.audit_dry_runs);
        }
        None => {
            println!("snapkeep - GFS retention for tarsnap archives");
            println!();
            println!("Run 'snapkeep --help' for usage information.");
            println!("Run 'snapkeep plan' to preview the retention plan.");
        }
    }

    Ok(())
}
