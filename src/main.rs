//! Caseflow CLI - municipal case workflow management

use caseflow::cli::{Cli, Commands, NewCase, RecordEntry};
use caseflow::errors::to_exit_code;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() {
    // Initialize tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let result = run(cli).await;

    match result {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(to_exit_code(&e));
        }
    }
}

async fn run(cli: Cli) -> caseflow::Result<()> {
    use caseflow::cli::commands;

    let cwd = cli.cwd.as_deref();
    match cli.command {
        Some(Commands::Init { force }) => commands::init::run(cwd, force, cli.dry_run).await,
        Some(Commands::New { case }) => match case {
            NewCase::Housing { file, draft } => {
                commands::new::run_housing(cwd, &file, draft, cli.dry_run).await
            }
            NewCase::License { file } => commands::new::run_license(cwd, &file, cli.dry_run).await,
            NewCase::Plot { file } => commands::new::run_plot(cwd, &file, cli.dry_run).await,
            NewCase::BuildingPlan { file } => {
                commands::new::run_building_plan(cwd, &file, cli.dry_run).await
            }
        },
        Some(Commands::Transition {
            reference,
            status,
            actor,
        }) => commands::transition::run(cwd, &reference, &status, &actor, cli.dry_run).await,
        Some(Commands::Rezone { plot, file }) => {
            commands::rezone::run(cwd, &plot, &file, cli.dry_run).await
        }
        Some(Commands::Record { entry }) => match entry {
            RecordEntry::Inspection {
                reference,
                report_id,
                outcome,
            } => {
                commands::record::run_inspection(cwd, &reference, &report_id, &outcome, cli.dry_run)
                    .await
            }
            RecordEntry::FeePayment { reference, fee_id } => {
                commands::record::run_fee_payment(cwd, &reference, &fee_id, cli.dry_run).await
            }
            RecordEntry::CommitteeDecision {
                reference,
                decision,
                meeting_date,
            } => {
                commands::record::run_committee_decision(
                    cwd,
                    &reference,
                    &decision,
                    &meeting_date,
                    cli.dry_run,
                )
                .await
            }
            RecordEntry::Checklist {
                reference,
                item_id,
                outcome,
                by,
            } => {
                commands::record::run_checklist(
                    cwd, &reference, &item_id, &outcome, &by, cli.dry_run,
                )
                .await
            }
        },
        Some(Commands::Show { reference, json }) => {
            commands::show::run(cwd, &reference, json).await
        }
        Some(Commands::List { kind, status, json }) => {
            commands::list::run(cwd, kind.as_deref(), status.as_deref(), json).await
        }
        Some(Commands::Status { json }) => commands::status::run(cwd, json).await,
        Some(Commands::Attach { reference, file }) => {
            commands::attach::run(cwd, &reference, &file, cli.dry_run).await
        }
        Some(Commands::Doctor) => commands::doctor::run(cwd).await,
        None => {
            // Default to showing help - clap handles this
            println!("Use --help for usage information");
            Ok(())
        }
    }
}
