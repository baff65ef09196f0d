//! CLI module for caseflow
//!
//! Provides the command-line interface using clap.

pub mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Caseflow - municipal case workflow management (housing, licensing, planning)
#[derive(Parser, Debug)]
#[command(name = "caseflow")]
#[command(version)]
#[command(about = "Municipal case workflow management: housing applications, licenses, plots, and building plans")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress info-level output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Preview operations without writing anything
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Override the working directory
    #[arg(long, global = true)]
    pub cwd: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a caseflow workspace in the current directory
    Init {
        /// Overwrite an existing configuration
        #[arg(long)]
        force: bool,
    },

    /// Create a new case from a draft file
    New {
        #[command(subcommand)]
        case: NewCase,
    },

    /// Apply a workflow status transition to a case
    Transition {
        /// Case reference (e.g. HA-2025-001, BL-2025-001, RZ-2025-001, BP-2025-001)
        reference: String,

        /// Target status (e.g. inspection, approved, confirmed)
        status: String,

        /// Who is performing the action; appears in generated lock reasons
        #[arg(long, default_value = "Records Office")]
        actor: String,
    },

    /// File a rezoning request against a registered plot
    Rezone {
        /// Plot reference (e.g. PLT-2025-001)
        plot: String,

        /// Path to the rezoning draft JSON
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Record a sub-record outcome on a case
    Record {
        #[command(subcommand)]
        entry: RecordEntry,
    },

    /// Show one case
    Show {
        /// Case reference
        reference: String,

        /// Output the full record as JSON
        #[arg(long)]
        json: bool,
    },

    /// List cases with optional filtering
    List {
        /// Restrict to one kind (housing, licenses, plots, building-plans)
        #[arg(long)]
        kind: Option<String>,

        /// Filter by workflow status
        #[arg(long)]
        status: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show dashboard counts over the whole workspace
    Status {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Store a file and attach it to a case
    Attach {
        /// Case reference
        reference: String,

        /// Path to the file to attach
        file: PathBuf,
    },

    /// Validate every stored case and report corrupt records
    Doctor,
}

#[derive(Subcommand, Debug)]
pub enum NewCase {
    /// New housing ownership application
    Housing {
        /// Path to the application draft JSON
        #[arg(short, long)]
        file: PathBuf,

        /// Save as draft instead of submitting
        #[arg(long)]
        draft: bool,
    },

    /// New business license
    License {
        /// Path to the license draft JSON
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Register a new plot
    Plot {
        /// Path to the plot draft JSON
        #[arg(short, long)]
        file: PathBuf,
    },

    /// New building plan submission
    BuildingPlan {
        /// Path to the building plan draft JSON
        #[arg(short, long)]
        file: PathBuf,
    },
}

#[derive(Subcommand, Debug)]
pub enum RecordEntry {
    /// Record an inspection outcome on a housing application
    Inspection {
        /// Housing case reference
        reference: String,

        /// Inspection report id (e.g. INSP-1738000000000)
        report_id: String,

        /// Outcome: passed or failed
        outcome: String,
    },

    /// Record a fee payment on a license
    FeePayment {
        /// License reference
        reference: String,

        /// Fee id (e.g. FEE-1738000000000)
        fee_id: String,
    },

    /// Record the committee decision on a rezoning request
    CommitteeDecision {
        /// Rezoning request reference
        reference: String,

        /// Decision text
        decision: String,

        /// Committee meeting date (YYYY-MM-DD)
        #[arg(long)]
        meeting_date: String,
    },

    /// Record a departmental checklist sign-off on a building plan
    Checklist {
        /// Building plan reference
        reference: String,

        /// Checklist item id (e.g. CHK-1)
        item_id: String,

        /// Outcome: approved or rejected
        outcome: String,

        /// Department or officer signing off
        #[arg(long, default_value = "Records Office")]
        by: String,
    },
}
