use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;
mod state;

#[derive(Parser)]
#[command(name = "quorumsig")]
#[command(about = "Operate a multisig registry backed by a local ledger state file")]
struct Cli {
    /// Path to the JSON ledger state file
    #[arg(long, global = true, default_value = "quorumsig.json")]
    state: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new multisig registry
    Create {
        /// Account creating (and paying for) the registry
        #[arg(long)]
        signer: String,

        /// Owner accounts, comma-separated
        #[arg(long, value_delimiter = ',')]
        owners: Vec<String>,

        /// Approvals required for standard proposals
        #[arg(long)]
        threshold: u8,

        /// Approvals required for admin proposals (defaults to threshold)
        #[arg(long)]
        admin_threshold: Option<u8>,
    },
    /// Propose a transaction against the registry's current nonce
    Propose {
        #[arg(long)]
        signer: String,

        /// Registry address (hex)
        multisig: String,

        /// Payload bytes, hex-encoded
        #[arg(long)]
        payload: String,

        /// Transaction kind: transfer, token-transfer, admin-action,
        /// change-threshold, add-owner, remove-owner, custom
        #[arg(long, default_value = "transfer")]
        kind: String,

        /// Nonce to cite (defaults to the registry's current nonce)
        #[arg(long)]
        nonce: Option<u64>,

        /// Validity window in hours (defaults to 72; 0 expires immediately)
        #[arg(long)]
        expires_in_hours: Option<u16>,
    },
    /// Approve a pending transaction
    Approve {
        #[arg(long)]
        signer: String,
        multisig: String,
        transaction_id: u64,
    },
    /// Execute a fully-approved transaction
    Execute {
        #[arg(long)]
        signer: String,
        multisig: String,
        transaction_id: u64,
    },
    /// Immediately pause the registry (single owner, no quorum)
    Pause {
        #[arg(long)]
        signer: String,
        multisig: String,
    },
    /// Unpause via an admin-quorum-approved transaction
    Unpause {
        #[arg(long)]
        signer: String,
        multisig: String,
        transaction_id: u64,
    },
    /// Change the standard threshold via an admin-approved transaction
    SetThreshold {
        #[arg(long)]
        signer: String,
        multisig: String,
        transaction_id: u64,
        new_threshold: u8,
    },
    /// Add an owner via an admin-approved transaction
    AddOwner {
        #[arg(long)]
        signer: String,
        multisig: String,
        transaction_id: u64,
        owner: String,
    },
    /// Remove an owner via an admin-approved transaction
    RemoveOwner {
        #[arg(long)]
        signer: String,
        multisig: String,
        transaction_id: u64,
        owner: String,
    },
    /// Show registry state, or one transaction when an id is given
    Show {
        multisig: String,
        transaction_id: Option<u64>,
    },
    /// List every registry in the state file
    List,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let state = cli.state;

    match cli.command {
        Commands::Create {
            signer,
            owners,
            threshold,
            admin_threshold,
        } => commands::create::run(&state, &signer, &owners, threshold, admin_threshold),
        Commands::Propose {
            signer,
            multisig,
            payload,
            kind,
            nonce,
            expires_in_hours,
        } => commands::propose::run(
            &state,
            &signer,
            &multisig,
            &payload,
            &kind,
            nonce,
            expires_in_hours,
        ),
        Commands::Approve {
            signer,
            multisig,
            transaction_id,
        } => commands::approve::run(&state, &signer, &multisig, transaction_id),
        Commands::Execute {
            signer,
            multisig,
            transaction_id,
        } => commands::execute::run(&state, &signer, &multisig, transaction_id),
        Commands::Pause { signer, multisig } => commands::admin::pause(&state, &signer, &multisig),
        Commands::Unpause {
            signer,
            multisig,
            transaction_id,
        } => commands::admin::unpause(&state, &signer, &multisig, transaction_id),
        Commands::SetThreshold {
            signer,
            multisig,
            transaction_id,
            new_threshold,
        } => {
            commands::admin::set_threshold(&state, &signer, &multisig, transaction_id, new_threshold)
        }
        Commands::AddOwner {
            signer,
            multisig,
            transaction_id,
            owner,
        } => commands::admin::add_owner(&state, &signer, &multisig, transaction_id, &owner),
        Commands::RemoveOwner {
            signer,
            multisig,
            transaction_id,
            owner,
        } => commands::admin::remove_owner(&state, &signer, &multisig, transaction_id, &owner),
        Commands::Show {
            multisig,
            transaction_id,
        } => commands::show::run(&state, &multisig, transaction_id),
        Commands::List => commands::show::list(&state),
    }
}
