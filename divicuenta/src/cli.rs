use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "divicuenta")]
#[command(about = "Split restaurant bills between diners, tip included", version, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Compute every diner's share of a bill file and print their messages
    #[command(arg_required_else_help = true)]
    Split {
        /// JSON bill listing items, diners and who shared what
        bill: PathBuf,
        /// Format messages for WhatsApp instead of email
        #[arg(long)]
        whatsapp: bool,
        /// Record the bill in history
        #[arg(long)]
        save: bool,
    },
    /// Read a receipt photo and print its items as a bill file skeleton
    #[command(arg_required_else_help = true)]
    Scan {
        image: PathBuf,
        /// Image MIME type; guessed from the file extension when omitted
        #[arg(long, value_name = "TYPE")]
        mime: Option<String>,
    },
    /// Finalized bills and their payments
    #[command(subcommand)]
    History(HistoryCommand),
    /// Register a local account whose bank details appear on every bill
    Signup(SignupArgs),
    Login {
        email: String,
        password: String,
    },
    Logout,
    /// Show who is logged in and the transfer details in use
    Whoami,
}

#[derive(Debug, Subcommand)]
pub enum HistoryCommand {
    List,
    Show {
        id: String,
    },
    /// Mark a diner as paid (or unpaid) on a finalized bill
    Pay {
        id: String,
        diner_id: String,
        #[arg(long)]
        unpaid: bool,
    },
}

#[derive(Debug, Args)]
pub struct SignupArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub email: String,
    #[arg(long)]
    pub password: String,
    #[arg(long)]
    pub rut: String,
    #[arg(long)]
    pub phone: String,
    #[arg(long)]
    pub bank: String,
    #[arg(long)]
    pub account_type: String,
    #[arg(long)]
    pub account_number: String,
}
