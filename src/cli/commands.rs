//! CLI command definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "bursar")]
#[command(about = "Student payment registry", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Student data file (overrides bursar.toml and BURSAR_DATA_FILE)
    #[arg(long, global = true, value_name = "PATH")]
    pub data_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Register a new student with an opening amount
    Register {
        /// Student ID (case-insensitive, must be unique)
        id: String,

        /// Student name
        name: String,

        /// Amount already paid (e.g., 100, 25.50)
        #[arg(allow_hyphen_values = true)]
        amount: String,
    },

    /// Record an additional payment for a student
    Pay {
        /// Student ID
        id: String,

        /// Payment amount, must be greater than zero
        #[arg(allow_hyphen_values = true)]
        amount: String,
    },

    /// List all students in registration order
    List,

    /// Show a single student
    Show {
        /// Student ID
        id: String,
    },

    /// Write a payment receipt for a student
    Receipt {
        /// Student ID
        id: String,
    },

    /// View or modify configuration
    Config {
        /// Config key to get or set
        key: Option<String>,

        /// Value to set (if provided, sets the key)
        value: Option<String>,

        /// List all configuration
        #[arg(short, long)]
        list: bool,
    },
}
