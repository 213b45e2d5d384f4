use std::path::PathBuf;

use clap::{Parser, Subcommand};

const STORE_FILE: &str = "makerstore.txt";

#[derive(Parser, Debug)]
pub struct Args {
    /// Directory holding makerstore's data. Everything lives in
    /// a single `makerstore.txt` inside it.
    #[arg(short, long, default_value = ".")]
    data_dir: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create an account (student, faculty, employer or viewer).
    Signup {
        username: String,
        password: String,
        confirm_password: String,
        user_type: String,
    },
    Login {
        username: String,
        password: String,
    },
    Logout,
    /// Show who is logged in.
    Whoami,
    /// Where the profile link leads right now.
    Profile,
    Save(MakerArgs),
    Unsave {
        id: String,
    },
    /// Save the maker, or unsave it if it was already saved.
    Toggle(MakerArgs),
    /// List the current user's saved makers.
    Saved,
    IsSaved {
        id: String,
    },
}

#[derive(clap::Args, Debug)]
pub struct MakerArgs {
    pub id: String,

    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub url: Option<String>,
}

impl Args {
    pub fn store_path(&self) -> PathBuf {
        self.data_dir.join(STORE_FILE)
    }
}
