use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};

#[derive(Parser, Debug)]
#[command(
    name = "covercheck",
    version,
    about = "Book-cover age-appropriateness screener"
)]
pub struct Cli {
    /// Path to client.toml (defaults to config/client.toml)
    #[arg(long)]
    pub config: Option<String>,
    /// Target reader age, 5-18 (overrides the configured default)
    #[arg(long)]
    pub age: Option<u8>,
    /// Session identifier to reuse between invocations of the REST API
    #[arg(long)]
    pub session: Option<String>,
    #[arg(long, value_enum, default_value_t = RunMode::Cli)]
    pub mode: RunMode,
    #[arg(long, default_value = "127.0.0.1:8080")]
    pub rest_addr: SocketAddr,
    /// Cover image to analyze (CLI mode)
    pub image: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum RunMode {
    Cli,
    Rest,
}
