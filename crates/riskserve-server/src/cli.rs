use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "riskserve")]
#[command(about = "Mortality-risk inference service", long_about = None)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config.yaml")]
    pub config: String,

    /// Directory holding the trained artifacts
    #[arg(short, long)]
    pub models: Option<PathBuf>,

    /// Listen address
    #[arg(short = 'l', long)]
    pub listen: Option<String>,

    /// Listen port
    #[arg(short = 'P', long)]
    pub port: Option<u16>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}
