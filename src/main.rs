// Wed Oct 14 2026 - Alex

use clap::Parser;
use colored::Colorize;
use memscan::{utils, Config, ProcessHandle};
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(author = "Alex")]
#[command(version = "1.0.0")]
#[command(about = "Find a running process and inspect its writable memory", long_about = None)]
struct Args {
    /// Substring of the process name to look for
    name: String,
}

fn main() -> ExitCode {
    let args = Args::parse();
    utils::init_from_env();

    let config = Config::default();
    match ProcessHandle::find_by_name(&args.name, &config) {
        Ok(Some(handle)) => {
            println!("{} Found {}", "[+]".green(), handle.to_string().bold());
            match handle.load_regions() {
                Ok(regions) => {
                    let total: u64 = regions.iter().map(|r| r.size()).sum();
                    println!(
                        "{} {} writable regions, {}",
                        "[*]".blue(),
                        regions.len(),
                        utils::to_human(total)
                    );
                }
                Err(e) => eprintln!("{} Could not read regions: {}", "[!]".yellow(), e),
            }
            ExitCode::SUCCESS
        }
        Ok(None) => {
            eprintln!("{} No process matching '{}'", "[!]".red(), args.name);
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("{} Failed to list processes: {}", "[!]".red(), e);
            ExitCode::FAILURE
        }
    }
}
