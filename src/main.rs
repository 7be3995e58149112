use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;

use certcbt::{Cbt, load_question_bank};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Question bank text file (QUESTION <n> ... Correct Answer: blocks)
    bank: PathBuf,

    /// Print the parsed bank as JSON and exit
    #[arg(long)]
    dump_json: bool,
}

fn main() {
    let args = Args::parse();

    if args.dump_json {
        if let Err(e) = dump_json(&args.bank) {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
        return;
    }

    let cbt = match Cbt::from_bank(&args.bank) {
        Ok(cbt) => cbt,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = cbt.run() {
        eprintln!("Error running CBT: {}", e);
        process::exit(1);
    }
}

fn dump_json(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let questions = load_question_bank(path)?;
    println!("{}", serde_json::to_string_pretty(&questions)?);
    Ok(())
}
