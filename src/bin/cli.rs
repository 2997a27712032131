//! Roulette CLI Client
//!
//! Command-line interface for interacting with a Roulette server.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use roulette::{Result, RouletteClient, RouletteError, Student};

/// Roulette CLI
#[derive(Parser, Debug)]
#[command(name = "roulette-cli")]
#[command(about = "CLI for the classroom quiz roulette")]
struct Args {
    /// Server address
    #[arg(short, long, default_value = "127.0.0.1:2613")]
    server: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show protocol version and number of students
    Info,

    /// Pick a random student
    Random,

    /// Load students
    Load {
        /// Full names to load
        names: Vec<String>,

        /// File with one full name per line
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// List all students
    List,

    /// Remove every student
    Clear,

    /// Show the commands the server supports
    Help,
}

fn main() {
    let args = Args::parse();

    if let Err(e) = run(&args) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<()> {
    let mut client = RouletteClient::connect(&args.server)?;

    match &args.command {
        Commands::Info => {
            let info = client.info()?;
            println!("protocol version: {}", info.protocol_version);
            println!("students: {}", info.number_of_students);
        }
        Commands::Random => match client.pick_random_student() {
            Ok(student) => println!("{}", student.fullname()),
            Err(RouletteError::EmptyStore) => println!("(no student loaded)"),
            Err(e) => return Err(e),
        },
        Commands::Load { names, file } => {
            let mut students: Vec<Student> = names.iter().map(|n| Student::new(n.as_str())).collect();
            if let Some(path) = file {
                for line in BufReader::new(File::open(path)?).lines() {
                    let line = line?;
                    let name = line.trim();
                    if !name.is_empty() {
                        students.push(Student::new(name));
                    }
                }
            }
            let response = client.load_students(&students)?;
            println!("loaded {} new student(s)", response.number_of_new_students);
        }
        Commands::List => {
            for student in client.list_students()? {
                println!("{}", student.fullname());
            }
        }
        Commands::Clear => {
            client.clear_data_store()?;
            println!("store cleared");
        }
        Commands::Help => println!("{}", client.help()?),
    }

    client.disconnect()?;
    Ok(())
}
