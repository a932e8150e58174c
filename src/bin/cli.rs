use clap::{Parser, Subcommand};
use dotenvy::dotenv;

use registrar::modules::semester_registrations::rollover::SemesterRolloverService;
use registrar::modules::semester_registrations::service::SemesterRegistrationService;
use registrar_config::DatabaseConfig;
use registrar_db::init_db_pool;
use registrar_models::SemesterRegistrationStatus;
use registrar_models::ids::SemesterRegistrationId;

#[derive(Parser)]
#[command(name = "registrar-cli")]
#[command(about = "Registrar CLI - Administrative tools for semester registration", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Roll an ended registration into its academic semester
    StartNewSemester {
        /// Semester registration ID
        #[arg(long)]
        id: SemesterRegistrationId,
    },
    /// Move a registration to its next status
    AdvanceRegistration {
        /// Semester registration ID
        #[arg(long)]
        id: SemesterRegistrationId,

        /// Target status: ongoing or ended
        #[arg(short = 's', long, value_parser = parse_status)]
        status: SemesterRegistrationStatus,
    },
}

fn parse_status(value: &str) -> Result<SemesterRegistrationStatus, String> {
    match value.to_ascii_uppercase().as_str() {
        "UPCOMING" => Ok(SemesterRegistrationStatus::Upcoming),
        "ONGOING" => Ok(SemesterRegistrationStatus::Ongoing),
        "ENDED" => Ok(SemesterRegistrationStatus::Ended),
        other => Err(format!("unknown status '{other}'")),
    }
}

#[tokio::main]
async fn main() {
    dotenv().ok();

    let pool = init_db_pool(&DatabaseConfig::from_env()).await;

    let cli = Cli::parse();

    match cli.command {
        Commands::StartNewSemester { id } => {
            match SemesterRolloverService::start_new_semester(&pool, id).await {
                Ok(response) => println!("✅ {}", response.message),
                Err(e) => {
                    eprintln!("❌ Error starting semester: {}", e);
                    std::process::exit(1);
                }
            }
        }
        Commands::AdvanceRegistration { id, status } => {
            match SemesterRegistrationService::advance_status(&pool, id, status).await {
                Ok(registration) => {
                    println!("✅ Registration {} is now {}", registration.id, registration.status)
                }
                Err(e) => {
                    eprintln!("❌ Error advancing registration: {}", e);
                    std::process::exit(1);
                }
            }
        }
    }
}
