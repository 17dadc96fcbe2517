use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use lms_cli::{accounts, activity, seeder};
use lms_config::{AppConfig, LoggingConfig};
use lms_core::exit_codes;
use lms_db::{AccountStore, PgStore};
use lms_models::{ActivityAction, Email};

#[derive(Parser)]
#[command(name = "lms-cli")]
#[command(about = "LMS CLI - Administrative tools for the LMS", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactively create accounts from a list of email addresses
    CreateAccounts,
    /// Apply pending database migrations
    Migrate,
    /// Seed demo users (one or two per role)
    SeedUsers {
        /// Number of extra students with fake names
        #[arg(short = 's', long, default_value = "0")]
        students: usize,
    },
    /// Seed demo courses, assigned to existing teachers
    SeedCourses,
    /// Record an activity log entry for a user
    LogActivity {
        /// Email of the user the entry belongs to
        #[arg(short = 'u', long)]
        user: String,

        /// Action name, e.g. `course_created` (see `list-actions`)
        #[arg(short = 'a', long)]
        action: String,

        /// Optional JSON details
        #[arg(short = 'd', long)]
        details: Option<String>,
    },
    /// List the known activity actions
    ListActions,
}

#[tokio::main]
async fn main() {
    dotenv().ok();
    let log_guard = lms_observability::init_logging(&LoggingConfig::from_env());

    let code = run(Cli::parse()).await;

    drop(log_guard);
    std::process::exit(code);
}

async fn run(cli: Cli) -> i32 {
    if let Commands::ListActions = cli.command {
        println!("{}", activity::action_listing());
        return exit_codes::SUCCESS;
    }

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Configuration error: {}", e);
            return exit_codes::INTERNAL;
        }
    };

    if let Commands::CreateAccounts = cli.command {
        return accounts::run_interactive(&config).await;
    }

    let store = match PgStore::connect(&config.database).await {
        Ok(store) => store,
        Err(e) => {
            eprintln!("❌ Failed to connect to database: {}", e);
            return exit_codes::INTERNAL;
        }
    };

    let code = match cli.command {
        Commands::Migrate => handle_migrate(&store).await,
        Commands::SeedUsers { students } => handle_seed_users(&store, &config, students).await,
        Commands::SeedCourses => handle_seed_courses(&store).await,
        Commands::LogActivity {
            user,
            action,
            details,
        } => handle_log_activity(&store, &user, &action, details.as_deref()).await,
        Commands::CreateAccounts | Commands::ListActions => exit_codes::SUCCESS,
    };

    store.close().await;
    code
}

async fn handle_migrate(store: &PgStore) -> i32 {
    match store.migrate().await {
        Ok(()) => {
            println!("✅ Migrations applied");
            exit_codes::SUCCESS
        }
        Err(e) => {
            eprintln!("\n❌ Error running migrations: {}", e);
            exit_codes::INTERNAL
        }
    }
}

async fn handle_seed_users(store: &PgStore, config: &AppConfig, students: usize) -> i32 {
    let mut seeds = seeder::demo_users();
    seeds.extend(seeder::generate_students(students));

    match seeder::seed_users(store, &seeds, config.bcrypt_cost).await {
        Ok(summary) => {
            println!("   Password for every seeded account: {}", seeder::DEMO_PASSWORD);
            tracing::info!(created = summary.created, skipped = summary.skipped, "Users seeded");
            exit_codes::SUCCESS
        }
        Err(e) => {
            eprintln!("\n❌ Error seeding users: {:#}", e);
            exit_codes::INTERNAL
        }
    }
}

async fn handle_seed_courses(store: &PgStore) -> i32 {
    match seeder::seed_courses(store, &seeder::demo_courses()).await {
        Ok(summary) => {
            tracing::info!(created = summary.created, skipped = summary.skipped, "Courses seeded");
            exit_codes::SUCCESS
        }
        Err(e) => {
            eprintln!("\n❌ Error seeding courses: {:#}", e);
            exit_codes::INTERNAL
        }
    }
}

async fn handle_log_activity(
    store: &PgStore,
    user: &str,
    action: &str,
    details: Option<&str>,
) -> i32 {
    let email = match Email::new(user) {
        Ok(email) => email,
        Err(e) => {
            eprintln!("❌ {}", e);
            return exit_codes::INVALID_INPUT;
        }
    };

    let action: ActivityAction = match action.parse() {
        Ok(action) => action,
        Err(e) => {
            eprintln!("❌ {}. Run `list-actions` to see the known actions.", e);
            return exit_codes::INVALID_INPUT;
        }
    };

    let details = match details.map(serde_json::from_str::<serde_json::Value>).transpose() {
        Ok(details) => details,
        Err(e) => {
            eprintln!("❌ Details must be valid JSON: {}", e);
            return exit_codes::INVALID_INPUT;
        }
    };

    match activity::log_activity_for_email(store, &email, action, details).await {
        Ok(entry) => {
            println!("✅ Logged {} for {} ({})", entry.action, email, entry.id);
            exit_codes::SUCCESS
        }
        Err(e) => {
            eprintln!("\n❌ Error logging activity: {}", e);
            exit_codes::INTERNAL
        }
    }
}
