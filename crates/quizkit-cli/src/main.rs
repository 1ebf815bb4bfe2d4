//! quizkit CLI — administrative interface to the assessment store.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;
mod config;

#[derive(Parser)]
#[command(name = "quizkit", version, about = "Assessment store and grading engine")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create starter config and an example quiz file
    Init,

    /// Validate quiz TOML files
    Validate {
        /// Path to a quiz file or directory
        #[arg(long)]
        quiz: PathBuf,
    },

    /// Create a teacher or student account
    AddAccount {
        /// Unique username
        #[arg(long)]
        username: String,

        /// Unique email address
        #[arg(long)]
        email: String,

        /// Account role: teacher or student
        #[arg(long, default_value = "student")]
        role: String,

        /// Display name
        #[arg(long)]
        name: String,

        /// Data directory override
        #[arg(long)]
        data_dir: Option<PathBuf>,
    },

    /// Import quiz TOML files into the store
    Import {
        /// Path to a quiz file or directory
        #[arg(long)]
        quiz: PathBuf,

        /// Owning teacher account id
        #[arg(long)]
        owner: String,

        /// Data directory override
        #[arg(long)]
        data_dir: Option<PathBuf>,
    },

    /// List a collection: quizzes, accounts, or attempts
    List {
        /// What to list: quizzes, accounts, attempts
        what: String,

        /// Only quizzes owned by this account
        #[arg(long)]
        owner: Option<String>,

        /// Only attempts by this student
        #[arg(long)]
        student: Option<String>,

        /// Only attempts for this quiz
        #[arg(long)]
        quiz: Option<String>,

        /// Data directory override
        #[arg(long)]
        data_dir: Option<PathBuf>,
    },

    /// Show one quiz with its questions
    Show {
        /// Quiz id
        #[arg(long)]
        quiz: String,

        /// Data directory override
        #[arg(long)]
        data_dir: Option<PathBuf>,
    },

    /// Start an attempt with submitted answers
    Attempt {
        /// Quiz id
        #[arg(long)]
        quiz: String,

        /// Student account id
        #[arg(long)]
        student: String,

        /// Submitted answer as QUESTION_ID=ANSWER (repeatable)
        #[arg(long = "answer", value_name = "QUESTION_ID=ANSWER")]
        answers: Vec<String>,

        /// Data directory override
        #[arg(long)]
        data_dir: Option<PathBuf>,
    },

    /// Grade an attempt and persist the score
    Grade {
        /// Attempt id
        #[arg(long)]
        attempt: String,

        /// Data directory override
        #[arg(long)]
        data_dir: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("quizkit=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init => commands::init::execute(),
        Commands::Validate { quiz } => commands::validate::execute(quiz),
        Commands::AddAccount {
            username,
            email,
            role,
            name,
            data_dir,
        } => commands::add_account::execute(username, email, role, name, data_dir).await,
        Commands::Import {
            quiz,
            owner,
            data_dir,
        } => commands::import::execute(quiz, owner, data_dir).await,
        Commands::List {
            what,
            owner,
            student,
            quiz,
            data_dir,
        } => commands::list::execute(what, owner, student, quiz, data_dir).await,
        Commands::Show { quiz, data_dir } => commands::show::execute(quiz, data_dir).await,
        Commands::Attempt {
            quiz,
            student,
            answers,
            data_dir,
        } => commands::attempt::execute(quiz, student, answers, data_dir).await,
        Commands::Grade { attempt, data_dir } => {
            commands::grade::execute(attempt, data_dir).await
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
