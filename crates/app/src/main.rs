//! kidquest CLI: quizzes, catalogs and the helper chat in a terminal.

use std::process;
use std::time::Duration;

use clap::{Parser, Subcommand, ValueEnum};
use quest_core::model::{CourseId, Role};
use services::Timings;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "kidquest", version, about = "Quizzes, badges and games for young learners")]
struct Cli {
    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(long, global = true)]
    verbose: bool,

    /// How long answer feedback stays up before the next question
    #[arg(long, env = "KIDQUEST_FEEDBACK_DELAY_MS", default_value = "1500", global = true)]
    feedback_delay_ms: u64,

    /// How long the helper "types" before replying
    #[arg(long, env = "KIDQUEST_HELPER_DELAY_MS", default_value = "1000", global = true)]
    helper_delay_ms: u64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Take a five-question quiz
    Quiz {
        /// Course id, e.g. math-adventure
        #[arg(long)]
        course: CourseId,

        /// Sign-in email; the part before '@' becomes the display name
        #[arg(long, default_value = "learner@kidquest.local")]
        email: String,

        #[arg(long, value_enum)]
        role: Option<RoleArg>,

        /// Child age, used to pick the question set
        #[arg(long)]
        age: Option<u8>,
    },

    /// List courses and games with their lock state
    Catalog {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Chat with the learning buddy
    Helper,
}

#[derive(Clone, Copy, ValueEnum)]
enum RoleArg {
    Parent,
    Admin,
    Child,
}

impl From<RoleArg> for Role {
    fn from(role: RoleArg) -> Self {
        match role {
            RoleArg::Parent => Role::Parent,
            RoleArg::Admin => Role::Admin,
            RoleArg::Child => Role::Child,
        }
    }
}

impl Cli {
    fn timings(&self) -> Timings {
        Timings {
            answer_feedback: Duration::from_millis(self.feedback_delay_ms),
            helper_reply: Duration::from_millis(self.helper_delay_ms),
            ..Timings::default()
        }
    }
}

fn init_tracing(verbose: bool) {
    let fallback = if verbose {
        "kidquest=debug,services=debug"
    } else {
        "kidquest=info,services=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let timings = cli.timings();

    let result = match cli.command {
        Commands::Quiz {
            course,
            email,
            role,
            age,
        } => commands::quiz(timings, course, &email, role.map(Role::from), age).await,
        Commands::Catalog { json } => commands::catalog(json),
        Commands::Helper => commands::helper(timings).await,
    };

    if let Err(err) = result {
        eprintln!("kidquest: {err:#}");
        process::exit(2);
    }
}
