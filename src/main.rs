use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use cleanfeed::config::{Config, ConfigError, Overrides};
use cleanfeed::data::{DEFAULT_DUMMY_POST_COUNT, DummyPosts};
use cleanfeed::flows::FlowError;
use cleanfeed::flows::create_post::{PostDraft, create_post};
use cleanfeed::flows::feed::load_feed;
use cleanfeed::flows::forgot_password::{PasswordReset, ResetStep};
use cleanfeed::flows::login::{LoginForm, login, logout};
use cleanfeed::flows::post_view::{find_post, posted_by_line};
use cleanfeed::flows::profile::{POSTS_COMING_SOON, ProfileView, profile};
use cleanfeed::flows::register::{Gender, RegisterWizard, RegistrationForm};
use cleanfeed::model::FeedFilter;
use cleanfeed::net::offline::OfflineTransport;
use cleanfeed::net::{FilePart, HttpTransport, Transport, TransportError};
use cleanfeed::notify::Level;
use cleanfeed::storage::{FileStore, StorageError};
use cleanfeed::App;
use tracing_subscriber::EnvFilter;

/// Seed for the offline sample feed so post ids stay stable between runs.
const OFFLINE_FEED_SEED: u64 = 2024;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("http client setup failed: {0}")]
    Transport(#[from] TransportError),
    #[error(transparent)]
    Flow(#[from] FlowError),
    #[error("cannot read {path}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("post {0} not found")]
    PostNotFound(String),
}

impl CliError {
    /// Errors the user already saw as a notification.
    fn is_notified(&self) -> bool {
        matches!(self, Self::Flow(e) if e.is_notified())
    }
}

#[derive(Parser, Debug)]
#[command(name = "cleanfeed", about = "Keep India Clean community feed client")]
struct Cli {
    /// API base URL (overrides CLEANFEED_API_URL).
    #[arg(long)]
    base_url: Option<String>,

    /// Session file (overrides CLEANFEED_STATE_PATH).
    #[arg(long)]
    state_path: Option<PathBuf>,

    /// Serve every call from the built-in sample backend.
    #[arg(long, env = "CLEANFEED_OFFLINE", default_value_t = false)]
    offline: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    Login {
        /// Username or email.
        identifier: String,
        #[arg(long, env = "CLEANFEED_PASSWORD", hide_env_values = true)]
        password: String,
    },
    Logout,
    Whoami,
    Register(RegisterArgs),
    #[command(subcommand)]
    ForgotPassword(ForgotPasswordCommand),
    #[command(subcommand)]
    Post(PostCommand),
    Feed {
        #[arg(long, default_value = "all")]
        filter: FeedFilter,
        #[arg(long)]
        limit: Option<usize>,
    },
}

#[derive(Args, Debug)]
struct RegisterArgs {
    #[arg(long, default_value = "")]
    first_name: String,
    #[arg(long, default_value = "")]
    last_name: String,
    #[arg(long, default_value = "")]
    username: String,
    #[arg(long)]
    gender: Option<Gender>,
    /// Date of birth, e.g. 2001-04-30.
    #[arg(long, default_value = "")]
    dob: String,
    #[arg(long, default_value = "")]
    mobile: String,
    #[arg(long, default_value = "")]
    email: String,
    #[arg(long, env = "CLEANFEED_PASSWORD", hide_env_values = true, default_value = "")]
    password: String,
    #[arg(long)]
    profile_pic: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum ForgotPasswordCommand {
    Send { identifier: String },
    Verify { identifier: String, code: String },
    Reset {
        identifier: String,
        code: String,
        #[arg(long, env = "CLEANFEED_NEW_PASSWORD", hide_env_values = true)]
        new_password: String,
    },
}

#[derive(Subcommand, Debug)]
enum PostCommand {
    Create {
        #[arg(long)]
        image: Option<PathBuf>,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long, default_value = "")]
        location: String,
    },
    Show {
        id: String,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let app = match build_app(&cli) {
        Ok(app) => app,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let result = run(&app, cli.command).await;
    print_notifications(&app);
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if !e.is_notified() {
                eprintln!("error: {e}");
            }
            ExitCode::FAILURE
        }
    }
}

fn build_app(cli: &Cli) -> Result<App, CliError> {
    let overrides = Overrides { api_url: cli.base_url.clone(), state_path: cli.state_path.clone() };
    let config = Config::from_env_with(&overrides)?;

    let storage = Arc::new(FileStore::open(&config.state_path)?);
    let transport: Arc<dyn Transport> = if cli.offline {
        tracing::info!("using offline backend");
        Arc::new(OfflineTransport::new(Box::new(DummyPosts::seeded(OFFLINE_FEED_SEED, DEFAULT_DUMMY_POST_COUNT))))
    } else {
        tracing::info!(api_url = %config.api_url, "using HTTP backend");
        Arc::new(HttpTransport::new(&config)?)
    };
    Ok(App::new(&config, storage, transport))
}

async fn run(app: &App, command: Command) -> Result<(), CliError> {
    match command {
        Command::Login { identifier, password } => {
            let user = login(app, &LoginForm { identifier, password }).await?;
            println!("logged in as {} <{}>", user.name, user.email);
        }
        Command::Logout => logout(app)?,
        Command::Whoami => match profile(&app.session) {
            ProfileView::Anonymous { message } => println!("{message}"),
            ProfileView::User { name, email, avatar } => {
                println!("{name}\n{email}\navatar: {avatar}\n\n{POSTS_COMING_SOON}");
            }
        },
        Command::Register(args) => run_register(app, args).await?,
        Command::ForgotPassword(cmd) => run_forgot_password(app, cmd).await?,
        Command::Post(PostCommand::Create { image, description, location }) => {
            let image = match image {
                Some(path) => Some(read_file(&path).await?),
                None => None,
            };
            create_post(app, &PostDraft { image, description, location }).await?;
        }
        Command::Post(PostCommand::Show { id }) => run_show_post(app, &id).await?,
        Command::Feed { filter, limit } => {
            let view = load_feed(app, filter).await?;
            if let Some(message) = view.empty_message() {
                println!("{message}");
            }
            for post in view.posts.iter().take(limit.unwrap_or(usize::MAX)) {
                println!(
                    "#{:<5} [{:<10}] {} @ {} by {}",
                    post.id,
                    post.status.label(),
                    post.description,
                    post.location.name,
                    post.created_by.name
                );
            }
        }
    }
    Ok(())
}

async fn run_register(app: &App, args: RegisterArgs) -> Result<(), CliError> {
    let profile_pic = match &args.profile_pic {
        Some(path) => Some(read_file(path).await?),
        None => None,
    };
    let mut wizard = RegisterWizard::new();
    wizard.form = RegistrationForm {
        first_name: args.first_name,
        last_name: args.last_name,
        username: args.username,
        gender: args.gender,
        dob: args.dob,
        mobile: args.mobile,
        email: args.email,
        password: args.password,
    };
    wizard.profile_pic = profile_pic;
    for _ in 0..3 {
        wizard.next(app)?;
    }
    wizard.submit(app).await?;
    Ok(())
}

async fn run_forgot_password(app: &App, cmd: ForgotPasswordCommand) -> Result<(), CliError> {
    match cmd {
        ForgotPasswordCommand::Send { identifier } => {
            let mut reset = PasswordReset::resume(ResetStep::SendCode, identifier);
            reset.send_code(app).await?;
        }
        ForgotPasswordCommand::Verify { identifier, code } => {
            let mut reset = PasswordReset::resume(ResetStep::VerifyCode, identifier);
            reset.code = code;
            reset.verify_code(app).await?;
        }
        ForgotPasswordCommand::Reset { identifier, code, new_password } => {
            let mut reset = PasswordReset::resume(ResetStep::NewPassword, identifier);
            reset.code = code;
            reset.new_password = new_password;
            reset.set_password(app).await?;
        }
    }
    Ok(())
}

async fn run_show_post(app: &App, id: &str) -> Result<(), CliError> {
    let post = find_post(app, id)
        .await?
        .ok_or_else(|| CliError::PostNotFound(id.to_owned()))?;
    println!("{}", post.description);
    println!("{} · {}", post.location.name, post.status.label());
    println!("{}", posted_by_line(&post));
    for (i, url) in post.image_urls.iter().enumerate() {
        println!("  [{}] {url}", i + 1);
    }
    Ok(())
}

async fn read_file(path: &std::path::Path) -> Result<FilePart, CliError> {
    FilePart::read(path)
        .await
        .map_err(|source| CliError::ReadFile { path: path.to_path_buf(), source })
}

fn print_notifications(app: &App) {
    for n in app.notifier.drain() {
        match n.level {
            Level::Success => println!("✔ {}", n.message),
            Level::Error => eprintln!("✖ {}", n.message),
        }
    }
}
