//! CLI argument definitions using clap derive

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use std::path::PathBuf;

/// AgrowMart - account and session client
///
/// Sign up, log in, and manage your AgrowMart Naturals profile from the
/// terminal.
#[derive(Parser, Debug)]
#[command(name = "agrowmart")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file path
    #[arg(short, long, global = true, env = "AGROWMART_CONFIG")]
    pub config: Option<PathBuf>,

    /// Account API base URL (overrides api.base_url)
    #[arg(long, global = true, env = "AGROWMART_API_URL")]
    pub api_url: Option<String>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create an account
    Signup(SignupArgs),

    /// Log in with phone or email
    Login(LoginArgs),

    /// Log out of this session
    Logout(LogoutArgs),

    /// Show who is signed in
    Status(StatusArgs),

    /// View or edit your profile
    Profile(ProfileArgs),

    /// Request a password reset code by SMS
    ForgotPassword(ForgotPasswordArgs),

    /// Set a new password using a reset code
    ResetPassword(ResetPasswordArgs),

    /// List pages or check access to one
    Open(OpenArgs),

    /// Show or edit configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the signup command
#[derive(Parser, Debug)]
pub struct SignupArgs {
    /// First name
    #[arg(long)]
    pub first_name: Option<String>,

    /// Last name
    #[arg(long)]
    pub last_name: Option<String>,

    /// 10-digit phone number
    #[arg(long)]
    pub phone: Option<String>,

    /// Email address (optional)
    #[arg(long)]
    pub email: Option<String>,

    /// Password (prompted when omitted)
    #[arg(long, env = "AGROWMART_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Password confirmation (defaults to --password when not prompting)
    #[arg(long, hide_env_values = true)]
    pub confirm_password: Option<String>,
}

/// Arguments for the login command
#[derive(Parser, Debug)]
pub struct LoginArgs {
    /// Phone number
    #[arg(long, conflicts_with = "email")]
    pub phone: Option<String>,

    /// Email address
    #[arg(long)]
    pub email: Option<String>,

    /// Password (prompted when omitted)
    #[arg(long, env = "AGROWMART_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Stay signed in on this device
    #[arg(long, conflicts_with = "no_remember")]
    pub remember: bool,

    /// Do not stay signed in; forgets any remembered login
    #[arg(long)]
    pub no_remember: bool,
}

/// Arguments for the logout command
#[derive(Parser, Debug)]
pub struct LogoutArgs {
    /// Keep the remembered login so the next run signs in again
    #[arg(long)]
    pub keep_remembered: bool,
}

/// Arguments for the status command
#[derive(Parser, Debug)]
pub struct StatusArgs {
    /// Output format
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,
}

/// Arguments for the profile command
#[derive(Parser, Debug)]
pub struct ProfileArgs {
    #[command(subcommand)]
    pub action: Option<ProfileAction>,
}

/// Profile subcommands
#[derive(Subcommand, Debug)]
pub enum ProfileAction {
    /// Show your profile
    Show {
        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Change profile fields
    Update(ProfileUpdateArgs),

    /// Delete your account
    Delete {
        /// Phone number on the account, as confirmation
        #[arg(long)]
        phone: Option<String>,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// List suggested locations
    Cities {
        /// Only cities starting with this prefix
        prefix: Option<String>,
    },
}

/// Arguments for profile update
#[derive(Parser, Debug)]
pub struct ProfileUpdateArgs {
    #[arg(long)]
    pub first_name: Option<String>,

    #[arg(long)]
    pub last_name: Option<String>,

    #[arg(long)]
    pub email: Option<String>,

    /// City or town
    #[arg(long)]
    pub location: Option<String>,

    /// Profile picture URL
    #[arg(long)]
    pub picture: Option<String>,

    /// Latitude used to suggest a location
    #[arg(long, requires = "lon", conflicts_with = "location", allow_negative_numbers = true)]
    pub lat: Option<f64>,

    /// Longitude used to suggest a location
    #[arg(long, requires = "lat", allow_negative_numbers = true)]
    pub lon: Option<f64>,
}

/// Arguments for the forgot-password command
#[derive(Parser, Debug)]
pub struct ForgotPasswordArgs {
    /// Phone number on the account
    #[arg(long)]
    pub phone: Option<String>,
}

/// Arguments for the reset-password command
#[derive(Parser, Debug)]
pub struct ResetPasswordArgs {
    /// Phone number on the account
    #[arg(long)]
    pub phone: Option<String>,

    /// Code received by SMS
    #[arg(long)]
    pub code: Option<String>,

    /// New password (prompted when omitted)
    #[arg(long, env = "AGROWMART_NEW_PASSWORD", hide_env_values = true)]
    pub new_password: Option<String>,
}

/// Arguments for the open command
#[derive(Parser, Debug)]
pub struct OpenArgs {
    /// Page path, e.g. /profile
    pub path: Option<String>,
}

/// Arguments for the config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    /// Subcommand for config
    #[command(subcommand)]
    pub action: Option<ConfigAction>,
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Show configuration file path
    Path,

    /// Initialize default configuration
    Init {
        /// Overwrite existing configuration
        #[arg(short, long)]
        force: bool,
    },

    /// Set a configuration value
    Set {
        /// Configuration key (e.g., api.base_url)
        key: String,
        /// Value to set
        value: String,
    },
}

/// Arguments for the completions command
#[derive(Parser, Debug)]
pub struct CompletionsArgs {
    /// Target shell
    pub shell: Shell,
}

/// Output format for read commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text
    Text,
    /// JSON output
    Json,
}
