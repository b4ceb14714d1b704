//! CLI command implementations

pub mod completions;
pub mod config;
pub mod login;
pub mod logout;
pub mod open;
pub mod password;
pub mod profile;
pub mod signup;
pub mod status;

pub use completions::execute as completions;
pub use config::execute as config;
pub use login::execute as login;
pub use logout::execute as logout;
pub use open::execute as open;
pub use password::{forgot as forgot_password, reset as reset_password};
pub use profile::execute as profile;
pub use signup::execute as signup;
pub use status::execute as status;
