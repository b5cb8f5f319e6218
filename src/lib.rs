pub mod config;
pub mod digest;
pub mod fetcher;
pub mod filter;
pub mod mailer;
pub mod runner;
pub mod seen;
pub mod types;

pub use config::{load_config, Config, Settings};
pub use fetcher::{FetchConfig, Fetcher};
pub use mailer::{Deliver, MailConfig, SmtpMailer, StdoutMailer};
pub use runner::DigestRunner;
pub use seen::SeenStore;
pub use types::*;
