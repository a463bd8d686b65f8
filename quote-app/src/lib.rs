pub mod config;
pub mod error;
pub mod export;
pub mod items_csv;
pub mod logging;
pub mod logo;
pub mod mail;
pub mod messaging;
pub mod notification;
pub mod quote_file;
pub mod session;
pub mod typst;
pub mod utils;

pub use error::{ActionError, ValidationError};
pub use notification::{Notification, NotificationKind};
pub use session::QuoteSession;
