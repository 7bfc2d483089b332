pub mod config;
pub mod http;
pub mod mailer;
pub mod message;
pub mod observability;
pub mod recipients;
pub mod relay;

pub use http::{SUBMIT_PATH, router};
pub use mailer::{DispatchError, Mailer, SmtpMailer};
pub use message::{OutboundMessage, build_message};
pub use recipients::{RecipientRule, recipient_for};
pub use relay::{Relay, RelayRequest, RelayResponse, ResponseBody, resolve_reason};
