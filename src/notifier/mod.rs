//! Notification delivery.
//!
//! A [`Dispatcher`] holds an ordered list of [`NotificationChannel`]s and
//! falls back from one to the next until a message is delivered.

mod api;
mod channel;
mod dispatcher;
mod error;
mod telegram;

pub use api::PrimaryApiChannel;
pub use channel::{build_http_client, NotificationChannel};
pub use dispatcher::Dispatcher;
pub use error::{ChannelError, DispatchError};
pub use telegram::{TelegramChannel, PARSE_MODE};
