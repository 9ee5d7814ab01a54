pub mod sink;

pub use sink::{send_alert, TelegramSink};
