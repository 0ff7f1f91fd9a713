//! CLI command handlers, one file per command.

mod decode;
mod encode;
mod interactive;
mod list;
mod remove;
mod serve;

pub use decode::run_decode;
pub use encode::run_encode;
pub use interactive::run_interactive;
pub use list::run_list;
pub use remove::run_remove;
pub use serve::run_serve;
