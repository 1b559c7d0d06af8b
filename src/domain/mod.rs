//! Domain models for the ng CLI
//!
//! Command metadata and parsed arguments, without any I/O concerns.

mod arguments;
mod description;
mod strings;

pub use arguments::Arguments;
pub use description::{CommandDescription, CommandOption, CommandScope, OptionType};
pub use strings::dasherize;
