mod inspect;
mod root;

pub use root::Cli;
