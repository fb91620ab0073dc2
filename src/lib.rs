pub mod config;
pub mod export;
pub mod generate;
pub mod substitute;

pub use config::{Color, ColorPair, Config, Mode, Theme};
pub use generate::{Generated, Generator, Report};
