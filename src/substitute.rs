use crate::config::{Color, ColorPair, Mode, Theme};

/// The literal light and dark tokens searched for or written by a substitution.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Tokens {
    pub light: String,
    pub dark: String,
}

impl Mode {
    fn token(&self, color: &Color, opacity: &str) -> String {
        match self {
            Mode::Hashed => format!("#{};fill-opacity:{}", color.hex(), opacity),
            Mode::Bare => color.hex().to_owned(),
        }
    }

    pub fn source_tokens(&self, source: &ColorPair) -> Tokens {
        Tokens {
            light: self.token(&source.light, "1"),
            dark: self.token(&source.dark, "1"),
        }
    }

    pub fn target_tokens(&self, target: &ColorPair) -> Tokens {
        Tokens {
            light: self.token(&target.light, "1"),
            dark: self.token(&target.dark, "0.5"),
        }
    }
}

fn replace(text: &[u8], from: &[u8], to: &[u8]) -> Vec<u8> {
    let mut replaced = Vec::with_capacity(text.len());
    let mut rest = text;
    while let Some(pos) = rest.windows(from.len()).position(|window| window == from) {
        replaced.extend_from_slice(&rest[..pos]);
        replaced.extend_from_slice(to);
        rest = &rest[pos + from.len()..];
    }
    replaced.extend_from_slice(rest);
    replaced
}

/// Replaces every source light token, then every source dark token.
///
/// Works on raw bytes; anything that isn't a token is copied through untouched.
pub fn substitute(text: &[u8], source: &ColorPair, target: &ColorPair, mode: Mode) -> Vec<u8> {
    let from = mode.source_tokens(source);
    let to = mode.target_tokens(target);
    let text = replace(text, from.light.as_bytes(), to.light.as_bytes());
    replace(&text, from.dark.as_bytes(), to.dark.as_bytes())
}

pub fn apply(text: &[u8], theme: &Theme, source: &ColorPair, mode: Mode) -> Vec<u8> {
    match &theme.colors {
        Some(target) => substitute(text, source, target, mode),
        None => text.to_vec(),
    }
}
