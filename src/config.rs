use serde::{Deserialize, Serialize};
use std::{
    collections::HashSet,
    path::{Path, PathBuf},
    str::FromStr,
};

/// A color as six hex digits, stored without the leading `#`.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color(String);

#[derive(Debug, thiserror::Error)]
#[error("invalid color '{0}', expected six hex digits")]
pub struct InvalidColor(String);

impl Color {
    pub fn new(s: &str) -> Result<Color, InvalidColor> {
        let hex = s.strip_prefix('#').unwrap_or(s);
        if hex.len() == 6 && hex.chars().all(|c| c.is_ascii_hexdigit()) {
            Ok(Color(hex.to_owned()))
        } else {
            Err(InvalidColor(s.to_owned()))
        }
    }

    pub fn hex(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Color {
    type Error = InvalidColor;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Color::new(&s)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        format!("#{}", color.0)
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, PartialEq, Eq, Hash, Clone, Serialize, Deserialize)]
pub struct ColorPair {
    pub light: Color,
    pub dark: Color,
}

impl ColorPair {
    fn from_hex(light: &str, dark: &str) -> ColorPair {
        ColorPair {
            light: Color(light.to_owned()),
            dark: Color(dark.to_owned()),
        }
    }
}

/// A named theme. Without colors, the template is copied unchanged.
#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
#[serde(try_from = "ThemeDefinition", into = "ThemeDefinition")]
pub struct Theme {
    pub name: String,
    pub colors: Option<ColorPair>,
}

impl Theme {
    pub fn identity(name: impl Into<String>) -> Theme {
        Theme {
            name: name.into(),
            colors: None,
        }
    }

    pub fn with_colors(name: impl Into<String>, colors: ColorPair) -> Theme {
        Theme {
            name: name.into(),
            colors: Some(colors),
        }
    }
}

#[derive(Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct ThemeDefinition {
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    light: Option<Color>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    dark: Option<Color>,
}

#[derive(Debug, thiserror::Error)]
#[error("theme '{0}' must set both light and dark colors, or neither")]
pub struct IncompleteTheme(String);

impl TryFrom<ThemeDefinition> for Theme {
    type Error = IncompleteTheme;

    fn try_from(def: ThemeDefinition) -> Result<Self, Self::Error> {
        let colors = match (def.light, def.dark) {
            (Some(light), Some(dark)) => Some(ColorPair { light, dark }),
            (None, None) => None,
            _ => return Err(IncompleteTheme(def.name)),
        };
        Ok(Theme {
            name: def.name,
            colors,
        })
    }
}

impl From<Theme> for ThemeDefinition {
    fn from(theme: Theme) -> Self {
        let (light, dark) = match theme.colors {
            Some(ColorPair { light, dark }) => (Some(light), Some(dark)),
            None => (None, None),
        };
        ThemeDefinition {
            name: theme.name,
            light,
            dark,
        }
    }
}

/// How color tokens are written in the template.
#[derive(Debug, PartialEq, Eq, Hash, Copy, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Mode {
    /// `#rrggbb;fill-opacity:1` style declarations; dark targets are muted to half opacity
    #[default]
    Hashed,
    /// bare `rrggbb` tokens, swapped as-is
    Bare,
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hashed" => Ok(Mode::Hashed),
            "bare" => Ok(Mode::Bare),
            _ => Err(format!("unknown mode '{}', expected 'hashed' or 'bare'", s)),
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
#[serde(default)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    pub template: PathBuf,
    /// output filename pattern; `{theme}` is replaced by the theme name
    pub output: String,
    pub exporter: PathBuf,
    pub mode: Mode,
    pub source: ColorPair,
    pub themes: Vec<Theme>,

    /// path of the configuration file, if the configuration was loaded from a file
    #[serde(skip)]
    pub config_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            template: PathBuf::from("ic_app.svg"),
            output: "ic_app_{theme}.svg".to_owned(),
            exporter: PathBuf::from("./svg-export"),
            mode: Mode::Hashed,
            source: ColorPair::from_hex("d23b22", "b83621"),
            themes: vec![
                Theme::identity("orange"),
                Theme::with_colors("green", ColorPair::from_hex("1db992", "137e64")),
                Theme::with_colors("olive", ColorPair::from_hex("b6bc33", "8a8f27")),
                Theme::with_colors("blue", ColorPair::from_hex("008fff", "006bbf")),
                Theme::with_colors("pink", ColorPair::from_hex("ff0082", "bf0061")),
                Theme::with_colors("black", ColorPair::from_hex("393939", "1f1f1f")),
            ],
            config_file: None,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigLoadError {
    #[error("invalid configuration string")]
    InvalidConfigString(#[source] toml::de::Error),
    #[error("invalid configuration file {}", .0.display())]
    InvalidConfigFile(PathBuf, #[source] toml::de::Error),
    #[error("i/o error reading configuration file {}", .0.display())]
    IoError(PathBuf, #[source] std::io::Error),
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum InvalidConfig {
    #[error("output pattern '{0}' does not contain {{theme}}")]
    OutputWithoutPlaceholder(String),
    #[error("theme names must not be empty")]
    EmptyThemeName,
    #[error("theme name '{0}' contains a path separator")]
    PathInThemeName(String),
    #[error("duplicate theme '{0}'")]
    DuplicateTheme(String),
    #[error("unknown theme '{0}'")]
    UnknownTheme(String),
}

impl Config {
    pub fn parse(s: &str) -> Result<Config, ConfigLoadError> {
        toml::from_str(s).map_err(ConfigLoadError::InvalidConfigString)
    }

    pub fn parse_file(p: &Path) -> Result<Config, ConfigLoadError> {
        let config_string =
            std::fs::read_to_string(p).map_err(|e| ConfigLoadError::IoError(p.to_owned(), e))?;
        let mut config: Config = toml::from_str(&config_string)
            .map_err(|e| ConfigLoadError::InvalidConfigFile(p.to_owned(), e))?;
        config.config_file = Some(p.to_owned());
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), InvalidConfig> {
        if !self.output.contains("{theme}") {
            return Err(InvalidConfig::OutputWithoutPlaceholder(self.output.clone()));
        }
        let mut seen = HashSet::new();
        for theme in &self.themes {
            if theme.name.is_empty() {
                return Err(InvalidConfig::EmptyThemeName);
            }
            if theme.name.contains(['/', '\\']) {
                return Err(InvalidConfig::PathInThemeName(theme.name.clone()));
            }
            if !seen.insert(theme.name.as_str()) {
                return Err(InvalidConfig::DuplicateTheme(theme.name.clone()));
            }
        }
        Ok(())
    }

    /// Restricts the theme table to `names`, keeping table order.
    pub fn select<S: AsRef<str>>(mut self, names: &[S]) -> Result<Config, InvalidConfig> {
        if names.is_empty() {
            return Ok(self);
        }
        let names: Vec<&str> = names.iter().map(AsRef::<str>::as_ref).collect();
        if let Some(unknown) = names.iter().find(|name| self.theme(name).is_none()) {
            return Err(InvalidConfig::UnknownTheme(unknown.to_string()));
        }
        self.themes.retain(|theme| names.contains(&theme.name.as_str()));
        Ok(self)
    }

    pub fn theme(&self, name: &str) -> Option<&Theme> {
        self.themes.iter().find(|theme| theme.name == name)
    }

    pub fn output_file(&self, theme: &Theme) -> PathBuf {
        PathBuf::from(self.output.replace("{theme}", &theme.name))
    }
}
