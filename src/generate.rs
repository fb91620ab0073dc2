use crate::{
    config::{Config, Theme},
    export::{ExportError, Exporter},
    substitute::apply,
};
use std::path::PathBuf;
use xshell::Shell;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to read template {} for theme '{theme}'", .path.display())]
    ReadTemplate {
        theme: String,
        path: PathBuf,
        #[source]
        source: xshell::Error,
    },
    #[error("failed to write {} for theme '{theme}'", .path.display())]
    WriteOutput {
        theme: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to export theme '{theme}'")]
    Export {
        theme: String,
        #[source]
        source: ExportError,
    },
}

impl Error {
    pub fn theme(&self) -> &str {
        match self {
            Error::ReadTemplate { theme, .. }
            | Error::WriteOutput { theme, .. }
            | Error::Export { theme, .. } => theme,
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Generated {
    pub theme: String,
    pub output: PathBuf,
    pub exported: bool,
}

/// Per-theme outcome of a batch that kept going past failures.
#[derive(Debug)]
pub struct Report {
    pub results: Vec<Result<Generated, Error>>,
}

impl Report {
    pub fn succeeded(&self) -> impl Iterator<Item = &Generated> {
        self.results.iter().filter_map(|r| r.as_ref().ok())
    }

    pub fn failed(&self) -> impl Iterator<Item = &Error> {
        self.results.iter().filter_map(|r| r.as_ref().err())
    }

    pub fn is_success(&self) -> bool {
        self.failed().next().is_none()
    }
}

pub struct Generator {
    sh: Shell,
    config: Config,
    exporter: Option<Exporter>,
}

impl Generator {
    /// Generates variants relative to the shell's current directory.
    pub fn new(sh: Shell, config: Config) -> Self {
        let exporter = Some(Exporter::new(&config.exporter));
        Generator {
            sh,
            config,
            exporter,
        }
    }

    pub fn without_export(self) -> Self {
        Generator {
            exporter: None,
            ..self
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    #[tracing::instrument(level = "debug", skip_all, fields(theme = %theme.name))]
    pub fn generate(&self, theme: &Theme) -> Result<Generated, Error> {
        let template = self
            .sh
            .read_binary_file(&self.config.template)
            .map_err(|source| Error::ReadTemplate {
                theme: theme.name.clone(),
                path: self.config.template.clone(),
                source,
            })?;

        let text = apply(&template, theme, &self.config.source, self.config.mode);
        let output = self.config.output_file(theme);
        // unlike Shell::write_file, a missing output directory is an error here
        std::fs::write(self.sh.current_dir().join(&output), text)
            .map_err(|source| Error::WriteOutput {
                theme: theme.name.clone(),
                path: output.clone(),
                source,
            })?;
        tracing::debug!(output = %output.display(), "wrote variant");

        if let Some(exporter) = &self.exporter {
            exporter
                .export(&self.sh, &output)
                .map_err(|source| Error::Export {
                    theme: theme.name.clone(),
                    source,
                })?;
        }

        tracing::info!(theme = %theme.name, output = %output.display(), "generated icon variant");
        Ok(Generated {
            theme: theme.name.clone(),
            output,
            exported: self.exporter.is_some(),
        })
    }

    /// Generates every theme in order, stopping at the first failure.
    pub fn run(&self) -> Result<Vec<Generated>, Error> {
        self.config
            .themes
            .iter()
            .map(|theme| self.generate(theme))
            .collect()
    }

    /// Generates every theme in order, recording failures instead of stopping.
    pub fn run_keep_going(&self) -> Report {
        let results = self
            .config
            .themes
            .iter()
            .map(|theme| {
                let result = self.generate(theme);
                if let Err(err) = &result {
                    tracing::warn!(theme = %theme.name, "{}", err);
                }
                result
            })
            .collect();
        Report { results }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Color, ColorPair, Mode};
    use std::path::Path;

    const TEMPLATE: &str = r#"<svg xmlns="http://www.w3.org/2000/svg">
  <path style="fill:#d23b22;fill-opacity:1" d="M0 0h10v10z"/>
  <path style="fill:#b83621;fill-opacity:1" d="M10 10h10v10z"/>
</svg>
"#;

    fn workdir() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("ic_app.svg"), TEMPLATE).unwrap();
        dir
    }

    fn generator(dir: &Path, config: Config) -> Generator {
        let sh = Shell::new().unwrap();
        sh.change_dir(dir);
        Generator::new(sh, config).without_export()
    }

    fn read(dir: &Path, name: &str) -> String {
        std::fs::read_to_string(dir.join(name)).unwrap()
    }

    #[test]
    fn should_copy_non_utf8_template_byte_for_byte() {
        let dir = tempfile::tempdir().unwrap();
        let template = b"<svg>caf\xe9 fill:#d23b22;fill-opacity:1</svg>";
        std::fs::write(dir.path().join("ic_app.svg"), template).unwrap();
        let generator = generator(dir.path(), Config::default());
        let green = generator.config().theme("green").unwrap().clone();

        generator.generate(&Theme::identity("orange")).unwrap();
        generator.generate(&green).unwrap();

        assert_eq!(
            std::fs::read(dir.path().join("ic_app_orange.svg")).unwrap(),
            template
        );
        assert_eq!(
            std::fs::read(dir.path().join("ic_app_green.svg")).unwrap(),
            b"<svg>caf\xe9 fill:#1db992;fill-opacity:1</svg>"
        );
    }

    #[test]
    fn should_fail_if_output_directory_is_missing() {
        let dir = workdir();
        let config = Config {
            output: "missing/ic_app_{theme}.svg".to_owned(),
            ..Config::default()
        };
        let generator = generator(dir.path(), config);

        let err = generator.generate(&Theme::identity("orange")).unwrap_err();

        assert!(matches!(err, Error::WriteOutput { .. }));
        assert_eq!(err.theme(), "orange");
        assert!(!dir.path().join("missing").exists());
    }

    #[test]
    fn should_copy_template_for_identity_theme() {
        let dir = workdir();
        let generator = generator(dir.path(), Config::default());

        let generated = generator.generate(&Theme::identity("orange")).unwrap();

        assert_eq!(
            generated,
            Generated {
                theme: "orange".to_owned(),
                output: PathBuf::from("ic_app_orange.svg"),
                exported: false,
            }
        );
        assert_eq!(read(dir.path(), "ic_app_orange.svg"), TEMPLATE);
    }

    #[test]
    fn should_recolor_template_for_theme() {
        let dir = workdir();
        let generator = generator(dir.path(), Config::default());
        let green = generator.config().theme("green").unwrap().clone();

        generator.generate(&green).unwrap();

        assert_eq!(
            read(dir.path(), "ic_app_green.svg"),
            TEMPLATE
                .replace("#d23b22;fill-opacity:1", "#1db992;fill-opacity:1")
                .replace("#b83621;fill-opacity:1", "#137e64;fill-opacity:0.5")
        );
        assert_eq!(read(dir.path(), "ic_app.svg"), TEMPLATE);
    }

    #[test]
    fn should_produce_identical_output_when_run_twice() {
        let dir = workdir();
        let generator = generator(dir.path(), Config::default());

        generator.run().unwrap();
        let first = read(dir.path(), "ic_app_blue.svg");
        generator.run().unwrap();
        let second = read(dir.path(), "ic_app_blue.svg");

        assert_eq!(first, second);
    }

    #[test]
    fn should_generate_all_themes_in_order() {
        let dir = workdir();
        let generator = generator(dir.path(), Config::default());

        let generated = generator.run().unwrap();

        let themes: Vec<_> = generated.iter().map(|g| g.theme.as_str()).collect();
        assert_eq!(
            themes,
            vec!["orange", "green", "olive", "blue", "pink", "black"]
        );
        for g in &generated {
            assert!(dir.path().join(&g.output).exists());
        }
    }

    #[test]
    fn should_use_bare_tokens_in_bare_mode() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("icon.svg"), "fill=\"d23b22\" stroke=\"b83621\"").unwrap();
        let config = Config {
            template: PathBuf::from("icon.svg"),
            output: "icon-{theme}.svg".to_owned(),
            mode: Mode::Bare,
            themes: vec![Theme::with_colors(
                "pink",
                ColorPair {
                    light: Color::new("ff0082").unwrap(),
                    dark: Color::new("bf0061").unwrap(),
                },
            )],
            ..Config::default()
        };
        let generator = generator(dir.path(), config);

        generator.run().unwrap();

        assert_eq!(
            read(dir.path(), "icon-pink.svg"),
            "fill=\"ff0082\" stroke=\"bf0061\""
        );
    }

    #[test]
    fn should_not_write_anything_if_template_is_missing() {
        let dir = tempfile::tempdir().unwrap();
        let generator = generator(dir.path(), Config::default());

        let err = generator.run().unwrap_err();

        assert!(matches!(err, Error::ReadTemplate { .. }));
        assert_eq!(err.theme(), "orange");
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn should_report_every_failure_when_keeping_going() {
        let dir = tempfile::tempdir().unwrap();
        let generator = generator(dir.path(), Config::default());

        let report = generator.run_keep_going();

        assert!(!report.is_success());
        assert_eq!(report.failed().count(), 6);
        assert_eq!(report.succeeded().count(), 0);
    }

    #[cfg(unix)]
    #[test]
    fn should_stop_at_first_failing_export() {
        let dir = workdir();
        let config = Config {
            exporter: PathBuf::from("false"),
            ..Config::default()
        };
        let sh = Shell::new().unwrap();
        sh.change_dir(dir.path());
        let generator = Generator::new(sh, config);

        let err = generator.run().unwrap_err();

        assert!(matches!(err, Error::Export { .. }));
        assert_eq!(err.theme(), "orange");
        assert!(dir.path().join("ic_app_orange.svg").exists());
        assert!(!dir.path().join("ic_app_green.svg").exists());
    }

    #[cfg(unix)]
    #[test]
    fn should_export_each_generated_file() {
        let dir = workdir();
        let config = Config {
            exporter: PathBuf::from("true"),
            ..Config::default()
        };
        let sh = Shell::new().unwrap();
        sh.change_dir(dir.path());
        let generator = Generator::new(sh, config);

        let generated = generator.run().unwrap();

        assert!(generated.iter().all(|g| g.exported));
    }
}
