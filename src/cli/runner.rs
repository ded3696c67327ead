//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, OutputFormat};
use crate::config::GeneratorConfig;
use crate::error::{Error, Result, ResultExt};
use crate::registry::CorpusRegistry;
use crate::sample::{Corpus, SampleExtractor};
use crate::types::JsonValue;
use futures::future::try_join_all;
use serde_json::json;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Check { files } => self.check(files).await,
            Commands::Schema { files } => self.schema(files).await,
        }
    }

    /// Load the generator configuration, then apply flag overrides
    pub fn load_config(&self) -> Result<GeneratorConfig> {
        let mut config = match &self.cli.config {
            Some(path) => GeneratorConfig::from_file(path)?,
            None => GeneratorConfig::default(),
        };

        if let Some(prefix) = &self.cli.namespace_prefix {
            config = config.with_namespace_prefix(prefix.clone());
        }
        if let Some(prefix) = &self.cli.name_prefix {
            config = config.with_name_prefix(prefix.clone());
        }
        if self.cli.strict {
            config = config.with_strict(true);
        }

        config.validate()?;
        Ok(config)
    }

    /// Read and parse every corpus file, then extract their samples
    async fn load_corpus(&self, files: &[PathBuf], config: &GeneratorConfig) -> Result<Corpus> {
        let documents = try_join_all(files.iter().map(|path| read_document(path))).await?;

        let extractor = SampleExtractor::new(config);
        let mut corpus = Corpus::new();
        for (path, document) in files.iter().zip(&documents) {
            extractor.extract(document, &path.to_string_lossy(), &mut corpus);
        }

        info!(
            "Extracted {} sample(s) for {} view(s) from {} file(s)",
            corpus.len(),
            corpus.views().len(),
            files.len()
        );

        Ok(corpus)
    }

    async fn build_registry(&self, files: &[PathBuf]) -> Result<CorpusRegistry> {
        let config = self.load_config()?;
        let corpus = self.load_corpus(files, &config).await?;
        Ok(CorpusRegistry::build(&corpus, &config))
    }

    /// Validate a corpus
    async fn check(&self, files: &[PathBuf]) -> Result<()> {
        let registry = self.build_registry(files).await?;
        let report = registry.report();

        match self.cli.format {
            OutputFormat::Json => self.output_message(&json!({
                "type": "REPORT",
                "report": report
            })),
            OutputFormat::Pretty => println!("{report}"),
        }

        registry.into_validated().map(|_| ())
    }

    /// Print the renderer hand-off
    async fn schema(&self, files: &[PathBuf]) -> Result<()> {
        let registry = self.build_registry(files).await?.into_validated()?;
        let references = registry.reference_plans();

        self.output_message(&json!({
            "type": "SCHEMA",
            "views": &registry,
            "references": references
        }));

        Ok(())
    }

    fn output_message(&self, msg: &JsonValue) {
        match self.cli.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string(msg).unwrap_or_default());
            }
            OutputFormat::Pretty => {
                println!("{}", serde_json::to_string_pretty(msg).unwrap_or_default());
            }
        }
    }
}

/// Read one corpus file as JSON
async fn read_document(path: &Path) -> Result<JsonValue> {
    debug!("Reading {}", path.display());

    let content = tokio::fs::read_to_string(path).await.map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            Error::FileNotFound {
                path: path.display().to_string(),
            }
        } else {
            Error::Io(e)
        }
    })?;

    serde_json::from_str(&content)
        .with_context(|| format!("Invalid corpus JSON in {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::io::Write;

    fn runner(args: &[&str]) -> Runner {
        Runner::new(Cli::parse_from(args))
    }

    #[test]
    fn test_flags_override_config_file() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(file, "namespace_prefix: com.from.file\nname_suffix: Model").unwrap();
        let config_path = file.path().to_string_lossy().to_string();

        let config = runner(&[
            "viewgen",
            "--config",
            &config_path,
            "--namespace-prefix",
            "com.from.flag",
            "--strict",
            "check",
            "corpus.json",
        ])
        .load_config()
        .unwrap();

        assert_eq!(config.namespace_prefix, "com.from.flag");
        assert_eq!(config.name_suffix, "Model");
        assert!(config.strict);
    }

    #[test]
    fn test_invalid_namespace_flag_is_rejected() {
        let result = runner(&[
            "viewgen",
            "--namespace-prefix",
            "com..broken",
            "check",
            "corpus.json",
        ])
        .load_config();

        assert!(matches!(result, Err(Error::InvalidConfigValue { .. })));
    }

    #[tokio::test]
    async fn test_missing_corpus_file() {
        let err = read_document(Path::new("/nonexistent/corpus.json"))
            .await
            .unwrap_err();

        assert!(matches!(err, Error::FileNotFound { .. }));
    }

    #[tokio::test]
    async fn test_load_corpus_from_several_files() {
        let dir = tempfile::tempdir().unwrap();
        let first = dir.path().join("home.json");
        let second = dir.path().join("article.json");
        std::fs::write(
            &first,
            r#"{"_template": "page/home.hbs", "title": "Home"}"#,
        )
        .unwrap();
        std::fs::write(
            &second,
            r#"{"_template": "page/article.hbs", "body": "Text", "hero": {"_template": "card/hero.hbs", "image": "a.png"}}"#,
        )
        .unwrap();

        let runner = runner(&["viewgen", "check", "unused.json"]);
        let config = runner.load_config().unwrap();
        let corpus = runner
            .load_corpus(&[first, second], &config)
            .await
            .unwrap();

        assert_eq!(corpus.views().len(), 3);
        assert_eq!(corpus.len(), 4);
    }
}
