use anyhow::{anyhow, Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info, warn};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::app_config::Config;
use crate::encoding::TextCodec;
use crate::errors::{AppError, RecordError};
use crate::extraction::{EntryExtractor, ExtractedBuckets};
use crate::file_utils::{FileKind, FileManager};
use crate::orchestrator::{Orchestrator, RunSummary, SubstitutionJob};
use crate::records::{Category, RecordLoader, RecordWriter};
use crate::substitution::{SubstitutionEngine, TranslationTable};

// @module: Application controller for both localization phases

/// How an extraction run ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractionOutcome {
    /// Record lists written, one path per bucket
    Completed(Vec<PathBuf>),
    /// The run stopped on an error that has already been reported
    Failed(String),
}

/// Main application controller
pub struct Controller {
    // @field: App configuration
    config: Config,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate().context("Configuration validation failed")?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run the extraction phase; errors are reported here and not raised further
    pub fn run_extraction(&self) -> ExtractionOutcome {
        let start_time = Instant::now();
        match self.extract_and_write() {
            Ok(paths) => {
                info!("Extraction completed in {}.", Self::format_duration(start_time.elapsed()));
                ExtractionOutcome::Completed(paths)
            }
            Err(e) => {
                error!("An error occurred: {:#}, exiting...", e);
                ExtractionOutcome::Failed(format!("{:#}", e))
            }
        }
    }

    /// Scan every script under the asset tree into deduplicated buckets
    pub fn extract(&self) -> Result<ExtractedBuckets> {
        let asset_dir = &self.config.asset_dir;
        if !FileManager::dir_exists(asset_dir) {
            return Err(anyhow!("Asset directory does not exist: {:?}", asset_dir));
        }

        let extractor = EntryExtractor::new(self.config.globals_file.clone());
        let scripts = FileManager::find_files(asset_dir, &self.config.script_extension)?;
        info!("Extracting text from {} script files in {:?}", scripts.len(), asset_dir);

        let mut buckets = ExtractedBuckets::new();
        for script in &scripts {
            extractor.extract_file(script, &mut buckets)?;
        }

        let buckets = buckets.deduplicated();
        info!(
            "Extracted {} globals, {} objects and {} windows",
            buckets.globals.len(),
            buckets.objects.len(),
            buckets.windows.len()
        );
        Ok(buckets)
    }

    fn extract_and_write(&self) -> Result<Vec<PathBuf>> {
        let buckets = self.extract()?;
        FileManager::ensure_dir(&self.config.extracted_dir)?;

        let writer = RecordWriter::new(&self.config.extracted_dir);
        Category::ALL
            .iter()
            .map(|&category| writer.write_category(category, buckets.get(category)))
            .collect()
    }

    /// Load the translated records; a failed encoding repair is fatal
    pub fn load_translations(&self) -> Result<TranslationTable, RecordError> {
        let codec = self.target_codec().map_err(|_| RecordError::EncodingMismatch {
            path: self.config.translations_dir.clone(),
            encoding: self.config.encoding.clone(),
        })?;
        let chunk_width = self.config.chunking_enabled().then_some(self.config.chunk_width);
        RecordLoader::new(codec, chunk_width).load_dir(&self.config.translations_dir)
    }

    /// Text jobs for scripts and stories, binary jobs for every other asset
    pub fn discover_jobs(&self) -> Result<Vec<SubstitutionJob>> {
        let mut jobs = Vec::new();
        let output_root = &self.config.output_dir;

        for (root, story_tree) in [(&self.config.asset_dir, false), (&self.config.story_dir, true)] {
            if !FileManager::dir_exists(root) {
                warn!("Directory {:?} does not exist, skipping", root);
                continue;
            }

            for path in FileManager::find_all_files(root)? {
                let kind = FileManager::detect_file_kind(&path, &self.config.script_extension, &self.config.story_extension);
                let job = match kind {
                    FileKind::Story => {
                        let output = FileManager::generate_output_path(&path, output_root, None);
                        SubstitutionJob::new(path, output, kind)
                    }
                    FileKind::Script if !story_tree => {
                        let output = FileManager::generate_output_path(&path, output_root, None);
                        SubstitutionJob::new(path, output, kind)
                    }
                    FileKind::Binary if !story_tree => {
                        let output = FileManager::generate_output_path(
                            &path,
                            output_root,
                            Some(&self.config.binary_output_extension),
                        );
                        SubstitutionJob::new(path, output, kind)
                    }
                    _ => continue,
                };
                jobs.push(job);
            }
        }

        Ok(jobs)
    }

    /// Run the substitution phase over every discovered file
    pub async fn run_import(&self) -> Result<RunSummary, AppError> {
        let start_time = Instant::now();

        // Nothing is substituted unless every record list loaded
        let table = self.load_translations()?;

        let engine = SubstitutionEngine::new(table, self.target_codec()?, self.binary_source_codec()?)?;
        let jobs = self.discover_jobs()?;
        info!(
            "Importing translations into {} files...Please wait until the process is complete...",
            jobs.len()
        );

        let progress_bar = ProgressBar::new(jobs.len() as u64);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files ({percent}%) {msg} {eta}")
            .or_else(|_| ProgressStyle::default_bar().template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({percent}%) {msg}"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        progress_bar.set_style(style.progress_chars("█▓▒░"));

        let pb = progress_bar.clone();
        let summary = Orchestrator::new(Arc::new(engine))
            .run(jobs, move |completed, _total| pb.set_position(completed as u64))
            .await;
        progress_bar.finish_and_clear();

        info!("Import completed in {}.", Self::format_duration(start_time.elapsed()));
        Ok(summary)
    }

    fn target_codec(&self) -> Result<TextCodec> {
        TextCodec::for_label(&self.config.encoding)
    }

    fn binary_source_codec(&self) -> Result<TextCodec> {
        TextCodec::for_label(&self.config.binary_source_encoding)
    }

    /// Format a duration as `1h 2m 3s`, `2m 3s` or `3.4s`
    pub fn format_duration(duration: Duration) -> String {
        let total_secs = duration.as_secs();
        let hours = total_secs / 3600;
        let minutes = (total_secs % 3600) / 60;
        let seconds = total_secs % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{:.1}s", duration.as_secs_f64())
        }
    }
}
