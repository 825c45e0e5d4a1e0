//! Classification orchestrator
//!
//! Drives every candidate file through the gates, strictly one file at a
//! time:
//!
//! ```text
//! Discovered → Eligible → TypeNormalized → TestConfirmed
//!            → FieldsValidated → CourseResolved → Placed
//! ```
//!
//! with the exits `Skipped` (discovery filter), `RejectedNotPdf`
//! (quarantined), `RejectedNotTest` (left in place) and
//! `RejectedIncompleteFields` (quarantined).

use crate::error::{ClassifyError, ClassifyResult};
use crate::models::{
    ClassificationOutcome, CourseCatalog, ExtractedFields, RunSummary, ValidatedFields,
};
use crate::services::file_mover::{ensure_pdf_extension, place, quarantine};
use crate::services::{
    ChatClient, CourseIndex, CourseResolver, FileScanner, KeywordTestDetector, LlmError,
    LlmFieldExtractor, MagicPdfProbe, PdfTextSource,
};
use crate::types::{FieldExtractor, FileTypeProbe, TestPredicate, TextSource};
use crate::validators::FieldValidator;
use exam_common::config::{ClassifierConfig, LlmConfig};
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

/// External collaborators consulted for each file
pub struct Collaborators {
    pub file_type: Box<dyn FileTypeProbe>,
    pub text_source: Box<dyn TextSource>,
    pub test_predicate: Box<dyn TestPredicate>,
    pub field_extractor: Box<dyn FieldExtractor>,
}

impl Collaborators {
    /// Magic-byte probe, lopdf text layer, keyword detector and chat-completion extractor
    pub fn production(
        config: &ClassifierConfig,
        llm: &LlmConfig,
        api_key: String,
    ) -> Result<Self, LlmError> {
        let client = ChatClient::new(llm, api_key)?;
        Ok(Self {
            file_type: Box::new(MagicPdfProbe::new()),
            text_source: Box::new(PdfTextSource::new()),
            test_predicate: Box::new(KeywordTestDetector::from_rules(&config.rules)),
            field_extractor: Box::new(LlmFieldExtractor::new(client, config.rules.clone())),
        })
    }
}

/// Sequential exam classifier
pub struct Classifier {
    config: ClassifierConfig,
    catalog: CourseCatalog,
    collaborators: Collaborators,
    validator: FieldValidator,
    resolver: CourseResolver,
    course_index: CourseIndex,
}

impl Classifier {
    pub fn new(config: ClassifierConfig, catalog: CourseCatalog, collaborators: Collaborators) -> Self {
        let validator = FieldValidator::from_thresholds(&config.thresholds);
        let resolver = CourseResolver::from_thresholds(&config.thresholds);
        let course_index = CourseIndex::new(&config.destination_root);

        Self {
            config,
            catalog,
            collaborators,
            validator,
            resolver,
            course_index,
        }
    }

    /// Classify every eligible file under the source root
    ///
    /// # Errors
    /// Only fatal errors (configuration, missing degree, unreadable source
    /// root) are returned. Per-file filesystem failures are logged and
    /// collected in [`RunSummary::failures`].
    pub async fn run(&mut self) -> ClassifyResult<RunSummary> {
        let mut summary = RunSummary::start();

        info!(
            source = %self.config.source_root.display(),
            destination = %self.config.destination_root.display(),
            "Starting classification run"
        );

        self.course_index = CourseIndex::build(&self.config.destination_root, self.catalog.degrees());

        let mut scanner = FileScanner::new(self.config.rules.clone())?;
        if let Some(excluded) = self.destination_inside_source() {
            debug!(excluded = %excluded.display(), "Destination lies inside the source tree");
            scanner = scanner.excluding(excluded);
        }

        let scan = scanner.scan(&self.config.source_root)?;
        summary.discovered = scan.discovered();
        summary.skipped = scan.skipped.len();

        for path in &scan.candidates {
            match self.classify_file(path).await {
                Ok(outcome) => {
                    info!(file = %path.display(), outcome = outcome.label(), "File classified");
                    summary.record(&outcome);
                }
                Err(e) if !e.is_fatal() => {
                    error!(file = %path.display(), error = %e, "File processing failed");
                    summary.record_failure(path, e.to_string());
                }
                Err(e) => {
                    error!(file = %path.display(), error = %e, "Aborting run");
                    return Err(e);
                }
            }
        }

        summary.finish();

        info!(
            discovered = summary.discovered,
            skipped = summary.skipped,
            accepted = summary.accepted,
            not_pdf = summary.not_pdf,
            not_test = summary.not_test,
            incomplete = summary.incomplete,
            failed = summary.failures.len(),
            duration_secs = summary.duration_secs().unwrap_or_default(),
            "Classification run complete"
        );

        Ok(summary)
    }

    /// Run one eligible file through the gates
    pub async fn classify_file(&mut self, path: &Path) -> ClassifyResult<ClassificationOutcome> {
        debug!(file = %path.display(), "Processing file");

        // Type normalization
        if !self.collaborators.file_type.is_pdf(path) {
            let quarantine_dir = self.config.destination_root.join(&self.config.layout.not_pdf_dir);
            let quarantine_path = quarantine(path, &quarantine_dir)
                .map_err(|e| ClassifyError::filesystem(path, e))?;
            info!(file = %path.display(), to = %quarantine_path.display(), "Not a PDF, quarantined");
            return Ok(ClassificationOutcome::RejectedNotPdf { quarantine_path });
        }

        let path = ensure_pdf_extension(path).map_err(|e| ClassifyError::filesystem(path, e))?;

        if !self.config.pacing_delay.is_zero() {
            tokio::time::sleep(self.config.pacing_delay).await;
        }

        // Test confirmation
        let text = self.leading_text(&path).await;
        if !self.collaborators.test_predicate.is_test(&text) {
            info!(file = %path.display(), "Not identified as a test, leaving in place");
            return Ok(ClassificationOutcome::RejectedNotTest);
        }

        // Extraction and validation
        let fields = self.extract_fields(&path, &text).await;
        let validated = match self.validator.validate(fields) {
            Ok(validated) => validated,
            Err(reason) => {
                let quarantine_dir =
                    self.config.destination_root.join(&self.config.layout.not_test_dir);
                let quarantine_path = quarantine(&path, &quarantine_dir)
                    .map_err(|e| ClassifyError::filesystem(&path, e))?;
                info!(
                    file = %path.display(),
                    reason = %reason,
                    to = %quarantine_path.display(),
                    "Fields rejected, quarantined"
                );
                return Ok(ClassificationOutcome::RejectedIncompleteFields { quarantine_path });
            }
        };

        // Course resolution
        let degree = validated.degree();
        let existing = self
            .course_index
            .existing(degree)
            .map_err(|e| ClassifyError::filesystem(self.config.destination_root.join(degree), e))?;
        let course = self
            .resolver
            .resolve(validated.course_name(), degree, &self.catalog, existing)?;
        debug!(file = %path.display(), course = %course, degree = %degree, "Course resolved");

        // Placement
        let target = self.destination_path(&validated, &course);
        let destination_path = place(&path, &target).map_err(|e| ClassifyError::filesystem(&path, e))?;
        self.course_index.record(degree, &course);

        info!(file = %path.display(), to = %destination_path.display(), "Placed exam");
        Ok(ClassificationOutcome::Accepted { destination_path })
    }

    /// `<destination>/<degree>/<course>/<exams>/<year>/<year> סמסטר <s> מועד <m>.pdf`
    pub fn destination_path(&self, fields: &ValidatedFields, course: &str) -> PathBuf {
        let layout = &self.config.layout;
        self.config
            .destination_root
            .join(fields.degree())
            .join(course)
            .join(&layout.exams_label)
            .join(fields.year())
            .join(layout.file_name(fields.year(), fields.semester(), fields.moed()))
    }

    async fn leading_text(&self, path: &Path) -> String {
        let source = &self.collaborators.text_source;
        match source.leading_text(path, self.config.text_line_limit).await {
            Ok(text) => {
                if text.trim().is_empty() {
                    warn!(file = %path.display(), source = source.name(), "No text layer found");
                }
                text
            }
            Err(e) => {
                warn!(file = %path.display(), source = source.name(), error = %e, "Text extraction failed");
                String::new()
            }
        }
    }

    async fn extract_fields(&self, path: &Path, text: &str) -> ExtractedFields {
        let extractor = &self.collaborators.field_extractor;
        match extractor.extract(text).await {
            Ok(fields) => {
                debug!(file = %path.display(), extractor = extractor.name(), fields = %fields, "Fields extracted");
                fields
            }
            Err(e) => {
                warn!(
                    file = %path.display(),
                    extractor = extractor.name(),
                    error = %e,
                    "Field extraction failed, treating all fields as unknown"
                );
                ExtractedFields::unknown()
            }
        }
    }

    /// Destination root as seen from the walk, when it lies under the source root
    fn destination_inside_source(&self) -> Option<PathBuf> {
        let source = self.config.source_root.canonicalize().ok()?;
        let destination = self.config.destination_root.canonicalize().ok()?;
        let relative = destination.strip_prefix(&source).ok()?;
        if relative.as_os_str().is_empty() {
            return None;
        }
        Some(self.config.source_root.join(relative))
    }
}
