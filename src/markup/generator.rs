use super::catalog::Catalog;
use super::chooser::Chooser;
use super::emitter::{render, SsmlOptions};
use super::segmenter::{segment, Document};
use super::tokenizer::tokenize;

#[derive(thiserror::Error, Debug)]
pub enum MarkupError {
    #[error("Unterminated marker: '(' at byte {offset} has no matching ')'")]
    MalformedMarker { offset: usize },
    #[error("Message has no text to speak")]
    EmptyInput,
    #[error("Invalid voice/style catalog: {0}")]
    Catalog(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid catalog JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Turns annotated messages into SSML for a fixed catalog and set of options.
///
/// ```
/// use tts_annotate::markup::{Catalog, SsmlGenerator, ThreadChooser};
///
/// let catalog = Catalog::new(["Jenny", "Davis"], ["excited", "sad"])?;
/// let generator = SsmlGenerator::new(catalog);
///
/// let ssml = generator.generate("(Jenny)(excited)hello(Davis)(sad)bye", &mut ThreadChooser)?;
/// assert!(ssml.contains("<voice name='en-US-DavisNeural'>"));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct SsmlGenerator {
    catalog: Catalog,
    options: SsmlOptions,
}

impl SsmlGenerator {
    pub fn new(catalog: Catalog) -> Self {
        Self::with_options(catalog, SsmlOptions::default())
    }

    pub fn with_options(catalog: Catalog, options: SsmlOptions) -> Self {
        Self { catalog, options }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn options(&self) -> &SsmlOptions {
        &self.options
    }

    /// Resolve a message into voice and style segments without rendering it.
    pub fn parse<C: Chooser + ?Sized>(
        &self,
        text: &str,
        chooser: &mut C,
    ) -> Result<Document, MarkupError> {
        let tokens = tokenize(text, &self.catalog, chooser)?;
        let document = segment(tokens, &self.catalog, chooser);
        log::debug!(
            "Parsed message into {} voice segment(s), {} with text",
            document.voices.len(),
            document.spoken().count()
        );
        Ok(document)
    }

    /// Parse and render a message in one go.
    pub fn generate<C: Chooser + ?Sized>(
        &self,
        text: &str,
        chooser: &mut C,
    ) -> Result<String, MarkupError> {
        let document = self.parse(text, chooser)?;
        Ok(render(&document, &self.options))
    }
}
