use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::generator::MarkupError;

/// A voice identifier, spelled as it appears in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct VoiceName(String);

/// An expressive style identifier, spelled as it appears in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct StyleName(String);

impl VoiceName {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl StyleName {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VoiceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for StyleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Deserialize)]
struct CatalogFile {
    voices: Vec<String>,
    styles: Vec<String>,
}

/// The known voice and style names a message may refer to.
///
/// Lookups are case-insensitive and return the spelling given at construction
/// time. Style names are emitted as spelled; voice ids are title-cased by
/// [`SsmlOptions::voice_id`](super::SsmlOptions::voice_id).
#[derive(Debug, Clone)]
pub struct Catalog {
    voices: Vec<VoiceName>,
    styles: Vec<StyleName>,
    voice_index: HashMap<String, usize>,
    style_index: HashMap<String, usize>,
}

impl Catalog {
    /// Build a catalog from ordered name lists.
    ///
    /// Blank entries are skipped. Both lists must end up non-empty and free of
    /// case-insensitive duplicates.
    pub fn new<V, S>(voices: V, styles: S) -> Result<Self, MarkupError>
    where
        V: IntoIterator,
        V::Item: AsRef<str>,
        S: IntoIterator,
        S::Item: AsRef<str>,
    {
        let (voices, voice_index) = index_names(voices, "voice")?;
        let (styles, style_index) = index_names(styles, "style")?;

        Ok(Self {
            voices: voices.into_iter().map(VoiceName).collect(),
            styles: styles.into_iter().map(StyleName).collect(),
            voice_index,
            style_index,
        })
    }

    /// Load newline-separated voice and style lists, one name per line.
    pub fn from_list_files(voices_path: &Path, styles_path: &Path) -> Result<Self, MarkupError> {
        let voices = std::fs::read_to_string(voices_path)?;
        let styles = std::fs::read_to_string(styles_path)?;
        let catalog = Self::new(voices.lines(), styles.lines())?;
        log::info!(
            "Loaded {} voices from {} and {} styles from {}",
            catalog.voices.len(),
            voices_path.display(),
            catalog.styles.len(),
            styles_path.display()
        );
        Ok(catalog)
    }

    /// Parse a catalog from JSON of the form `{"voices": [...], "styles": [...]}`.
    pub fn from_json_str(json: &str) -> Result<Self, MarkupError> {
        let file: CatalogFile = serde_json::from_str(json)?;
        Self::new(file.voices, file.styles)
    }

    pub fn from_json_file(path: &Path) -> Result<Self, MarkupError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    pub fn voices(&self) -> &[VoiceName] {
        &self.voices
    }

    pub fn styles(&self) -> &[StyleName] {
        &self.styles
    }

    /// Resolve a marker's content to a known voice, ignoring case and
    /// surrounding whitespace.
    pub fn voice(&self, name: &str) -> Option<&VoiceName> {
        self.voice_index
            .get(&normalize(name))
            .map(|&idx| &self.voices[idx])
    }

    /// Resolve a marker's content to a known style, ignoring case and
    /// surrounding whitespace.
    pub fn style(&self, name: &str) -> Option<&StyleName> {
        self.style_index
            .get(&normalize(name))
            .map(|&idx| &self.styles[idx])
    }
}

fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}

fn index_names<I>(names: I, what: &str) -> Result<(Vec<String>, HashMap<String, usize>), MarkupError>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let mut ordered = Vec::new();
    let mut index = HashMap::new();

    for name in names {
        let name = name.as_ref().trim();
        if name.is_empty() {
            continue;
        }
        if index.insert(normalize(name), ordered.len()).is_some() {
            return Err(MarkupError::Catalog(format!("duplicate {what} name {name:?}")));
        }
        ordered.push(name.to_string());
    }

    if ordered.is_empty() {
        return Err(MarkupError::Catalog(format!("no {what} names given")));
    }

    Ok((ordered, index))
}
