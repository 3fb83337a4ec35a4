use std::borrow::Cow;

use derive_builder::Builder;

use super::catalog::VoiceName;
use super::segmenter::Document;

pub const SSML_NAMESPACE: &str = "http://www.w3.org/2001/10/synthesis";
pub const MSTTS_NAMESPACE: &str = "http://www.w3.org/2001/mstts";

/// Controls the envelope and how catalog voice names map to service voice ids.
///
/// ```
/// use tts_annotate::markup::SsmlOptions;
///
/// let options = SsmlOptions::builder()
///     .locale("en-GB")
///     .voice_prefix("en-GB-")
///     .build()?;
/// assert_eq!(options.voice_suffix, "Neural");
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Builder)]
#[builder(default)]
#[builder(setter(into))]
pub struct SsmlOptions {
    /// Value of the envelope's `xml:lang` attribute.
    pub locale: String,
    pub voice_prefix: String,
    pub voice_suffix: String,
}

impl Default for SsmlOptions {
    fn default() -> Self {
        Self {
            locale: "en-US".to_string(),
            voice_prefix: "en-US-".to_string(),
            voice_suffix: "Neural".to_string(),
        }
    }
}

impl SsmlOptions {
    pub fn builder() -> SsmlOptionsBuilder {
        SsmlOptionsBuilder::default()
    }

    /// Full service voice id, e.g. `jenny` -> `en-US-JennyNeural`.
    ///
    /// Each word of the name starts upper-case whatever the catalog spelling;
    /// the remaining letters are kept as listed.
    pub fn voice_id(&self, voice: &VoiceName) -> String {
        format!(
            "{}{}{}",
            self.voice_prefix,
            title_case(voice.as_str()),
            self.voice_suffix
        )
    }
}

fn title_case(name: &str) -> String {
    let mut titled = String::with_capacity(name.len());
    let mut word_start = true;
    for ch in name.chars() {
        if word_start {
            titled.extend(ch.to_uppercase());
        } else {
            titled.push(ch);
        }
        word_start = !ch.is_alphanumeric();
    }
    titled
}

/// Render a document as SSML.
///
/// Every style segment gets its own `<voice>` element wrapping a single
/// `<mstts:express-as>`; the service mishandles several styles inside one
/// voice element. Segments without text produce nothing.
pub fn render(document: &Document, options: &SsmlOptions) -> String {
    let mut ssml = format!(
        "<speak version='1.0' xml:lang='{}' xmlns='{SSML_NAMESPACE}' xmlns:mstts='{MSTTS_NAMESPACE}'>\n",
        escape(&options.locale)
    );

    for voice in &document.voices {
        let voice_id = options.voice_id(&voice.voice);
        for style in &voice.styles {
            if style.text.trim().is_empty() {
                continue;
            }
            ssml.push_str(&format!("\t<voice name='{}'>\n", escape(&voice_id)));
            ssml.push_str(&format!(
                "\t\t<mstts:express-as style='{}'>\n",
                escape(style.style.as_str())
            ));
            ssml.push_str(&format!("\t\t\t{}\n", escape(&style.text)));
            ssml.push_str("\t\t</mstts:express-as>\n");
            ssml.push_str("\t</voice>\n");
        }
    }

    ssml.push_str("</speak>");
    ssml
}

/// Escape the five XML special characters and replace characters XML 1.0
/// does not allow with a space.
pub fn escape(text: &str) -> Cow<'_, str> {
    if !text.contains(|c: char| needs_escape(c) || !is_xml_char(c)) {
        return Cow::Borrowed(text);
    }

    let mut escaped = String::with_capacity(text.len() + 16);
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            c if !is_xml_char(c) => escaped.push(' '),
            c => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}

#[inline]
fn needs_escape(ch: char) -> bool {
    matches!(ch, '&' | '<' | '>' | '"' | '\'')
}

#[inline]
fn is_xml_char(ch: char) -> bool {
    match ch {
        '\t' | '\n' | '\r' => true,
        '\u{FFFE}' | '\u{FFFF}' => false,
        c => !matches!(c, '\u{0}'..='\u{1F}'),
    }
}
