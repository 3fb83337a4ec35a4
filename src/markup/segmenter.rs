use serde::Serialize;

use super::catalog::{Catalog, StyleName, VoiceName};
use super::chooser::{pick, Chooser};
use super::tokenizer::{Token, Word};

/// Text spoken in one style.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StyleSegment {
    pub style: StyleName,
    pub text: String,
}

/// Everything one voice says, split by style.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VoiceSegment {
    pub voice: VoiceName,
    pub styles: Vec<StyleSegment>,
}

impl VoiceSegment {
    /// True when the voice has nothing to say and will produce no markup.
    pub fn is_empty(&self) -> bool {
        self.styles.iter().all(|s| s.text.trim().is_empty())
    }
}

/// A fully resolved message: voice segments in speaking order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Document {
    pub voices: Vec<VoiceSegment>,
}

impl Document {
    /// Voice segments that carry text.
    pub fn spoken(&self) -> impl Iterator<Item = &VoiceSegment> {
        self.voices.iter().filter(|v| !v.is_empty())
    }
}

/// Group tokens into voice segments, then each voice's text into style
/// segments.
///
/// Expects the token stream produced by [`tokenize`](super::tokenizer::tokenize),
/// which starts with a voice marker. Text ahead of the first voice marker is
/// given to that voice; if there is no voice marker at all a random one is
/// drawn.
pub fn segment<C: Chooser + ?Sized>(
    tokens: Vec<Token>,
    catalog: &Catalog,
    chooser: &mut C,
) -> Document {
    let mut voices = Vec::new();
    let mut current: Option<VoiceName> = None;
    let mut pending = Vec::new();

    for token in tokens {
        match token {
            Token::Voice(voice) => {
                if let Some(previous) = current.replace(voice) {
                    let run = std::mem::take(&mut pending);
                    voices.push(close_voice(previous, run, catalog, chooser));
                }
            }
            other => pending.push(other),
        }
    }

    let last = match current {
        Some(voice) => Some(voice),
        None if !pending.is_empty() => Some(pick(catalog.voices(), chooser).clone()),
        None => None,
    };
    if let Some(voice) = last {
        voices.push(close_voice(voice, pending, catalog, chooser));
    }

    Document { voices }
}

fn close_voice<C: Chooser + ?Sized>(
    voice: VoiceName,
    run: Vec<Token>,
    catalog: &Catalog,
    chooser: &mut C,
) -> VoiceSegment {
    if run.is_empty() {
        log::debug!("Voice {voice} has no text");
        return VoiceSegment {
            voice,
            styles: Vec::new(),
        };
    }

    let styles = split_styles(run, catalog, chooser);
    VoiceSegment { voice, styles }
}

/// Split one voice's tokens at style markers. A random style is assumed when
/// the run does not open with one.
fn split_styles<C: Chooser + ?Sized>(
    run: Vec<Token>,
    catalog: &Catalog,
    chooser: &mut C,
) -> Vec<StyleSegment> {
    let mut styles = Vec::new();
    let mut current = match run.first() {
        Some(Token::Style(_)) => None,
        _ => {
            let style = pick(catalog.styles(), chooser).clone();
            log::debug!("No leading style, using random style {style}");
            Some(style)
        }
    };
    let mut text = String::new();

    for token in run {
        match token {
            Token::Style(style) => {
                if let Some(previous) = current.replace(style) {
                    push_style(&mut styles, previous, std::mem::take(&mut text));
                }
            }
            Token::Word(word) => append_word(&mut text, &word),
            // Voice markers end a run before it gets here.
            Token::Voice(_) => {}
        }
    }

    if let Some(style) = current {
        push_style(&mut styles, style, text);
    }

    styles
}

fn push_style(styles: &mut Vec<StyleSegment>, style: StyleName, text: String) {
    if text.trim().is_empty() {
        log::debug!("Dropping style {style} with no text");
        return;
    }
    styles.push(StyleSegment { style, text });
}

fn append_word(text: &mut String, word: &Word) {
    if !text.is_empty() {
        if word.gap.is_empty() {
            text.push(' ');
        } else {
            text.push_str(&word.gap);
        }
    }
    text.push_str(&word.text);
}
