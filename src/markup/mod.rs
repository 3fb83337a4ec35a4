//! Annotated message to SSML conversion.
//!
//! Messages are plain text with parenthesised markers naming a voice or a
//! speaking style:
//!
//! ```text
//! (Jenny)(excited)hello there(Davis)(sad)goodbye
//! ```
//!
//! Conversion runs in three steps:
//!
//! 1. [`tokenizer`] splits the message into markers and words, classifies
//!    markers against the [`Catalog`] and makes sure a voice comes first.
//! 2. [`segmenter`] groups the tokens per voice, then per style, filling in a
//!    random style where a voice's text does not open with one.
//! 3. [`emitter`] renders the resulting [`Document`] as SSML.
//!
//! Markers are matched case-insensitively. Markers that name neither a voice
//! nor a style are spoken as-is.
//!
//! # Random defaults
//!
//! Missing voices and styles are drawn through a [`Chooser`]. Use
//! [`ThreadChooser`] in production, [`RngChooser`] with a seeded RNG for
//! reproducible output, or your own implementation in tests.
//!
//! # Example
//!
//! ```rust
//! use tts_annotate::markup::{Catalog, RngChooser, SsmlGenerator};
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let catalog = Catalog::new(["Jenny", "Davis", "Jane"], ["excited", "sad"])?;
//! let generator = SsmlGenerator::new(catalog);
//! let mut chooser = RngChooser(StdRng::seed_from_u64(1));
//!
//! let document = generator.parse("(excited)test(Jenny)(sad)test (Davis) test(Jane)", &mut chooser)?;
//! assert_eq!(document.voices[0].voice.as_str(), "Jenny");
//! assert_eq!(document.spoken().count(), 2);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod catalog;
pub mod chooser;
pub mod emitter;
pub mod generator;
pub mod segmenter;
pub mod tokenizer;

pub use catalog::{Catalog, StyleName, VoiceName};
pub use chooser::{Chooser, RngChooser, ThreadChooser};
pub use emitter::{render, SsmlOptions, SsmlOptionsBuilder};
pub use generator::{MarkupError, SsmlGenerator};
pub use segmenter::{Document, StyleSegment, VoiceSegment};
pub use tokenizer::{Token, VoiceFronting};
