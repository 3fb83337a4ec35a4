//! # tts-annotate
//!
//! A Rust library that turns lightly annotated chat messages into
//! multi-voice, multi-style SSML for a neural speech service.
//!
//! ## Features
//!
//! - **Inline markers**: `(Jenny)` switches voice, `(excited)` switches style
//! - **Random defaults**: unmarked text gets a random voice and style
//! - **Pluggable synthesis**: hand the SSML to any [`SsmlSynthesizer`]
//!
//! ## Quick Start
//!
//! ```toml
//! [dependencies]
//! tts-annotate = "2026.10"
//! ```
//!
//! ```ignore
//! use std::path::Path;
//! use tts_annotate::markup::{Catalog, SsmlGenerator, ThreadChooser};
//!
//! let catalog = Catalog::from_list_files(Path::new("reference/voices.txt"), Path::new("reference/styles.txt"))?;
//! let generator = SsmlGenerator::new(catalog);
//!
//! let ssml = generator.generate("(Jenny)(excited)hello(Davis)(sad)bye", &mut ThreadChooser)?;
//! println!("{ssml}");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod markup;

use std::path::Path;

use markup::{Chooser, SsmlGenerator};

/// Audio produced by a completed synthesis request.
///
/// Contains raw f32 audio samples and the sample rate of the output audio.
#[derive(Debug)]
pub struct SynthesisResult {
    /// Raw audio samples as f32 values
    pub samples: Vec<f32>,
    /// Sample rate of the audio
    pub sample_rate: u32,
}

impl SynthesisResult {
    /// Write the audio to a 32-bit float WAV file.
    pub fn write_wav(&self, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate: self.sample_rate,
            bits_per_sample: 32,
            sample_format: hound::SampleFormat::Float,
        };
        let mut writer = hound::WavWriter::create(path, spec)?;
        for &sample in &self.samples {
            writer.write_sample(sample)?;
        }
        writer.finalize()?;
        Ok(())
    }

    /// Duration of the audio in seconds.
    pub fn duration_secs(&self) -> f64 {
        self.samples.len() as f64 / self.sample_rate as f64
    }
}

/// Why a synthesis request did not complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancellationReason {
    Error,
    EndOfStream,
    CancelledByUser,
}

/// What a synthesizer reports back for one SSML document.
#[derive(Debug)]
pub enum SynthesisOutcome {
    Completed(SynthesisResult),
    Canceled {
        reason: CancellationReason,
        details: Option<String>,
    },
}

/// A speech service that accepts SSML.
///
/// Implementations own their transport, credentials and playback; this crate
/// only produces the markup.
pub trait SsmlSynthesizer {
    /// Synthesize one SSML document.
    ///
    /// `Err` is reserved for failures to reach or talk to the service. A
    /// request the service refused is a [`SynthesisOutcome::Canceled`].
    fn speak_ssml(&mut self, ssml: &str) -> Result<SynthesisOutcome, Box<dyn std::error::Error>>;
}

/// Generate SSML for `text` and pass it to `synthesizer`, logging the outcome.
///
/// Returns the SSML that was sent alongside the synthesizer's outcome.
pub fn speak_message<C, S>(
    text: &str,
    generator: &SsmlGenerator,
    chooser: &mut C,
    synthesizer: &mut S,
) -> Result<(String, SynthesisOutcome), Box<dyn std::error::Error>>
where
    C: Chooser + ?Sized,
    S: SsmlSynthesizer + ?Sized,
{
    let ssml = generator.generate(text, chooser)?;
    log::debug!("SSML to synthesize:\n{ssml}");

    let outcome = synthesizer.speak_ssml(&ssml)?;
    match &outcome {
        SynthesisOutcome::Completed(result) => {
            log::info!("Speech complete ({:.2}s of audio)", result.duration_secs());
        }
        SynthesisOutcome::Canceled { reason, details } => {
            log::warn!("Speech synthesis canceled: {reason:?}");
            if *reason == CancellationReason::Error {
                if let Some(details) = details {
                    log::error!("Error details: {details}");
                }
            }
        }
    }

    Ok((ssml, outcome))
}

#[cfg(test)]
mod tests {
    use super::{
        speak_message, CancellationReason, SsmlSynthesizer, SynthesisOutcome, SynthesisResult,
    };
    use crate::markup::{Catalog, Chooser, MarkupError, SsmlGenerator};

    struct Fixed(usize);

    impl Chooser for Fixed {
        fn choose(&mut self, len: usize) -> usize {
            self.0 % len
        }
    }

    /// Records every request and answers with a canned outcome.
    struct FakeSynthesizer {
        requests: Vec<String>,
        cancel: Option<CancellationReason>,
    }

    impl FakeSynthesizer {
        fn new(cancel: Option<CancellationReason>) -> Self {
            Self {
                requests: Vec::new(),
                cancel,
            }
        }
    }

    impl SsmlSynthesizer for FakeSynthesizer {
        fn speak_ssml(
            &mut self,
            ssml: &str,
        ) -> Result<SynthesisOutcome, Box<dyn std::error::Error>> {
            self.requests.push(ssml.to_string());
            Ok(match self.cancel {
                Some(reason) => SynthesisOutcome::Canceled {
                    reason,
                    details: Some("quota exceeded".to_string()),
                },
                None => SynthesisOutcome::Completed(SynthesisResult {
                    samples: vec![0.0; 24_000],
                    sample_rate: 16_000,
                }),
            })
        }
    }

    fn generator() -> SsmlGenerator {
        SsmlGenerator::new(Catalog::new(["Jenny", "Davis"], ["excited", "sad"]).unwrap())
    }

    #[test]
    fn sends_generated_ssml_to_synthesizer() {
        let mut synth = FakeSynthesizer::new(None);
        let (ssml, outcome) = speak_message(
            "(Jenny)(excited)hello(Davis)(sad)bye",
            &generator(),
            &mut Fixed(0),
            &mut synth,
        )
        .unwrap();

        assert_eq!(synth.requests, vec![ssml.clone()]);
        assert!(ssml.contains("en-US-DavisNeural"));
        match outcome {
            SynthesisOutcome::Completed(result) => {
                assert!((result.duration_secs() - 1.5).abs() < f64::EPSILON)
            }
            other => panic!("unexpected outcome {other:?}"),
        }
    }

    #[test]
    fn passes_cancellation_through() {
        let mut synth = FakeSynthesizer::new(Some(CancellationReason::Error));
        let (_, outcome) =
            speak_message("hi", &generator(), &mut Fixed(1), &mut synth).unwrap();

        assert!(matches!(
            outcome,
            SynthesisOutcome::Canceled {
                reason: CancellationReason::Error,
                details: Some(_),
            }
        ));
    }

    #[test]
    fn markup_errors_skip_the_synthesizer() {
        let mut synth = FakeSynthesizer::new(None);
        let err = speak_message("(Jenny oops", &generator(), &mut Fixed(0), &mut synth)
            .unwrap_err();

        assert!(synth.requests.is_empty());
        let err = err.downcast::<MarkupError>().expect("markup error");
        assert!(matches!(*err, MarkupError::MalformedMarker { offset: 0 }));
    }

    #[test]
    fn writes_float_wav() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let path = dir.path().join("out.wav");
        let result = SynthesisResult {
            samples: vec![0.0, 0.5, -0.5, 0.25],
            sample_rate: 24_000,
        };

        result.write_wav(&path).unwrap();

        let reader = hound::WavReader::open(&path).unwrap();
        assert_eq!(reader.spec().sample_rate, 24_000);
        assert_eq!(reader.spec().bits_per_sample, 32);
        let samples: Vec<f32> = reader.into_samples::<f32>().map(|s| s.unwrap()).collect();
        assert_eq!(samples, result.samples);
    }
}
