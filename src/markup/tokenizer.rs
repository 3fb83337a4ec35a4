use super::catalog::{Catalog, StyleName, VoiceName};
use super::chooser::{pick, Chooser};
use super::generator::MarkupError;

/// A classified unit of an annotated message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Voice(VoiceName),
    Style(StyleName),
    /// Plain text, including markers that name neither a voice nor a style.
    Word(Word),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Word {
    pub text: String,
    /// Whitespace that preceded the word in the source. Empty when the word
    /// directly follows a marker or starts the message.
    pub gap: String,
}

/// How the token stream was made to start with a voice marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoiceFronting {
    AlreadyFirst,
    /// The first voice marker was moved from this index to the front.
    Moved { from: usize },
    /// No voice marker was present; a random one was inserted.
    Inserted,
}

/// Unclassified lexer output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Lexeme {
    Marker { content: String, gap: String },
    Word { text: String, gap: String },
}

#[derive(Debug, Clone, Copy)]
enum LexState {
    Between,
    InWord { start: usize },
    InMarker { open: usize },
}

/// Split raw text into markers and words.
///
/// A marker is everything between `(` and the next `)`. Words are maximal runs
/// of characters that are neither whitespace nor parentheses. A stray `)` is
/// dropped, as is an empty `()`. Control characters separate words and are
/// otherwise discarded.
pub(crate) fn lex(text: &str) -> Result<Vec<Lexeme>, MarkupError> {
    let mut lexemes = Vec::new();
    let mut gap = String::new();
    let mut state = LexState::Between;

    for (idx, ch) in text.char_indices() {
        state = match state {
            LexState::Between => step_between(ch, idx, &mut gap),
            LexState::InWord { start } => {
                if is_word_char(ch) {
                    state
                } else {
                    lexemes.push(Lexeme::Word {
                        text: text[start..idx].to_string(),
                        gap: std::mem::take(&mut gap),
                    });
                    step_between(ch, idx, &mut gap)
                }
            }
            LexState::InMarker { open } => match ch {
                ')' => {
                    let content = &text[open + 1..idx];
                    if content.trim().is_empty() {
                        log::debug!("Dropping empty marker at byte {open}");
                    } else {
                        lexemes.push(Lexeme::Marker {
                            content: content.to_string(),
                            gap: std::mem::take(&mut gap),
                        });
                    }
                    LexState::Between
                }
                '(' => return Err(MarkupError::MalformedMarker { offset: open }),
                _ => state,
            },
        };
    }

    match state {
        LexState::Between => {}
        LexState::InWord { start } => lexemes.push(Lexeme::Word {
            text: text[start..].to_string(),
            gap,
        }),
        LexState::InMarker { open } => return Err(MarkupError::MalformedMarker { offset: open }),
    }

    Ok(lexemes)
}

fn step_between(ch: char, idx: usize, gap: &mut String) -> LexState {
    match ch {
        '(' => LexState::InMarker { open: idx },
        ')' => {
            log::debug!("Ignoring unmatched ')' at byte {idx}");
            LexState::Between
        }
        c if c.is_whitespace() => {
            gap.push(c);
            LexState::Between
        }
        c if c.is_control() => LexState::Between,
        _ => LexState::InWord { start: idx },
    }
}

#[inline]
fn is_word_char(ch: char) -> bool {
    !ch.is_whitespace() && !ch.is_control() && ch != '(' && ch != ')'
}

fn classify(lexeme: Lexeme, catalog: &Catalog) -> Token {
    match lexeme {
        Lexeme::Word { text, gap } => Token::Word(Word { text, gap }),
        Lexeme::Marker { content, gap } => {
            if let Some(voice) = catalog.voice(&content) {
                Token::Voice(voice.clone())
            } else if let Some(style) = catalog.style(&content) {
                Token::Style(style.clone())
            } else {
                log::debug!("Unknown marker ({content}) kept as text");
                Token::Word(Word {
                    text: format!("({content})"),
                    gap,
                })
            }
        }
    }
}

/// Tokenize an annotated message and make sure it starts with a voice marker.
///
/// Fails with [`MarkupError::EmptyInput`] when there is nothing to speak once
/// voice and style markers are set aside.
pub fn tokenize<C: Chooser + ?Sized>(
    text: &str,
    catalog: &Catalog,
    chooser: &mut C,
) -> Result<Vec<Token>, MarkupError> {
    let mut tokens: Vec<Token> = lex(text)?
        .into_iter()
        .map(|lexeme| classify(lexeme, catalog))
        .collect();

    if !tokens.iter().any(|t| matches!(t, Token::Word(_))) {
        return Err(MarkupError::EmptyInput);
    }

    front_voice(&mut tokens, catalog, chooser);
    Ok(tokens)
}

/// Put a voice marker at index 0.
///
/// Only the first voice marker found is moved; later out-of-place markers are
/// left where they are. Without any voice marker a random catalog voice is
/// inserted.
pub fn front_voice<C: Chooser + ?Sized>(
    tokens: &mut Vec<Token>,
    catalog: &Catalog,
    chooser: &mut C,
) -> VoiceFronting {
    match tokens.iter().position(|t| matches!(t, Token::Voice(_))) {
        Some(0) => VoiceFronting::AlreadyFirst,
        Some(from) => {
            let voice = tokens.remove(from);
            log::debug!("Moving {voice:?} from position {from} to the front");
            tokens.insert(0, voice);
            VoiceFronting::Moved { from }
        }
        None => {
            let voice = pick(catalog.voices(), chooser).clone();
            log::debug!("No voice marker found, using random voice {voice}");
            tokens.insert(0, Token::Voice(voice));
            VoiceFronting::Inserted
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{front_voice, lex, tokenize, Lexeme, Token, VoiceFronting, Word};
    use crate::markup::{Catalog, Chooser, MarkupError};

    struct Fixed(usize);

    impl Chooser for Fixed {
        fn choose(&mut self, len: usize) -> usize {
            self.0 % len
        }
    }

    fn catalog() -> Catalog {
        Catalog::new(["Jenny", "Davis", "Jane"], ["excited", "sad"]).unwrap()
    }

    fn word(text: &str, gap: &str) -> Lexeme {
        Lexeme::Word {
            text: text.to_string(),
            gap: gap.to_string(),
        }
    }

    fn marker(content: &str, gap: &str) -> Lexeme {
        Lexeme::Marker {
            content: content.to_string(),
            gap: gap.to_string(),
        }
    }

    fn voice(catalog: &Catalog, name: &str) -> Token {
        Token::Voice(catalog.voice(name).unwrap().clone())
    }

    fn style(catalog: &Catalog, name: &str) -> Token {
        Token::Style(catalog.style(name).unwrap().clone())
    }

    fn plain(text: &str, gap: &str) -> Token {
        Token::Word(Word {
            text: text.to_string(),
            gap: gap.to_string(),
        })
    }

    #[test]
    fn lexes_markers_and_words_with_gaps() {
        let lexemes = lex("(Jenny)(excited)hello  there (Davis)bye").unwrap();
        assert_eq!(
            lexemes,
            vec![
                marker("Jenny", ""),
                marker("excited", ""),
                word("hello", ""),
                word("there", "  "),
                marker("Davis", " "),
                word("bye", ""),
            ]
        );
    }

    #[test]
    fn words_keep_punctuation() {
        let lexemes = lex("wait, what?!").unwrap();
        assert_eq!(lexemes, vec![word("wait,", ""), word("what?!", " ")]);
    }

    #[test]
    fn marker_content_is_verbatim() {
        let lexemes = lex("( JENNY )hi").unwrap();
        assert_eq!(lexemes, vec![marker(" JENNY ", ""), word("hi", "")]);
    }

    #[test]
    fn unterminated_marker_is_malformed() {
        let err = lex("(Jenny test").unwrap_err();
        assert!(matches!(err, MarkupError::MalformedMarker { offset: 0 }), "got {err:?}");

        let err = lex("ok (sad").unwrap_err();
        assert!(matches!(err, MarkupError::MalformedMarker { offset: 3 }));
    }

    #[test]
    fn nested_open_is_malformed() {
        let err = lex("hi (Jenny (sad) there").unwrap_err();
        assert!(matches!(err, MarkupError::MalformedMarker { offset: 3 }));
    }

    #[test]
    fn stray_close_and_empty_markers_are_dropped() {
        let lexemes = lex("a) b () c").unwrap();
        assert_eq!(lexemes, vec![word("a", ""), word("b", " "), word("c", "  ")]);
    }

    #[test]
    fn control_characters_split_words_and_vanish() {
        let lexemes = lex("hi\u{1}\u{1b}[0m there\u{7f}").unwrap();
        assert_eq!(lexemes, vec![word("hi", ""), word("[0m", ""), word("there", " ")]);
    }

    #[test]
    fn voice_matching_ignores_case() {
        let catalog = catalog();
        let upper = tokenize("(JENNY)hi", &catalog, &mut Fixed(0)).unwrap();
        let lower = tokenize("(jenny)hi", &catalog, &mut Fixed(0)).unwrap();
        assert_eq!(upper, lower);
        assert_eq!(upper[0], voice(&catalog, "Jenny"));
    }

    #[test]
    fn unknown_markers_become_text() {
        let catalog = catalog();
        let tokens = tokenize("(Jenny)(whisper) hello", &catalog, &mut Fixed(0)).unwrap();
        assert_eq!(
            tokens,
            vec![
                voice(&catalog, "Jenny"),
                plain("(whisper)", ""),
                plain("hello", " "),
            ]
        );
    }

    #[test]
    fn inserts_random_voice_when_none_present() {
        let catalog = catalog();
        let tokens = tokenize("this is a normal message", &catalog, &mut Fixed(1)).unwrap();
        assert_eq!(tokens[0], voice(&catalog, "Davis"));
        assert_eq!(tokens.len(), 6);
    }

    #[test]
    fn moves_only_first_voice_to_front() {
        let catalog = catalog();
        let tokens = tokenize(
            "(excited)test(Jenny)(sad)test (Davis) test(Jane)",
            &catalog,
            &mut Fixed(0),
        )
        .unwrap();
        assert_eq!(
            tokens,
            vec![
                voice(&catalog, "Jenny"),
                style(&catalog, "excited"),
                plain("test", ""),
                style(&catalog, "sad"),
                plain("test", ""),
                voice(&catalog, "Davis"),
                plain("test", " "),
                voice(&catalog, "Jane"),
            ]
        );
    }

    #[test]
    fn front_voice_reports_what_it_did() {
        let catalog = catalog();

        let mut tokens = vec![voice(&catalog, "Jane"), plain("hi", "")];
        assert_eq!(
            front_voice(&mut tokens, &catalog, &mut Fixed(0)),
            VoiceFronting::AlreadyFirst
        );

        let mut tokens = vec![
            plain("hi", ""),
            voice(&catalog, "Jane"),
            plain("there", " "),
            voice(&catalog, "Davis"),
        ];
        assert_eq!(
            front_voice(&mut tokens, &catalog, &mut Fixed(0)),
            VoiceFronting::Moved { from: 1 }
        );
        assert_eq!(tokens[0], voice(&catalog, "Jane"));
        assert_eq!(tokens[3], voice(&catalog, "Davis"));

        let mut tokens = vec![plain("hi", "")];
        assert_eq!(
            front_voice(&mut tokens, &catalog, &mut Fixed(2)),
            VoiceFronting::Inserted
        );
        assert_eq!(tokens, vec![voice(&catalog, "Jane"), plain("hi", "")]);
    }

    #[test]
    fn empty_or_marker_only_input_is_rejected() {
        let catalog = catalog();
        for input in ["", "   ", "(Jenny)(sad)", "() )"] {
            let err = tokenize(input, &catalog, &mut Fixed(0)).unwrap_err();
            assert!(matches!(err, MarkupError::EmptyInput), "{input:?} gave {err:?}");
        }
    }
}
