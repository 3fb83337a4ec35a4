use std::path::PathBuf;
use std::time::Instant;

use tts_annotate::markup::{render, Catalog, SsmlGenerator, ThreadChooser};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let reference = std::env::var("TTS_REFERENCE_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("reference"));
    let catalog = Catalog::from_list_files(
        &reference.join("voices.txt"),
        &reference.join("styles.txt"),
    )?;
    let generator = SsmlGenerator::new(catalog);

    let mut messages: Vec<String> = std::env::args().skip(1).collect();
    if messages.is_empty() {
        messages = vec![
            "(excited)test(Jenny)(sad)test (Davis) test(Jane)".to_string(),
            "this is a normal message".to_string(),
        ];
    }

    let mut chooser = ThreadChooser;
    for message in &messages {
        let start = Instant::now();
        let document = generator.parse(message, &mut chooser)?;
        let ssml = render(&document, generator.options());

        println!("Message: {message}");
        println!("Segments: {}", serde_json::to_string_pretty(&document)?);
        println!("SSML ({:.2?}):\n{ssml}\n", start.elapsed());
    }

    Ok(())
}
