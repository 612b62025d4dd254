use std::fs;
use std::io::Cursor;
use std::sync::{Arc, Mutex};

use critic_engine::{
    compose_analysis_card, ensure_output_dir, run_export, wrap_paragraphs, AtomicFileWriter,
    CardAssets, CardContent, ComposeError, EngineEvent, ExportError, ExportJob, ExportOutcome,
    ExportSettings, FixedAdvance, InlineImage, JobProgress, ProgressSink, Stage, CARD_HEIGHT,
    CARD_WIDTH,
};
use image::{ImageFormat, Rgba, RgbaImage};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

const GREEN: Rgba<u8> = Rgba([10, 200, 30, 255]);

fn png(width: u32, height: u32, color: Rgba<u8>) -> Vec<u8> {
    let mut bytes = Vec::new();
    RgbaImage::from_pixel(width, height, color)
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .unwrap();
    bytes
}

fn card() -> CardContent {
    CardContent {
        artwork: png(100, 50, GREEN),
        title: Some("Dusk".to_string()),
        byline: Some("A. Painter, 1901".to_string()),
        body: "Warm light.\n\nCool shadows.".to_string(),
    }
}

fn settings(dir: &TempDir, share_command: Option<&str>) -> ExportSettings {
    ExportSettings {
        output_dir: dir.path().join("exports"),
        assets: CardAssets::default(),
        share_command: share_command.map(str::to_string),
        share_text: "Analyzed with ARTL".to_string(),
        today: Arc::new(|| "2026-10-19".to_string()),
        now_millis: Arc::new(|| 1_700_000_000_000),
    }
}

#[derive(Default)]
struct RecordingSink {
    stages: Mutex<Vec<Stage>>,
}

impl ProgressSink for RecordingSink {
    fn emit(&self, event: EngineEvent) {
        if let EngineEvent::Progress(JobProgress { stage, .. }) = event {
            self.stages.lock().unwrap().push(stage);
        }
    }
}

fn close(a: Rgba<u8>, b: Rgba<u8>) -> bool {
    a.0.iter().zip(b.0.iter()).all(|(x, y)| x.abs_diff(*y) <= 1)
}

#[test]
fn card_is_framed_and_centered_without_a_font() {
    let bytes = compose_analysis_card(&card(), &CardAssets::default(), "2026-10-19").unwrap();
    let decoded = image::load_from_memory(&bytes).unwrap().to_rgba8();

    assert_eq!(decoded.dimensions(), (CARD_WIDTH, CARD_HEIGHT));
    // 100x50 scales to 500x250 at x=150, y=180 with a 6px frame around it.
    assert_eq!(*decoded.get_pixel(0, 0), Rgba([0x2a, 0x2a, 0x2a, 0xff]));
    assert_eq!(*decoded.get_pixel(146, 176), Rgba([0xc9, 0x93, 0x83, 0xff]));
    assert_eq!(*decoded.get_pixel(653, 433), Rgba([0xc9, 0x93, 0x83, 0xff]));
    assert!(close(*decoded.get_pixel(400, 300), GREEN));
    assert_eq!(*decoded.get_pixel(400, 800), Rgba([0x2a, 0x2a, 0x2a, 0xff]));
}

#[test]
fn undecodable_artwork_is_an_error() {
    let mut content = card();
    content.artwork = b"not an image".to_vec();

    let err = compose_analysis_card(&content, &CardAssets::default(), "today").unwrap_err();

    assert!(matches!(err, ComposeError::DecodeArtwork(_)));
}

#[test]
fn wrap_breaks_on_spaces_and_skips_blank_paragraphs() {
    let measure = FixedAdvance { em: 0.5 };
    // 10px text at 0.5em: 5px per char, 10 chars per 50px line.
    let wrapped = wrap_paragraphs("aaa bbb ccc\n\n   \naaaaa aaaa", 50.0, 10.0, &measure);

    assert_eq!(
        wrapped,
        vec![
            vec!["aaa bbb".to_string(), "ccc".to_string()],
            vec!["aaaaa aaaa".to_string()],
        ]
    );
}

#[test]
fn wrap_breaks_unspaced_text_between_characters() {
    let measure = FixedAdvance { em: 0.5 };
    let wrapped = wrap_paragraphs("一二三四五六七八九十十一", 50.0, 10.0, &measure);

    assert_eq!(
        wrapped,
        vec![vec!["一二三四五六七八九十".to_string(), "十一".to_string()]]
    );
}

#[test]
fn writer_keeps_existing_files() {
    let temp = TempDir::new().unwrap();
    let writer = AtomicFileWriter::new(temp.path().to_path_buf());

    let first = writer.write("card.png", b"first").unwrap();
    let second = writer.write("card.png", b"second").unwrap();

    assert_eq!(first, temp.path().join("card.png"));
    assert_eq!(second, temp.path().join("card-1.png"));
    assert_eq!(fs::read(first).unwrap(), b"first");
    assert_eq!(fs::read(second).unwrap(), b"second");
}

#[test]
fn output_dir_that_is_a_file_is_rejected() {
    let temp = TempDir::new().unwrap();
    let file = temp.path().join("occupied");
    fs::write(&file, "x").unwrap();

    assert!(ensure_output_dir(&file).is_err());
}

#[tokio::test]
async fn photo_is_saved_with_its_original_bytes() {
    let temp = TempDir::new().unwrap();
    let sink = RecordingSink::default();
    let job = ExportJob::SavePhoto {
        job_id: 1,
        image: InlineImage {
            mime_type: "image/jpeg".to_string(),
            bytes: vec![0xFF, 0xD8, 0xFF, 0xE0],
        },
        title: Some("Dusk".to_string()),
    };

    let outcome = run_export(job, &settings(&temp, None), &sink).await.unwrap();

    let expected = temp.path().join("exports").join("artl_artwork_Dusk_1700000000000.jpg");
    assert_eq!(outcome, ExportOutcome::PhotoSaved(expected.clone()));
    assert_eq!(fs::read(expected).unwrap(), vec![0xFF, 0xD8, 0xFF, 0xE0]);
}

#[tokio::test]
async fn card_is_saved_as_png() {
    let temp = TempDir::new().unwrap();
    let sink = RecordingSink::default();
    let job = ExportJob::SaveCard {
        job_id: 2,
        card: card(),
    };

    let outcome = run_export(job, &settings(&temp, None), &sink).await.unwrap();

    let expected = temp.path().join("exports").join("artl_analysis_Dusk_1700000000000.png");
    assert_eq!(outcome, ExportOutcome::CardSaved(expected.clone()));
    let saved = image::load_from_memory(&fs::read(expected).unwrap()).unwrap();
    assert_eq!((saved.width(), saved.height()), (CARD_WIDTH, CARD_HEIGHT));
    assert_eq!(
        *sink.stages.lock().unwrap(),
        vec![Stage::Composing, Stage::Writing]
    );
}

#[tokio::test]
async fn share_without_command_falls_back_to_text() {
    let temp = TempDir::new().unwrap();
    let sink = RecordingSink::default();
    let mut content = card();
    content.title = None;
    let job = ExportJob::ShareCard { job_id: 3, card: content };

    let outcome = run_export(job, &settings(&temp, None), &sink).await.unwrap();

    let expected = temp.path().join("exports").join("artl_analysis_artwork_1700000000000.png");
    assert!(expected.exists());
    assert_eq!(
        outcome,
        ExportOutcome::ShareFallback {
            path: expected,
            text: "Analyzed with ARTL".to_string(),
        }
    );
}

#[cfg(unix)]
#[tokio::test]
async fn share_command_receives_the_card() {
    let temp = TempDir::new().unwrap();
    let sink = RecordingSink::default();
    let job = ExportJob::ShareCard { job_id: 4, card: card() };

    let outcome = run_export(job, &settings(&temp, Some("test -f")), &sink).await.unwrap();

    assert!(matches!(outcome, ExportOutcome::CardShared(_)));
    assert_eq!(sink.stages.lock().unwrap().last(), Some(&Stage::Sharing));
}

#[cfg(unix)]
#[tokio::test]
async fn failing_share_command_falls_back_to_text() {
    let temp = TempDir::new().unwrap();
    let sink = RecordingSink::default();
    let job = ExportJob::ShareCard { job_id: 5, card: card() };

    let outcome = run_export(job, &settings(&temp, Some("false")), &sink).await.unwrap();

    assert!(matches!(outcome, ExportOutcome::ShareFallback { .. }));
}

#[tokio::test]
async fn unwritable_output_dir_fails_the_export() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("exports"), "occupied").unwrap();
    let sink = RecordingSink::default();
    let job = ExportJob::SaveCard { job_id: 6, card: card() };

    let err = run_export(job, &settings(&temp, None), &sink).await.unwrap_err();

    assert!(matches!(err, ExportError::Persist(_)));
}
