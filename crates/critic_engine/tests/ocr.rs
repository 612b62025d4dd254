use std::path::PathBuf;
use std::time::Duration;

use critic_engine::{OcrError, OcrSettings, Recognizer, TesseractRecognizer};

fn recognizer(executable: PathBuf, timeout: Duration) -> TesseractRecognizer {
    TesseractRecognizer::new(OcrSettings {
        executable,
        language: "eng".to_string(),
        timeout,
    })
}

#[tokio::test]
async fn empty_image_is_rejected_before_launch() {
    let recognizer = recognizer(PathBuf::from("/nonexistent/tesseract"), Duration::from_secs(1));
    let err = recognizer.recognize(&[]).await.unwrap_err();
    assert!(matches!(err, OcrError::EmptyImage));
}

#[tokio::test]
async fn missing_executable_is_a_launch_error() {
    let recognizer = recognizer(
        PathBuf::from("/nonexistent/tesseract-binary"),
        Duration::from_secs(1),
    );
    let err = recognizer.recognize(&[1, 2, 3]).await.unwrap_err();
    assert!(matches!(err, OcrError::Launch { .. }), "got {err:?}");
}

#[cfg(unix)]
mod fake_tesseract {
    use std::fs;
    use std::os::unix::fs::PermissionsExt;
    use std::path::PathBuf;
    use std::time::Duration;

    use critic_engine::{OcrError, Recognizer};
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    use super::recognizer;

    fn script(dir: &TempDir, body: &str) -> PathBuf {
        let path = dir.path().join("tesseract");
        fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    #[tokio::test]
    async fn stdout_is_returned_and_arguments_are_passed() {
        let dir = TempDir::new().unwrap();
        let exe = script(
            &dir,
            r#"test -f "$1" || exit 3
printf 'Artist: Claude Monet\n%s %s %s\n' "$2" "$3" "$4""#,
        );

        let text = recognizer(exe, Duration::from_secs(5))
            .recognize(&[0xFF, 0xD8, 0xFF])
            .await
            .unwrap();

        assert_eq!(text, "Artist: Claude Monet\nstdout -l eng\n");
    }

    #[tokio::test]
    async fn non_zero_exit_reports_stderr() {
        let dir = TempDir::new().unwrap();
        let exe = script(&dir, "echo 'Error in pixReadStream' >&2\nexit 1");

        let err = recognizer(exe, Duration::from_secs(5))
            .recognize(&[1])
            .await
            .unwrap_err();

        match err {
            OcrError::Failed { stderr, .. } => assert_eq!(stderr, "Error in pixReadStream"),
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[tokio::test]
    async fn hanging_process_times_out() {
        let dir = TempDir::new().unwrap();
        let exe = script(&dir, "sleep 5");

        let err = recognizer(exe, Duration::from_millis(200))
            .recognize(&[1])
            .await
            .unwrap_err();

        assert!(matches!(err, OcrError::Timeout { .. }), "got {err:?}");
    }
}
