// Integration tests for the transcription bridge
//
// These tests verify that event-driven recognition sessions are bridged
// into a single blocking call: segments land in the sink in arrival order,
// terminal events release the completion signal (possibly more than once),
// and the session always returns control.

use anyhow::Result;
use audio2text::{
    CancellationReason, RecognitionSession, ScriptedBackend, SessionOutcome, SessionState,
    SpeechEvent,
};
use std::fs;
use std::path::PathBuf;
use std::sync::atomic::Ordering;
use std::time::Duration;
use tempfile::TempDir;

fn recognized(text: &str) -> SpeechEvent {
    SpeechEvent::Recognized {
        text: text.to_string(),
    }
}

fn canceled_error(code: &str) -> SpeechEvent {
    SpeechEvent::Canceled {
        reason: CancellationReason::Error {
            code: code.to_string(),
            details: "scripted cancellation".to_string(),
        },
    }
}

/// Create a dummy audio working file (the scripted backend only checks
/// that it exists)
fn dummy_audio(dir: &TempDir) -> Result<PathBuf> {
    let path = dir.path().join("sample.wav");
    fs::write(&path, b"RIFF")?;
    Ok(path)
}

#[tokio::test]
async fn test_segments_appended_in_emission_order() -> Result<()> {
    let dir = TempDir::new()?;
    let audio = dummy_audio(&dir)?;
    let text = dir.path().join("sample.txt");

    let backend = ScriptedBackend::new(vec![
        recognized("one"),
        recognized("two"),
        recognized("three"),
        SpeechEvent::SessionStopped,
    ]);
    let stop_calls = backend.stop_calls();

    let mut session = RecognitionSession::new(Box::new(backend));
    assert_eq!(session.state(), SessionState::Idle);

    let outcome = session.transcribe(&audio, &text).await?;

    assert_eq!(outcome, SessionOutcome::Completed);
    assert_eq!(session.state(), SessionState::Done);
    assert_eq!(fs::read_to_string(&text)?, "onetwothree");

    // Stop is issued exactly once, after the completion signal
    assert_eq!(stop_calls.load(Ordering::SeqCst), 1);

    Ok(())
}

#[tokio::test]
async fn test_no_match_contributes_nothing() -> Result<()> {
    let dir = TempDir::new()?;
    let audio = dummy_audio(&dir)?;
    let text = dir.path().join("sample.txt");

    let backend = ScriptedBackend::new(vec![
        recognized("a"),
        SpeechEvent::NoMatch,
        recognized("b"),
        SpeechEvent::NoMatch,
        SpeechEvent::SessionStopped,
    ]);

    let mut session = RecognitionSession::new(Box::new(backend));
    let outcome = session.transcribe(&audio, &text).await?;

    assert_eq!(outcome, SessionOutcome::Completed);
    assert_eq!(fs::read_to_string(&text)?, "ab");

    Ok(())
}

#[tokio::test]
async fn test_zero_segments_yields_empty_file() -> Result<()> {
    let dir = TempDir::new()?;
    let audio = dummy_audio(&dir)?;
    let text = dir.path().join("silent.txt");

    let backend = ScriptedBackend::new(vec![SpeechEvent::SessionStopped]);

    let mut session = RecognitionSession::new(Box::new(backend));
    let outcome = session.transcribe(&audio, &text).await?;

    assert_eq!(outcome, SessionOutcome::Completed);
    assert!(text.exists(), "Transcript file should exist, not be missing");
    assert_eq!(fs::read_to_string(&text)?, "");

    Ok(())
}

#[tokio::test]
async fn test_cancellation_and_stop_both_release_the_signal() -> Result<()> {
    let dir = TempDir::new()?;
    let audio = dummy_audio(&dir)?;
    let text = dir.path().join("sample.txt");

    // Both terminal reactions fire: cancellation first, then stopped.
    // The session must return without hanging or erroring.
    let backend = ScriptedBackend::new(vec![
        canceled_error("AuthenticationFailure"),
        SpeechEvent::SessionStopped,
    ]);

    let mut session = RecognitionSession::new(Box::new(backend));
    let outcome = tokio::time::timeout(
        Duration::from_secs(5),
        session.transcribe(&audio, &text),
    )
    .await
    .expect("session should terminate when both terminal events fire")?;

    match outcome {
        SessionOutcome::CanceledError { code, .. } => {
            assert_eq!(code, "AuthenticationFailure");
        }
        other => panic!("Expected CanceledError, got {:?}", other),
    }

    // The stopped reaction still owns sink closure
    assert_eq!(fs::read_to_string(&text)?, "");

    Ok(())
}

#[tokio::test]
async fn test_clean_cancellation() -> Result<()> {
    let dir = TempDir::new()?;
    let audio = dummy_audio(&dir)?;
    let text = dir.path().join("sample.txt");

    let backend = ScriptedBackend::new(vec![
        SpeechEvent::Canceled {
            reason: CancellationReason::EndOfStream,
        },
        SpeechEvent::SessionStopped,
    ]);

    let mut session = RecognitionSession::new(Box::new(backend));
    let outcome = session.transcribe(&audio, &text).await?;

    assert_eq!(outcome, SessionOutcome::CanceledClean);

    Ok(())
}

#[tokio::test]
async fn test_partial_transcript_survives_cancellation() -> Result<()> {
    let dir = TempDir::new()?;
    let audio = dummy_audio(&dir)?;
    let text = dir.path().join("sample.txt");

    let backend = ScriptedBackend::new(vec![
        recognized("partial"),
        canceled_error("ServiceTimeout"),
        SpeechEvent::SessionStopped,
    ]);

    let mut session = RecognitionSession::new(Box::new(backend));
    let outcome = session.transcribe(&audio, &text).await?;

    assert!(matches!(outcome, SessionOutcome::CanceledError { .. }));
    assert_eq!(fs::read_to_string(&text)?, "partial");

    Ok(())
}

#[tokio::test]
async fn test_sink_open_failure_never_starts_a_session() -> Result<()> {
    let dir = TempDir::new()?;
    let audio = dummy_audio(&dir)?;
    let text = dir.path().join("no-such-dir").join("sample.txt");

    let backend = ScriptedBackend::new(vec![SpeechEvent::SessionStopped]);
    let start_calls = backend.start_calls();

    let mut session = RecognitionSession::new(Box::new(backend));
    let result = session.transcribe(&audio, &text).await;

    assert!(result.is_err(), "Sink open failure should propagate");
    assert_eq!(
        start_calls.load(Ordering::SeqCst),
        0,
        "No session should be started when the sink cannot be opened"
    );

    Ok(())
}

#[tokio::test]
async fn test_start_failure_is_a_terminal_outcome_not_an_error() -> Result<()> {
    let dir = TempDir::new()?;
    let audio = dummy_audio(&dir)?;
    let text = dir.path().join("sample.txt");

    let mut session = RecognitionSession::new(Box::new(ScriptedBackend::failing()));
    let outcome = session.transcribe(&audio, &text).await?;

    match outcome {
        SessionOutcome::CanceledError { code, .. } => assert_eq!(code, "StartFailed"),
        other => panic!("Expected CanceledError, got {:?}", other),
    }

    // The sink was opened before the start attempt and closed on the way out
    assert!(text.exists());
    assert_eq!(fs::read_to_string(&text)?, "");

    Ok(())
}

#[tokio::test]
async fn test_stream_closing_without_terminal_event_still_completes() -> Result<()> {
    let dir = TempDir::new()?;
    let audio = dummy_audio(&dir)?;
    let text = dir.path().join("sample.txt");

    // Misbehaving backend: drops the channel without Canceled/SessionStopped
    let backend = ScriptedBackend::new(vec![recognized("x")]);

    let mut session = RecognitionSession::new(Box::new(backend));
    let outcome = tokio::time::timeout(
        Duration::from_secs(5),
        session.transcribe(&audio, &text),
    )
    .await
    .expect("channel closure must release the completion signal")?;

    assert_eq!(outcome, SessionOutcome::Completed);
    assert_eq!(fs::read_to_string(&text)?, "x");

    Ok(())
}
