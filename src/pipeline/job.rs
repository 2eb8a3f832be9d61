use std::path::{Path, PathBuf};

/// One end-to-end processing request for a single uploaded audio file
///
/// Created at invocation start and discarded at invocation end; nothing
/// persists across jobs beyond the blobs in the object store.
#[derive(Debug, Clone)]
pub struct Job {
    /// Logical identifier derived from the triggering blob (`<name>.wav`)
    pub name: String,

    /// Blob name of the input audio in the audio container
    pub audio_blob: String,

    /// Blob name of the output transcript in the text container
    pub text_blob: String,

    /// Local working copy of the audio
    pub local_audio: PathBuf,

    /// Local working copy of the transcript
    pub local_text: PathBuf,
}

impl Job {
    pub fn new(name: &str, temp_dir: &Path) -> Self {
        Self {
            name: name.to_string(),
            audio_blob: format!("{}.wav", name),
            text_blob: format!("{}.txt", name),
            local_audio: temp_dir.join(format!("{}.wav", name)),
            local_text: temp_dir.join(format!("{}.txt", name)),
        }
    }
}
