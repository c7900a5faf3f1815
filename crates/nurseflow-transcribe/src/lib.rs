//! nurseflow-transcribe
//!
//! Spoken observations to text via Amazon Transcribe.

pub mod error;

pub use aws_sdk_transcribe::types::{MediaFormat, TranscriptionJobStatus};

use std::time::Duration;

use aws_sdk_transcribe::types::{LanguageCode, Media};
use aws_smithy_types::byte_stream::ByteStream;
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::TranscribeError;

const AUDIO_PREFIX: &str = "_nurseflow/audio";
const TRANSCRIPT_PREFIX: &str = "_nurseflow/transcripts";
const POLL_INTERVAL: Duration = Duration::from_secs(3);
/// Polls before a still-queued or running job is given up on (about five
/// minutes at [`POLL_INTERVAL`]).
pub const MAX_POLLS: u32 = 100;

/// What to do after reading a job's status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobProgress {
    Completed,
    Pending,
}

/// Transcribe a recorded observation.
///
/// Uploads the recording to `bucket`, runs an Amazon Transcribe job whose
/// output lands in the same bucket, polls until completion and reads the
/// transcript. The recording, the transcript object and the job are
/// removed afterwards whether or not the job succeeded.
pub async fn transcribe_observation(
    config: &aws_config::SdkConfig,
    bucket: &str,
    audio: Vec<u8>,
    media_format: MediaFormat,
) -> Result<String, TranscribeError> {
    let transcribe = aws_sdk_transcribe::Client::new(config);
    let s3 = aws_sdk_s3::Client::new(config);

    let job_name = format!("nurseflow-{}", Uuid::new_v4());
    let audio_key = format!("{AUDIO_PREFIX}/{job_name}.{}", media_format.as_str());
    let output_key = format!("{TRANSCRIPT_PREFIX}/{job_name}.json");

    s3.put_object()
        .bucket(bucket)
        .key(&audio_key)
        .body(ByteStream::from(audio))
        .send()
        .await
        .map_err(|e| TranscribeError::Upload(e.into_service_error().to_string()))?;

    let result = run_job(
        &transcribe,
        &s3,
        bucket,
        &job_name,
        &audio_key,
        &output_key,
        media_format,
    )
    .await;

    // Clean up regardless of outcome.
    for key in [&audio_key, &output_key] {
        if let Err(e) = s3.delete_object().bucket(bucket).key(key).send().await {
            warn!(key = %key, error = %e, "failed to delete temporary object");
        }
    }
    if let Err(e) = transcribe
        .delete_transcription_job()
        .transcription_job_name(&job_name)
        .send()
        .await
    {
        warn!(job_name = %job_name, error = %e, "failed to delete transcription job");
    }

    result
}

async fn run_job(
    transcribe: &aws_sdk_transcribe::Client,
    s3: &aws_sdk_s3::Client,
    bucket: &str,
    job_name: &str,
    audio_key: &str,
    output_key: &str,
    media_format: MediaFormat,
) -> Result<String, TranscribeError> {
    let s3_uri = format!("s3://{bucket}/{audio_key}");
    info!(job_name, s3_uri, "starting transcription job");

    transcribe
        .start_transcription_job()
        .transcription_job_name(job_name)
        .media(Media::builder().media_file_uri(&s3_uri).build())
        .media_format(media_format)
        .language_code(LanguageCode::EnUs)
        .output_bucket_name(bucket)
        .output_key(output_key)
        .send()
        .await
        .map_err(|e| TranscribeError::Api(e.into_service_error().to_string()))?;

    for attempt in 1.. {
        tokio::time::sleep(POLL_INTERVAL).await;

        let resp = transcribe
            .get_transcription_job()
            .transcription_job_name(job_name)
            .send()
            .await
            .map_err(|e| TranscribeError::Api(e.into_service_error().to_string()))?;

        let job = resp
            .transcription_job()
            .ok_or_else(|| TranscribeError::Api("no job in response".into()))?;

        match job_progress(job.transcription_job_status(), job.failure_reason(), attempt)? {
            JobProgress::Completed => break,
            JobProgress::Pending => continue,
        }
    }

    info!(job_name, "transcription complete, reading result from S3");

    let get_resp = s3
        .get_object()
        .bucket(bucket)
        .key(output_key)
        .send()
        .await
        .map_err(|e| TranscribeError::Api(format!("failed to read transcript from S3: {e}")))?;

    let body = get_resp
        .body
        .collect()
        .await
        .map_err(|e| TranscribeError::Api(format!("failed to read transcript body: {e}")))?;

    let transcript_json = String::from_utf8(body.into_bytes().to_vec())
        .map_err(|e| TranscribeError::Parse(e.to_string()))?;

    extract_transcript_text(&transcript_json)
}

/// Decide the next step from the status seen on poll number `attempt`.
///
/// A job still queued or running after [`MAX_POLLS`] polls is an error, so
/// the caller stops waiting and can clean up.
pub fn job_progress(
    status: Option<&TranscriptionJobStatus>,
    failure_reason: Option<&str>,
    attempt: u32,
) -> Result<JobProgress, TranscribeError> {
    match status {
        Some(TranscriptionJobStatus::Completed) => Ok(JobProgress::Completed),
        Some(TranscriptionJobStatus::Failed) => Err(TranscribeError::JobFailed(
            failure_reason.unwrap_or("unknown").to_string(),
        )),
        _ if attempt >= MAX_POLLS => Err(TranscribeError::JobFailed(format!(
            "timed out after {attempt} polls"
        ))),
        _ => Ok(JobProgress::Pending),
    }
}

/// Extract plain text from the Transcribe JSON response.
///
/// The response format is:
/// ```json
/// { "results": { "transcripts": [{ "transcript": "the text..." }] } }
/// ```
pub fn extract_transcript_text(json: &str) -> Result<String, TranscribeError> {
    let value: serde_json::Value =
        serde_json::from_str(json).map_err(|e| TranscribeError::Parse(e.to_string()))?;

    let text = value
        .get("results")
        .and_then(|r| r.get("transcripts"))
        .and_then(|t| t.as_array())
        .and_then(|arr| arr.first())
        .and_then(|t| t.get("transcript"))
        .and_then(|t| t.as_str())
        .unwrap_or("");

    Ok(text.to_string())
}

/// Map a file extension to an Amazon Transcribe `MediaFormat`.
///
/// Returns `None` for extensions that aren't supported audio formats.
pub fn media_format_for_extension(ext: &str) -> Option<MediaFormat> {
    match ext.to_lowercase().as_str() {
        "mp3" => Some(MediaFormat::Mp3),
        "mp4" | "m4a" => Some(MediaFormat::Mp4),
        "wav" => Some(MediaFormat::Wav),
        "flac" => Some(MediaFormat::Flac),
        "ogg" => Some(MediaFormat::Ogg),
        "amr" => Some(MediaFormat::Amr),
        "webm" => Some(MediaFormat::Webm),
        _ => None,
    }
}
