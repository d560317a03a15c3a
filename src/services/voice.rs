//! Speech capture: record a bounded window, reject silence, transcribe the rest.

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::error::{FridayError, Result};
use crate::models::VoiceSettings;
use crate::services::input::Listen;

const SAMPLE_RATE: u32 = 16000;
const CHANNELS: u16 = 1;
const BITS_PER_SAMPLE: u16 = 16;

/// Captures bounded windows of 16 kHz mono audio from the default input device.
#[derive(Debug, Clone, Copy, Default)]
pub struct Recorder;

impl Recorder {
    pub async fn record(&self, window: Duration) -> Result<Vec<i16>> {
        tokio::task::spawn_blocking(move || record_blocking(window))
            .await
            .map_err(|e| FridayError::Recorder(format!("capture task failed: {}", e)))?
    }
}

// cpal streams are not Send on every platform, so the stream lives and dies on one thread.
fn record_blocking(window: Duration) -> Result<Vec<i16>> {
    let device = cpal::default_host()
        .default_input_device()
        .ok_or_else(|| FridayError::Recorder("no input device".to_string()))?;

    let samples = Arc::new(Mutex::new(Vec::new()));
    let shared = samples.clone();
    let stream = device
        .build_input_stream(
            &input_config(),
            move |data: &[f32], _: &cpal::InputCallbackInfo| push_samples(&shared, data),
            |err: cpal::StreamError| log::warn!("audio stream error: {}", err),
            None,
        )
        .map_err(|e| FridayError::Recorder(e.to_string()))?;
    stream.play().map_err(|e| FridayError::Recorder(e.to_string()))?;
    std::thread::sleep(window);
    drop(stream);

    let captured = samples.lock().map(|s| s.clone()).unwrap_or_default();
    Ok(captured)
}

fn input_config() -> cpal::StreamConfig {
    cpal::StreamConfig {
        channels: CHANNELS,
        sample_rate: cpal::SampleRate(SAMPLE_RATE),
        buffer_size: cpal::BufferSize::Default,
    }
}

fn push_samples(buffer: &Mutex<Vec<i16>>, data: &[f32]) {
    if let Ok(mut guard) = buffer.lock() {
        guard.extend(data.iter().map(|s| (s.clamp(-1.0, 1.0) * i16::MAX as f32) as i16));
    }
}

pub fn save_wav(path: &Path, samples: &[i16]) -> Result<()> {
    let spec = hound::WavSpec {
        channels: CHANNELS,
        sample_rate: SAMPLE_RATE,
        bits_per_sample: BITS_PER_SAMPLE,
        sample_format: hound::SampleFormat::Int,
    };
    let to_err = |e: hound::Error| FridayError::Recorder(format!("could not write recording: {}", e));
    let mut writer = hound::WavWriter::create(path, spec).map_err(to_err)?;
    for &sample in samples {
        writer.write_sample(sample).map_err(to_err)?;
    }
    writer.finalize().map_err(to_err)
}

/// RMS energy check; anything below `threshold` counts as silence.
pub fn contains_speech(samples: &[i16], threshold: f32) -> bool {
    if samples.is_empty() {
        return false;
    }
    let energy = samples
        .iter()
        .map(|sample| (*sample as f32).powi(2))
        .sum::<f32>()
        / samples.len() as f32;
    energy.sqrt() >= threshold
}

#[derive(Deserialize)]
struct TranscriptionResponse {
    #[serde(default)]
    text: String,
}

/// Whisper-compatible `/audio/transcriptions` client.
pub struct Transcriber {
    client: reqwest::Client,
    url: String,
    model: String,
    api_key: String,
}

impl Transcriber {
    pub fn new(settings: &VoiceSettings) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: settings.transcription_url.clone(),
            model: settings.transcription_model.clone(),
            api_key: settings.transcription_api_key.clone(),
        }
    }

    pub async fn transcribe(&self, audio: Vec<u8>) -> Result<String> {
        let part = reqwest::multipart::Part::bytes(audio)
            .file_name("command.wav")
            .mime_str("audio/wav")
            .map_err(|e| FridayError::Transcription(e.to_string()))?;
        let form = reqwest::multipart::Form::new()
            .text("model", self.model.clone())
            .text("language", "en")
            .part("file", part);

        let response = self
            .client
            .post(&self.url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .multipart(form)
            .send()
            .await
            .map_err(|e| FridayError::Transcription(format!("request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(FridayError::Transcription(format!("API error {}: {}", status, body)));
        }

        let parsed: TranscriptionResponse = response
            .json()
            .await
            .map_err(|e| FridayError::Transcription(format!("bad response: {}", e)))?;
        Ok(parsed.text.trim().to_string())
    }
}

struct TempAudio {
    path: PathBuf,
}

impl TempAudio {
    fn new() -> Self {
        let path = std::env::temp_dir().join(format!("friday-{}.wav", uuid::Uuid::new_v4()));
        Self { path }
    }

    fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TempAudio {
    fn drop(&mut self) {
        std::fs::remove_file(&self.path).ok();
    }
}

pub struct VoiceListener {
    recorder: Recorder,
    transcriber: Transcriber,
    threshold: f32,
}

impl VoiceListener {
    pub fn new(settings: &VoiceSettings) -> Self {
        Self {
            recorder: Recorder,
            transcriber: Transcriber::new(settings),
            threshold: settings.silence_rms_threshold,
        }
    }

    pub async fn listen(&self, window_secs: u64) -> Listen {
        match self.capture(window_secs).await {
            Ok(result) => result,
            Err(err) => {
                log::warn!("voice capture failed: {}", err);
                Listen::Failed(err.to_string())
            }
        }
    }

    async fn capture(&self, window_secs: u64) -> Result<Listen> {
        let samples = self.recorder.record(Duration::from_secs(window_secs)).await?;
        if !contains_speech(&samples, self.threshold) {
            return Ok(Listen::Timeout);
        }

        let temp = TempAudio::new();
        save_wav(temp.path(), &samples)?;
        let audio = tokio::fs::read(temp.path()).await?;
        let text = self.transcriber.transcribe(audio).await?;
        Ok(classify_transcript(&text))
    }
}

fn classify_transcript(text: &str) -> Listen {
    let text = text.trim();
    if text.chars().any(char::is_alphanumeric) {
        Listen::Heard(text.to_string())
    } else {
        Listen::Unintelligible
    }
}
