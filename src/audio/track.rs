use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use rodio::decoder::DecoderError;
use rodio::{Decoder, OutputStream, Sink};

use super::AudioElement;
use crate::error::AppError;

/// Background track played from a local audio file on the default output device.
///
/// The output device is opened on the first `play`, so a machine without one
/// simply reports a failed start.
pub struct RodioTrack {
    path: PathBuf,
    volume: f32,
    looping: bool,
    output: Option<(OutputStream, Sink)>,
}

impl RodioTrack {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            volume: 1.0,
            looping: false,
            output: None,
        }
    }

    fn open_output() -> Result<(OutputStream, Sink), AppError> {
        let (stream, handle) = OutputStream::try_default()
            .map_err(|e| AppError::Playback(format!("No audio output: {}", e)))?;
        let sink = Sink::try_new(&handle)
            .map_err(|e| AppError::Playback(format!("Failed to create sink: {}", e)))?;
        Ok((stream, sink))
    }

    fn open_file(&self) -> Result<BufReader<File>, AppError> {
        Ok(BufReader::new(File::open(&self.path)?))
    }

    fn queue_track(&self, sink: &Sink, file: BufReader<File>) -> Result<(), AppError> {
        let decode_err = |e: DecoderError| {
            AppError::Playback(format!("Failed to decode {}: {}", self.path.display(), e))
        };

        if self.looping {
            sink.append(Decoder::new_looped(file).map_err(decode_err)?);
        } else {
            sink.append(Decoder::new(file).map_err(decode_err)?);
        }
        Ok(())
    }

    fn needs_track(&self) -> bool {
        self.output.as_ref().map_or(true, |(_, sink)| sink.empty())
    }
}

impl AudioElement for RodioTrack {
    fn set_volume(&mut self, volume: f32) {
        self.volume = volume;
        if let Some((_, sink)) = &self.output {
            sink.set_volume(volume);
        }
    }

    fn set_looping(&mut self, looping: bool) {
        if self.looping == looping {
            return;
        }
        self.looping = looping;

        // A queued source keeps the loop mode it was decoded with
        if let Some((_, sink)) = &self.output {
            if !sink.empty() {
                let paused = sink.is_paused();
                sink.clear();
                let requeued = self
                    .open_file()
                    .and_then(|file| self.queue_track(sink, file));
                if let Err(e) = requeued {
                    tracing::warn!("Failed to requeue background track: {}", e);
                } else if !paused {
                    sink.play();
                }
            }
        }
    }

    fn play(&mut self) -> Result<(), AppError> {
        let file = if self.needs_track() {
            Some(self.open_file()?)
        } else {
            None
        };

        if self.output.is_none() {
            self.output = Some(Self::open_output()?);
        }

        if let Some((_, sink)) = &self.output {
            if let Some(file) = file {
                self.queue_track(sink, file)?;
            }
            sink.set_volume(self.volume);
            sink.play();
        }
        Ok(())
    }

    fn pause(&mut self) {
        if let Some((_, sink)) = &self.output {
            sink.pause();
        }
    }
}
