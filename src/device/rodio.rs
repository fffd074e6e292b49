//! Rodio playback backend
//!
//! One shared `OutputStream` lives on the device; every session gets its own
//! `Sink`. Sessions decode from the clip's shared byte buffer on each start,
//! so replaying after a stop never touches the asset store again.

use std::io::Cursor;

use rodio::source::EmptyCallback;
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source};

use crate::assets::SoundData;
use crate::device::{
    Completion, CompletionSender, PlaybackDevice, PlaybackSession, SessionToken,
};
use crate::error::DeviceError;

/// Playback device backed by the default audio output.
pub struct RodioDevice {
    _stream: OutputStream,
    handle: OutputStreamHandle,
}

impl RodioDevice {
    /// Open the default audio output.
    pub fn try_default() -> Result<Self, DeviceError> {
        let (stream, handle) =
            OutputStream::try_default().map_err(|e| DeviceError::StreamInit(Box::new(e)))?;

        tracing::debug!("Opened default audio output stream");
        Ok(Self {
            _stream: stream,
            handle,
        })
    }
}

impl PlaybackDevice for RodioDevice {
    type Session = RodioSession;

    fn bind(
        &self,
        data: &SoundData,
        completions: CompletionSender,
    ) -> Result<RodioSession, DeviceError> {
        let sink = Sink::try_new(&self.handle).map_err(|e| DeviceError::BindFailed(Box::new(e)))?;

        Ok(RodioSession {
            token: SessionToken::next(),
            sink,
            data: data.clone(),
            completions,
            looping: false,
        })
    }
}

/// One live sink bound to one clip's data.
pub struct RodioSession {
    token: SessionToken,
    sink: Sink,
    data: SoundData,
    completions: CompletionSender,
    looping: bool,
}

impl PlaybackSession for RodioSession {
    fn token(&self) -> SessionToken {
        self.token
    }

    fn prepare(&mut self) -> Result<(), DeviceError> {
        // A full decode pass is not needed; constructing the decoder reads the
        // headers and catches undecodable data before playback is attempted.
        Decoder::new(Cursor::new(self.data.clone()))
            .map_err(|e| DeviceError::PrepareFailed(Box::new(e)))?;
        Ok(())
    }

    fn set_looping(&mut self, looping: bool) {
        self.looping = looping;
    }

    fn start(&mut self) {
        let source = match Decoder::new(Cursor::new(self.data.clone())) {
            Ok(source) => source,
            Err(e) => {
                // prepare() has already validated the data; a failure here
                // means the device lost it mid-flight. Degrade to silence.
                tracing::warn!("Audio decode failed at start: {}", e);
                return;
            }
        };

        if self.looping {
            self.sink.append(source.repeat_infinite());
        } else {
            self.sink.append(source);

            // The callback runs on the audio thread once the sound drains;
            // report it and let the control thread apply the transition.
            let completions = self.completions.clone();
            let token = self.token;
            self.sink.append(EmptyCallback::<f32>::new(Box::new(move || {
                let _ = completions.try_send(Completion { token });
            })));
        }

        self.sink.play();
    }

    fn stop(&mut self) {
        self.sink.stop();
    }

    fn pause(&mut self) {
        self.sink.pause();
    }

    fn resume(&mut self) {
        self.sink.play();
    }
}
