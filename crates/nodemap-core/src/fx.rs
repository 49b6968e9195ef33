//! Visual-FX control channel.
//!
//! The host owns the `speed`/`distortion` targets and mirrors them into an
//! isolated surface with fire-and-forget JSON messages. Delivery is
//! at-most-once: a message sent before the surface is attached is dropped and
//! the next key press carries the fresh values. While the queue is full only
//! the newest message is kept for a later flush. The surface owns the smoothed
//! `current` values.

use crossbeam_channel::{Receiver, Sender, TrySendError};
use serde::{Deserialize, Serialize};

use crate::error::FxMessageError;

pub const SPEED_MIN: f32 = 0.1;
pub const SPEED_MAX: f32 = 4.0;
pub const SPEED_STEP: f32 = 0.15;
pub const DISTORTION_MIN: f32 = -5.0;
pub const DISTORTION_MAX: f32 = 5.0;
pub const DISTORTION_STEP: f32 = 0.5;

/// Fraction of the remaining gap closed per animation frame.
pub const SMOOTHING: f32 = 0.03;

const SURFACE_QUEUE: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FxKey {
    Up,
    Down,
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FxValues {
    pub speed: f32,
    pub distortion: f32,
}

impl Default for FxValues {
    fn default() -> Self {
        Self {
            speed: 1.0,
            distortion: 0.0,
        }
    }
}

impl FxValues {
    /// Applies one arrow key. Returns whether a value actually changed, which
    /// is the only case the key's default action should be suppressed.
    pub fn apply_key(&mut self, key: FxKey) -> bool {
        let before = *self;
        match key {
            FxKey::Up => self.speed = (self.speed + SPEED_STEP).clamp(SPEED_MIN, SPEED_MAX),
            FxKey::Down => self.speed = (self.speed - SPEED_STEP).clamp(SPEED_MIN, SPEED_MAX),
            FxKey::Right => {
                self.distortion = (self.distortion + DISTORTION_STEP).clamp(DISTORTION_MIN, DISTORTION_MAX)
            }
            FxKey::Left => {
                self.distortion = (self.distortion - DISTORTION_STEP).clamp(DISTORTION_MIN, DISTORTION_MAX)
            }
        }
        *self != before
    }

    fn clamped(self) -> Self {
        Self {
            speed: self.speed.clamp(SPEED_MIN, SPEED_MAX),
            distortion: self.distortion.clamp(DISTORTION_MIN, DISTORTION_MAX),
        }
    }
}

/// Wire form: `{"type":"SHADER_CTRL","speed":1.5,"distortion":-0.5}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum FxMessage {
    #[serde(rename = "SHADER_CTRL")]
    ShaderCtrl {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        speed: Option<f32>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        distortion: Option<f32>,
    },
}

impl FxMessage {
    pub fn full(values: FxValues) -> Self {
        FxMessage::ShaderCtrl {
            speed: Some(values.speed),
            distortion: Some(values.distortion),
        }
    }

    pub fn encode(&self) -> String {
        // Only f32/Option fields: serialization cannot fail.
        serde_json::to_string(self).unwrap_or_default()
    }

    pub fn decode(text: &str) -> Result<Self, FxMessageError> {
        let msg: FxMessage = serde_json::from_str(text)?;
        let FxMessage::ShaderCtrl { speed, distortion } = msg;
        if speed.is_some_and(|v| !v.is_finite()) || distortion.is_some_and(|v| !v.is_finite()) {
            return Err(FxMessageError::NonFinite);
        }
        Ok(msg)
    }

    /// Fields left out keep the previous target.
    pub fn apply_to(&self, target: &mut FxValues) {
        let FxMessage::ShaderCtrl { speed, distortion } = *self;
        if let Some(s) = speed {
            target.speed = s;
        }
        if let Some(d) = distortion {
            target.distortion = d;
        }
        *target = target.clamped();
    }
}

/// Host end of the channel. Starts detached; sends go nowhere until the
/// surface attaches. When the queue is full the newest encoded message is
/// held back and [`FxLink::flush`] retries it, so the surface always ends on
/// the latest values.
#[derive(Debug, Default)]
pub struct FxLink {
    tx: Option<Sender<String>>,
    pending: Option<String>,
}

impl FxLink {
    pub fn attach(&mut self, tx: Sender<String>) {
        self.tx = Some(tx);
        self.pending = None;
    }

    pub fn detach(&mut self) {
        self.tx = None;
        self.pending = None;
    }

    pub fn is_attached(&self) -> bool {
        self.tx.is_some()
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Never blocks. Returns whether the message was queued. A newer send
    /// replaces anything still held back.
    pub fn send(&mut self, msg: &FxMessage) -> bool {
        self.pending = None;
        self.offer(msg.encode())
    }

    /// Retries the held-back message, if any. Called once per frame.
    pub fn flush(&mut self) -> bool {
        match self.pending.take() {
            Some(text) => self.offer(text),
            None => false,
        }
    }

    fn offer(&mut self, text: String) -> bool {
        let Some(tx) = &self.tx else {
            tracing::debug!("fx surface not ready, message dropped");
            return false;
        };
        match tx.try_send(text) {
            Ok(()) => true,
            Err(TrySendError::Full(text)) => {
                tracing::debug!("fx surface busy, holding latest message");
                self.pending = Some(text);
                false
            }
            Err(TrySendError::Disconnected(_)) => {
                tracing::debug!("fx surface released, detaching");
                self.detach();
                false
            }
        }
    }
}

/// Surface end: decodes control messages and smooths `current` toward the
/// last received target once per animation frame.
#[derive(Debug)]
pub struct FxSurface {
    rx: Receiver<String>,
    target: FxValues,
    current: FxValues,
    /// Accumulated animation phase, advanced by `current.speed`.
    phase: f32,
}

/// A fresh surface and the sender a host [`FxLink`] attaches to.
pub fn surface() -> (Sender<String>, FxSurface) {
    let (tx, rx) = crossbeam_channel::bounded(SURFACE_QUEUE);
    let surface = FxSurface {
        rx,
        target: FxValues::default(),
        current: FxValues::default(),
        phase: 0.0,
    };
    (tx, surface)
}

impl FxSurface {
    /// Applies every pending message. Malformed ones are ignored.
    pub fn drain(&mut self) -> usize {
        let mut applied = 0;
        for text in self.rx.try_iter() {
            match FxMessage::decode(&text) {
                Ok(msg) => {
                    msg.apply_to(&mut self.target);
                    applied += 1;
                }
                Err(e) => tracing::debug!(error = %e, "ignoring fx message"),
            }
        }
        applied
    }

    /// One animation frame: drain, smooth, advance phase by `dt` seconds.
    pub fn frame(&mut self, dt: f32) {
        self.drain();
        self.current.speed += (self.target.speed - self.current.speed) * SMOOTHING;
        self.current.distortion += (self.target.distortion - self.current.distortion) * SMOOTHING;
        if dt.is_finite() && dt > 0.0 {
            self.phase = (self.phase + dt * self.current.speed) % 10_000.0;
        }
    }

    pub fn target(&self) -> FxValues {
        self.target
    }

    pub fn current(&self) -> FxValues {
        self.current
    }

    pub fn phase(&self) -> f32 {
        self.phase
    }
}
