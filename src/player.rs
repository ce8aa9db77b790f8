use crate::geometry::{LayoutDirection, Rect, TrackGeometry};
use serde::Deserialize;
use std::{fs, path::Path, time::Instant};

/// A single event in a playback script.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScriptEvent {
    /// Jump to an absolute position in seconds.
    Seek(f64),
    Pause,
    Resume,
    /// Report the buffered-ahead position in seconds.
    Buffer(f64),
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct TimedEvent {
    /// Timestamp in seconds on the session clock.
    time: f64,
    event: ScriptEvent,
}

/// Playback script header
#[derive(Debug, Deserialize)]
struct ScriptHeader {
    version: u32,
    /// Track duration in seconds
    duration: f64,
}

/// A parsed playback script: a JSON header line followed by one
/// `[time, kind, value]` event per line.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackScript {
    duration: f64,
    events: Vec<TimedEvent>,
}

/// Errors that can occur when parsing playback scripts
#[derive(thiserror::Error, Debug)]
pub enum ScriptError {
    #[error("failed to parse script: {0}")]
    Parse(String),

    #[error("invalid script format: {0}")]
    InvalidFormat(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl PlaybackScript {
    pub fn parse(content: &str) -> Result<Self, ScriptError> {
        let mut lines = content.lines();

        let header_line =
            lines.next().ok_or_else(|| ScriptError::InvalidFormat("empty script".to_string()))?;
        let header: ScriptHeader = serde_json::from_str(header_line)
            .map_err(|e| ScriptError::Parse(format!("invalid header: {e}")))?;

        if header.version != 1 {
            return Err(ScriptError::InvalidFormat(format!(
                "unsupported script version: {}",
                header.version
            )));
        }
        if !header.duration.is_finite() || header.duration <= 0.0 {
            return Err(ScriptError::InvalidFormat(format!("invalid duration: {}", header.duration)));
        }

        let mut events = Vec::new();
        for (idx, line) in lines.enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let line_number = idx + 2;
            let (time, kind, value): (f64, String, f64) = serde_json::from_str(line)
                .map_err(|e| ScriptError::Parse(format!("line {line_number}: {e}")))?;
            if !time.is_finite() || time < 0.0 {
                return Err(ScriptError::InvalidFormat(format!("line {line_number}: invalid time {time}")));
            }
            let event = match kind.as_str() {
                "seek" => ScriptEvent::Seek(value),
                "pause" => ScriptEvent::Pause,
                "resume" => ScriptEvent::Resume,
                "buffer" => ScriptEvent::Buffer(value),
                other => {
                    return Err(ScriptError::InvalidFormat(format!(
                        "line {line_number}: unknown event kind '{other}'"
                    )))
                }
            };
            events.push(TimedEvent { time, event });
        }
        events.sort_by(|a, b| a.time.total_cmp(&b.time));

        Ok(Self { duration: header.duration, events })
    }

    pub fn load(path: &Path) -> Result<Self, ScriptError> {
        Self::parse(&fs::read_to_string(path)?)
    }

    /// Track duration in seconds.
    pub fn duration(&self) -> f64 {
        self.duration
    }
}

/// A simulated playback transport: a session clock mapped to playback
/// position and buffered-ahead state.
///
/// The transport is polled with a wall-clock instant once per frame; script
/// events fire when the (speed-scaled) session clock passes their timestamp.
/// It performs no audio I/O.
#[derive(Debug)]
pub struct Transport {
    script: Option<PlaybackScript>,
    duration: f64,
    speed: f64,
    loop_playback: bool,
    start_time: Option<Instant>,
    next_event: usize,
    last_clock: f64,
    position: f64,
    buffered: f64,
    paused: bool,
    completed: bool,
}

impl Transport {
    pub fn from_script(script: PlaybackScript, speed: f64, loop_playback: bool) -> Self {
        let duration = script.duration();
        Self::new(Some(script), duration, speed, loop_playback)
    }

    /// A transport without a script: plain playback over `duration`, with a
    /// simulated streaming buffer running ahead of the position.
    pub fn free_running(duration: f64, speed: f64, loop_playback: bool) -> Self {
        Self::new(None, duration, speed, loop_playback)
    }

    fn new(script: Option<PlaybackScript>, duration: f64, speed: f64, loop_playback: bool) -> Self {
        Self {
            script,
            duration: duration.max(0.1),
            // minimum speed to avoid a frozen clock
            speed: speed.max(0.1),
            loop_playback,
            start_time: None,
            next_event: 0,
            last_clock: 0.0,
            position: 0.0,
            buffered: 0.0,
            paused: false,
            completed: false,
        }
    }

    pub fn position(&self) -> f64 {
        self.position
    }

    pub fn buffered(&self) -> f64 {
        self.buffered
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// Advance the session clock to `now`, applying any script events whose
    /// time has passed, in order.
    pub fn advance_to(&mut self, now: Instant) {
        let start = *self.start_time.get_or_insert(now);
        let clock = now.duration_since(start).as_secs_f64() * self.speed;

        while let Some(timed) = self.pending_event() {
            if timed.time > clock {
                break;
            }
            self.play_until(timed.time);
            self.apply(timed.event);
            self.next_event += 1;
        }
        self.play_until(clock);

        if self.script.is_none() && !self.completed {
            // simulated streaming: the buffer runs ahead with some jitter
            let lead = 8.0 + fastrand::f64() * 4.0;
            self.buffered = self.buffered.max((self.position + lead).min(self.duration));
        }

        if self.position >= self.duration {
            if self.loop_playback {
                self.restart(now);
            } else if !self.completed {
                self.position = self.duration;
                self.completed = true;
            }
        }
    }

    /// Pause or resume playback, independently of script events.
    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }

    pub fn seek_by(&mut self, delta: f64) {
        self.seek_to(self.position + delta);
    }

    pub fn seek_to(&mut self, position: f64) {
        self.position = position.clamp(0.0, self.duration);
        self.completed = false;
    }

    /// Map the current position and buffered state onto track geometry.
    ///
    /// The secondary position is present only while the buffer actually runs
    /// ahead of the playback position.
    pub fn geometry(&self, bounds: Rect, direction: LayoutDirection) -> TrackGeometry {
        let fraction = |value: f64| (value / self.duration).clamp(0.0, 1.0) as f32;
        let x_at = |fraction: f32| match direction {
            LayoutDirection::LeftToRight => bounds.left() + bounds.width * fraction,
            LayoutDirection::RightToLeft => bounds.right() - bounds.width * fraction,
        };
        let geometry = TrackGeometry::new(bounds, x_at(fraction(self.position)));
        if self.buffered > self.position {
            geometry.with_secondary(x_at(fraction(self.buffered)))
        } else {
            geometry
        }
    }

    fn pending_event(&self) -> Option<TimedEvent> {
        self.script.as_ref().and_then(|script| script.events.get(self.next_event)).copied()
    }

    fn apply(&mut self, event: ScriptEvent) {
        match event {
            ScriptEvent::Seek(position) => self.seek_to(position),
            ScriptEvent::Pause => self.paused = true,
            ScriptEvent::Resume => self.paused = false,
            ScriptEvent::Buffer(buffered) => {
                self.buffered = self.buffered.max(buffered.clamp(0.0, self.duration));
            }
        }
    }

    /// Move the playback position forward to session-clock time `clock`.
    fn play_until(&mut self, clock: f64) {
        let elapsed = (clock - self.last_clock).max(0.0);
        self.last_clock = clock;
        if !self.paused && !self.completed {
            self.position = (self.position + elapsed).min(self.duration);
        }
    }

    fn restart(&mut self, now: Instant) {
        self.start_time = Some(now);
        self.next_event = 0;
        self.last_clock = 0.0;
        self.position = 0.0;
        self.buffered = 0.0;
        self.completed = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn secs(value: u64) -> Duration {
        Duration::from_secs(value)
    }

    #[test]
    fn parse_simple_script() {
        let content = r#"{"version": 1, "duration": 180.0}
[5.0, "seek", 30.0]
[10.0, "pause", 0]
"#;
        let script = PlaybackScript::parse(content).expect("failed to parse");
        assert_eq!(script.duration(), 180.0);
        assert_eq!(script.events.len(), 2);
        assert_eq!(script.events[0].event, ScriptEvent::Seek(30.0));
        assert_eq!(script.events[1].event, ScriptEvent::Pause);
    }

    #[test]
    fn parse_sorts_out_of_order_events() {
        let content = r#"{"version": 1, "duration": 60}
[20.0, "pause", 0]
[10.0, "resume", 0]
"#;
        let script = PlaybackScript::parse(content).expect("failed to parse");
        assert_eq!(script.events[0].time, 10.0);
        assert_eq!(script.events[1].time, 20.0);
    }

    #[test]
    fn parse_rejects_bad_input() {
        assert!(matches!(PlaybackScript::parse(""), Err(ScriptError::InvalidFormat(_))));
        assert!(matches!(
            PlaybackScript::parse("{\"version\": 2, \"duration\": 60}"),
            Err(ScriptError::InvalidFormat(_))
        ));
        assert!(matches!(
            PlaybackScript::parse("{\"version\": 1, \"duration\": 0}"),
            Err(ScriptError::InvalidFormat(_))
        ));
        let unknown_kind = "{\"version\": 1, \"duration\": 60}\n[1.0, \"warp\", 0]";
        assert!(matches!(PlaybackScript::parse(unknown_kind), Err(ScriptError::InvalidFormat(_))));
        let garbage = "{\"version\": 1, \"duration\": 60}\nnot-json";
        assert!(matches!(PlaybackScript::parse(garbage), Err(ScriptError::Parse(_))));
    }

    #[test]
    fn position_follows_the_clock() {
        let mut transport = Transport::free_running(100.0, 1.0, false);
        let start = Instant::now();
        transport.advance_to(start);
        assert_eq!(transport.position(), 0.0);
        transport.advance_to(start + secs(10));
        assert_eq!(transport.position(), 10.0);
        assert!(!transport.is_completed());
    }

    #[test]
    fn speed_scales_the_clock() {
        let mut transport = Transport::free_running(100.0, 2.0, false);
        let start = Instant::now();
        transport.advance_to(start);
        transport.advance_to(start + secs(10));
        assert_eq!(transport.position(), 20.0);
    }

    #[test]
    fn seek_event_applies_at_its_timestamp() {
        let script = PlaybackScript::parse("{\"version\": 1, \"duration\": 100}\n[5.0, \"seek\", 50.0]")
            .expect("failed to parse");
        let mut transport = Transport::from_script(script, 1.0, false);
        let start = Instant::now();
        transport.advance_to(start);
        transport.advance_to(start + secs(10));
        // 5s of play, a jump to 50, then 5 more seconds
        assert_eq!(transport.position(), 55.0);
    }

    #[test]
    fn pause_and_resume_events_gate_progress() {
        let content = "{\"version\": 1, \"duration\": 100}\n[2.0, \"pause\", 0]\n[6.0, \"resume\", 0]";
        let script = PlaybackScript::parse(content).expect("failed to parse");
        let mut transport = Transport::from_script(script, 1.0, false);
        let start = Instant::now();
        transport.advance_to(start);
        transport.advance_to(start + secs(4));
        assert_eq!(transport.position(), 2.0);
        assert!(transport.is_paused());
        transport.advance_to(start + secs(10));
        // paused from 2s to 6s on the session clock
        assert_eq!(transport.position(), 6.0);
        assert!(!transport.is_paused());
    }

    #[test]
    fn buffer_events_feed_the_secondary_position() {
        let content = "{\"version\": 1, \"duration\": 100}\n[0.0, \"buffer\", 50.0]";
        let script = PlaybackScript::parse(content).expect("failed to parse");
        let mut transport = Transport::from_script(script, 1.0, false);
        let start = Instant::now();
        transport.advance_to(start);
        transport.advance_to(start + secs(25));
        assert_eq!(transport.buffered(), 50.0);

        let bounds = Rect::new(0.0, 0.0, 200.0, 4.0);
        let geometry = transport.geometry(bounds, LayoutDirection::LeftToRight);
        assert_eq!(geometry.thumb, 50.0);
        assert_eq!(geometry.secondary, Some(100.0));

        let mirrored = transport.geometry(bounds, LayoutDirection::RightToLeft);
        assert_eq!(mirrored.thumb, 150.0);
        assert_eq!(mirrored.secondary, Some(100.0));
    }

    #[test]
    fn no_secondary_once_position_catches_up() {
        let content = "{\"version\": 1, \"duration\": 100}\n[0.0, \"buffer\", 5.0]";
        let script = PlaybackScript::parse(content).expect("failed to parse");
        let mut transport = Transport::from_script(script, 1.0, false);
        let start = Instant::now();
        transport.advance_to(start);
        transport.advance_to(start + secs(10));
        let geometry = transport.geometry(Rect::new(0.0, 0.0, 200.0, 4.0), LayoutDirection::LeftToRight);
        assert_eq!(geometry.secondary, None);
    }

    #[test]
    fn completion_freezes_at_the_end() {
        let mut transport = Transport::free_running(10.0, 1.0, false);
        let start = Instant::now();
        transport.advance_to(start);
        transport.advance_to(start + secs(60));
        assert_eq!(transport.position(), 10.0);
        assert!(transport.is_completed());
        // seeking back un-freezes
        transport.seek_to(5.0);
        assert!(!transport.is_completed());
    }

    #[test]
    fn looping_restarts_the_session() {
        let mut transport = Transport::free_running(10.0, 1.0, true);
        let start = Instant::now();
        transport.advance_to(start);
        transport.advance_to(start + secs(12));
        assert_eq!(transport.position(), 0.0);
        assert!(!transport.is_completed());
        transport.advance_to(start + secs(15));
        assert_eq!(transport.position(), 3.0);
    }

    #[test]
    fn interactive_pause_and_seek() {
        let mut transport = Transport::free_running(100.0, 1.0, false);
        let start = Instant::now();
        transport.advance_to(start);
        transport.toggle_pause();
        transport.advance_to(start + secs(5));
        assert_eq!(transport.position(), 0.0);
        transport.toggle_pause();
        transport.seek_by(30.0);
        transport.advance_to(start + secs(7));
        assert_eq!(transport.position(), 32.0);
    }
}
