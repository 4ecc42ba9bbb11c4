//! Sound output. The engine only names events; sinks decide what they sound like.

use crate::board::Sound;
use std::io::{self, Write};
use tracing::{debug, trace};

pub trait AudioSink {
    fn play(&mut self, sound: Sound) -> io::Result<()>;

    fn play_all(&mut self, sounds: impl IntoIterator<Item = Sound>) -> io::Result<()>
    where
        Self: Sized,
    {
        for sound in sounds {
            self.play(sound)?;
        }
        Ok(())
    }
}

/// Discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct Mute;

impl AudioSink for Mute {
    fn play(&mut self, sound: Sound) -> io::Result<()> {
        trace!(?sound, "muted");
        Ok(())
    }
}

/// Rings the terminal bell. Drops ring once, a cleared row twice, game over three times.
#[derive(Debug)]
pub struct TerminalBell<W: Write> {
    out: W,
}

impl<W: Write> TerminalBell<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl TerminalBell<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

pub fn bell_count(sound: Sound) -> usize {
    match sound {
        Sound::Drop => 1,
        Sound::ClearRow => 2,
        Sound::GameOver => 3,
    }
}

impl<W: Write> AudioSink for TerminalBell<W> {
    fn play(&mut self, sound: Sound) -> io::Result<()> {
        debug!(?sound, "bell");
        for _ in 0..bell_count(sound) {
            self.out.write_all(b"\x07")?;
        }
        self.out.flush()
    }
}

/// Either sink, chosen at startup.
#[derive(Debug)]
pub enum Speaker {
    Mute(Mute),
    Bell(TerminalBell<io::Stdout>),
}

impl Speaker {
    pub fn new(bell: bool) -> Self {
        if bell {
            Self::Bell(TerminalBell::stdout())
        } else {
            Self::Mute(Mute)
        }
    }
}

impl AudioSink for Speaker {
    fn play(&mut self, sound: Sound) -> io::Result<()> {
        match self {
            Self::Mute(m) => m.play(sound),
            Self::Bell(b) => b.play(sound),
        }
    }
}
