//! Fire-and-forget sound effects.

use std::io::Write;

use anyhow::Context;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sound {
    /// A projectile was fired.
    Raygun,
    /// An impact effect appeared.
    Explosion,
}

pub trait Audio {
    fn play(&mut self, sound: Sound) -> anyhow::Result<()>;
}

/// Play `sound` and swallow any failure; playback never affects game state.
pub fn play_best_effort(audio: &mut dyn Audio, sound: Sound) {
    if let Err(err) = audio.play(sound) {
        log::debug!("sound {:?} skipped: {:#}", sound, err);
    }
}

/// No output at all.
#[derive(Clone, Copy, Debug, Default)]
pub struct Silent;

impl Audio for Silent {
    fn play(&mut self, _sound: Sound) -> anyhow::Result<()> {
        Ok(())
    }
}

/// Rings the terminal bell on explosions.  Raygun shots are far too frequent
/// for a bell and stay quiet.
#[derive(Clone, Copy, Debug, Default)]
pub struct TerminalBell;

impl Audio for TerminalBell {
    fn play(&mut self, sound: Sound) -> anyhow::Result<()> {
        if sound != Sound::Explosion {
            return Ok(());
        }
        let mut err = std::io::stderr();
        err.write_all(b"\x07").context("ringing terminal bell")?;
        err.flush().context("ringing terminal bell")?;
        Ok(())
    }
}
