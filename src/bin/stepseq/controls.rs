//! Keyboard controls and status line
//!
//! Runs on the main thread. Everything here talks to the audio thread only
//! through atomic handles (switches, params, SequencerControl) and the beat
//! queue, so no key press can block the stream.

use std::io::{self, Write};
use std::time::Duration;

use color_eyre::eyre::Result as EyreResult;
use crossterm::{
    cursor::MoveToColumn,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    queue,
    style::Print,
    terminal::{self, Clear, ClearType},
};

use stepseq_dsp::{
    graph::{ModulationKind, NodeSwitch, Param},
    sequencing::{BeatMonitor, SequencerControl},
};

/// Note length range reachable from the keyboard, in samples.
const NOTE_DURATION_MIN: i64 = 2_000;
const NOTE_DURATION_MAX: i64 = 44_100;
const NOTE_DURATION_STEP: i64 = 100;

const RATE_STEP: f64 = 0.1;
const MIX_STEP: f64 = 0.05;
const GAIN_STEP: f64 = 0.05;

/// Control handles for whichever topology is playing.
pub enum Surface {
    Sequencer {
        control: SequencerControl,
        gain: Param,
        beats: BeatMonitor,
    },
    Modulation {
        kind: ModulationKind,
        effect: NodeSwitch,
        rate: Param,
        mix: Param,
        gain: Param,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// Leaves raw mode on drop, including on early returns.
struct RawMode;

impl RawMode {
    fn enable() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        Ok(RawMode)
    }
}

impl Drop for RawMode {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}

/// Handle keys until the user quits.
pub fn run(mut surface: Surface) -> EyreResult<()> {
    print_help(&surface);

    let _raw = RawMode::enable()?;
    let mut stdout = io::stdout();

    loop {
        surface.drain_diagnostics();

        queue!(
            stdout,
            MoveToColumn(0),
            Clear(ClearType::CurrentLine),
            Print(surface.status())
        )?;
        stdout.flush()?;

        if event::poll(Duration::from_millis(30))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && surface.handle_key(key) == Flow::Quit {
                    break;
                }
            }
        }
    }

    queue!(stdout, Print("\r\n"))?;
    stdout.flush()?;
    Ok(())
}

fn print_help(surface: &Surface) {
    match surface {
        Surface::Sequencer { .. } => {
            println!("space      play / stop (restarts from step 0)");
            println!("up/down    tempo +/- 1 BPM (pgup/pgdn: 10)");
            println!("left/right note duration -/+ {} samples", NOTE_DURATION_STEP);
            println!("1-9, 0     mute / unmute voice on steps 1-10");
            println!("r          silence all voices");
        }
        Surface::Modulation { .. } => {
            println!("space      bypass effect");
            println!("up/down    LFO rate +/- {} Hz", RATE_STEP);
            println!("left/right mix -/+ {}", MIX_STEP);
        }
    }
    println!("+/-        output gain");
    println!("q, esc     quit");
    println!();
}

fn nudge(param: &Param, delta: f64) {
    param.set(param.get() + delta);
}

impl Surface {
    fn drain_diagnostics(&mut self) {
        if let Surface::Sequencer { beats, .. } = self {
            beats.drain();
        }
    }

    fn status(&self) -> String {
        match self {
            Surface::Sequencer { control, gain, .. } => format!(
                "{:<8} {:>3} BPM  note {:>5} samples  gain {:.2}",
                if control.is_playing() { "playing" } else { "stopped" },
                control.tempo(),
                control.note_duration(),
                gain.get()
            ),
            Surface::Modulation {
                kind,
                effect,
                rate,
                mix,
                gain,
            } => format!(
                "{:<8} {:<3}  rate {:>5.2} Hz  mix {:.2}  gain {:.2}",
                match kind {
                    ModulationKind::AutoPan => "auto-pan",
                    ModulationKind::Tremolo => "tremolo",
                },
                if effect.is_enabled() { "on" } else { "off" },
                rate.get(),
                mix.get(),
                gain.get()
            ),
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> Flow {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return Flow::Quit,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return Flow::Quit
            }
            _ => {}
        }

        match self {
            Surface::Sequencer { control, gain, .. } => match key.code {
                KeyCode::Char(' ') => {
                    control.toggle_playback();
                }
                KeyCode::Up => {
                    control.set_tempo(control.tempo() + 1);
                }
                KeyCode::Down => {
                    control.set_tempo(control.tempo() - 1);
                }
                KeyCode::PageUp => {
                    control.set_tempo(control.tempo() + 10);
                }
                KeyCode::PageDown => {
                    control.set_tempo(control.tempo() - 10);
                }
                KeyCode::Left | KeyCode::Right => {
                    let delta = if key.code == KeyCode::Left {
                        -NOTE_DURATION_STEP
                    } else {
                        NOTE_DURATION_STEP
                    };
                    let samples = (control.note_duration() + delta)
                        .clamp(NOTE_DURATION_MIN, NOTE_DURATION_MAX);
                    control.set_note_duration(samples);
                }
                KeyCode::Char(c @ '0'..='9') => {
                    // '1' is the first step, '0' the tenth
                    let step = c.to_digit(10).map_or(0, |d| (d as usize + 9) % 10);
                    if let Some(voice) = control.voices().get(step) {
                        voice.set_enabled(!voice.is_enabled());
                        tracing::info!(step, enabled = voice.is_enabled(), "voice toggled");
                    }
                }
                KeyCode::Char('r') => control.reset_voices(),
                KeyCode::Char('+') | KeyCode::Char('=') => nudge(gain, GAIN_STEP),
                KeyCode::Char('-') => nudge(gain, -GAIN_STEP),
                _ => {}
            },
            Surface::Modulation {
                effect,
                rate,
                mix,
                gain,
                ..
            } => match key.code {
                KeyCode::Char(' ') => {
                    effect.toggle();
                }
                KeyCode::Up => nudge(rate, RATE_STEP),
                KeyCode::Down => nudge(rate, -RATE_STEP),
                KeyCode::Right => nudge(mix, MIX_STEP),
                KeyCode::Left => nudge(mix, -MIX_STEP),
                KeyCode::Char('+') | KeyCode::Char('=') => nudge(gain, GAIN_STEP),
                KeyCode::Char('-') => nudge(gain, -GAIN_STEP),
                _ => {}
            },
        }
        Flow::Continue
    }
}
