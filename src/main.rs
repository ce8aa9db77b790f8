use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute, queue,
    style::Print,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
    time::{Duration, Instant},
};
use wavetrack::{
    animation::{EnableTransition, PhaseDriver},
    color::Color,
    geometry::{LayoutDirection, Rect},
    player::{PlaybackScript, Transport},
    surface::{raster::RasterSurface, term::TerminalCanvas},
    theme::Theme,
    track::{shape_for, TrackContext, TrackStyle, WaveParameters},
};

const BACKGROUND: Color = Color::new(16, 18, 24);
const HORIZONTAL_MARGIN: f32 = 12.0;

#[derive(Parser)]
#[command(version, about = "Animated waveform progress track demo player")]
struct Cli {
    /// Theme name or path to a theme file
    #[arg(long, default_value = "default")]
    theme: String,

    /// Track shape
    #[arg(long, default_value_t)]
    style: TrackStyle,

    /// Layout direction
    #[arg(long, default_value_t)]
    direction: LayoutDirection,

    /// Surface width in pixels (one pixel per terminal column)
    #[arg(long, default_value_t = 320)]
    width: u32,

    /// Surface height in pixels (two pixels per terminal row)
    #[arg(long, default_value_t = 32)]
    height: u32,

    /// Frames per second
    #[arg(long, default_value_t = 30)]
    fps: u32,

    /// Track duration in seconds when no script is given
    #[arg(long, default_value_t = 180.0)]
    duration: f64,

    /// Playback speed multiplier
    #[arg(long, default_value_t = 1.0)]
    speed: f64,

    /// Playback script file driving seek/pause/buffer events
    #[arg(long)]
    script: Option<PathBuf>,

    /// Restart playback when the track ends
    #[arg(long)]
    loop_playback: bool,

    /// Write numbered PNG frames to this directory instead of presenting
    #[arg(long)]
    export: Option<PathBuf>,

    /// Number of frames to export
    #[arg(long, default_value_t = 120)]
    frames: u32,
}

struct App {
    theme: Theme,
    transport: Transport,
    phase: PhaseDriver,
    transition: EnableTransition,
    style: TrackStyle,
    direction: LayoutDirection,
}

impl App {
    fn new(cli: &Cli) -> Result<Self> {
        let theme = if cli.theme == "default" {
            Theme::default_theme().clone()
        } else {
            Theme::load(&cli.theme).with_context(|| format!("failed to load theme '{}'", cli.theme))?
        };
        let transport = match &cli.script {
            Some(path) => {
                let script = PlaybackScript::load(path)
                    .with_context(|| format!("failed to load script '{}'", path.display()))?;
                Transport::from_script(script, cli.speed, cli.loop_playback)
            }
            None => Transport::free_running(cli.duration, cli.speed, cli.loop_playback),
        };
        Ok(Self {
            phase: PhaseDriver::new(theme.wave.cycle()),
            transition: EnableTransition::new(Duration::from_millis(300), true),
            theme,
            transport,
            style: cli.style,
            direction: cli.direction,
        })
    }

    fn render_frame(&mut self, now: Instant, surface: &mut RasterSurface) {
        self.transport.advance_to(now);
        surface.clear(BACKGROUND);

        let thickness = self.theme.track.thickness;
        let bounds = Rect::new(
            HORIZONTAL_MARGIN,
            surface.height() as f32 / 2.0 - thickness / 2.0,
            surface.width() as f32 - 2.0 * HORIZONTAL_MARGIN,
            thickness,
        );
        let geometry = self.transport.geometry(bounds, self.direction);
        // the wave settles flat while playback is paused
        let wave = if self.transport.is_paused() {
            WaveParameters::flat()
        } else {
            self.theme.wave.parameters(self.phase.phase_factor_at(now))
        };
        let ctx = TrackContext {
            geometry: &geometry,
            palette: &self.theme.colors,
            direction: self.direction,
            enabled: self.transition.is_enabled(),
            enable_blend: self.transition.blend_at(now),
            wave,
            active_extra_thickness: self.theme.track.active_extra_thickness,
        };
        shape_for(self.style).render(&ctx, surface);
    }

    fn status_line(&self) -> String {
        let state = if self.transport.is_completed() {
            "done"
        } else if self.transport.is_paused() {
            "paused"
        } else {
            "playing"
        };
        format!(
            "{} / {}  [{state}]  space pause · e enable · d direction · arrows seek · q quit",
            format_timestamp(self.transport.position()),
            format_timestamp(self.transport.duration()),
        )
    }
}

fn format_timestamp(seconds: f64) -> String {
    let total = seconds.max(0.0) as u64;
    format!("{}:{:02}", total / 60, total % 60)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let app = App::new(&cli)?;
    match &cli.export {
        Some(dir) => export_frames(app, &cli, dir),
        None => run_terminal(app, &cli),
    }
}

/// Restores the terminal even when the run loop errors out.
struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> Result<Self> {
        terminal::enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen, Hide)?;
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = execute!(io::stdout(), LeaveAlternateScreen, Show);
        let _ = terminal::disable_raw_mode();
    }
}

fn run_terminal(mut app: App, cli: &Cli) -> Result<()> {
    let _guard = TerminalGuard::enter()?;
    let mut stdout = io::stdout();

    let frame_interval = Duration::from_secs(1) / cli.fps.max(1);
    let canvas = TerminalCanvas::new(0, 0);
    let status_row = TerminalCanvas::rows_for(cli.height) + 1;
    let mut surface = RasterSurface::new(cli.width, cli.height, BACKGROUND);

    loop {
        let frame_start = Instant::now();
        app.render_frame(frame_start, &mut surface);
        canvas.present(&surface, &mut stdout)?;
        let status = app.status_line();
        queue!(
            stdout,
            MoveTo(0, status_row),
            Print(format!("{status:<width$}", width = cli.width as usize))
        )?;
        stdout.flush()?;

        let deadline = frame_start + frame_interval;
        loop {
            let timeout = deadline.saturating_duration_since(Instant::now());
            if timeout.is_zero() {
                break;
            }
            if !event::poll(timeout)? {
                break;
            }
            let Event::Key(key) = event::read()? else {
                continue;
            };
            if key.kind != KeyEventKind::Press {
                continue;
            }
            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => return Ok(()),
                KeyCode::Char(' ') => app.transport.toggle_pause(),
                KeyCode::Char('e') => {
                    let enabled = app.transition.is_enabled();
                    app.transition.set_enabled(!enabled, Instant::now());
                }
                KeyCode::Char('d') => app.direction = app.direction.flipped(),
                KeyCode::Left => app.transport.seek_by(-5.0),
                KeyCode::Right => app.transport.seek_by(5.0),
                _ => {}
            }
        }
    }
}

fn export_frames(mut app: App, cli: &Cli, dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).with_context(|| format!("failed to create {}", dir.display()))?;
    let frame_interval = Duration::from_secs(1) / cli.fps.max(1);
    let start = Instant::now();
    let mut surface = RasterSurface::new(cli.width, cli.height, BACKGROUND);

    for index in 0..cli.frames {
        let now = start + frame_interval * index;
        app.render_frame(now, &mut surface);
        let path = dir.join(format!("frame-{index:04}.png"));
        surface.save_png(&path).with_context(|| format!("failed to write {}", path.display()))?;
    }
    eprintln!("[wavetrack] wrote {} frame(s) to {}", cli.frames, dir.display());
    Ok(())
}
