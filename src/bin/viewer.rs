use iced::canvas::event::Status;
use iced::canvas::{Cursor, Event, Frame, Geometry, Program};
use iced::keyboard::{self, KeyCode};
use iced::{
    executor, time, window, Application, Canvas, Color, Column, Command, Element, Length, Point,
    Rectangle, Row, Settings, Size, Subscription, Text,
};
use structopt::StructOpt;

use ising_live::config::{
    frame_period, SimulationArgs, SimulationConfig, CRITICAL_TEMPERATURE, MAX_FPS,
};
use ising_live::metropolis::SweepStats;
use ising_live::observables::{energy_per_spin, magnetization};
use ising_live::render::{row_runs, status_line, window_side, Palette, Rgb8};
use ising_live::{ControlKey, Controls, Lattice, Simulation, Spin};

const PANEL_WIDTH: u16 = 260;

#[derive(Debug, StructOpt)]
#[structopt(name = "Ising viewer", about = "Live Metropolis simulation of the 2D Ising model")]
struct Args {
    #[structopt(flatten)]
    simulation: SimulationArgs,
    /// pixels per lattice site
    #[structopt(long, default_value = "4")]
    scale: u32,
    /// target frames, and so sweeps, per second, at most 1000
    #[structopt(long, default_value = "60")]
    fps: u64,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = Args::from_args();
    let config = args.simulation.to_config()?;
    log::info!("{:?}", config);

    let side = window_side(config.size, args.scale);
    ViewerApp::run(Settings {
        window: window::Settings {
            size: (side.saturating_add(PANEL_WIDTH as u32), side),
            resizable: false,
            ..window::Settings::default()
        },
        antialiasing: false,
        ..Settings::with_flags(ViewerFlags {
            config,
            fps: args.fps.clamp(1, MAX_FPS),
        })
    })?;

    Ok(())
}

pub struct ViewerFlags {
    config: SimulationConfig,
    fps: u64,
}

#[derive(Debug, Clone)]
pub enum AppMessage {
    Tick,
    Control(ControlKey, bool),
}

pub struct ViewerApp {
    simulation: Simulation,
    controls: Controls,
    last_sweep: SweepStats,
    palette: Palette,
    fps: u64,
}

impl Application for ViewerApp {
    type Executor = executor::Default;
    type Message = AppMessage;
    type Flags = ViewerFlags;

    fn new(flags: Self::Flags) -> (Self, Command<Self::Message>) {
        let app = Self {
            simulation: Simulation::from_config(&flags.config),
            controls: Controls::default(),
            last_sweep: SweepStats::default(),
            palette: Palette::default(),
            fps: flags.fps,
        };
        (app, Command::none())
    }

    fn title(&self) -> String {
        status_line(self.simulation.parameters())
    }

    fn update(&mut self, message: Self::Message) -> Command<Self::Message> {
        match message {
            AppMessage::Tick => {
                self.last_sweep = self.simulation.advance(&self.controls);
            }
            AppMessage::Control(key, active) => {
                log::debug!("{:?} {}", key, if active { "held" } else { "released" });
                self.controls.set(key, active);
            }
        }
        Command::none()
    }

    fn subscription(&self) -> Subscription<Self::Message> {
        time::every(frame_period(self.fps)).map(|_| AppMessage::Tick)
    }

    fn view(&mut self) -> Element<Self::Message> {
        let parameters = self.simulation.parameters();
        let lattice = self.simulation.lattice();

        let stats = vec![
            Text::new(format!("Temperature: {:.2}", parameters.temperature)).into(),
            Text::new(format!("Field: {:.2}", parameters.field)).into(),
            Text::new(format!("Magnetization: {:+.3}", magnetization(lattice))).into(),
            Text::new(format!(
                "Energy / spin: {:.3}",
                energy_per_spin(lattice, parameters.field)
            ))
            .into(),
            Text::new(format!("Acceptance: {:.3}", self.last_sweep.acceptance_rate())).into(),
            Text::new(format!("Tc ≈ {:.3}", CRITICAL_TEMPERATURE)).size(16).into(),
            Text::new("Up / Down: temperature\nLeft / Right: field\nSpace: zero field")
                .size(16)
                .into(),
        ];

        Row::with_children(vec![
            Column::with_children(vec![LatticeView::new(lattice, self.palette).view()])
                .width(Length::Fill)
                .height(Length::Fill)
                .into(),
            Column::with_children(stats)
                .spacing(8)
                .padding(12)
                .width(Length::Units(PANEL_WIDTH))
                .height(Length::Fill)
                .into(),
        ])
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
    }
}

fn control_key(key_code: KeyCode) -> Option<ControlKey> {
    match key_code {
        KeyCode::Up => Some(ControlKey::RaiseTemperature),
        KeyCode::Down => Some(ControlKey::LowerTemperature),
        KeyCode::Right => Some(ControlKey::RaiseField),
        KeyCode::Left => Some(ControlKey::LowerField),
        KeyCode::Space => Some(ControlKey::ResetField),
        _ => None,
    }
}

fn to_color([r, g, b]: Rgb8) -> Color {
    Color::from_rgb8(r, g, b)
}

pub struct LatticeView<'a> {
    lattice: &'a Lattice,
    palette: Palette,
}

impl<'a> LatticeView<'a> {
    pub fn new(lattice: &'a Lattice, palette: Palette) -> Self {
        Self { lattice, palette }
    }

    pub fn view(self) -> Element<'a, AppMessage> {
        Canvas::new(self)
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }
}

impl<'a> Program<AppMessage> for LatticeView<'a> {
    fn update(&mut self, event: Event, _bounds: Rectangle, _cursor: Cursor) -> (Status, Option<AppMessage>) {
        let (key_code, active) = match event {
            Event::Keyboard(keyboard::Event::KeyPressed { key_code, .. }) => (key_code, true),
            Event::Keyboard(keyboard::Event::KeyReleased { key_code, .. }) => (key_code, false),
            _ => return (Status::Ignored, None),
        };

        match control_key(key_code) {
            Some(key) => (Status::Captured, Some(AppMessage::Control(key, active))),
            None => (Status::Ignored, None),
        }
    }

    fn draw(&self, bounds: Rectangle, _cursor: Cursor) -> Vec<Geometry> {
        let mut frame = Frame::new(bounds.size());

        let size = self.lattice.size();
        let cell = (bounds.width / size as f32).min(bounds.height / size as f32);
        let up = to_color(self.palette.color(Spin::Up));
        let down = to_color(self.palette.color(Spin::Down));

        for row in 0..size {
            for run in row_runs(self.lattice, row) {
                let color = match run.spin {
                    Spin::Up => up,
                    Spin::Down => down,
                };
                frame.fill_rectangle(
                    Point::new(run.start as f32 * cell, row as f32 * cell),
                    Size::new(run.len as f32 * cell, cell),
                    color,
                );
            }
        }

        vec![frame.into_geometry()]
    }
}
