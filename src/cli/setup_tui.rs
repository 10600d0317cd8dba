use anyhow::Result;
use crossterm::event::{KeyCode, KeyEventKind};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};
use rusqlite::Connection;

use crate::config::AppConfig;
use crate::db::repository::{MetaRepo, KEY_SETUP_DONE};
use crate::models::ActivityLevel;
use crate::tui::events::{Event, EventHandler};
use crate::tui::theme;

// ─── Wizard steps ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
enum Step {
    Welcome,
    City,
    Country,
    Latitude,
    Longitude,
    Activity,
    ApiKey,
    Confirm,
}

// ─── Wizard state ─────────────────────────────────────────────────────────────

struct SetupWizard {
    step: Step,
    input: String,
    error: Option<String>,

    city: String,
    country: String,
    latitude: Option<f64>,
    longitude: Option<f64>,
    activity_idx: usize,
    api_key: String,

    should_quit: bool,
    confirmed: bool,
}

impl SetupWizard {
    fn new(existing: &AppConfig) -> Self {
        let activity_idx = ActivityLevel::all()
            .iter()
            .position(|a| *a == existing.hydration.activity)
            .unwrap_or(1);

        Self {
            step: Step::Welcome,
            input: String::new(),
            error: None,

            city: existing.location.city.clone(),
            country: existing.location.country.clone(),
            latitude: existing.location.latitude,
            longitude: existing.location.longitude,
            activity_idx,
            api_key: existing.weather.api_key.clone(),

            should_quit: false,
            confirmed: false,
        }
    }

    fn step_number(&self) -> usize {
        match self.step {
            Step::Welcome => 0,
            Step::City => 1,
            Step::Country => 2,
            Step::Latitude => 3,
            Step::Longitude => 4,
            Step::Activity => 5,
            Step::ApiKey => 6,
            Step::Confirm => 7,
        }
    }

    const TOTAL_STEPS: usize = 7;

    fn advance(&mut self) {
        self.error = None;
        self.step = match self.step {
            Step::Welcome => Step::City,
            Step::City => Step::Country,
            Step::Country => Step::Latitude,
            Step::Latitude => Step::Longitude,
            Step::Longitude => Step::Activity,
            Step::Activity => Step::ApiKey,
            Step::ApiKey => Step::Confirm,
            Step::Confirm => {
                self.confirmed = true;
                Step::Confirm
            }
        };
        self.input = self.current_value();
    }

    fn go_back(&mut self) {
        self.error = None;
        self.step = match self.step {
            Step::Welcome => {
                self.should_quit = true;
                Step::Welcome
            }
            Step::City => Step::Welcome,
            Step::Country => Step::City,
            Step::Latitude => Step::Country,
            Step::Longitude => Step::Latitude,
            Step::Activity => Step::Longitude,
            Step::ApiKey => Step::Activity,
            Step::Confirm => Step::ApiKey,
        };
        self.input = self.current_value();
    }

    /// Pre-fills the input box when entering a text step.
    fn current_value(&self) -> String {
        match self.step {
            Step::City => self.city.clone(),
            Step::Country => self.country.clone(),
            Step::Latitude => self.latitude.map(|v| v.to_string()).unwrap_or_default(),
            Step::Longitude => self.longitude.map(|v| v.to_string()).unwrap_or_default(),
            Step::ApiKey => self.api_key.clone(),
            _ => String::new(),
        }
    }

    fn handle_key(&mut self, key: crossterm::event::KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        match &self.step {
            Step::Welcome => {
                if key.code == KeyCode::Esc {
                    self.should_quit = true;
                } else {
                    self.advance();
                }
            }

            Step::City | Step::Country => self.handle_text_input(key, |s| {
                if s.trim().is_empty() {
                    Err("This field cannot be empty".to_string())
                } else {
                    Ok(())
                }
            }),

            Step::Latitude => self.handle_text_input(key, |s| validate_coordinate(s, 90.0)),

            Step::Longitude => self.handle_text_input(key, |s| validate_coordinate(s, 180.0)),

            Step::Activity => match key.code {
                KeyCode::Left | KeyCode::Char('h') => {
                    self.activity_idx = self.activity_idx.saturating_sub(1);
                }
                KeyCode::Right | KeyCode::Char('l') => {
                    if self.activity_idx + 1 < ActivityLevel::all().len() {
                        self.activity_idx += 1;
                    }
                }
                KeyCode::Char('1') => self.activity_idx = 0,
                KeyCode::Char('2') => self.activity_idx = 1,
                KeyCode::Char('3') => self.activity_idx = 2,
                KeyCode::Enter => self.advance(),
                KeyCode::Esc => self.go_back(),
                _ => {}
            },

            Step::ApiKey => self.handle_text_input(key, |_| Ok(())),

            Step::Confirm => match key.code {
                KeyCode::Enter | KeyCode::Char('y') => {
                    self.confirmed = true;
                }
                KeyCode::Esc | KeyCode::Char('n') => self.go_back(),
                _ => {}
            },
        }
    }

    fn handle_text_input<F>(&mut self, key: crossterm::event::KeyEvent, validate: F)
    where
        F: Fn(&str) -> std::result::Result<(), String>,
    {
        match key.code {
            KeyCode::Esc => self.go_back(),
            KeyCode::Enter => {
                let val = self.input.trim().to_string();
                match validate(&val) {
                    Ok(()) => {
                        self.commit_text_input(&val);
                        self.advance();
                    }
                    Err(e) => {
                        self.error = Some(e);
                    }
                }
            }
            KeyCode::Backspace => {
                self.input.pop();
                self.error = None;
            }
            KeyCode::Tab => {
                self.input.clear();
                self.error = None;
            }
            KeyCode::Char(c) => {
                self.input.push(c);
                self.error = None;
            }
            _ => {}
        }
    }

    fn commit_text_input(&mut self, val: &str) {
        match self.step {
            Step::City => self.city = val.to_string(),
            Step::Country => self.country = val.to_string(),
            Step::Latitude => self.latitude = val.parse().ok(),
            Step::Longitude => self.longitude = val.parse().ok(),
            Step::ApiKey => self.api_key = val.to_string(),
            _ => {}
        }
    }

    fn activity(&self) -> ActivityLevel {
        ActivityLevel::all()
            .get(self.activity_idx)
            .copied()
            .unwrap_or_default()
    }

    fn build_config(&self, existing: &AppConfig) -> AppConfig {
        let mut config = existing.clone();
        config.location.city = self.city.clone();
        config.location.country = self.country.clone();
        config.location.latitude = self.latitude;
        config.location.longitude = self.longitude;
        config.hydration.activity = self.activity();
        config.weather.api_key = self.api_key.clone();
        config
    }
}

/// Blank is accepted and means "no coordinates".
fn validate_coordinate(s: &str, limit: f64) -> std::result::Result<(), String> {
    if s.is_empty() {
        return Ok(());
    }
    let v: f64 = s
        .parse()
        .map_err(|_| "Enter a decimal number, e.g. 6.5244".to_string())?;
    if v < -limit || v > limit {
        Err(format!("Value must be between -{} and {}", limit, limit))
    } else {
        Ok(())
    }
}

// ─── Rendering ────────────────────────────────────────────────────────────────

fn draw(frame: &mut Frame, wizard: &SetupWizard) {
    let area = frame.area();

    frame.render_widget(Block::default().style(theme::base()), area);

    let vchunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(24),
            Constraint::Min(0),
        ])
        .split(area);

    let hchunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(64),
            Constraint::Min(0),
        ])
        .split(vchunks[1]);

    let box_area = hchunks[1];
    frame.render_widget(Clear, box_area);

    let outer_block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::water())
        .style(theme::surface())
        .title(Span::styled(
            "  💧 hydroflow  ·  Setup  ",
            theme::water().add_modifier(Modifier::BOLD),
        ))
        .title_alignment(Alignment::Center);

    frame.render_widget(outer_block, box_area);

    let inner = Rect {
        x: box_area.x + 2,
        y: box_area.y + 1,
        width: box_area.width.saturating_sub(4),
        height: box_area.height.saturating_sub(2),
    };

    match wizard.step {
        Step::Welcome => draw_welcome(frame, inner),
        Step::Activity => draw_activity(frame, inner, wizard.activity_idx),
        Step::Confirm => draw_confirm(frame, inner, wizard),
        _ => draw_text_step(frame, inner, wizard),
    }

    draw_progress(frame, inner, wizard.step_number(), SetupWizard::TOTAL_STEPS);
}

fn draw_progress(frame: &mut Frame, area: Rect, current: usize, total: usize) {
    let mut spans = vec![Span::styled("  ", theme::dim())];
    for i in 1..=total {
        if i < current {
            spans.push(Span::styled("● ", theme::green()));
        } else if i == current {
            spans.push(Span::styled("◉ ", theme::water()));
        } else {
            spans.push(Span::styled("○ ", theme::dim()));
        }
    }
    let para = Paragraph::new(Line::from(spans));
    let progress_area = Rect {
        x: area.x,
        y: area.y,
        width: area.width,
        height: 1,
    };
    frame.render_widget(para, progress_area);
}

fn content_area(area: Rect) -> Rect {
    Rect {
        x: area.x,
        y: area.y + 2,
        width: area.width,
        height: area.height.saturating_sub(2),
    }
}

fn draw_welcome(frame: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(""),
        Line::from(""),
        Line::from(Span::styled(
            "Welcome to hydroflow",
            theme::water().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "A daily water goal that follows the weather.",
            theme::dim(),
        )),
        Line::from(""),
        Line::from(""),
        Line::from(Span::styled("This wizard will configure:", theme::dim())),
        Line::from(vec![
            Span::styled("  ●  ", theme::water()),
            Span::styled("Your city and coordinates", theme::dim()),
        ]),
        Line::from(vec![
            Span::styled("  ●  ", theme::water()),
            Span::styled("Your usual activity level", theme::dim()),
        ]),
        Line::from(vec![
            Span::styled("  ●  ", theme::water()),
            Span::styled("An optional OpenWeatherMap API key", theme::dim()),
        ]),
        Line::from(""),
        Line::from(""),
        Line::from(""),
        Line::from(Span::styled(
            "Press  Enter  to begin  ·  Esc  to cancel",
            theme::dim(),
        )),
    ];

    let para = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(para, content_area(area));
}

fn draw_text_step(frame: &mut Frame, area: Rect, wizard: &SetupWizard) {
    let (title, subtitle, hint) = match wizard.step {
        Step::City => ("City", "Shown in the dashboard header", "e.g.  Lagos,  Oslo,  Phoenix"),
        Step::Country => ("Country", "Shown next to the city", "e.g.  Nigeria,  Norway,  US"),
        Step::Latitude => (
            "Latitude",
            "Used for the weather lookup",
            "e.g.  6.5244  ·  leave blank to skip weather",
        ),
        Step::Longitude => (
            "Longitude",
            "Used for the weather lookup",
            "e.g.  3.3792  ·  leave blank to skip weather",
        ),
        Step::ApiKey => (
            "OpenWeatherMap API Key",
            "Leave blank to use default conditions",
            "HYDROFLOW_API_KEY overrides this value  ·  [Tab] clears",
        ),
        _ => ("", "", ""),
    };

    let cursor = if wizard.input.len() < 40 { "█" } else { "" };

    let mut lines = vec![
        Line::from(""),
        Line::from(""),
        Line::from(Span::styled(title, theme::water().add_modifier(Modifier::BOLD))),
        Line::from(""),
        Line::from(Span::styled(subtitle, theme::dim())),
        Line::from(""),
        Line::from(""),
    ];

    let input_display = format!("  {}{}  ", wizard.input, cursor);
    let input_width = area.width.saturating_sub(8) as usize;
    let padded = format!("{:<width$}", input_display, width = input_width);

    let input_style = if wizard.error.is_some() {
        theme::red()
    } else {
        theme::amber()
    };

    lines.push(Line::from(Span::styled(padded, input_style.add_modifier(Modifier::BOLD))));
    lines.push(Line::from(""));

    if let Some(err) = &wizard.error {
        lines.push(Line::from(Span::styled(format!("  ✗  {}", err), theme::red())));
    } else {
        lines.push(Line::from(Span::styled(hint, theme::dim())));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(""));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Enter  confirm   ·   Esc  back",
        theme::dim(),
    )));

    let para = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(para, content_area(area));
}

fn draw_activity(frame: &mut Frame, area: Rect, selected: usize) {
    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Activity Level",
            theme::water().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled("How active is a typical day?", theme::dim())),
        Line::from(""),
        Line::from(""),
    ];

    let labels = [
        "Low       (desk work, little exercise)   −1",
        "Moderate  (some walking or exercise)      0",
        "High      (training or physical work)    +2",
    ];
    for (i, label) in labels.iter().enumerate() {
        if i == selected {
            lines.push(Line::from(vec![
                Span::styled("  ◉  ", theme::water()),
                Span::styled(*label, theme::water().add_modifier(Modifier::BOLD)),
            ]));
        } else {
            lines.push(Line::from(vec![
                Span::styled("  ○  ", theme::dim()),
                Span::styled(*label, theme::dim()),
            ]));
        }
        lines.push(Line::from(""));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "←→  or  1 2 3  choose   ·   Enter  confirm   ·   Esc  back",
        theme::dim(),
    )));

    let para = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(para, content_area(area));
}

fn draw_confirm(frame: &mut Frame, area: Rect, wizard: &SetupWizard) {
    let coordinates = match (wizard.latitude, wizard.longitude) {
        (Some(lat), Some(lon)) => format!("{:.4},  {:.4}", lat, lon),
        _ => "not set".to_string(),
    };
    let api_key = if wizard.api_key.is_empty() {
        "not set".to_string()
    } else {
        mask_key(&wizard.api_key)
    };

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Confirm Settings",
            theme::water().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled("Review your configuration:", theme::dim())),
        Line::from(""),
        Line::from(vec![
            Span::styled("  Location    ", theme::dim()),
            Span::styled(format!("{}, {}", wizard.city, wizard.country), theme::bold()),
        ]),
        Line::from(vec![
            Span::styled("  Coordinates ", theme::dim()),
            Span::styled(coordinates, theme::bold()),
        ]),
        Line::from(vec![
            Span::styled("  Activity    ", theme::dim()),
            Span::styled(wizard.activity().display_name(), theme::bold()),
        ]),
        Line::from(vec![
            Span::styled("  API Key     ", theme::dim()),
            Span::styled(api_key, theme::bold()),
        ]),
        Line::from(""),
        Line::from(""),
        Line::from(Span::styled(
            "Enter  save   ·   Esc  go back",
            theme::dim(),
        )),
    ];

    let para = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(para, content_area(area));
}

fn mask_key(key: &str) -> String {
    let visible: String = key.chars().rev().take(4).collect::<Vec<_>>().into_iter().rev().collect();
    format!("••••{}", visible)
}

// ─── Public entry point ──────────────────────────────────────────────────────

pub fn run_setup_tui(conn: &Connection, config: &mut AppConfig) -> Result<()> {
    let mut wizard = SetupWizard::new(config);
    let mut terminal = ratatui::init();
    let events = EventHandler::new(100);

    let result = (|| -> Result<()> {
        loop {
            terminal.draw(|frame| draw(frame, &wizard))?;

            match events.next()? {
                Event::Key(key) => {
                    wizard.handle_key(key);
                    if wizard.should_quit {
                        return Ok(());
                    }
                    if wizard.confirmed {
                        *config = wizard.build_config(config);
                        config.save()?;
                        MetaRepo::set(conn, KEY_SETUP_DONE, "1")?;
                        log::info!("Setup saved for {}", config.location.city);
                        return Ok(());
                    }
                }
                Event::Tick | Event::Reminder(_) => {}
            }
        }
    })();

    ratatui::restore();
    result
}
