//! ---
//! pw_section: "06-terminal-dashboard"
//! pw_subsection: "module"
//! pw_type: "source"
//! pw_scope: "code"
//! pw_description: "Run loop, input handling, and all terminal drawing."
//! pw_version: "v0.1.0-dev"
//! pw_owner: "tbd"
//! ---
//! The interactive half of the dashboard. A 16 ms frame timer drives
//! animation stepping, input polling, and redraws; poll events from the
//! controller land in between frames. Gauges are rasterized off-screen and
//! blitted into half-block cells, two pixel rows per terminal row.

use std::io::Stdout;
use std::time::Duration;

use anyhow::Result;
use chrono::Utc;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols::Marker;
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Axis, Block, Borders, Chart, Dataset, GraphType, List, ListItem, ListState, Paragraph,
};
use ratatui::{Frame, Terminal};
use tokio::time::interval;
use tracing::{error, warn};

use plantwatch_client::ApiClient;
use plantwatch_common::{AppConfig, DisplayClock};
use plantwatch_core::anim::TICK;
use plantwatch_core::chart::y_tick_label;
use plantwatch_core::view::UnitCardView;
use plantwatch_core::{Action, ChartConfig, GaugeInstrument, LiveIndicator, UnitStatus};
use plantwatch_render::{draw_gauge, PixelBuffer, Rgba, Surface};

use crate::controller::{lenient_plant_id, Command, DashboardController, PollEvent, ViewMode};
use crate::screen::{FleetScreen, PlantScreen};

type Term = Terminal<CrosstermBackend<Stdout>>;

/// Blit grid for the configured gauge diameter, assuming a terminal cell is
/// roughly 8x16 px. Floored so tiny diameters still draw a readable arc.
fn gauge_grid(diameter: u32) -> (u32, u32) {
    let cols = (diameter / 8).max(9);
    let rows = (cols / 2).max(4);
    (cols, rows)
}

enum Outcome {
    Quit,
    Switch(ViewMode),
}

enum InputAction {
    Quit,
    Refresh,
    Up,
    Down,
    Open,
    Back,
}

/// Top-level session loop: each view runs with its own controller until the
/// user quits or navigates, exactly as each dashboard page owns its timers.
pub async fn run(terminal: &mut Term, config: &AppConfig, mut mode: ViewMode) -> Result<()> {
    let client = ApiClient::new(config.api.base_url.clone());
    let clock = DisplayClock::new();
    loop {
        let controller =
            DashboardController::start(client.clone(), config.refresh.clone(), mode);
        let outcome = match mode {
            ViewMode::Fleet => run_fleet(terminal, controller, clock).await?,
            ViewMode::Plant(plant_id) => {
                run_plant(terminal, controller, clock, plant_id, config.ui.gauge_diameter).await?
            }
        };
        match outcome {
            Outcome::Quit => break,
            Outcome::Switch(next) => mode = next,
        }
    }
    Ok(())
}

fn poll_input() -> Result<Option<InputAction>> {
    while event::poll(Duration::ZERO)? {
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind == KeyEventKind::Release {
            continue;
        }
        let action = match key.code {
            KeyCode::Char('q') | KeyCode::Esc => Some(InputAction::Quit),
            KeyCode::Char('r') | KeyCode::Char('R') => Some(InputAction::Refresh),
            KeyCode::Up | KeyCode::Char('k') => Some(InputAction::Up),
            KeyCode::Down | KeyCode::Char('j') => Some(InputAction::Down),
            KeyCode::Enter => Some(InputAction::Open),
            KeyCode::Char('b') | KeyCode::Backspace => Some(InputAction::Back),
            _ => None,
        };
        if action.is_some() {
            return Ok(action);
        }
    }
    Ok(None)
}

struct Header {
    clock: DisplayClock,
    time_text: String,
    date_text: String,
}

impl Header {
    fn new(clock: DisplayClock) -> Self {
        let mut header = Self {
            clock,
            time_text: String::new(),
            date_text: String::new(),
        };
        header.refresh();
        header
    }

    fn refresh(&mut self) {
        let now = Utc::now();
        self.time_text = self.clock.time_text(now);
        self.date_text = self.clock.date_text(now);
    }
}

async fn run_fleet(
    terminal: &mut Term,
    mut controller: DashboardController,
    clock: DisplayClock,
) -> Result<Outcome> {
    let mut state = plantwatch_core::FleetViewState::new();
    let mut screen = FleetScreen::new();
    let mut header = Header::new(clock);
    let commands = controller.commander();
    let mut frame_tick = interval(TICK);
    let outcome = loop {
        tokio::select! {
            poll = controller.next_event() => {
                let Some(poll) = poll else { break Outcome::Quit };
                match poll {
                    PollEvent::ClockTick => header.refresh(),
                    PollEvent::Fleet(Ok((snapshot, issues))) => {
                        if !issues.is_empty() {
                            warn!(count = issues.len(), "fleet payload issues");
                        }
                        state.apply(snapshot, &mut screen);
                    }
                    PollEvent::Fleet(Err(err)) => {
                        error!(error = %err, "fleet poll failed");
                        state.apply_error(&mut screen);
                    }
                    _ => {}
                }
            }
            _ = frame_tick.tick() => {
                screen.tick();
                match poll_input()? {
                    Some(InputAction::Quit) => break Outcome::Quit,
                    Some(InputAction::Refresh) => commands.send(Command::RefreshData).await,
                    Some(InputAction::Up) => screen.select_previous(),
                    Some(InputAction::Down) => screen.select_next(),
                    Some(InputAction::Open) => {
                        if let Some(button) = screen.selected_plant() {
                            let plant_id = lenient_plant_id(&button.plant_id);
                            break Outcome::Switch(ViewMode::Plant(plant_id));
                        }
                    }
                    Some(InputAction::Back) | None => {}
                }
                terminal.draw(|frame| draw_fleet(frame, &screen, &header))?;
            }
        }
    };
    controller.stop().await;
    Ok(outcome)
}

async fn run_plant(
    terminal: &mut Term,
    mut controller: DashboardController,
    clock: DisplayClock,
    plant_id: u32,
    gauge_diameter: u32,
) -> Result<Outcome> {
    let mut state = plantwatch_core::PlantViewState::new(plant_id);
    let mut screen = PlantScreen::new(plant_id);
    let mut header = Header::new(clock);
    let commands = controller.commander();
    let mut frame_tick = interval(TICK);
    let outcome = loop {
        tokio::select! {
            poll = controller.next_event() => {
                let Some(poll) = poll else { break Outcome::Quit };
                match poll {
                    PollEvent::ClockTick => header.refresh(),
                    PollEvent::Plant(Ok((snapshot, issues))) => {
                        if !issues.is_empty() {
                            warn!(count = issues.len(), "plant payload issues");
                        }
                        if state.apply(snapshot, &mut screen) == Action::Reload {
                            screen.begin_reload();
                            commands.send(Command::ScheduleReload).await;
                        }
                    }
                    PollEvent::Plant(Err(err)) => {
                        error!(error = %err, "plant poll failed");
                        state.apply_error(&mut screen);
                    }
                    PollEvent::Chart(Ok((history, issues))) => {
                        if !issues.is_empty() {
                            warn!(count = issues.len(), "history payload issues");
                        }
                        screen.set_chart(ChartConfig::build(plant_id, &history));
                    }
                    PollEvent::Chart(Err(err)) => {
                        error!(error = %err, "chart poll failed");
                        screen.set_chart_error();
                    }
                    PollEvent::Rebuilt => {
                        state.rebuild();
                        screen.reset();
                    }
                    PollEvent::Fleet(_) => {}
                }
            }
            _ = frame_tick.tick() => {
                screen.tick();
                match poll_input()? {
                    Some(InputAction::Quit) => break Outcome::Quit,
                    Some(InputAction::Back) => break Outcome::Switch(ViewMode::Fleet),
                    Some(InputAction::Refresh) => {
                        commands.send(Command::RefreshData).await;
                        commands.send(Command::RefreshChart).await;
                    }
                    _ => {}
                }
                terminal.draw(|frame| draw_plant(frame, &screen, &header, gauge_diameter))?;
            }
        }
    };
    controller.stop().await;
    Ok(outcome)
}

fn live_span(indicator: LiveIndicator) -> Span<'static> {
    match indicator {
        LiveIndicator::Online => Span::styled("● LIVE", Style::default().fg(Color::Green)),
        LiveIndicator::Offline => Span::styled("● OFFLINE", Style::default().fg(Color::DarkGray)),
        LiveIndicator::Error => Span::styled("● ERROR", Style::default().fg(Color::Red)),
    }
}

fn draw_header(frame: &mut Frame, area: Rect, title: &str, header: &Header, live: LiveIndicator) {
    let block = Block::default().borders(Borders::ALL);
    let line = Line::from(vec![
        Span::styled(
            title.to_owned(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw("   "),
        live_span(live),
        Span::raw(format!("   {}  {}", header.date_text, header.time_text)),
    ]);
    frame.render_widget(Paragraph::new(line).block(block), area);
}

fn stat_box(frame: &mut Frame, area: Rect, title: &str, value: String) {
    let paragraph = Paragraph::new(Line::from(Span::styled(
        value,
        Style::default().add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL).title(title.to_owned()));
    frame.render_widget(paragraph, area);
}

fn status_style(status: UnitStatus) -> Style {
    match status {
        UnitStatus::Online => Style::default().fg(Color::Green),
        UnitStatus::Standby => Style::default().fg(Color::Yellow),
        UnitStatus::Offline => Style::default().fg(Color::Red),
    }
}

fn draw_fleet(frame: &mut Frame, screen: &FleetScreen, header: &Header) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(frame.size());

    draw_header(frame, layout[0], "Fleet Overview", header, screen.live);

    let stats = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(20); 5])
        .split(layout[1]);
    stat_box(frame, stats[0], "Total Power", screen.power_text());
    stat_box(frame, stats[1], "Running Units", screen.running_text());
    stat_box(frame, stats[2], "Standby Units", screen.standby_text());
    stat_box(frame, stats[3], "Total Units", screen.total_units_text());
    stat_box(frame, stats[4], "Active Plants", screen.active_plants_text());

    let items: Vec<ListItem> = if screen.buttons.is_empty() {
        vec![ListItem::new("(waiting for fleet data)")]
    } else {
        screen
            .buttons
            .iter()
            .enumerate()
            .map(|(index, button)| {
                let line = Line::from(vec![
                    Span::styled(
                        format!("Plant {}", button.plant_id),
                        Style::default().add_modifier(Modifier::BOLD),
                    ),
                    Span::raw("  "),
                    Span::styled(
                        format!("{} {}", button.activity.symbol(), button.activity.label()),
                        status_style(button.activity),
                    ),
                    Span::raw(format!(
                        "  {}  {}",
                        button.info_text,
                        screen.button_power_text(index)
                    )),
                ]);
                ListItem::new(line)
            })
            .collect()
    };
    let mut list_state = ListState::default();
    if !screen.buttons.is_empty() {
        list_state.select(Some(screen.selected));
    }
    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title("Plants"))
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▶ ");
    frame.render_stateful_widget(list, layout[2], &mut list_state);

    let help = Paragraph::new("↑/↓ select plant  Enter open  r refresh  q quit")
        .style(Style::default().fg(Color::Gray));
    frame.render_widget(help, layout[3]);
}

fn draw_plant(frame: &mut Frame, screen: &PlantScreen, header: &Header, gauge_diameter: u32) {
    let (_, gauge_rows) = gauge_grid(gauge_diameter);
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(gauge_rows as u16 + 6),
            Constraint::Length(10),
            Constraint::Length(1),
        ])
        .split(frame.size());

    draw_header(
        frame,
        layout[0],
        &format!("Plant {} Dashboard", screen.plant_id),
        header,
        screen.live,
    );

    let stats = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(20); 5])
        .split(layout[1]);
    stat_box(frame, stats[0], "Total Power", screen.power_text());
    stat_box(frame, stats[1], "Online", screen.online_text());
    stat_box(frame, stats[2], "Offline", screen.offline_text());
    stat_box(frame, stats[3], "Standby", screen.standby_text());
    stat_box(frame, stats[4], "Running", screen.running_text());

    draw_unit_cards(frame, layout[2], screen, gauge_diameter);
    draw_chart(frame, layout[3], screen);

    let help_text = if screen.reload_pending {
        "Unit topology changed, rebuilding view..."
    } else {
        "b back  r refresh  q quit"
    };
    let help_style = if screen.reload_pending {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::Gray)
    };
    frame.render_widget(Paragraph::new(help_text).style(help_style), layout[4]);
}

fn draw_unit_cards(frame: &mut Frame, area: Rect, screen: &PlantScreen, gauge_diameter: u32) {
    if screen.cards.is_empty() {
        let placeholder = Paragraph::new("(waiting for unit data)")
            .block(Block::default().borders(Borders::ALL).title("Units"));
        frame.render_widget(placeholder, area);
        return;
    }
    let count = screen.cards.len() as u32;
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(
            screen
                .cards
                .iter()
                .map(|_| Constraint::Ratio(1, count))
                .collect::<Vec<_>>(),
        )
        .split(area);
    for (card, column) in screen.cards.iter().zip(columns.iter()) {
        draw_unit_card(frame, *column, card, gauge_diameter);
    }
}

fn draw_unit_card(frame: &mut Frame, area: Rect, card: &UnitCardView, gauge_diameter: u32) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!("Unit {}", card.unit_id));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let (_, gauge_rows) = gauge_grid(gauge_diameter);
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(gauge_rows as u16 + 2),
            Constraint::Length(1),
        ])
        .split(inner);

    let badge = Paragraph::new(Span::styled(
        card.badge_text.clone(),
        status_style(card.status).add_modifier(Modifier::BOLD),
    ));
    frame.render_widget(badge, rows[0]);

    let gauges = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 3); 3])
        .split(rows[1]);
    let readings = [&card.voltage_text, &card.current_text, &card.power_text];
    for ((gauge, reading), column) in card.gauges.iter().zip(readings).zip(gauges.iter()) {
        draw_gauge_cell(frame, *column, gauge, reading, gauge_diameter);
    }

    let timestamp =
        Paragraph::new(card.timestamp_text.clone()).style(Style::default().fg(Color::Gray));
    frame.render_widget(timestamp, rows[2]);
}

fn draw_gauge_cell(
    frame: &mut Frame,
    area: Rect,
    gauge: &GaugeInstrument,
    reading: &str,
    gauge_diameter: u32,
) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0)])
        .split(area);
    let caption = Paragraph::new(format!(
        "{}: {} {}",
        gauge.kind.label(),
        reading,
        gauge.kind.unit()
    ));
    frame.render_widget(caption, rows[0]);
    let arc = Paragraph::new(gauge_lines(gauge, gauge_diameter)).alignment(Alignment::Center);
    frame.render_widget(arc, rows[1]);
}

/// Composite an RGBA pixel over the terminal's black background.
fn cell_color(pixel: Rgba) -> Option<Color> {
    if pixel.a == 0 {
        return None;
    }
    let scale = |channel: u8| (channel as u16 * pixel.a as u16 / 255) as u8;
    Some(Color::Rgb(scale(pixel.r), scale(pixel.g), scale(pixel.b)))
}

/// Rasterize a gauge at the configured diameter and downsample it into
/// half-block cells: each text row carries two pixel rows, "▀" with fg for
/// the top and bg for the bottom.
fn gauge_lines(gauge: &GaugeInstrument, gauge_diameter: u32) -> Vec<Line<'static>> {
    let (cols, grid_rows) = gauge_grid(gauge_diameter);
    let side = gauge_diameter.max(2);
    let mut buffer = PixelBuffer::new(side, side);
    let (r, g, b) = gauge.color;
    draw_gauge(
        &mut buffer,
        gauge.value,
        gauge.scale_max,
        Rgba::opaque(r, g, b),
        side,
    );
    let width = buffer.width();
    let height = buffer.height();
    (0..grid_rows)
        .map(|row| {
            let spans = (0..cols)
                .map(|col| {
                    let x = col * width / cols;
                    let top_y = (2 * row) * height / (2 * grid_rows);
                    let bottom_y = (2 * row + 1) * height / (2 * grid_rows);
                    let mut style = Style::default();
                    if let Some(color) = cell_color(buffer.pixel(x, top_y)) {
                        style = style.fg(color);
                    }
                    if let Some(color) = cell_color(buffer.pixel(x, bottom_y)) {
                        style = style.bg(color);
                    }
                    Span::styled("▀", style)
                })
                .collect::<Vec<_>>();
            Line::from(spans)
        })
        .collect()
}

/// Split a chart configuration into plotable series: the continuous line and
/// the zero-valued offline markers that overlay it.
fn split_series(config: &ChartConfig) -> (Vec<(f64, f64)>, Vec<(f64, f64)>) {
    let line = config
        .points
        .iter()
        .enumerate()
        .map(|(index, point)| (index as f64, point.power_kw))
        .collect();
    let offline = config
        .points
        .iter()
        .enumerate()
        .filter(|(_, point)| point.power_kw == 0.0)
        .map(|(index, point)| (index as f64, point.power_kw))
        .collect();
    (line, offline)
}

fn draw_chart(frame: &mut Frame, area: Rect, screen: &PlantScreen) {
    if screen.chart_error {
        let message = Paragraph::new("Unable to load chart data, press r to retry")
            .style(Style::default().fg(Color::Red))
            .block(Block::default().borders(Borders::ALL).title("History"));
        frame.render_widget(message, area);
        return;
    }
    let Some(config) = &screen.chart else {
        let message = Paragraph::new("(waiting for history data)")
            .block(Block::default().borders(Borders::ALL).title("History"));
        frame.render_widget(message, area);
        return;
    };

    let (line, offline) = split_series(config);
    let max_kw = line
        .iter()
        .map(|(_, kw)| *kw)
        .fold(0.0_f64, f64::max)
        .max(100.0);
    let x_max = (line.len().saturating_sub(1)).max(1) as f64;

    let datasets = vec![
        Dataset::default()
            .name("power")
            .marker(Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::Green))
            .data(&line),
        Dataset::default()
            .name("offline")
            .marker(Marker::Dot)
            .graph_type(GraphType::Scatter)
            .style(Style::default().fg(Color::Red))
            .data(&offline),
    ];

    let x_labels = match (config.points.first(), config.points.last()) {
        (Some(first), Some(last)) => vec![
            Span::raw(first.label.clone()),
            Span::raw(last.label.clone()),
        ],
        _ => Vec::new(),
    };
    let y_labels = vec![
        Span::raw(y_tick_label(0.0)),
        Span::raw(y_tick_label(max_kw / 2.0)),
        Span::raw(y_tick_label(max_kw)),
    ];

    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(config.title.clone()),
        )
        .x_axis(
            Axis::default()
                .title(config.x_axis_title.clone())
                .bounds([0.0, x_max])
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .title(config.y_axis_title.clone())
                .bounds([0.0, max_kw * 1.1])
                .labels(y_labels),
        );
    frame.render_widget(chart, area);
}
