use crate::app::App;
use crate::braille;
use crate::settings::MAX_STEP_MAGNITUDE;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
    Frame,
};

const SIDEBAR_WIDTH: u16 = 24;

// UI color scheme
const BORDER_COLOR: Color = Color::Cyan;
const HIGHLIGHT_COLOR: Color = Color::Yellow;
const TEXT_COLOR: Color = Color::White;
const DIM_TEXT_COLOR: Color = Color::Gray;

/// Creates a standard styled block with rounded borders
fn styled_block(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(BORDER_COLOR))
        .title(title)
}

/// Main render function
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    if app.show_ui {
        let layout = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(0)])
            .split(area);

        render_sidebar(frame, layout[0], app);
        render_canvas(frame, layout[1], app);
    } else {
        render_canvas(frame, area, app);
    }
}

fn render_sidebar(frame: &mut Frame, area: Rect, app: &App) {
    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(7), // Status
            Constraint::Length(4), // Step slider
            Constraint::Min(7),    // Controls
        ])
        .split(area);

    render_status_box(frame, sections[0], app);
    render_step_box(frame, sections[1], app);
    render_controls_box(frame, sections[2], app);
}

fn render_status_box(frame: &mut Frame, area: Rect, app: &App) {
    let sim = &app.simulation;
    let text = Style::default().fg(TEXT_COLOR);

    let mut content = vec![
        Line::from(Span::styled(format!("Radius: {:.1}", sim.radius()), text)),
        Line::from(Span::styled(format!("Cells: {}", sim.filled_cells()), text)),
        Line::from(Span::styled(format!("Walkers: {}", sim.particles().len()), text)),
        Line::from(Span::styled(format!("Steps: {}", sim.steps), text)),
    ];
    if let Some(status) = &app.status {
        content.push(Line::from(Span::styled(
            status.clone(),
            Style::default().fg(HIGHLIGHT_COLOR),
        )));
    }

    let paragraph = Paragraph::new(content)
        .block(styled_block(" DLA Lattice "))
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

fn render_step_box(frame: &mut Frame, area: Rect, app: &App) {
    let step = app.simulation.step_magnitude();
    let bar_width = area.width.saturating_sub(4) as usize;
    let filled = bar_width * step as usize / MAX_STEP_MAGNITUDE as usize;
    let empty = bar_width.saturating_sub(filled);

    let content = vec![
        Line::from(Span::styled(
            format!("STEP: {:2}", step),
            Style::default().fg(HIGHLIGHT_COLOR),
        )),
        Line::from(vec![
            Span::styled("█".repeat(filled), Style::default().fg(Color::Green)),
            Span::styled("░".repeat(empty), Style::default().fg(Color::DarkGray)),
        ]),
    ];

    frame.render_widget(Paragraph::new(content).block(styled_block(" Walk ")), area);
}

fn render_controls_box(frame: &mut Frame, area: Rect, _app: &App) {
    let key_style = Style::default().fg(HIGHLIGHT_COLOR);
    let desc_style = Style::default().fg(DIM_TEXT_COLOR);

    // Helper to create a control line
    let make_control = |key: &str, desc: &str| -> Line<'static> {
        Line::from(vec![
            Span::styled(format!("{:>5}", key), key_style),
            Span::styled(format!(" {}", desc), desc_style),
        ])
    };

    let content = vec![
        make_control("+/-", "step size"),
        make_control("R", "reset"),
        make_control("H", "hide the UI"),
        make_control("S", "screenshot"),
        make_control("Q", "quit"),
    ];

    frame.render_widget(Paragraph::new(content).block(styled_block(" Controls ")), area);
}

fn render_canvas(frame: &mut Frame, area: Rect, app: &App) {
    let block = styled_block("");

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let cells = braille::render_to_braille(&app.simulation, inner.width, inner.height, app.show_ui);

    let buf = frame.buffer_mut();
    for cell in cells {
        let x = inner.x + cell.x;
        let y = inner.y + cell.y;

        if x < inner.x + inner.width && y < inner.y + inner.height {
            if let Some(target) = buf.cell_mut((x, y)) {
                target.set_char(cell.char).set_fg(cell.color);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::settings::SimulationSettings;
    use ratatui::{backend::TestBackend, Terminal};

    fn app() -> App {
        App::new(&AppConfig {
            settings: SimulationSettings {
                grid_size: 64,
                num_particles: 30,
                init_radius: 10.0,
                rng_seed: Some(8),
                ..Default::default()
            },
            ..Default::default()
        })
        .unwrap()
    }

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_sidebar_shows_step_and_controls() {
        let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();
        let app = app();
        terminal.draw(|frame| render(frame, &app)).unwrap();

        let text = screen_text(&terminal);
        assert!(text.contains("STEP:  1"));
        assert!(text.contains("Radius: 10.0"));
        assert!(text.contains("reset"));
        assert!(text.contains("Cells: 1"));
    }

    #[test]
    fn test_hidden_ui_draws_canvas_only() {
        let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();
        let mut app = app();
        app.toggle_ui();
        terminal.draw(|frame| render(frame, &app)).unwrap();

        let text = screen_text(&terminal);
        assert!(!text.contains("STEP:"));
        // The seed is still drawn
        assert!(text.chars().any(|c| ('\u{2801}'..='\u{28FF}').contains(&c)));
    }
}
