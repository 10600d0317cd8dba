use ratatui::{
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use crate::reminder::ReminderState;
use crate::tui::theme;
use crate::utils::format::{format_countdown, format_duration_secs};

pub fn render(
    frame: &mut Frame,
    area: Rect,
    state: ReminderState,
    remaining_secs: u64,
    interval_secs: u64,
) {
    let block = Block::default()
        .title(Span::styled(" Reminder ", theme::water()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::border())
        .style(theme::surface());

    let badge_style = match state {
        ReminderState::Active => theme::green().add_modifier(Modifier::BOLD),
        ReminderState::Inactive => theme::dim().add_modifier(Modifier::BOLD),
    };

    let countdown_style = match state {
        ReminderState::Active => theme::amber().add_modifier(Modifier::BOLD),
        ReminderState::Inactive => theme::dim(),
    };

    let lines = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled("  ", theme::dim()),
            Span::styled(format!("● {}", state.as_str()), badge_style),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("  next in  ", theme::dim()),
            Span::styled(format_countdown(remaining_secs), countdown_style),
        ]),
        Line::from(Span::styled(
            format!("  every {}", format_duration_secs(interval_secs as i64)),
            theme::dim(),
        )),
    ];

    let paragraph = Paragraph::new(lines).block(block);
    frame.render_widget(paragraph, area);
}
