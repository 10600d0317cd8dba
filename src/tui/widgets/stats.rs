use ratatui::{
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use crate::models::Summary;
use crate::tui::theme;

pub fn render(frame: &mut Frame, area: Rect, summary: Summary, progress: u32) {
    let block = Block::default()
        .title(Span::styled(" Stats ", theme::water()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::border())
        .style(theme::surface());

    let streak_style = if summary.streak > 0 {
        theme::green().add_modifier(Modifier::BOLD)
    } else {
        theme::dim()
    };

    let lines = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled("  Points   ", theme::dim()),
            Span::styled(
                summary.total_points.to_string(),
                theme::amber().add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::styled("  Streak   ", theme::dim()),
            Span::styled(format!("{} days", summary.streak), streak_style),
        ]),
        Line::from(vec![
            Span::styled("  Today    ", theme::dim()),
            Span::styled(format!("{}%", progress), theme::water()),
        ]),
    ];

    let paragraph = Paragraph::new(lines).block(block);
    frame.render_widget(paragraph, area);
}
