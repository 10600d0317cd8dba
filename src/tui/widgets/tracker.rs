use ratatui::{
    layout::{Alignment, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use crate::tui::theme;
use crate::utils::format::progress_bar;

/// Glasses drawn one per cell once the goal fits the row.
const MAX_GLASS_ICONS: u32 = 16;

pub fn render(frame: &mut Frame, area: Rect, count: u32, goal: u32, progress: u32) {
    let reached = goal > 0 && count >= goal;
    let border_style = if reached {
        theme::green()
    } else {
        theme::water()
    };

    let block = Block::default()
        .title(Span::styled(" Water Tracker ", theme::water()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(border_style)
        .style(theme::surface());

    let mut lines = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled(
                count.to_string(),
                theme::water().add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!(" / {} glasses", goal), theme::dim()),
        ]),
        Line::from(""),
    ];

    if goal <= MAX_GLASS_ICONS {
        let mut glasses = Vec::new();
        for i in 0..goal.max(count).min(MAX_GLASS_ICONS) {
            if i < count {
                glasses.push(Span::styled("▮ ", theme::water()));
            } else {
                glasses.push(Span::styled("▯ ", theme::empty()));
            }
        }
        lines.push(Line::from(glasses));
        lines.push(Line::from(""));
    }

    let bar_style = if reached { theme::green() } else { theme::water() };
    let width = area.width.saturating_sub(12).min(40) as usize;
    lines.push(Line::from(vec![
        Span::styled(progress_bar(count, goal, width), bar_style),
        Span::styled(format!("  {}%", progress), theme::bold()),
    ]));

    if reached {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Goal achieved · 100 points",
            theme::green().add_modifier(Modifier::BOLD),
        )));
    }

    let paragraph = Paragraph::new(lines)
        .block(block)
        .alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}
