use ratatui::{
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use crate::models::DayRecord;
use crate::tui::theme;
use crate::utils::format::{progress_bar, weekday_label};

pub fn render(frame: &mut Frame, area: Rect, week: &[DayRecord], today: &str) {
    let block = Block::default()
        .title(Span::styled(" Last 7 Days ", theme::water()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::border())
        .style(theme::surface());

    let mut lines = vec![Line::from("")];

    if week.is_empty() {
        lines.push(Line::from(Span::styled("  No data yet", theme::dim())));
    }

    for day in week {
        let label_style = if day.date == today {
            theme::bold()
        } else {
            theme::dim()
        };
        let bar_style = if day.goal_met {
            theme::green()
        } else {
            theme::deep()
        };
        let mark = if day.goal_met {
            Span::styled(" ✓", theme::green().add_modifier(Modifier::BOLD))
        } else {
            Span::styled("  ", theme::dim())
        };

        lines.push(Line::from(vec![
            Span::styled(format!("  {}  ", weekday_label(&day.date)), label_style),
            Span::styled(progress_bar(day.water_count, day.goal, 14), bar_style),
            Span::styled(
                format!("  {:>2}/{:<2}", day.water_count, day.goal),
                theme::dim(),
            ),
            mark,
        ]));
    }

    let paragraph = Paragraph::new(lines).block(block);
    frame.render_widget(paragraph, area);
}
