use ratatui::{
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
    Frame,
};

use crate::models::{HydrationGoal, WeatherSnapshot};
use crate::tui::theme;
use crate::utils::format::format_delta;

pub fn render(
    frame: &mut Frame,
    area: Rect,
    weather: &WeatherSnapshot,
    goal: &HydrationGoal,
    using_fallback: bool,
) {
    let block = Block::default()
        .title(Span::styled(" Weather & Goal ", theme::water()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::border())
        .style(theme::surface());

    let mut lines = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled(
                format!("  {:.0}°C", weather.temperature),
                theme::amber().add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  feels {:.0}°C", weather.feels_like),
                theme::dim(),
            ),
        ]),
        Line::from(Span::styled(
            format!("  {:.0}% humidity  ·  {}", weather.humidity, weather.condition),
            theme::dim(),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("  Goal  ", theme::dim()),
            Span::styled(
                format!("{} glasses", goal.adjusted_goal),
                theme::water().add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!("  (base {})", goal.base_goal), theme::dim()),
        ]),
    ];

    let factors = [
        ("temp", goal.factors.temperature),
        ("humid", goal.factors.humidity),
        ("climate", goal.factors.climate),
        ("activity", goal.factors.activity),
    ];
    let mut factor_spans = vec![Span::styled("  ", theme::dim())];
    for (name, delta) in factors {
        let style = match delta {
            d if d > 0 => theme::amber(),
            d if d < 0 => theme::water(),
            _ => theme::dim(),
        };
        factor_spans.push(Span::styled(format!("{} ", name), theme::dim()));
        factor_spans.push(Span::styled(format_delta(delta), style));
        factor_spans.push(Span::styled("  ", theme::dim()));
    }
    lines.push(Line::from(factor_spans));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        format!("  {}", goal.recommendation),
        theme::bold(),
    )));

    if using_fallback {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "  Using default conditions  ·  [f] to retry",
            theme::red(),
        )));
    }

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}
