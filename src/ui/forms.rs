use crate::app::{AppState, IntervalField};
use crate::ui::{layout::create_modal_area, styles::Palette};
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Text field line with a block cursor when active
fn field_line<'a>(value: &'a str, active: bool, style: Style) -> Line<'a> {
    Line::from(vec![
        Span::raw("> "),
        Span::styled(value, style),
        if active {
            Span::styled("█", style)
        } else {
            Span::raw("")
        },
    ])
}

fn modal<'a>(f: &mut Frame, area: Rect, height: u16, title: &'a str, lines: Vec<Line<'a>>, palette: &Palette) {
    let modal_area = create_modal_area(area, height);
    f.render_widget(Clear, modal_area);

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled(title, palette.modal_title_style()))
                .style(palette.modal_bg_style()),
        )
        .wrap(Wrap { trim: false });
    f.render_widget(paragraph, modal_area);
}

/// Edit sheet: title and done flag
pub fn render_edit_form(f: &mut Frame, app: &AppState, palette: &Palette, area: Rect) {
    let Some(form) = &app.edit_form else {
        return;
    };
    let accent = palette.modal_title_style();
    let done_mark = if form.done { "[x]" } else { "[ ]" };

    let lines = vec![
        Line::raw(""),
        Line::raw("Title:"),
        field_line(&form.title, true, accent),
        Line::raw(""),
        Line::from(vec![Span::styled(done_mark, accent), Span::raw(" Done (Tab)")]),
        Line::raw(""),
        Line::raw("Enter to save  ·  Ctrl+D to delete  ·  Esc to cancel"),
    ];
    modal(f, area, 10, " Edit Task ", lines, palette);
}

/// New interval form
pub fn render_interval_form(f: &mut Frame, app: &AppState, palette: &Palette, area: Rect) {
    let Some(form) = &app.interval_form else {
        return;
    };
    let accent = palette.modal_title_style();
    let label = |text: &'static str, field: IntervalField| {
        if form.field == field {
            Line::raw(format!("{text}: (editing)"))
        } else {
            Line::raw(format!("{text}:"))
        }
    };

    let mut lines = vec![
        Line::raw(""),
        label("Start (HH:MM)", IntervalField::Start),
        field_line(&form.start, form.field == IntervalField::Start, accent),
        label("End (HH:MM)", IntervalField::End),
        field_line(&form.end, form.field == IntervalField::End, accent),
        label("Title", IntervalField::Title),
        field_line(&form.title, form.field == IntervalField::Title, accent),
        Line::raw(""),
    ];
    match &form.error {
        Some(err) => lines.push(Line::styled(err.to_string(), palette.error_style())),
        None => lines.push(Line::raw("Tab to switch fields  ·  Enter to add  ·  Esc to cancel")),
    }

    let title = format!(" Add Interval · {} ", app.snapshot.selected_date.format("%Y-%m-%d"));
    modal(f, area, 12, &title, lines, palette);
}

/// Go-to-date prompt
pub fn render_date_prompt(f: &mut Frame, app: &AppState, palette: &Palette, area: Rect) {
    let Some(prompt) = &app.date_prompt else {
        return;
    };
    let mut lines = vec![
        Line::raw(""),
        Line::raw("Date (YYYY-MM-DD):"),
        field_line(&prompt.text, true, palette.modal_title_style()),
        Line::raw(""),
    ];
    if let Some(err) = &prompt.error {
        lines.push(Line::styled(err.to_string(), palette.error_style()));
    }
    modal(f, area, 8, " Go to Date ", lines, palette);
}
