use itertools::Itertools;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

use crate::app::App;
use crate::game::{EndReason, RoundSummary};

use super::{accent_style, bands, bold_style, dim_style, italic_style};

const LABEL_WIDTH: usize = 8;

pub fn render_setup(app: &App, area: Rect, buf: &mut Buffer) {
    let engine = &app.engine;
    let config = engine.configuration();

    let chunks = bands(
        area,
        &[
            Constraint::Length(1), // title
            Constraint::Length(1),
            Constraint::Length(1), // mode
            Constraint::Length(1), // length
            Constraint::Length(1), // categories
            Constraint::Length(1),
            Constraint::Min(0), // panel or last round
            Constraint::Length(1), // start hint
            Constraint::Length(1), // legend
        ],
    );

    Paragraph::new(Span::styled("wordrush", accent_style()))
        .alignment(Alignment::Center)
        .render(chunks[0], buf);

    let mode = match config.mode {
        Some(mode) => Span::styled(format!("◀ {mode} ▶"), bold_style()),
        None => Span::styled("← pick one →", dim_style()),
    };
    Paragraph::new(labelled("mode", vec![mode])).render(chunks[2], buf);

    let mut length = vec![match config.round_length {
        Some(length) => Span::styled(format!("{}s", length.secs()), bold_style()),
        None => Span::styled("_", dim_style()),
    }];
    if let Some(mode) = config.mode {
        let note = if engine.timer_rules().resets_on_new_word(mode) {
            "  resets on every word"
        } else {
            "  one clock for the whole round"
        };
        length.push(Span::styled(note, italic_style()));
    }
    Paragraph::new(labelled("length", length)).render(chunks[3], buf);

    let selection = engine.selection();
    let words = if selection.is_empty() {
        vec![Span::styled("none (tab to choose)", dim_style())]
    } else {
        let pool = selection.snapshot_pool(engine.repository()).len();
        vec![
            Span::styled(selection.iter().join(", "), bold_style()),
            Span::styled(format!("  {pool} words"), italic_style()),
        ]
    };
    Paragraph::new(labelled("words", words)).render(chunks[4], buf);

    if engine.category_panel_open() {
        render_category_panel(app, chunks[6], buf);
    } else if let Some(summary) = engine.last_round() {
        render_last_round(summary, chunks[6], buf);
    }

    let hint = if engine.can_start() {
        Span::styled("(enter) start", accent_style())
    } else {
        Span::styled("pick a mode, a length and at least one category", dim_style())
    };
    Paragraph::new(hint)
        .alignment(Alignment::Center)
        .render(chunks[7], buf);

    let legend = if engine.category_panel_open() {
        "(↑/↓) move / (space) toggle / (tab) done"
    } else {
        "(←/→) mode / (0-9, backspace) length / (tab) categories / (esc)ape"
    };
    Paragraph::new(Span::styled(legend, italic_style())).render(chunks[8], buf);
}

fn labelled<'a>(label: &'a str, mut value: Vec<Span<'a>>) -> Line<'a> {
    let mut spans = vec![Span::styled(
        format!("{label:<width$}", width = LABEL_WIDTH),
        Style::default().fg(Color::Cyan),
    )];
    spans.append(&mut value);
    Line::from(spans)
}

fn render_category_panel(app: &App, area: Rect, buf: &mut Buffer) {
    let engine = &app.engine;
    let selection = engine.selection();

    let visible = area.height.saturating_sub(2) as usize;
    let skip = (app.category_cursor + 1).saturating_sub(visible);

    let lines: Vec<Line> = engine
        .repository()
        .categories()
        .iter()
        .enumerate()
        .skip(skip)
        .take(visible)
        .map(|(idx, category)| {
            let marker = if selection.contains(&category.name) {
                "[x]"
            } else {
                "[ ]"
            };
            let style = if idx == app.category_cursor {
                bold_style().add_modifier(Modifier::REVERSED)
            } else {
                Style::default()
            };
            Line::from(vec![
                Span::styled(format!("{marker} {}", category.name), style),
                Span::styled(format!("  {}", category.words.len()), dim_style()),
            ])
        })
        .collect();

    Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("categories"))
        .render(area, buf);
}

fn render_last_round(summary: &RoundSummary, area: Rect, buf: &mut Buffer) {
    let headline = match summary.reason {
        EndReason::TimeUp => "Time's up!",
        EndReason::PoolExhausted => "Every word played!",
        EndReason::EmptyPool => "Those categories have no words",
        EndReason::Abandoned => "Round ended",
    };
    let shown = match summary.words.len() {
        1 => "1 word".to_string(),
        n => format!("{n} words"),
    };

    let lines = vec![
        Line::from(vec![
            Span::styled(headline, accent_style()),
            Span::styled(
                format!(
                    "  {shown} / {} / {}",
                    summary.mode,
                    summary.ended_at.format("%H:%M")
                ),
                italic_style(),
            ),
        ]),
        Line::from(Span::styled(summary.words.iter().join(", "), dim_style())),
    ];

    Paragraph::new(lines)
        .block(Block::default().borders(Borders::TOP).title("last round"))
        .wrap(Wrap { trim: true })
        .render(area, buf);
}
