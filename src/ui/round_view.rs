use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Rect},
    style::Color,
    text::Span,
    widgets::{Block, BorderType, Borders, Padding, Paragraph, Widget, Wrap},
};
use unicode_width::UnicodeWidthStr;

use crate::app::App;

use super::{bands, bold_style, centered_rect, dim_style, italic_style};

const CARD_PADDING: u16 = 6;
const CARD_HEIGHT: u16 = 5;
const HURRY_SECS: u32 = 3;

pub fn render_round(app: &App, area: Rect, buf: &mut Buffer) {
    let engine = &app.engine;
    let Some(round) = engine.round() else {
        return;
    };
    let view = engine.round_view();

    let chunks = bands(
        area,
        &[
            Constraint::Length(1), // mode + timer
            Constraint::Min(CARD_HEIGHT),
            Constraint::Length(1), // progress
            Constraint::Length(1), // legend
        ],
    );

    let timer = match view.remaining_seconds {
        Some(secs) => {
            let style = if secs <= HURRY_SECS {
                bold_style().fg(Color::Red)
            } else {
                bold_style()
            };
            Span::styled(format!("{}  {secs}s", round.mode()), style)
        }
        None => Span::styled(format!("{}", round.mode()), dim_style()),
    };
    Paragraph::new(timer)
        .alignment(Alignment::Center)
        .render(chunks[0], buf);

    match view.current_word {
        Some(word) => {
            let width = (word.width() as u16).saturating_add(CARD_PADDING);
            let card = centered_rect(width, CARD_HEIGHT, chunks[1]);
            Paragraph::new(Span::styled(word, bold_style().fg(Color::Green)))
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_type(BorderType::Rounded)
                        .padding(Padding::vertical(1)),
                )
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true })
                .render(card, buf);
        }
        None => {
            let card = centered_rect(chunks[1].width, 1, chunks[1]);
            Paragraph::new(Span::styled("shuffling...", italic_style()))
                .alignment(Alignment::Center)
                .render(card, buf);
        }
    }

    let progress = format!(
        "word {} of {}",
        view.seen_words.len(),
        round.pool().len()
    );
    Paragraph::new(Span::styled(progress, dim_style()))
        .alignment(Alignment::Center)
        .render(chunks[2], buf);

    Paragraph::new(Span::styled(
        "(space, enter, click) next word / (esc) end round",
        italic_style(),
    ))
    .render(chunks[3], buf);
}
