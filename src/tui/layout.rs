use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

use crate::domain::Category;
use crate::list::{Phase, ViewState};
use crate::tui::app::{InputMode, Screen, TuiApp};

pub fn render(frame: &mut Frame, app: &TuiApp) {
    match app.screen {
        Screen::List => render_list_screen(frame, app),
        Screen::Detail => render_detail_screen(frame, app),
    }
}

fn render_list_screen(frame: &mut Frame, app: &TuiApp) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Search + category bar
            Constraint::Min(5),    // Article list / loading / error / empty
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    render_filter_bar(frame, app, chunks[0]);
    render_main(frame, app, chunks[1]);
    render_status_bar(frame, app, chunks[2]);
}

fn render_filter_bar(frame: &mut Frame, app: &TuiApp, area: Rect) {
    let editing = app.input_mode == InputMode::Search;
    let border_style = if editing {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let search_line = if editing {
        Line::from(vec![
            Span::raw("Search: "),
            Span::styled(app.search_input.as_str(), Style::default().fg(Color::White)),
            Span::styled("█", Style::default().fg(Color::Cyan)),
        ])
    } else if app.list.search_query.trim().is_empty() {
        Line::from(Span::styled(
            "Search: (press / to search)",
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        Line::from(vec![
            Span::raw("Search: "),
            Span::styled(
                app.list.search_query.trim(),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            ),
            Span::styled("  (Esc clears)", Style::default().fg(Color::DarkGray)),
        ])
    };

    let mut spans = vec![Span::raw("Category: ")];
    let search_active = !app.list.search_query.trim().is_empty();
    let push_chip = |label: &str, selected: bool, spans: &mut Vec<Span>| {
        let style = if selected && search_active {
            // Stored but inert while a search is active
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::UNDERLINED)
        } else if selected {
            Style::default()
                .bg(Color::Cyan)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        spans.push(Span::styled(format!(" {label} "), style));
    };
    push_chip("all", app.list.selected_category.is_none(), &mut spans);
    for category in Category::ALL {
        push_chip(
            category.as_str(),
            app.list.selected_category == Some(category),
            &mut spans,
        );
    }

    let block = Block::default()
        .title(" News ")
        .borders(Borders::ALL)
        .border_style(border_style);
    let paragraph = Paragraph::new(vec![search_line, Line::from(spans)]).block(block);
    frame.render_widget(paragraph, area);
}

fn render_main(frame: &mut Frame, app: &TuiApp, area: Rect) {
    match app.list.view_state() {
        ViewState::Loading => {
            render_centered_message(frame, area, "Loading news...", Color::Cyan);
        }
        ViewState::Error(message) => {
            let lines = vec![
                Line::from(""),
                Line::from(Span::styled(
                    message.to_string(),
                    Style::default().fg(Color::Red),
                )),
                Line::from(""),
                Line::from(Span::styled(
                    "Press r to retry",
                    Style::default().fg(Color::DarkGray),
                )),
            ];
            let block = Block::default().borders(Borders::ALL);
            let paragraph = Paragraph::new(lines)
                .block(block)
                .alignment(ratatui::layout::Alignment::Center)
                .wrap(Wrap { trim: true });
            frame.render_widget(paragraph, area);
        }
        ViewState::Empty { search_mode } => {
            let message = if search_mode {
                "No results for your search"
            } else {
                "No headlines"
            };
            render_centered_message(frame, area, message, Color::DarkGray);
        }
        ViewState::List { loading_more } => {
            if loading_more {
                let chunks = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([Constraint::Min(3), Constraint::Length(1)])
                    .split(area);
                render_article_list(frame, app, chunks[0]);
                let footer = Paragraph::new(Span::styled(
                    "Loading more...",
                    Style::default().fg(Color::Cyan),
                ))
                .alignment(ratatui::layout::Alignment::Center);
                frame.render_widget(footer, chunks[1]);
            } else {
                render_article_list(frame, app, area);
            }
        }
    }
}

fn render_article_list(frame: &mut Frame, app: &TuiApp, area: Rect) {
    let items: Vec<ListItem> = app
        .list
        .articles
        .iter()
        .enumerate()
        .map(|(i, article)| {
            let date = article
                .published_at
                .map(|d| d.format("%m/%d").to_string())
                .unwrap_or_else(|| "     ".to_string());

            let content = format!("{} [{}] {}", date, article.display_source(), article.title);

            let style = if i == app.selected {
                Style::default()
                    .bg(Color::Cyan)
                    .fg(Color::Black)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };

            ListItem::new(content).style(style)
        })
        .collect();

    let title = format!(" Articles ({}) ", app.list.articles.len());
    let block = Block::default().title(title).borders(Borders::ALL);
    let list = List::new(items).block(block);
    frame.render_widget(list, area);
}

fn render_centered_message(frame: &mut Frame, area: Rect, message: &str, color: Color) {
    let block = Block::default().borders(Borders::ALL);
    let paragraph = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(message, Style::default().fg(color))),
    ])
    .block(block)
    .alignment(ratatui::layout::Alignment::Center);
    frame.render_widget(paragraph, area);
}

fn render_status_bar(frame: &mut Frame, app: &TuiApp, area: Rect) {
    let status = if app.input_mode == InputMode::Search {
        "Type query  Enter:Search  Esc:Cancel".to_string()
    } else if app.list.phase == Phase::Refreshing {
        "Refreshing...".to_string()
    } else if let Some(ref message) = app.status_message {
        message.clone()
    } else {
        "j/k:Navigate  Enter:Open  /:Search  h/l:Category  R:Refresh  o:Browser  q:Quit"
            .to_string()
    };

    let paragraph =
        Paragraph::new(status).style(Style::default().fg(Color::White).bg(Color::DarkGray));
    frame.render_widget(paragraph, area);
}

fn render_detail_screen(frame: &mut Frame, app: &TuiApp) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(5), Constraint::Length(1)])
        .split(frame.area());

    let (title, content) = if let Some(article) = app.selected_article() {
        let mut lines = Vec::new();

        lines.push(Line::from(Span::styled(
            article.title.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(""));

        lines.push(Line::from(Span::styled(
            format!("Source: {}", article.display_source()),
            Style::default().fg(Color::Yellow),
        )));
        if let Some(author) = &article.author {
            lines.push(Line::from(Span::styled(
                format!("By: {author}"),
                Style::default().fg(Color::Yellow),
            )));
        }
        if let Some(date) = article.published_at {
            lines.push(Line::from(Span::styled(
                format!("Date: {}", date.format("%Y-%m-%d %H:%M")),
                Style::default().fg(Color::Yellow),
            )));
        }
        lines.push(Line::from(Span::styled(
            format!("Link: {}", article.url),
            Style::default().fg(Color::Blue),
        )));
        if let Some(image) = &article.url_to_image {
            lines.push(Line::from(Span::styled(
                format!("Image: {image}"),
                Style::default().fg(Color::Blue),
            )));
        }
        lines.push(Line::from(""));
        lines.push(Line::from(
            "─".repeat(chunks[0].width.saturating_sub(2) as usize),
        ));
        lines.push(Line::from(""));

        if let Some(description) = &article.description {
            let decoded = html_escape::decode_html_entities(description);
            for line in decoded.lines() {
                lines.push(Line::from(Span::styled(
                    line.to_string(),
                    Style::default().add_modifier(Modifier::ITALIC),
                )));
            }
            lines.push(Line::from(""));
        }

        if let Some(body) = app.selected_article().and_then(|a| a.display_content()) {
            let decoded = html_escape::decode_html_entities(body);
            for line in decoded.lines() {
                lines.push(Line::from(line.to_string()));
            }
        }

        (format!(" {} ", article.display_source()), Text::from(lines))
    } else {
        (" Article ".to_string(), Text::from("No article selected"))
    };

    let block = Block::default().title(title).borders(Borders::ALL);
    let paragraph = Paragraph::new(content)
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((app.detail_scroll, 0));
    frame.render_widget(paragraph, chunks[0]);

    let help = Paragraph::new("j/k:Scroll  o:Open in browser  Esc:Back  q:Quit")
        .style(Style::default().fg(Color::White).bg(Color::DarkGray));
    frame.render_widget(help, chunks[1]);
}
