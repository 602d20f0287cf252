use super::api::CatalogApi;
use super::app::{App, Form, InputMode, Page};

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, Tabs},
};

fn page_title(page: Page) -> &'static str {
    match page {
        Page::Authors => "authors",
        Page::Books => "books",
        Page::Add => "add book",
        Page::Login => "login",
    }
}

pub fn draw<A: CatalogApi>(f: &mut Frame, app: &App<A>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Navigation
            Constraint::Length(if app.banner.is_some() { 3 } else { 0 }),
            Constraint::Min(0),    // Page content
            Constraint::Length(1), // Footer
        ])
        .split(f.area());

    draw_nav(f, app, chunks[0]);
    draw_banner(f, app, chunks[1]);

    match app.page {
        Page::Authors => draw_authors(f, app, chunks[2]),
        Page::Books => draw_books(f, app, chunks[2]),
        Page::Add => draw_form(f, &app.book_form, app.input_mode, "Add book", chunks[2]),
        Page::Login => draw_form(f, &app.login_form, app.input_mode, "Login", chunks[2]),
    }

    draw_footer(f, app, chunks[3]);
}

fn draw_nav<A: CatalogApi>(f: &mut Frame, app: &App<A>, area: Rect) {
    let pages = app.pages();
    let mut titles: Vec<Line> = pages.iter().map(|p| Line::from(page_title(*p))).collect();
    if app.is_logged_in() {
        titles.push(Line::from(Span::styled(
            "logout (o)",
            Style::default().fg(Color::DarkGray),
        )));
    }
    let selected = pages.iter().position(|p| *p == app.page).unwrap_or(0);

    let tabs = Tabs::new(titles)
        .block(Block::default().borders(Borders::ALL).title(" Library "))
        .select(selected)
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        );
    f.render_widget(tabs, area);
}

fn draw_banner<A: CatalogApi>(f: &mut Frame, app: &App<A>, area: Rect) {
    let Some(banner) = &app.banner else {
        return;
    };
    let paragraph = Paragraph::new(banner.message.as_str())
        .style(Style::default().fg(Color::Red))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        );
    f.render_widget(paragraph, area);
}

fn draw_authors<A: CatalogApi>(f: &mut Frame, app: &App<A>, area: Rect) {
    let chunks = if app.is_logged_in() {
        Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(3)])
            .split(area)
    } else {
        Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0)])
            .split(area)
    };

    let editing = app.input_mode == InputMode::Editing;
    let rows = app.authors.iter().enumerate().map(|(i, author)| {
        let style = if editing && i == app.born_form.selected_author {
            Style::default().add_modifier(Modifier::REVERSED)
        } else {
            Style::default()
        };
        Row::new(vec![
            Cell::from(author.name.clone()),
            Cell::from(author.born.map(|b| b.to_string()).unwrap_or_default()),
            Cell::from(author.book_count.map(|c| c.to_string()).unwrap_or_default()),
        ])
        .style(style)
    });

    let table = Table::new(
        rows,
        [
            Constraint::Percentage(60),
            Constraint::Percentage(20),
            Constraint::Percentage(20),
        ],
    )
    .header(header_row(&["", "born", "books"]))
    .block(Block::default().borders(Borders::ALL).title(" Authors "));
    f.render_widget(table, chunks[0]);

    if app.is_logged_in() {
        let target = app
            .authors
            .get(app.born_form.selected_author)
            .map(|a| a.name.as_str())
            .unwrap_or("-");
        let border = if editing { Color::Yellow } else { Color::DarkGray };
        let form = Paragraph::new(Line::from(vec![
            Span::raw(format!("{target}  born: ")),
            Span::styled(
                app.born_form.year.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
        ]))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border))
                .title(" Set birthyear "),
        );
        f.render_widget(form, chunks[1]);
    }
}

fn draw_books<A: CatalogApi>(f: &mut Frame, app: &App<A>, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)])
        .split(area);

    let rows = app.visible_books().iter().map(|book| {
        Row::new(vec![
            Cell::from(book.title.clone()),
            Cell::from(book.author.name.clone()),
            Cell::from(book.published.to_string()),
        ])
    });
    let title = match &app.genre_filter {
        Some(genre) => format!(" Books in genre {genre} "),
        None => " Books ".to_string(),
    };
    let table = Table::new(
        rows,
        [
            Constraint::Percentage(50),
            Constraint::Percentage(35),
            Constraint::Percentage(15),
        ],
    )
    .header(header_row(&["", "author", "published"]))
    .block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(table, chunks[0]);

    let mut buttons = vec![Span::raw(" ")];
    let labels = std::iter::once("all genres".to_string()).chain(app.genres());
    for (i, label) in labels.enumerate() {
        let style = if i == app.selected_genre {
            Style::default().fg(Color::Black).bg(Color::Yellow)
        } else {
            Style::default().fg(Color::Yellow)
        };
        buttons.push(Span::styled(format!("[{label}]"), style));
        buttons.push(Span::raw(" "));
    }
    let bar = Paragraph::new(Line::from(buttons))
        .block(Block::default().borders(Borders::ALL).title(" Genres "));
    f.render_widget(bar, chunks[1]);
}

fn draw_form(f: &mut Frame, form: &Form, mode: InputMode, title: &str, area: Rect) {
    let lines: Vec<Line> = form
        .fields
        .iter()
        .enumerate()
        .map(|(i, field)| {
            let value = if field.masked {
                "*".repeat(field.value.chars().count())
            } else {
                field.value.clone()
            };
            let focused = mode == InputMode::Editing && i == form.focus;
            let label_style = if focused {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            let cursor = if focused { "_" } else { "" };
            Line::from(vec![
                Span::styled(format!("{:>26}: ", field.label), label_style),
                Span::raw(format!("{value}{cursor}")),
            ])
        })
        .collect();

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" {title} ")),
    );
    f.render_widget(paragraph, area);
}

fn header_row(labels: &[&'static str]) -> Row<'static> {
    Row::new(labels.iter().map(|l| Cell::from(*l)).collect::<Vec<_>>())
        .style(Style::default().add_modifier(Modifier::BOLD))
}

fn draw_footer<A: CatalogApi>(f: &mut Frame, app: &App<A>, area: Rect) {
    let mode = match app.input_mode {
        InputMode::Normal => Span::styled(" NORMAL ", Style::default().bg(Color::Blue).fg(Color::White)),
        InputMode::Editing => Span::styled(" EDIT ", Style::default().bg(Color::Green).fg(Color::Black)),
    };

    let hints = match (app.input_mode, app.page) {
        (InputMode::Editing, Page::Authors) => "↑/↓ author  0-9 year  Enter save  Esc back",
        (InputMode::Editing, _) => "Tab next field  Enter submit  Esc back",
        (InputMode::Normal, Page::Books) => "←/→ genre  Enter filter  Tab page  r refresh  q quit",
        (InputMode::Normal, Page::Authors) if app.is_logged_in() => {
            "e set birthyear  Tab page  r refresh  q quit"
        }
        (InputMode::Normal, _) => "Tab page  e edit  r refresh  q quit",
    };

    let footer = Paragraph::new(Line::from(vec![
        mode,
        Span::raw(" "),
        Span::styled(hints, Style::default().fg(Color::DarkGray)),
    ]));
    f.render_widget(footer, area);
}
