use lending_desk::grid::Grid;
use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame, Terminal,
};
use std::io;

const PAGE_STEP: usize = 20;

/// One dashboard page: a grid plus its cursor and horizontal scroll.
pub struct PageView {
    pub grid: Grid,
    pub state: TableState,
    pub scroll: usize,
}

impl PageView {
    pub fn new(grid: Grid) -> Self {
        let mut state = TableState::default();
        if !grid.is_empty() {
            state.select(Some(0));
        }
        PageView {
            grid,
            state,
            scroll: 0,
        }
    }
}

pub struct App {
    pub pages: Vec<PageView>,
    pub current: usize,
    pub show_detail: bool,
}

impl App {
    pub fn new(grids: Vec<Grid>) -> Self {
        App {
            pages: grids.into_iter().map(PageView::new).collect(),
            current: 0,
            show_detail: false,
        }
    }

    pub fn page(&self) -> &PageView {
        &self.pages[self.current]
    }

    fn page_mut(&mut self) -> &mut PageView {
        &mut self.pages[self.current]
    }

    pub fn toggle_detail(&mut self) {
        self.show_detail = !self.show_detail;
    }

    pub fn next_page(&mut self) {
        self.current = (self.current + 1) % self.pages.len();
    }

    pub fn previous_page(&mut self) {
        self.current = (self.current + self.pages.len() - 1) % self.pages.len();
    }

    pub fn next(&mut self) {
        let page = self.page_mut();
        let len = page.grid.rows.len();
        if len == 0 {
            return;
        }
        let i = match page.state.selected() {
            Some(i) => {
                if i >= len - 1 {
                    0
                } else {
                    i + 1
                }
            }
            None => 0,
        };
        page.state.select(Some(i));
    }

    pub fn previous(&mut self) {
        let page = self.page_mut();
        let len = page.grid.rows.len();
        if len == 0 {
            return;
        }
        let i = match page.state.selected() {
            Some(i) => {
                if i == 0 {
                    len - 1
                } else {
                    i - 1
                }
            }
            None => 0,
        };
        page.state.select(Some(i));
    }

    pub fn page_down(&mut self) {
        let page = self.page_mut();
        let len = page.grid.rows.len();
        if len == 0 {
            return;
        }
        let i = match page.state.selected() {
            Some(i) => (i + PAGE_STEP).min(len - 1),
            None => 0,
        };
        page.state.select(Some(i));
    }

    pub fn page_up(&mut self) {
        let page = self.page_mut();
        let i = page.state.selected().map(|i| i.saturating_sub(PAGE_STEP));
        page.state.select(Some(i.unwrap_or(0)));
    }

    pub fn scroll_right(&mut self) {
        let page = self.page_mut();
        page.scroll = (page.scroll + 1).min(page.grid.max_scroll());
    }

    pub fn scroll_left(&mut self) {
        let page = self.page_mut();
        page.scroll = page.scroll.saturating_sub(1);
    }
}

pub fn run_ui(app: &mut App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the app
    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("Error: {:?}", err);
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                KeyCode::Enter => app.toggle_detail(),
                KeyCode::Tab => app.next_page(),
                KeyCode::BackTab => app.previous_page(),
                KeyCode::Down | KeyCode::Char('j') => app.next(),
                KeyCode::Up | KeyCode::Char('k') => app.previous(),
                KeyCode::Right | KeyCode::Char('l') => app.scroll_right(),
                KeyCode::Left | KeyCode::Char('h') => app.scroll_left(),
                KeyCode::PageDown => app.page_down(),
                KeyCode::PageUp => app.page_up(),
                KeyCode::Home => {
                    if !app.page().grid.is_empty() {
                        app.pages[app.current].state.select(Some(0));
                    }
                }
                KeyCode::End => {
                    let len = app.page().grid.rows.len();
                    if len > 0 {
                        app.pages[app.current].state.select(Some(len - 1));
                    }
                }
                _ => {}
            }
        }
    }
}

fn ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header with page tabs
            Constraint::Min(0),    // Content area
            Constraint::Length(3), // Status bar
        ])
        .split(f.size());

    render_header(f, chunks[0], app);

    if app.show_detail && !app.page().grid.is_empty() {
        let content_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(chunks[1]);

        render_table(f, content_chunks[0], app);
        render_detail_panel(f, content_chunks[1], app);
    } else {
        render_table(f, chunks[1], app);
    }

    render_status_bar(f, chunks[2], app);
}

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let mut tab_spans = vec![];
    for (i, page) in app.pages.iter().enumerate() {
        if i > 0 {
            tab_spans.push(Span::raw(" │ "));
        }

        let style = if i == app.current {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        tab_spans.push(Span::styled(page.grid.title.clone(), style));
    }

    tab_spans.push(Span::raw("  |  "));
    tab_spans.push(Span::styled(
        format!("Rows: {}", app.page().grid.rows.len()),
        Style::default().fg(Color::White),
    ));

    let header = Paragraph::new(vec![Line::from(tab_spans)]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );

    f.render_widget(header, area);
}

fn render_table(f: &mut Frame, area: Rect, app: &mut App) {
    let page = &mut app.pages[app.current];

    if page.grid.is_empty() {
        let empty = Paragraph::new(format!("\n  {}", page.grid.empty_state)).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::White))
                .title(format!(" {} ", page.grid.title)),
        );
        f.render_widget(empty, area);
        return;
    }

    let columns = page.grid.visible_columns(page.scroll);

    let header_cells = columns.iter().map(|c| {
        Cell::from(c.header).style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
    });
    let header = Row::new(header_cells)
        .style(Style::default().bg(Color::DarkGray))
        .height(1);

    let widths: Vec<Constraint> = columns.iter().map(|c| Constraint::Length(c.width)).collect();

    let rows = (0..page.grid.rows.len()).map(|i| {
        let cells = page
            .grid
            .visible_cells(i, page.scroll)
            .into_iter()
            .zip(columns.iter())
            .map(|(cell, col)| Cell::from(truncate(cell, col.width as usize)));
        Row::new(cells).height(1)
    });

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::White))
                .title(format!(" {} ", page.grid.title)),
        )
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("→ ");

    f.render_stateful_widget(table, area, &mut page.state);
}

fn render_detail_panel(f: &mut Frame, area: Rect, app: &App) {
    let page = app.page();
    let selected = page.state.selected();

    let fields = match selected {
        Some(row) => page.grid.row_fields(row),
        None => Vec::new(),
    };

    if fields.is_empty() {
        let no_selection = Paragraph::new("No row selected").block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow))
                .title(" Details "),
        );
        f.render_widget(no_selection, area);
        return;
    }

    let mut content = vec![Line::from("")];
    for (header, value) in fields {
        content.push(Line::from(vec![
            Span::styled(
                format!("  {}: ", header),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(value.to_string()),
        ]));
        content.push(Line::from(""));
    }
    content.push(Line::from(vec![Span::styled(
        "  Press Enter to close",
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::ITALIC),
    )]));

    let detail_panel = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow))
            .title(" Details "),
    );

    f.render_widget(detail_panel, area);
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let page = app.page();
    let selected = page.state.selected().map(|i| i + 1).unwrap_or(0);
    let total = page.grid.rows.len();

    let mut status_spans = vec![Span::styled(
        format!(" Row: {}/{} ", selected, total),
        Style::default().fg(Color::Cyan),
    )];

    if page.scroll > 0 {
        status_spans.push(Span::raw("| "));
        status_spans.push(Span::styled(
            format!("Cols +{} ", page.scroll),
            Style::default().fg(Color::Green),
        ));
    }

    status_spans.push(Span::raw("| "));
    status_spans.push(Span::styled("Enter", Style::default().fg(Color::Yellow)));
    status_spans.push(Span::raw(" Details | "));
    status_spans.push(Span::styled("Tab", Style::default().fg(Color::Yellow)));
    status_spans.push(Span::raw(" Page | "));
    status_spans.push(Span::styled("↑/↓", Style::default().fg(Color::Yellow)));
    status_spans.push(Span::raw(" Nav | "));
    status_spans.push(Span::styled("←/→", Style::default().fg(Color::Yellow)));
    status_spans.push(Span::raw(" Columns | "));
    status_spans.push(Span::styled("q", Style::default().fg(Color::Red)));
    status_spans.push(Span::raw(" Quit"));

    let status_bar = Paragraph::new(vec![Line::from(status_spans)]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White)),
    );

    f.render_widget(status_bar, area);
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
