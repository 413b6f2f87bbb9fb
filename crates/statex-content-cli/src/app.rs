use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
};
use statex_content_engine::markup::Fragment;
use statex_content_engine::render::{VisibleBlock, flatten_visible};
use statex_content_engine::{BlockId, CollapsedSet, ContentBlock};

/// Terminal outline of one article.
///
/// The list shows the blocks that are currently visible; the selection is an
/// index into that list.
pub struct App {
    title: String,
    blocks: Vec<ContentBlock>,
    collapsed: CollapsedSet,
    list_state: ListState,
}

impl App {
    pub fn new(title: String, blocks: Vec<ContentBlock>, collapsed: CollapsedSet) -> Self {
        let mut list_state = ListState::default();
        if !blocks.is_empty() {
            list_state.select(Some(0));
        }
        Self {
            title,
            blocks,
            collapsed,
            list_state,
        }
    }

    pub fn visible(&self) -> Vec<VisibleBlock<'_>> {
        flatten_visible(&self.blocks, &self.collapsed)
    }

    pub fn selected(&self) -> Option<VisibleBlock<'_>> {
        let index = self.list_state.selected()?;
        self.visible().get(index).copied()
    }

    pub fn collapsed(&self) -> &CollapsedSet {
        &self.collapsed
    }

    pub fn next(&mut self) {
        let len = self.visible().len();
        if len == 0 {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) => (i + 1) % len,
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    pub fn previous(&mut self) {
        let len = self.visible().len();
        if len == 0 {
            return;
        }
        let i = match self.list_state.selected() {
            Some(0) | None => len - 1,
            Some(i) => i - 1,
        };
        self.list_state.select(Some(i));
    }

    fn selected_id(&self) -> Option<BlockId> {
        self.selected().map(|visible| visible.block.id)
    }

    pub fn toggle_selected(&mut self) {
        if let Some(id) = self.selected_id() {
            let now_collapsed = self.collapsed.toggle(id);
            log::debug!("{id} collapsed: {now_collapsed}");
        }
    }

    pub fn expand_selected(&mut self) {
        if let Some(id) = self.selected_id() {
            self.collapsed.expand(id);
        }
    }

    /// Collapse the selected block, or if it is already collapsed move the
    /// selection to its parent.
    pub fn collapse_selected(&mut self) {
        let Some(index) = self.list_state.selected() else {
            return;
        };
        let visible = self.visible();
        let Some(current) = visible.get(index).copied() else {
            return;
        };

        if !current.collapsed {
            let id = current.block.id;
            self.collapsed.collapse(id);
            return;
        }

        let parent = visible[..index]
            .iter()
            .rposition(|candidate| candidate.depth < current.depth);
        if let Some(parent) = parent {
            self.list_state.select(Some(parent));
        }
    }
}

/// Readable lines of a block's markup for the preview pane.
fn preview_lines(markup: &str) -> Vec<String> {
    let fragment = Fragment::parse(markup);
    fragment
        .nodes()
        .iter()
        .filter(|node| !matches!(node.tag(), Some("script" | "style")))
        .map(|node| {
            fragment
                .text_content(node)
                .split_whitespace()
                .collect::<Vec<_>>()
                .join(" ")
        })
        .filter(|line| !line.is_empty())
        .collect()
}

pub fn ui(f: &mut Frame, app: &mut App) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(f.area());

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
        .split(rows[0]);

    let visible = app.visible();

    let outline_items: Vec<ListItem> = visible
        .iter()
        .map(|item| {
            let indent = "  ".repeat(item.depth);
            let marker = if item.collapsed { "+ " } else { "- " };
            ListItem::new(Line::from(vec![
                Span::raw(indent),
                Span::styled(marker, Style::default().fg(Color::DarkGray)),
                Span::raw(item.block.title.clone()),
            ]))
        })
        .collect();

    let outline = List::new(outline_items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(app.title.clone()),
        )
        .highlight_style(Style::default().bg(Color::Yellow).fg(Color::Black));

    let content_text: Vec<Line> = match app.selected() {
        Some(selected) => {
            let mut lines = vec![
                Line::from(Span::styled(
                    selected.block.title.clone(),
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                Line::from(""),
            ];
            if selected.collapsed {
                lines.push(Line::from("Collapsed. Press Enter to expand."));
            } else {
                lines.extend(preview_lines(&selected.block.content).into_iter().map(Line::from));
            }
            lines
        }
        None => vec![Line::from("This article is empty")],
    };

    let content = Paragraph::new(content_text)
        .block(Block::default().borders(Borders::ALL).title("Content"))
        .wrap(Wrap { trim: true });

    f.render_stateful_widget(outline, chunks[0], &mut app.list_state);
    f.render_widget(content, chunks[1]);

    let help = Paragraph::new(Line::from(vec![
        Span::raw("q: Quit | "),
        Span::raw("↑/k: Previous | "),
        Span::raw("↓/j: Next | "),
        Span::raw("Enter/Space: Toggle | →: Expand | ←: Collapse"),
    ]));
    f.render_widget(help, rows[1]);
}
