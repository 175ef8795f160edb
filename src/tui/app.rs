use crate::app::{NewsError, Result};
use crate::domain::Article;
use crate::list::ListController;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    List,
    Detail,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Search,
}

/// UI state on top of the list controller: which screen is shown, the
/// cursor, the search input buffer and a transient status message.
pub struct TuiApp {
    pub list: ListController,
    pub screen: Screen,
    pub input_mode: InputMode,
    pub search_input: String,
    pub selected: usize,
    pub detail_scroll: u16,
    pub status_message: Option<String>,
    pub should_quit: bool,
}

impl TuiApp {
    pub fn new(list: ListController) -> Self {
        Self {
            list,
            screen: Screen::List,
            input_mode: InputMode::Normal,
            search_input: String::new(),
            selected: 0,
            detail_scroll: 0,
            status_message: None,
            should_quit: false,
        }
    }

    pub fn selected_article(&self) -> Option<&Article> {
        self.list.articles.get(self.selected)
    }

    pub fn move_up(&mut self) {
        match self.screen {
            Screen::List => {
                if self.selected > 0 {
                    self.selected -= 1;
                }
            }
            Screen::Detail => {
                self.detail_scroll = self.detail_scroll.saturating_sub(1);
            }
        }
    }

    /// Move the cursor down. Returns true when the cursor was already on the
    /// last row, which is the list's scroll-to-end signal.
    pub fn move_down(&mut self) -> bool {
        match self.screen {
            Screen::List => {
                if self.list.articles.is_empty() {
                    return false;
                }
                if self.selected + 1 < self.list.articles.len() {
                    self.selected += 1;
                    false
                } else {
                    true
                }
            }
            Screen::Detail => {
                self.detail_scroll = self.detail_scroll.saturating_add(1);
                false
            }
        }
    }

    /// Keep the cursor inside the list after a replace or append.
    pub fn clamp_selection(&mut self) {
        if self.list.articles.is_empty() {
            self.selected = 0;
        } else if self.selected >= self.list.articles.len() {
            self.selected = self.list.articles.len() - 1;
        }
    }

    pub fn open_detail(&mut self) {
        if self.selected_article().is_some() {
            self.screen = Screen::Detail;
            self.detail_scroll = 0;
        }
    }

    pub fn close_detail(&mut self) {
        self.screen = Screen::List;
    }

    pub fn set_status(&mut self, message: String) {
        self.status_message = Some(message);
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    /// Open the selected article's original URL in the system handler.
    pub fn open_selected_in_browser(&self) -> Result<()> {
        let Some(article) = self.selected_article() else {
            return Ok(());
        };
        open::that(&article.url).map_err(|e| NewsError::LinkOpen(e.to_string()))
    }
}
