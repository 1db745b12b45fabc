use std::cell::Cell;
use std::io;
use std::path::Path;
use std::rc::Rc;
use std::time::{Duration, Instant};

use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;

use crate::anim::{FieldConfig, LineField};
use crate::io::{catalog_io, config_io};
use crate::model::{CatalogItem, KioskConfig, SelectedItem};
use crate::ops::filter_catalog;
use crate::store::{FileBackend, SelectionStore, default_state_dir};

use super::input;
use super::render;
use super::theme::Theme;

/// Which screen is currently displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Home,
    Catalog,
    Contact,
}

/// Current interaction mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Navigate,
    /// Typing a catalog search query.
    Search,
    /// Typing into one of the enquiry form fields.
    Form,
}

/// Catalog browser state.
#[derive(Debug, Clone, Default)]
pub struct CatalogViewState {
    pub cursor: usize,
    pub scroll: usize,
    /// Committed filter applied to the listing.
    pub query: String,
    /// Query being typed in Search mode.
    pub search_input: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactField {
    Items,
    Name,
    Email,
    Message,
}

impl ContactField {
    pub fn next(self) -> Self {
        match self {
            ContactField::Items => ContactField::Name,
            ContactField::Name => ContactField::Email,
            ContactField::Email => ContactField::Message,
            ContactField::Message => ContactField::Items,
        }
    }
}

/// Contact screen state: cursor over the selected items plus the
/// free-form enquiry fields.
#[derive(Debug, Clone)]
pub struct ContactViewState {
    pub cursor: usize,
    pub scroll: usize,
    pub focus: ContactField,
    pub name: String,
    pub email: String,
    pub message: String,
}

impl Default for ContactViewState {
    fn default() -> Self {
        ContactViewState {
            cursor: 0,
            scroll: 0,
            focus: ContactField::Items,
            name: String::new(),
            email: String::new(),
            message: String::new(),
        }
    }
}

impl ContactViewState {
    /// The general form sends only once name, email, and message are
    /// all non-blank.
    pub fn can_send(&self) -> bool {
        !self.name.trim().is_empty()
            && !self.email.trim().is_empty()
            && !self.message.trim().is_empty()
    }
}

/// The two animated surfaces mounted while the Home view is showing.
/// Leaving Home drops them; coming back starts fresh, like a page
/// remount.
pub struct HomeSurfaces {
    pub hero: LineField,
    pub hero_area: Rect,
    pub divider: LineField,
    pub divider_area: Rect,
}

impl HomeSurfaces {
    pub fn new(config: &KioskConfig) -> Self {
        let field = FieldConfig::from(&config.anim);
        HomeSurfaces {
            hero: LineField::new(field.clone()),
            hero_area: Rect::default(),
            divider: LineField::new(field),
            divider_area: Rect::default(),
        }
    }

    /// Resize an engine when its layout rectangle changes. A terminal
    /// cell is 2x4 Braille sub-pixels, the canvas resolution the
    /// engines work in.
    pub fn ensure_hero(&mut self, area: Rect) {
        if area != self.hero_area {
            self.hero_area = area;
            self.hero.resize(u32::from(area.width) * 2, u32::from(area.height) * 4);
        }
    }

    pub fn ensure_divider(&mut self, area: Rect) {
        if area != self.divider_area {
            self.divider_area = area;
            self.divider
                .resize(u32::from(area.width) * 2, u32::from(area.height) * 4);
        }
    }
}

/// Main application state.
pub struct App {
    pub config: KioskConfig,
    pub theme: Theme,
    pub catalog: Vec<CatalogItem>,
    pub store: SelectionStore,
    /// Cached read of the selection, refreshed after each mutation via
    /// the store's change notification.
    pub selection: Vec<SelectedItem>,
    selection_dirty: Rc<Cell<bool>>,
    pub view: View,
    pub mode: Mode,
    pub catalog_state: CatalogViewState,
    pub contact_state: ContactViewState,
    /// Present only while the Home view is mounted.
    pub home: Option<HomeSurfaces>,
    pub status: Option<String>,
    pub show_help: bool,
    pub should_quit: bool,
    started: Instant,
}

impl App {
    pub fn new(config: KioskConfig, catalog: Vec<CatalogItem>, mut store: SelectionStore) -> Self {
        let theme = Theme::from_config(&config.ui);

        let selection_dirty = Rc::new(Cell::new(false));
        let flag = Rc::clone(&selection_dirty);
        store.subscribe(move |_| flag.set(true));
        let selection = store.selection();

        let mut app = App {
            home: None,
            theme,
            catalog,
            store,
            selection,
            selection_dirty,
            view: View::Home,
            mode: Mode::Navigate,
            catalog_state: CatalogViewState::default(),
            contact_state: ContactViewState::default(),
            status: None,
            show_help: false,
            should_quit: false,
            started: Instant::now(),
            config,
        };
        app.home = Some(HomeSurfaces::new(&app.config));
        app
    }

    /// Seconds since the app started; the animation clock.
    pub fn now(&self) -> f64 {
        self.started.elapsed().as_secs_f64()
    }

    /// Re-read the selection if a mutation notified since last sync.
    pub fn sync_selection(&mut self) {
        if self.selection_dirty.get() {
            self.selection = self.store.selection();
            self.selection_dirty.set(false);
            let len = self.selection.len();
            if self.contact_state.cursor >= len {
                self.contact_state.cursor = len.saturating_sub(1);
            }
        }
    }

    pub fn is_selected(&self, partnumber: &str) -> bool {
        self.selection.iter().any(|i| i.partnumber == partnumber)
    }

    /// Catalog entries after the committed search filter.
    pub fn visible_catalog(&self) -> Vec<&CatalogItem> {
        filter_catalog(&self.catalog, &self.catalog_state.query)
    }

    /// Switch views; Home surfaces unmount on leave and remount fresh
    /// on entry.
    pub fn enter_view(&mut self, view: View) {
        if self.view == view {
            return;
        }
        if self.view == View::Home {
            self.home = None;
        }
        if view == View::Home {
            self.home = Some(HomeSurfaces::new(&self.config));
        }
        self.view = view;
        self.mode = Mode::Navigate;
    }

    /// Advance the animated surfaces one frame.
    pub fn tick_animations(&mut self) {
        let now = self.started.elapsed().as_secs_f64();
        if let Some(home) = &mut self.home {
            home.hero.tick(now);
            home.divider.tick(now);
        }
    }

    /// Reshuffle both fields, keeping current segments fading.
    pub fn reset_animations(&mut self) {
        if let Some(home) = &mut self.home {
            home.hero.reset();
            home.divider.reset();
        }
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status = Some(message.into());
    }
}

/// Run the TUI application.
pub fn run(root: &Path, state_dir_override: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let config = config_io::read_config(root)?;
    // the catalog is required; fail before touching the terminal
    let catalog = catalog_io::load_catalog(root, &config.catalog)?;

    let state_dir = match state_dir_override {
        Some(dir) => dir.to_path_buf(),
        None => match &config.store.dir {
            Some(dir) => root.join(dir),
            None => default_state_dir().unwrap_or_else(|| root.join(".ae-kiosk")),
        },
    };
    let store = SelectionStore::new(Box::new(FileBackend::new(state_dir)));

    let mut app = App::new(config, catalog, store);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    result
}

/// One iteration per frame: sync, tick, draw, then drain input. The
/// animation engines are touched only here and in the input handlers,
/// all on this thread.
fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        app.sync_selection();
        app.tick_animations();
        terminal.draw(|frame| render::render(frame, app))?;

        if event::poll(Duration::from_millis(33))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    input::handle_key(app, key);
                }
                Event::Mouse(mouse) => input::handle_mouse(app, mouse),
                _ => {}
            }
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}
