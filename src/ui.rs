// UI layer: the interactive menu. A `MenuController` owns the in-memory
// catalog for the session, reads one choice per iteration and dispatches
// it. Every mutation is followed by a full save before the next prompt.

use crate::api::{MetadataFetcher, OmdbClient};
use crate::catalog::Catalog;
use crate::config::Config;
use crate::error::InputClosed;
use crate::model::MovieRecord;
use crate::storage::{CatalogStorage, JsonFileStorage};
use anyhow::Result;
use dialoguer::Input;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{self, BufRead, IsTerminal, StdinLock, Stdout, Write};
use std::time::Duration;

/// Line-based text input. An attended terminal is read with `dialoguer`,
/// piped input with plain line reads; tests feed a script.
pub trait Prompt {
    fn read_line(&mut self, prompt: &str) -> Result<String>;
}

/// Reads each answer with `dialoguer::Input`. Empty answers are allowed
/// so that blank fields behave like any other malformed input.
#[derive(Debug, Default)]
pub struct DialoguerPrompt;

impl Prompt for DialoguerPrompt {
    fn read_line(&mut self, prompt: &str) -> Result<String> {
        let text: String = Input::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()?;
        Ok(text)
    }
}

/// Echoes the prompt followed by ": " and reads one line. End of input
/// is reported as `InputClosed`.
pub struct LinePrompt<R, W> {
    input: R,
    out: W,
}

impl<R: BufRead, W: Write> LinePrompt<R, W> {
    pub fn new(input: R, out: W) -> Self {
        LinePrompt { input, out }
    }

    pub fn output(&self) -> &W {
        &self.out
    }
}

impl<R: BufRead, W: Write> Prompt for LinePrompt<R, W> {
    fn read_line(&mut self, prompt: &str) -> Result<String> {
        write!(self.out, "{}: ", prompt)?;
        self.out.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(InputClosed.into());
        }
        let len = line.trim_end_matches(&['\n', '\r'][..]).len();
        line.truncate(len);
        Ok(line)
    }
}

/// Prompt used by the real program: `dialoguer` only when both stdin and
/// stderr (where dialoguer draws) are terminals.
pub enum TerminalPrompt {
    Interactive(DialoguerPrompt),
    Piped(LinePrompt<StdinLock<'static>, Stdout>),
}

impl TerminalPrompt {
    pub fn detect() -> Self {
        if io::stdin().is_terminal() && io::stderr().is_terminal() {
            TerminalPrompt::Interactive(DialoguerPrompt)
        } else {
            log::debug!("terminal not attended, reading plain lines from stdin");
            TerminalPrompt::Piped(LinePrompt::new(io::stdin().lock(), io::stdout()))
        }
    }
}

impl Prompt for TerminalPrompt {
    fn read_line(&mut self, prompt: &str) -> Result<String> {
        match self {
            TerminalPrompt::Interactive(p) => p.read_line(prompt),
            TerminalPrompt::Piped(p) => p.read_line(prompt),
        }
    }
}

/// Where the controller is in its lifecycle. Loading happens once in
/// `run` before the first `Ready`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuState {
    Ready,
    Exited,
}

/// One entry of the main menu, keyed by a single-character code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Add,
    Delete,
    Update,
    Search,
    Fetch,
    Exit,
}

impl MenuChoice {
    pub fn parse(code: &str) -> Option<Self> {
        match code {
            "1" => Some(MenuChoice::Add),
            "2" => Some(MenuChoice::Delete),
            "3" => Some(MenuChoice::Update),
            "4" => Some(MenuChoice::Search),
            "5" => Some(MenuChoice::Fetch),
            "e" => Some(MenuChoice::Exit),
            _ => None,
        }
    }
}

const MENU_LINES: [&str; 5] = [
    "1. Add New Movie",
    "2. Delete a Movie",
    "3. Update Movies",
    "4. Search for a Movie",
    "5. Fetch Movies",
];

/// Drives the menu against any prompt, storage, fetcher and output sink.
pub struct MenuController<P, S, F, W> {
    prompt: P,
    storage: S,
    fetcher: F,
    out: W,
    catalog: Catalog,
}

impl<P, S, F, W> MenuController<P, S, F, W>
where
    P: Prompt,
    S: CatalogStorage,
    F: MetadataFetcher,
    W: Write,
{
    pub fn new(prompt: P, storage: S, fetcher: F, out: W) -> Self {
        MenuController {
            prompt,
            storage,
            fetcher,
            out,
            catalog: Catalog::new(),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    pub fn output(&self) -> &W {
        &self.out
    }

    /// Load the catalog, list it, then loop until the user exits or input
    /// runs out. A load failure is reported and ends the session without
    /// entering the loop.
    pub fn run(&mut self) -> Result<()> {
        match self.storage.load() {
            Ok(catalog) => self.catalog = catalog,
            Err(e) => {
                log::error!("could not load catalog: {:?}", e);
                writeln!(self.out, "{}", e)?;
                return Ok(());
            }
        }
        self.list_movies()?;

        let mut state = MenuState::Ready;
        while state == MenuState::Ready {
            state = match self.step() {
                Ok(next) => next,
                Err(e) if e.is::<InputClosed>() => {
                    log::info!("input closed, leaving the menu");
                    MenuState::Exited
                }
                Err(e) => return Err(e),
            };
        }
        Ok(())
    }

    /// Print the menu, read one choice and handle it.
    pub fn step(&mut self) -> Result<MenuState> {
        for line in MENU_LINES {
            writeln!(self.out, "{}", line)?;
        }
        let input = self
            .prompt
            .read_line("Please select an option or 'e' to exit")?;

        let Some(choice) = MenuChoice::parse(&input) else {
            writeln!(self.out, "Invalid choice")?;
            return Ok(MenuState::Ready);
        };
        log::debug!("menu choice {:?}", choice);

        match choice {
            MenuChoice::Add => self.handle_add()?,
            MenuChoice::Delete => self.handle_delete()?,
            MenuChoice::Update => self.handle_update()?,
            MenuChoice::Search => self.handle_search()?,
            MenuChoice::Fetch => self.handle_fetch()?,
            MenuChoice::Exit => return Ok(MenuState::Exited),
        }
        Ok(MenuState::Ready)
    }

    fn handle_add(&mut self) -> Result<()> {
        let movie = self.read_movie()?;
        self.catalog.add_movie(movie);
        self.persist()
    }

    /// Removes every exact name match and saves even if nothing matched.
    fn handle_delete(&mut self) -> Result<()> {
        self.list_movies()?;
        let name = self
            .prompt
            .read_line("Enter the name of the movie you want to delete")?;
        let removed = self.catalog.remove_movie(&name);
        log::info!("removed {} movie(s) named {:?}", removed, name);
        self.persist()
    }

    /// Overwrites the first exact name match. Nothing is saved when the
    /// name is unknown.
    fn handle_update(&mut self) -> Result<()> {
        self.list_movies()?;
        let name = self
            .prompt
            .read_line("Enter the name of the movie you want to update")?;
        let Some(index) = self.catalog.find_by_name(&name) else {
            writeln!(self.out, "The movie you want to update does not exist")?;
            return Ok(());
        };
        let movie = self.read_movie()?;
        self.catalog.replace(index, movie);
        self.persist()
    }

    fn handle_search(&mut self) -> Result<()> {
        let filter = self
            .prompt
            .read_line("Search Filter (name/year/director/genres/rating)")?;
        let text = self.prompt.read_line("Search Text")?;

        let matches = self.catalog.search(&filter, &text);
        writeln!(self.out, "Search Result:")?;
        if matches.is_empty() {
            writeln!(self.out, "No movies match your search text")?;
        } else {
            for movie in matches {
                writeln!(self.out, "{}", movie.summary_line())?;
            }
            writeln!(self.out)?;
        }
        Ok(())
    }

    fn handle_fetch(&mut self) -> Result<()> {
        let title = self.prompt.read_line("Enter the movie name to fetch")?;

        let spinner = ProgressBar::new_spinner();
        spinner.set_style(ProgressStyle::with_template("{spinner} {msg}")?);
        spinner.set_message("Fetching...");
        spinner.enable_steady_tick(Duration::from_millis(100));
        let result = self.fetcher.fetch(&title);
        spinner.finish_and_clear();

        match result {
            Ok(movie) => {
                self.catalog.add_movie(movie);
                self.persist()
            }
            Err(e) => {
                log::warn!("fetch for {:?} failed: {:?}", title, e);
                writeln!(self.out, "Error Fetching Data from API: {}", e)?;
                Ok(())
            }
        }
    }

    /// Ask for the five fields in a fixed order.
    fn read_movie(&mut self) -> Result<MovieRecord> {
        let name = self.prompt.read_line("Name")?;
        let year = self.prompt.read_line("Release Year")?;
        let director = self.prompt.read_line("Director")?;
        let rating = self.prompt.read_line("Rating")?;
        let genres = self.prompt.read_line("Genres (comma-separated)")?;
        Ok(MovieRecord::from_text(&name, &year, &director, &rating, &genres))
    }

    fn list_movies(&mut self) -> Result<()> {
        for movie in self.catalog.movies() {
            writeln!(self.out, "{}", movie.summary_line())?;
        }
        Ok(())
    }

    /// Write the whole catalog back. A failed save is reported and the
    /// session carries on with the in-memory catalog.
    fn persist(&mut self) -> Result<()> {
        match self.storage.save(&self.catalog) {
            Ok(()) => writeln!(self.out, "Movies Updated Successfully")?,
            Err(e) => {
                log::error!("could not save catalog: {:?}", e);
                writeln!(self.out, "{}", e)?;
            }
        }
        Ok(())
    }
}

/// Main interactive menu wired to the terminal, the catalog file and the
/// OMDb client. Blocks until the user exits.
pub fn main_menu(config: &Config) -> Result<()> {
    println!("Welcome to the Movies Catalog");
    println!("Reading movies from {}...", config.catalog_path.display());

    let storage = JsonFileStorage::new(&config.catalog_path);
    let fetcher = OmdbClient::from_config(config)?;
    let mut controller =
        MenuController::new(TerminalPrompt::detect(), storage, fetcher, io::stdout());
    controller.run()
}
