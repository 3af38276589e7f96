//! Interactive console session
//!
//! The navigator owns the display settings and a scanner, reads commands one
//! line at a time and renders into any `WriteColor`. Every browse step
//! re-scans the current folder, so settings edits and filesystem changes show
//! up on the next render. End of input ends the session from any prompt.

mod command;
mod resolve;

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use termcolor::{Color, ColorSpec, WriteColor};

use crate::diagnostics::Diagnostics;
use crate::metadata::FileEntry;
use crate::output::{EntryTable, Frame, TreeFormatter};
use crate::settings::{HighlightConfig, SettingKey, SettingValue};
use crate::tree::Scanner;

pub use command::Command;

const INVALID_OPTION: &str = "Invalid option. Please try again:";
const NOT_FOUND: &str = "The specified file or folder does not exist.";

/// Whether the session goes on after a screen returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

pub struct Navigator<R, W, D> {
    input: R,
    out: W,
    scanner: Scanner<D>,
    config: HighlightConfig,
}

impl<R: BufRead, W: WriteColor, D: Diagnostics> Navigator<R, W, D> {
    pub fn new(input: R, out: W, scanner: Scanner<D>, config: HighlightConfig) -> Self {
        Self {
            input,
            out,
            scanner,
            config,
        }
    }

    pub fn config(&self) -> &HighlightConfig {
        &self.config
    }

    pub fn into_output(self) -> W {
        self.out
    }

    /// Run the main menu until `3`, or until input runs out.
    pub fn run(&mut self) -> io::Result<()> {
        loop {
            Frame::new("menu")
                .item("1 - settings")
                .item("2 - start scanning")
                .item("3 - exit")
                .write_to(&mut self.out)?;
            writeln!(self.out, "Select an option:")?;

            let choice = loop {
                let Some(line) = self.read_line()? else {
                    return Ok(());
                };
                match line.trim() {
                    "1" => break 1,
                    "2" => break 2,
                    "3" => break 3,
                    _ => writeln!(self.out, "{}", INVALID_OPTION)?,
                }
            };

            let flow = match choice {
                1 => self.settings_menu()?,
                2 => self.start_scanning()?,
                _ => {
                    writeln!(self.out, "Exiting.")?;
                    Flow::Quit
                }
            };
            if flow == Flow::Quit {
                return Ok(());
            }
        }
    }

    /// `None` at end of input.
    fn read_line(&mut self) -> io::Result<Option<String>> {
        self.out.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    fn error(&mut self, message: &str) -> io::Result<()> {
        self.out.set_color(ColorSpec::new().set_fg(Some(Color::Red)))?;
        write!(self.out, "{}", message)?;
        self.out.reset()?;
        writeln!(self.out)
    }

    fn start_scanning(&mut self) -> io::Result<Flow> {
        write!(
            self.out,
            "Enter the full path to the file or folder (or 'back'): "
        )?;
        let Some(line) = self.read_line()? else {
            return Ok(Flow::Quit);
        };
        let input = line.trim();
        if input.eq_ignore_ascii_case("back") {
            return Ok(Flow::Continue);
        }

        let home = PathBuf::from(input);
        if home.is_file() {
            self.show_file(&home)?;
            return Ok(Flow::Continue);
        }
        if !home.is_dir() {
            self.error(NOT_FOUND)?;
            return Ok(Flow::Continue);
        }
        self.browse(&home)
    }

    fn browse(&mut self, home: &Path) -> io::Result<Flow> {
        let mut current = home.to_path_buf();
        loop {
            if !current.is_dir() {
                self.error("Current path is invalid.")?;
                return Ok(Flow::Continue);
            }

            let tree = self.scanner.scan(&current);
            TreeFormatter::new(&self.config).print(&tree, &mut self.out)?;
            action_frame().write_to(&mut self.out)?;
            writeln!(self.out, "Select an option:")?;

            let command = loop {
                let Some(line) = self.read_line()? else {
                    return Ok(Flow::Quit);
                };
                match Command::parse(&line) {
                    Some(command) => break command,
                    None => writeln!(self.out, "{}", INVALID_OPTION)?,
                }
            };
            log::debug!("browse {}: {:?}", current.display(), command);

            match command {
                Command::To(name) => {
                    let target = resolve::move_target(&mut self.scanner, home, &current, &name);
                    if target.is_dir() {
                        current = target;
                    } else {
                        self.error(&format!(
                            "Folder '{}' not found in '{}'. Tried path: {}",
                            name,
                            current.display(),
                            target.display()
                        ))?;
                    }
                }
                Command::Info(name) => {
                    self.show_info(&current, &name)?;
                    current = home.to_path_buf();
                }
                Command::FilesIn(name) => {
                    self.show_files(&current, &name, false)?;
                    current = home.to_path_buf();
                }
                Command::FilesInAll(name) => {
                    self.show_files(&current, &name, true)?;
                    current = home.to_path_buf();
                }
                Command::Back => return Ok(Flow::Continue),
            }
        }
    }

    fn show_file(&mut self, path: &Path) -> io::Result<()> {
        match self.scanner.describe_file(path) {
            Ok(entry) => EntryTable::files(&[entry], &self.config).print(&mut self.out),
            Err(e) => self.error(&e.to_string()),
        }
    }

    fn show_info(&mut self, current: &Path, name: &str) -> io::Result<()> {
        let target = resolve::info_target(&mut self.scanner, current, name);
        if target.is_dir() {
            match self.scanner.describe_folder(&target) {
                Ok(entry) => EntryTable::folders(&[entry], &self.config).print(&mut self.out),
                Err(e) => self.error(&e.to_string()),
            }
        } else if target.is_file() {
            self.show_file(&target)
        } else {
            self.error(NOT_FOUND)
        }
    }

    fn show_files(&mut self, current: &Path, name: &str, recursive: bool) -> io::Result<()> {
        let target = resolve::folder_target(&mut self.scanner, current, name);
        if !target.is_dir() {
            return self.error(&format!(
                "Folder '{}' not found starting from '{}'.",
                name,
                current.display()
            ));
        }

        let entries: Vec<FileEntry> = self
            .scanner
            .list_files(&target, recursive)
            .iter()
            .filter_map(|path| match self.scanner.describe_file(path) {
                Ok(entry) => Some(entry),
                Err(e) => {
                    log::warn!("skipping {}: {}", path.display(), e);
                    None
                }
            })
            .collect();
        EntryTable::files(&entries, &self.config).print(&mut self.out)
    }

    fn settings_menu(&mut self) -> io::Result<Flow> {
        loop {
            settings_frame(&self.config).write_to(&mut self.out)?;
            writeln!(self.out, "Select an option:")?;

            let key = loop {
                let Some(line) = self.read_line()? else {
                    return Ok(Flow::Quit);
                };
                let choice = line.trim();
                if choice.eq_ignore_ascii_case("back") {
                    return Ok(Flow::Continue);
                }
                match choice.parse().ok().and_then(SettingKey::from_menu_number) {
                    Some(key) => break key,
                    None => writeln!(self.out, "{}", INVALID_OPTION)?,
                }
            };

            let current = key.value(&self.config);
            writeln!(self.out, "Current value for {}: {}", key.label(), current)?;
            match current {
                SettingValue::Flag(_) => write!(self.out, "Enter new value (true/false): ")?,
                SettingValue::Megabytes(_) => write!(self.out, "Enter a new value in MB: ")?,
            }

            let Some(value) = self.read_line()? else {
                return Ok(Flow::Quit);
            };
            match key.apply(&mut self.config, &value) {
                Ok(()) => writeln!(self.out, "Updated!")?,
                Err(e) => {
                    log::debug!("{}", e);
                    writeln!(self.out, "Invalid input!")?;
                }
            }
        }
    }
}

fn action_frame() -> Frame {
    Frame::new("action")
        .item("<all file info in *folder*> - information about every file in the folder")
        .item(
            "<all file info in all folders *folder*> - the same, including every subfolder",
        )
        .item("<info *file*> - information about a file")
        .item("<info *folder*> - information about a folder")
        .item("<to *folder*> - move to a folder ('to home' goes back to the start)")
        .item("<back> - return to the main menu")
}

fn settings_frame(config: &HighlightConfig) -> Frame {
    let frame = SettingKey::ALL
        .iter()
        .enumerate()
        .fold(Frame::new("settings"), |frame, (i, key)| {
            frame.item(format!("({}) {}: {}", i + 1, key.label(), key.value(config)))
        });
    frame.item("write back to exit to the menu")
}
