//! Provider selection menu and console banner.

use std::io::{self, Write};

/// Choices offered by the top-level menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    /// `1`: render to the console.
    Console,
    /// `2`: append to a log file.
    FileLog,
    /// `3`: leave the application.
    Exit,
}

impl MenuChoice {
    /// Reads the choice from the first character of `token`.
    pub fn parse(token: &str) -> Option<Self> {
        match token.chars().next()? {
            '1' => Some(MenuChoice::Console),
            '2' => Some(MenuChoice::FileLog),
            '3' => Some(MenuChoice::Exit),
            _ => None,
        }
    }
}

/// Prints the welcome text shown once at startup.
pub fn print_banner(out: &mut dyn Write) -> io::Result<()> {
    writeln!(out, "Memory Tracking Console Application")?;
    writeln!(
        out,
        "This application displays total memory, used memory, and available memory."
    )?;
    writeln!(out, "Press 3 and Enter to exit the application.")?;
    writeln!(out, "Press 4 and Enter to return to the main menu.")?;
    writeln!(out)?;
    out.flush()
}

pub(crate) fn print_menu(out: &mut dyn Write) -> io::Result<()> {
    writeln!(out, "Choose an option:")?;
    writeln!(out, "1. Display memory information on the console")?;
    writeln!(out, "2. Save memory information to a file")?;
    writeln!(out, "3. Exit")?;
    out.flush()
}

pub(crate) fn print_invalid_choice(out: &mut dyn Write) -> io::Result<()> {
    writeln!(out, "Invalid option. Please choose again.")?;
    out.flush()
}

pub(crate) fn print_file_prompt(out: &mut dyn Write) -> io::Result<()> {
    write!(out, "Enter the output file name: ")?;
    out.flush()
}
