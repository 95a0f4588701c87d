use std::path::PathBuf;

use clap::Parser;

/// Speed-read a document one word or phrase at a time.
#[derive(Debug, Parser)]
#[command(name = "quickread", version)]
pub(super) struct Cli {
    /// Document to read. `-` reads standard input.
    pub document: Option<PathBuf>,

    /// Read only this passage, as if it were selected in the document.
    #[arg(long, value_name = "TEXT")]
    pub select: Option<String>,

    /// Reading rate in words per minute.
    #[arg(long, value_parser = clap::value_parser!(u16).range(1..))]
    pub wpm: Option<u16>,

    /// Group short phrases into one chunk.
    #[arg(long, overrides_with = "no_chunking")]
    chunking: bool,

    /// Show one word at a time.
    #[arg(long, overrides_with = "chunking")]
    no_chunking: bool,

    /// Settings file. Defaults to `quickread/settings.toml` in the user config dir.
    #[arg(long, value_name = "PATH")]
    settings: Option<PathBuf>,

    /// Read the built-in sample page.
    #[arg(long, conflicts_with = "document")]
    pub demo: bool,

    /// Print one line per chunk instead of drawing a full-screen view.
    #[arg(long)]
    pub plain: bool,
}

impl Cli {
    /// The chunking override, if either flag was given.
    pub fn chunking(&self) -> Option<bool> {
        match (self.chunking, self.no_chunking) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        }
    }

    pub fn settings_path(&self) -> Option<PathBuf> {
        self.settings.clone().or_else(|| {
            dirs::config_dir().map(|dir| dir.join("quickread").join("settings.toml"))
        })
    }

    pub fn reads_stdin(&self) -> bool {
        self.document
            .as_ref()
            .is_some_and(|path| path.as_os_str() == "-")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chunking_flags_last_one_wins() {
        let cli = Cli::try_parse_from(["quickread", "--chunking", "--no-chunking"]).unwrap();
        assert_eq!(cli.chunking(), Some(false));

        let cli = Cli::try_parse_from(["quickread", "--no-chunking", "--chunking"]).unwrap();
        assert_eq!(cli.chunking(), Some(true));

        let cli = Cli::try_parse_from(["quickread"]).unwrap();
        assert_eq!(cli.chunking(), None);
    }

    #[test]
    fn zero_wpm_is_rejected() {
        assert!(Cli::try_parse_from(["quickread", "--wpm", "0"]).is_err());
        let cli = Cli::try_parse_from(["quickread", "--wpm", "450"]).unwrap();
        assert_eq!(cli.wpm, Some(450));
    }

    #[test]
    fn demo_conflicts_with_document() {
        assert!(Cli::try_parse_from(["quickread", "--demo", "notes.txt"]).is_err());
    }

    #[test]
    fn dash_reads_stdin() {
        let cli = Cli::try_parse_from(["quickread", "-"]).unwrap();
        assert!(cli.reads_stdin());

        let cli = Cli::try_parse_from(["quickread", "--settings", "/tmp/qr", "notes.txt"]).unwrap();
        assert!(!cli.reads_stdin());
        assert_eq!(cli.settings_path(), Some(PathBuf::from("/tmp/qr")));
    }
}
