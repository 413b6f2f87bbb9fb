use anyhow::{Result, bail};
use std::path::PathBuf;

/// Parsed command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Args {
    /// Print the outline and exit instead of starting the TUI
    pub outline: bool,
    /// Start with every top-level section collapsed
    pub collapsed: bool,
    pub article: Option<PathBuf>,
}

impl Args {
    pub fn parse<I>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = String>,
    {
        let mut parsed = Args::default();
        for arg in args {
            match arg.as_str() {
                "--outline" => parsed.outline = true,
                "--collapsed" => parsed.collapsed = true,
                flag if flag.starts_with("--") => bail!("Unknown option: {flag}"),
                path => {
                    if parsed.article.is_some() {
                        bail!("Only one article can be opened at a time");
                    }
                    parsed.article = Some(PathBuf::from(path));
                }
            }
        }
        Ok(parsed)
    }
}

pub fn usage(program_name: &str) -> String {
    format!("Usage: {program_name} [--outline] [--collapsed] [article-file]")
}
