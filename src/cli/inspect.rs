//! Non-interactive commands that print backend data

use anyhow::{Context, Result};
use clap::Args;
use std::io::{self, Write};
use tracing::debug;

use crate::backend::{Backend, WordNode};

#[derive(Args, Debug)]
pub struct PackagesCommand {
    /// Print JSON instead of one name per line
    #[arg(long)]
    pub json: bool,
}

impl PackagesCommand {
    pub async fn execute(&self, backend: &dyn Backend) -> Result<()> {
        let packages = backend
            .fetch_packages()
            .await
            .context("Failed to fetch packages")?;
        debug!("Fetched {} packages", packages.len());

        self.print(&packages, &mut io::stdout().lock())
    }

    fn print(&self, packages: &[String], out: &mut impl Write) -> Result<()> {
        if self.json {
            serde_json::to_writer_pretty(&mut *out, &packages)?;
            writeln!(out)?;
        } else {
            for package in packages {
                writeln!(out, "{}", package)?;
            }
        }
        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct WordsCommand {
    /// Print the raw tree as JSON instead of an outline
    #[arg(long)]
    pub json: bool,
}

impl WordsCommand {
    pub async fn execute(&self, backend: &dyn Backend) -> Result<()> {
        let words = backend.fetch_words().await.context("Failed to fetch words")?;
        self.print(&words, &mut io::stdout().lock())
    }

    fn print(&self, words: &[WordNode], out: &mut impl Write) -> Result<()> {
        if self.json {
            serde_json::to_writer_pretty(&mut *out, words)?;
            writeln!(out)?;
        } else {
            write_outline(out, words, 0)?;
        }
        Ok(())
    }
}

/// One line per word, children indented by two spaces per level
pub fn write_outline(out: &mut impl Write, words: &[WordNode], depth: usize) -> io::Result<()> {
    for word in words {
        let indent = "  ".repeat(depth);
        match word.data.as_deref().filter(|label| !label.is_empty() && *label != word.name) {
            Some(label) => writeln!(out, "{}{} - {}", indent, word.name, label)?,
            None => writeln!(out, "{}{}", indent, word.name)?,
        }
        write_outline(out, &word.children, depth + 1)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_words() -> Vec<WordNode> {
        vec![
            WordNode::new("declaration").opened().with_children(vec![
                WordNode::new("function").with_label("define a function"),
                WordNode::new("variable").with_label("variable"),
            ]),
            WordNode::new("types"),
        ]
    }

    fn output(bytes: Vec<u8>) -> String {
        String::from_utf8(bytes).unwrap()
    }

    fn packages() -> Vec<String> {
        vec!["alpha".to_string(), "beta".to_string()]
    }

    #[test]
    fn test_packages_plain() {
        let mut out = Vec::new();
        PackagesCommand { json: false }.print(&packages(), &mut out).unwrap();
        assert_eq!(output(out), "alpha\nbeta\n");
    }

    #[test]
    fn test_packages_json() {
        let mut out = Vec::new();
        PackagesCommand { json: true }.print(&packages(), &mut out).unwrap();
        let parsed: Vec<String> = serde_json::from_str(&output(out)).unwrap();
        assert_eq!(parsed, vec!["alpha", "beta"]);
    }

    #[test]
    fn test_words_outline() {
        let mut out = Vec::new();
        WordsCommand { json: false }.print(&sample_words(), &mut out).unwrap();
        assert_eq!(
            output(out),
            "declaration\n  function - define a function\n  variable\ntypes\n"
        );
    }

    #[test]
    fn test_words_json_keeps_shape() {
        let mut out = Vec::new();
        WordsCommand { json: true }.print(&sample_words(), &mut out).unwrap();
        let parsed: Vec<WordNode> = serde_json::from_str(&output(out)).unwrap();
        assert_eq!(parsed[0].state.as_deref(), Some("open"));
        assert_eq!(parsed[0].children.len(), 2);
    }
}
