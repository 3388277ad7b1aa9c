//! Paginated help text

use std::fs;
use std::io;
use std::path::Path;

/// Page break marker in help files
const PAGE_MARKER: &str = ".PA";

/// Help text split into pages
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelpDocument {
    pages: Vec<String>,
}

impl HelpDocument {
    /// Load a help file
    ///
    /// A missing file yields a single page saying so.
    pub fn load(path: &Path) -> io::Result<Self> {
        match fs::read(path) {
            Ok(bytes) => Ok(Self::parse(&String::from_utf8_lossy(&bytes))),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(Self {
                pages: vec![format!("help file not found: {}", path.display())],
            }),
            Err(err) => Err(err),
        }
    }

    /// Split raw help text into pages
    ///
    /// End-of-file markers are dropped, line endings normalized and the
    /// `\x02` control byte shown as a space. Blank pages are skipped.
    pub fn parse(raw: &str) -> Self {
        let text = raw
            .replace('\u{1a}', "")
            .replace("\r\n", "\n")
            .replace('\u{2}', " ");

        let mut pages: Vec<String> = text
            .split(PAGE_MARKER)
            .map(|page| page.trim_matches(|c: char| c == '\n' || c == '\r'))
            .filter(|page| !page.trim().is_empty())
            .map(str::to_string)
            .collect();

        if pages.is_empty() {
            pages.push("help file is empty".to_string());
        }

        Self { pages }
    }

    /// Number of pages (at least one)
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// Page by 1-based number, clamped into range
    pub fn page(&self, number: usize) -> (usize, &str) {
        let number = number.clamp(1, self.pages.len());
        (number, &self.pages[number - 1])
    }

    /// A page followed by its `-- page n/m --` footer
    pub fn render_page(&self, number: usize) -> String {
        let (number, text) = self.page(number);
        format!("{}\n-- page {}/{} --", text, number, self.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_pages() {
        let raw = "\r\nIntro\x02text\r\n.PA\r\n\r\n.PA\r\nSecond page\r\n\x1a";
        let doc = HelpDocument::parse(raw);

        assert_eq!(doc.len(), 2);
        assert_eq!(doc.page(1), (1, "Intro text"));
        assert_eq!(doc.page(2), (2, "Second page"));
        assert_eq!(doc.page(9), (2, "Second page"));
        assert_eq!(doc.page(0), (1, "Intro text"));
    }

    #[test]
    fn test_empty_file() {
        let doc = HelpDocument::parse("\x1a\r\n.PA\r\n");
        assert_eq!(doc.len(), 1);
        assert_eq!(doc.page(1).1, "help file is empty");
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let doc = HelpDocument::load(&dir.path().join("CALC.HLP")).unwrap();
        assert_eq!(doc.len(), 1);
        assert!(doc.page(1).1.starts_with("help file not found"));
    }

    #[test]
    fn test_render_page() {
        let doc = HelpDocument::parse("one.PAtwo");
        assert_eq!(doc.render_page(2), "two\n-- page 2/2 --");
    }
}
