//! Picks what to read from a page: the selection, else the main content
//! region, else the whole body.

use alloc::{string::String, vec::Vec};

/// Minimum trimmed length (in characters) for a content region to be used.
pub const MIN_REGION_CHARS: usize = 100;

/// Structural hints for where the main content of a page lives, in priority
/// order.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ContentHint {
    Article,
    RoleMain,
    Main,
    PostContent,
    ArticleContent,
    EntryContent,
    Content,
}

impl ContentHint {
    pub const PRIORITY: [Self; 7] = [
        Self::Article,
        Self::RoleMain,
        Self::Main,
        Self::PostContent,
        Self::ArticleContent,
        Self::EntryContent,
        Self::Content,
    ];

    pub const fn selector(self) -> &'static str {
        match self {
            Self::Article => "article",
            Self::RoleMain => "[role=\"main\"]",
            Self::Main => "main",
            Self::PostContent => ".post-content",
            Self::ArticleContent => ".article-content",
            Self::EntryContent => ".entry-content",
            Self::Content => ".content",
        }
    }

    pub fn from_selector(selector: &str) -> Option<Self> {
        Self::PRIORITY
            .into_iter()
            .find(|hint| hint.selector() == selector)
    }
}

/// A block of rendered text tagged with the hint it matched.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PageRegion {
    pub hint: ContentHint,
    pub text: String,
}

/// Rendered text of one page, as a host sees it.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct PageSnapshot {
    pub selection: String,
    /// Regions in document order; only the first region per hint is consulted.
    pub regions: Vec<PageRegion>,
    pub body: String,
}

impl PageSnapshot {
    pub fn from_body(body: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            ..Self::default()
        }
    }

    pub fn with_selection(mut self, selection: impl Into<String>) -> Self {
        self.selection = selection.into();
        self
    }

    pub fn with_region(mut self, hint: ContentHint, text: impl Into<String>) -> Self {
        self.regions.push(PageRegion {
            hint,
            text: text.into(),
        });
        self
    }

    fn first_region(&self, hint: ContentHint) -> Option<&PageRegion> {
        self.regions.iter().find(|region| region.hint == hint)
    }

    /// The text a reader should get for this page, trimmed. Empty when the
    /// page has no text at all.
    pub fn reading_text(&self) -> &str {
        let selection = self.selection.trim();
        if !selection.is_empty() {
            return selection;
        }

        for hint in ContentHint::PRIORITY {
            let Some(region) = self.first_region(hint) else {
                continue;
            };
            let text = region.text.trim();
            if text.chars().count() > MIN_REGION_CHARS {
                return text;
            }
        }

        self.body.trim()
    }
}

/// Request understood by a page.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TabMessage {
    GetSelection,
}

/// Page answer to a [`TabMessage`].
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct TabReply {
    pub text: String,
}

pub fn handle_tab_message(page: &PageSnapshot, message: TabMessage) -> TabReply {
    match message {
        TabMessage::GetSelection => TabReply {
            text: String::from(page.reading_text()),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn long_text(word: &str) -> String {
        let mut text = String::new();
        while text.chars().count() <= MIN_REGION_CHARS {
            text.push_str(word);
            text.push(' ');
        }
        text
    }

    #[test]
    fn selection_wins_and_is_trimmed() {
        let page = PageSnapshot::from_body("body text")
            .with_region(ContentHint::Article, long_text("article"))
            .with_selection("  picked words \n");
        assert_eq!(page.reading_text(), "picked words");
    }

    #[test]
    fn regions_follow_priority_not_document_order() {
        let page = PageSnapshot::from_body("body text")
            .with_region(ContentHint::Content, long_text("generic"))
            .with_region(ContentHint::Main, long_text("main"));
        assert!(page.reading_text().starts_with("main"));
    }

    #[test]
    fn short_regions_are_skipped() {
        let exactly_limit = "x".repeat(MIN_REGION_CHARS);
        let page = PageSnapshot::from_body("  the body  ")
            .with_region(ContentHint::Article, "too short")
            .with_region(ContentHint::Main, format!("  {exactly_limit}  "));
        assert_eq!(page.reading_text(), "the body");
    }

    #[test]
    fn only_first_region_per_hint_counts() {
        let page = PageSnapshot::from_body("body")
            .with_region(ContentHint::Article, "teaser")
            .with_region(ContentHint::Article, long_text("second"));
        assert_eq!(page.reading_text(), "body");
    }

    #[test]
    fn blank_page_reads_empty() {
        let page = PageSnapshot::from_body(" \n ").with_selection("   ");
        assert_eq!(page.reading_text(), "");
        assert_eq!(
            handle_tab_message(&page, TabMessage::GetSelection),
            TabReply::default()
        );
    }

    #[test]
    fn selectors_round_trip_through_hints() {
        for hint in ContentHint::PRIORITY {
            assert_eq!(ContentHint::from_selector(hint.selector()), Some(hint));
        }
        assert_eq!(ContentHint::from_selector("div"), None);
    }
}
