//! Plain-text chapter source
//!
//! Splits a book's text on heading lines such as `Chapter 1`, `CHAPTER IV`,
//! `Book Two` or `Part 3: The Flood`. Text before the first heading is kept as
//! its own chapter; blank chapters are dropped.

use crate::application::ports::outbound::ChapterSourcePort;

const HEADING_KEYWORDS: [&str; 6] = ["Chapter", "CHAPTER", "Book", "BOOK", "Part", "PART"];

const NUMBER_WORDS: [&str; 20] = [
    "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten", "eleven",
    "twelve", "thirteen", "fourteen", "fifteen", "sixteen", "seventeen", "eighteen", "nineteen",
    "twenty",
];

/// Longest line still considered a heading
const MAX_HEADING_CHARS: usize = 80;

#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextChapterSource;

impl PlainTextChapterSource {
    pub fn new() -> Self {
        Self
    }
}

impl ChapterSourcePort for PlainTextChapterSource {
    fn split_chapters(&self, document: &str) -> Vec<String> {
        let mut chapters = Vec::new();
        let mut current = String::new();

        for line in document.lines() {
            if is_heading(line) {
                if current.trim().is_empty() {
                    current.clear();
                } else {
                    chapters.push(std::mem::take(&mut current));
                }
            }
            current.push_str(line);
            current.push('\n');
        }
        chapters.push(current);

        chapters
            .into_iter()
            .map(|chapter| chapter.trim().to_string())
            .filter(|chapter| !is_blank_chapter(chapter))
            .collect()
    }
}

/// A chapter holding nothing but its own heading counts as blank
fn is_blank_chapter(chapter: &str) -> bool {
    chapter
        .lines()
        .filter(|line| !line.trim().is_empty())
        .all(is_heading)
}

/// `Keyword Ordinal`, optionally followed by a separator and a short title
/// (`Part 3: The Flood`, `CHAPTER IV. In Which...`, `Book Two - Winter`).
/// Anything else after the ordinal is prose, not a heading.
fn is_heading(line: &str) -> bool {
    let line = line.trim();
    if line.is_empty() || line.chars().count() > MAX_HEADING_CHARS {
        return false;
    }

    let mut words = line.split_whitespace();
    let Some(keyword) = words.next() else {
        return false;
    };
    if !HEADING_KEYWORDS.contains(&keyword) {
        return false;
    }
    let Some(number) = words.next() else {
        return false;
    };

    let ordinal = number.trim_end_matches(is_title_separator);
    if !is_ordinal(ordinal) {
        return false;
    }

    let separated = ordinal.len() < number.len();
    match words.next() {
        None => true,
        Some(_) if separated => true,
        Some(word) => word.chars().all(is_title_separator) && words.next().is_some(),
    }
}

fn is_title_separator(c: char) -> bool {
    matches!(c, ':' | '.' | '-' | '\u{2013}' | '\u{2014}')
}

fn is_ordinal(word: &str) -> bool {
    if word.is_empty() {
        return false;
    }
    word.chars().all(|c| c.is_ascii_digit())
        || word.chars().all(|c| "IVXLCDM".contains(c))
        || NUMBER_WORDS.contains(&word.to_lowercase().as_str())
}
