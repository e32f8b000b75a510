//! Markup code pattern registry.
//!
//! One row per [`ReferenceKind`]. Id-bearing codes look like `#p1001#`;
//! formatting codes are a bare `#` plus a letter (`#b`, `#k`) and carry no id.
//!
//! Case sensitivity is per row: the entity codes and the colour codes match
//! either case, the list, progress-bar, player and image codes do not.
//! `#L1#` opens a list entry while `#l` closes it, so folding case there
//! would change what matches. Folding is ASCII only: `ſ` or the Kelvin sign
//! never stand in for a code letter.

use regex::{Regex, RegexBuilder};
use std::fmt;
use std::sync::LazyLock;

use crate::error::Result;
use crate::extractors::base::ReferenceKind;

/// A compiled text pattern usable by the extractor and the tokenizer
#[derive(Clone)]
pub struct Pattern {
    regex: Regex,
}

impl Pattern {
    /// Compile a case-sensitive pattern
    pub fn new(source: &str) -> Result<Self> {
        Ok(Self {
            regex: Regex::new(source)?,
        })
    }

    /// Compile a pattern that ignores ASCII and Unicode case
    pub fn case_insensitive(source: &str) -> Result<Self> {
        Ok(Self {
            regex: RegexBuilder::new(source).case_insensitive(true).build()?,
        })
    }

    /// Compile a pattern whose classes and case folding are ASCII only
    pub fn ascii(source: &str, case_insensitive: bool) -> Result<Self> {
        Ok(Self {
            regex: RegexBuilder::new(source)
                .unicode(false)
                .case_insensitive(case_insensitive)
                .build()?,
        })
    }

    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }

    /// Leftmost match in `text`
    pub fn find<'t>(&self, text: &'t str) -> Option<&'t str> {
        self.regex.find(text).map(|m| m.as_str())
    }

    /// Non-overlapping matches, left to right
    pub fn find_iter<'p, 't>(&'p self, text: &'t str) -> impl Iterator<Item = &'t str> + 'p
    where
        't: 'p,
    {
        self.regex.find_iter(text).map(|m| m.as_str())
    }
}

impl fmt::Debug for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Pattern").field(&self.as_str()).finish()
    }
}

/// One row of the registry
#[derive(Debug, Clone)]
pub struct PatternEntry {
    pub kind: ReferenceKind,
    /// Literal grammar, e.g. `#p[0-9]+#`
    pub grammar: &'static str,
    pub carries_id: bool,
    /// Letter following the leading `#`
    pub letter: char,
    pub case_insensitive: bool,
    pattern: Pattern,
}

impl PatternEntry {
    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    /// Id carried by a matched code.
    ///
    /// Every `#` and every occurrence of the kind's letter is removed from the
    /// matched text, wherever it sits; the remaining characters are the id.
    /// This is only equivalent to stripping a `#<letter>` prefix and `#` suffix
    /// while the letter can never occur among the id's characters, which holds
    /// for every id-bearing row because their ids are digits.
    pub fn extract_id(&self, matched: &str) -> String {
        if !self.carries_id {
            return String::new();
        }
        matched
            .chars()
            .filter(|&c| c != '#' && !self.is_letter(c))
            .collect()
    }

    fn is_letter(&self, c: char) -> bool {
        if self.case_insensitive {
            c.eq_ignore_ascii_case(&self.letter)
        } else {
            c == self.letter
        }
    }
}

// (kind, grammar, carries id, letter, case insensitive)
const REGISTRY_TABLE: [(ReferenceKind, &str, bool, char, bool); 24] = [
    (ReferenceKind::Map, "#m[0-9]+#", true, 'm', true),
    (ReferenceKind::Mob, "#o[0-9]+#", true, 'o', true),
    (ReferenceKind::Npc, "#p[0-9]+#", true, 'p', true),
    (ReferenceKind::Item, "#t[0-9]+#", true, 't', true),
    (ReferenceKind::ItemAlt, "#z[0-9]+#", true, 'z', true),
    (ReferenceKind::ItemPicture, "#i[0-9]+#", true, 'i', true),
    (ReferenceKind::ItemPictureAlt, "#v[0-9]+#", true, 'v', true),
    (ReferenceKind::SkillPicture, "#s[0-9]+#", true, 's', true),
    (ReferenceKind::SkillName, "#q[0-9]+#", true, 'q', true),
    (ReferenceKind::ItemCountInInventory, "#c[0-9]+#", true, 'c', true),
    (ReferenceKind::ListOpen, "#L[0-9]+#", true, 'L', false),
    (ReferenceKind::ListClose, "#l", false, 'l', false),
    (ReferenceKind::PlayerName, "#h #", false, 'h', false),
    (ReferenceKind::ProgressBar, "#B[%]+#", false, 'B', false),
    (ReferenceKind::Unknown, "#x", false, 'x', false),
    (ReferenceKind::ImageLocation, "#f[a-zA-Z]+#", false, 'f', false),
    (ReferenceKind::ImageLocationAlt, "#F[a-zA-Z]+#", false, 'F', false),
    (ReferenceKind::Bold, "#e", false, 'e', true),
    (ReferenceKind::NotBold, "#n", false, 'n', true),
    (ReferenceKind::BlueColor, "#b", false, 'b', true),
    (ReferenceKind::PurpleColor, "#d", false, 'd', true),
    (ReferenceKind::GreenColor, "#g", false, 'g', true),
    (ReferenceKind::BlackColor, "#k", false, 'k', true),
    (ReferenceKind::RedColor, "#r", false, 'r', true),
];

/// Any `#` + one character + digits; the default bulk tokenization pattern
const HYPERLINK_PREFIX: &str = "#.[0-9]+";

/// Formatting and layout codes, in scan order
const FORMATTING_KINDS: [ReferenceKind; 10] = [
    ReferenceKind::ListOpen,
    ReferenceKind::ListClose,
    ReferenceKind::ProgressBar,
    ReferenceKind::Bold,
    ReferenceKind::NotBold,
    ReferenceKind::BlueColor,
    ReferenceKind::PurpleColor,
    ReferenceKind::GreenColor,
    ReferenceKind::BlackColor,
    ReferenceKind::RedColor,
];

static SHARED_REGISTRY: LazyLock<PatternRegistry> = LazyLock::new(PatternRegistry::new);

/// Fixed table of compiled markup patterns
#[derive(Debug, Clone)]
pub struct PatternRegistry {
    entries: Vec<PatternEntry>,
    hyperlink_prefix: Pattern,
}

impl Default for PatternRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl PatternRegistry {
    /// Compile the whole table
    pub fn new() -> Self {
        let entries = REGISTRY_TABLE
            .iter()
            .map(|&(kind, grammar, carries_id, letter, case_insensitive)| {
                // Row grammars are ASCII; folding must agree with `extract_id`
                let pattern = Pattern::ascii(grammar, case_insensitive);
                PatternEntry {
                    kind,
                    grammar,
                    carries_id,
                    letter,
                    case_insensitive,
                    pattern: pattern.expect("registry grammar is a valid regex"),
                }
            })
            .collect();

        Self {
            entries,
            hyperlink_prefix: Pattern::case_insensitive(HYPERLINK_PREFIX)
                .expect("hyperlink grammar is a valid regex"),
        }
    }

    /// Process-wide registry, compiled on first use
    pub fn shared() -> &'static PatternRegistry {
        &SHARED_REGISTRY
    }

    pub fn entry(&self, kind: ReferenceKind) -> &PatternEntry {
        // Table rows follow ReferenceKind declaration order
        &self.entries[kind as usize]
    }

    pub fn pattern(&self, kind: ReferenceKind) -> &Pattern {
        self.entry(kind).pattern()
    }

    pub fn entries(&self) -> &[PatternEntry] {
        &self.entries
    }

    pub fn hyperlink_prefix(&self) -> &Pattern {
        &self.hyperlink_prefix
    }

    /// Formatting and layout patterns in their conventional scan order
    pub fn formatting_patterns(&self) -> Vec<&Pattern> {
        FORMATTING_KINDS
            .iter()
            .map(|&kind| self.pattern(kind))
            .collect()
    }

    /// Patterns for `kinds`, in the order given
    pub fn patterns_for(&self, kinds: &[ReferenceKind]) -> Vec<&Pattern> {
        kinds.iter().map(|&kind| self.pattern(kind)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> &'static PatternRegistry {
        PatternRegistry::shared()
    }

    #[test]
    fn test_rows_follow_kind_order() {
        for kind in ReferenceKind::ALL {
            assert_eq!(registry().entry(kind).kind, kind);
        }
    }

    #[test]
    fn test_id_bearing_codes() {
        let npc = registry().entry(ReferenceKind::Npc);
        let found = npc.pattern().find("Talk to #p1012000# now").unwrap();
        assert_eq!(found, "#p1012000#");
        assert_eq!(npc.extract_id(found), "1012000");

        let list = registry().entry(ReferenceKind::ListOpen);
        assert_eq!(list.extract_id("#L3#"), "3");
    }

    #[test]
    fn test_entity_codes_ignore_case() {
        let mob = registry().entry(ReferenceKind::Mob);
        let found = mob.pattern().find("hunt #O100100#").unwrap();
        assert_eq!(mob.extract_id(found), "100100");
    }

    #[test]
    fn test_list_codes_are_case_sensitive() {
        let open = registry().pattern(ReferenceKind::ListOpen);
        assert!(open.is_match("#L0#"));
        assert!(!open.is_match("#l0#"));

        let close = registry().pattern(ReferenceKind::ListClose);
        assert!(close.is_match("#l"));
        assert!(!close.is_match("#L"));

        let bar = registry().pattern(ReferenceKind::ProgressBar);
        assert!(bar.is_match("#B%%%#"));
        assert!(!bar.is_match("#b%%%#"));
    }

    #[test]
    fn test_formatting_codes_carry_no_id() {
        let bold = registry().entry(ReferenceKind::Bold);
        assert!(bold.pattern().is_match("#eImportant#n"));
        assert!(bold.pattern().is_match("#EImportant"));
        assert_eq!(bold.extract_id("#e"), "");

        let player = registry().entry(ReferenceKind::PlayerName);
        assert!(player.pattern().is_match("Hello #h #!"));
        assert_eq!(player.extract_id("#h #"), "");
    }

    #[test]
    fn test_image_location_matches_letters() {
        let image = registry().pattern(ReferenceKind::ImageLocation);
        assert_eq!(image.find("see #fUIicon# here"), Some("#fUIicon#"));
        assert!(!registry()
            .pattern(ReferenceKind::ImageLocationAlt)
            .is_match("#fUIicon#"));
    }

    #[test]
    fn test_id_extraction_removes_letter_anywhere() {
        // Not a prefix strip: the letter is dropped wherever it occurs
        let npc = registry().entry(ReferenceKind::Npc);
        assert_eq!(npc.extract_id("#p12p3#"), "123");
    }

    #[test]
    fn test_hyperlink_prefix() {
        let prefix = registry().hyperlink_prefix();
        let found: Vec<_> = prefix.find_iter("#p100# and #M200#").collect();
        assert_eq!(found, ["#p100", "#M200"]);
    }

    #[test]
    fn test_formatting_patterns_order() {
        let sources: Vec<_> = registry()
            .formatting_patterns()
            .iter()
            .map(|p| p.as_str().to_string())
            .collect();
        assert_eq!(sources.first().map(String::as_str), Some("#L[0-9]+#"));
        assert_eq!(sources.last().map(String::as_str), Some("#r"));
        assert_eq!(sources.len(), 10);
    }

    #[test]
    fn test_invalid_caller_pattern_is_rejected() {
        assert!(Pattern::new("#p[0-9+#").is_err());
    }

    #[test]
    fn test_case_folding_is_ascii_only() {
        let skill = registry().entry(ReferenceKind::SkillPicture);
        assert_eq!(skill.pattern().find("learn #\u{17F}1001#"), None);
        let found = skill.pattern().find("learn #S1001#").unwrap();
        assert_eq!(skill.extract_id(found), "1001");

        let black = registry().pattern(ReferenceKind::BlackColor);
        assert!(!black.is_match("#\u{212A}"));
        assert!(black.is_match("#K"));
    }

    #[test]
    fn test_hyperlink_prefix_stays_unicode() {
        let prefix = registry().hyperlink_prefix();
        assert_eq!(prefix.find("go #\u{e9}12 now"), Some("#\u{e9}12"));
    }
}
