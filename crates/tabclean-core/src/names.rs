//! Name list utilities: parsing, sorting and letter tallies

use crate::error::Result;
use crate::loader::read_text;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Order for [`sort_names`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NameOrder {
    #[default]
    Alpha,
    Length,
}

/// Parse the first line of `text` as a lowercase, comma-separated name list
pub fn parse_names(text: &str) -> Vec<String> {
    text.lines()
        .next()
        .unwrap_or_default()
        .trim()
        .to_lowercase()
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

/// Read and parse a name list file
pub fn read_names<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    Ok(parse_names(&read_text(path)?))
}

pub fn sort_alphabetically(names: &[String]) -> Vec<String> {
    let mut sorted = names.to_vec();
    sorted.sort();
    sorted
}

/// Sort by character count; equal lengths keep their input order
pub fn sort_by_length(names: &[String]) -> Vec<String> {
    let mut sorted = names.to_vec();
    sorted.sort_by_key(|name| name.chars().count());
    sorted
}

pub fn sort_names(names: &[String], order: NameOrder) -> Vec<String> {
    match order {
        NameOrder::Alpha => sort_alphabetically(names),
        NameOrder::Length => sort_by_length(names),
    }
}

/// Count alphabetic characters across all names
pub fn count_letters(names: &[String]) -> BTreeMap<char, usize> {
    let mut counts = BTreeMap::new();
    for letter in names.iter().flat_map(|n| n.chars()).filter(|c| c.is_alphabetic()) {
        *counts.entry(letter).or_insert(0) += 1;
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_first_line_only() {
        let parsed = parse_names("Anna, Bo ,CARL,,\nignored,line\n");
        assert_eq!(parsed, names(&["anna", "bo", "carl"]));
        assert!(parse_names("").is_empty());
    }

    #[test]
    fn test_sorting() {
        let list = names(&["carl", "bo", "anna", "al"]);
        assert_eq!(sort_alphabetically(&list), names(&["al", "anna", "bo", "carl"]));
        assert_eq!(sort_by_length(&list), names(&["bo", "al", "carl", "anna"]));
        assert_eq!(
            sort_names(&sort_alphabetically(&list), NameOrder::Length),
            names(&["al", "bo", "anna", "carl"])
        );
    }

    #[test]
    fn test_count_letters_skips_non_alpha() {
        let counts = count_letters(&names(&["ann-marie", "bo2"]));
        assert_eq!(counts.get(&'a'), Some(&2));
        assert_eq!(counts.get(&'n'), Some(&2));
        assert_eq!(counts.get(&'b'), Some(&1));
        assert_eq!(counts.get(&'-'), None);
        assert_eq!(counts.get(&'2'), None);
        assert_eq!(counts.values().sum::<usize>(), 10);
    }

    #[test]
    fn test_count_letters_non_ascii() {
        let counts = count_letters(&names(&["søren", "åse"]));
        assert_eq!(counts.get(&'ø'), Some(&1));
        assert_eq!(counts.get(&'å'), Some(&1));
        assert_eq!(counts.get(&'e'), Some(&2));
    }
}
