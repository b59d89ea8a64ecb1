// Copyright (C) 2025 Andy Kurnia.

// The Navigator trait describes behaviors that control a navigation of
// a Dawg, and the Navigation driver walks the graph under a navigator's
// control. Concrete navigators here cover word lookup, wildcard pattern
// matching and rack permutation; the move generator adds two more.

use super::dawg::{Dawg, NavState, SEPARATOR};

use super::alphabet::BLANK;

pub trait Navigator {
    // Enter the edge whose prefix starts with this rune?
    fn push_edge(&mut self, chr: char) -> bool;
    // Keep trying sibling edges after the entered edge returns?
    fn pop_edge(&mut self) -> bool;
    // Willing to consume more characters?
    fn is_accepting(&self) -> bool;
    // Consume this character from the current edge's prefix?
    fn accepts(&mut self, chr: char) -> bool;
    // Notification of a match; is_final is true at a word boundary.
    // state is present only on resumable navigations and would continue
    // the navigation from this acceptance point.
    fn accept(&mut self, matched: &[char], is_final: bool, state: Option<&NavState>);
    // Called once when the navigation is complete.
    fn done(&mut self) {}
}

// State of a single navigation underway within a Dawg. When is_resumable
// is set, accept() receives the full cursor state; leave it unset for
// best performance when no navigator needs to be resumed.
pub struct Navigation<'a> {
    dawg: &'a Dawg,
    is_resumable: bool,
}

impl<'a> Navigation<'a> {
    pub fn new(dawg: &'a Dawg) -> Navigation<'a> {
        Navigation {
            dawg,
            is_resumable: false,
        }
    }

    pub fn resumable(dawg: &'a Dawg) -> Navigation<'a> {
        Navigation {
            dawg,
            is_resumable: true,
        }
    }

    // Starts a navigation from the root of the Dawg.
    pub fn go<N: Navigator>(&self, navigator: &mut N) {
        if navigator.is_accepting() {
            self.from_node(navigator, 0, &mut Vec::new());
        }
        navigator.done();
    }

    // Continues a navigation from a previously saved state.
    pub fn resume<N: Navigator>(&self, navigator: &mut N, state: &NavState, matched: &[char]) {
        if navigator.is_accepting() {
            self.from_edge(navigator, state, &mut matched.to_vec());
        }
        navigator.done();
    }

    // Enumerates through the outgoing edges of a node until the
    // navigator is satisfied.
    fn from_node<N: Navigator>(&self, navigator: &mut N, offset: u32, matched: &mut Vec<char>) {
        let edges = self.dawg.iter_node(offset);
        for state in edges.iter() {
            if navigator.push_edge(state.prefix[0]) {
                self.from_edge(navigator, state, matched);
                if !navigator.pop_edge() {
                    break;
                }
            }
        }
    }

    // Navigates along an edge, offering the navigator its prefix one
    // rune at a time. An edge prefix may be longer than one rune and may
    // contain separator markers at interior word boundaries.
    fn from_edge<N: Navigator>(&self, navigator: &mut N, state: &NavState, matched: &mut Vec<char>) {
        let len_p = state.prefix.len();
        let mark = matched.len();
        let mut j = 0;
        while j < len_p && navigator.is_accepting() {
            if !navigator.accepts(state.prefix[j]) {
                // The navigator doesn't want this prefix rune
                matched.truncate(mark);
                return;
            }
            matched.push(state.prefix[j]);
            j += 1;
            let is_final = if j < len_p {
                // A separator after the accepted rune marks a complete
                // word boundary within the prefix
                if state.prefix[j] == SEPARATOR {
                    j += 1;
                    true
                } else {
                    false
                }
            } else {
                // The prefix is exhausted: a word ends here if there is
                // no next node or the next node carries the final bit
                match state.next_node {
                    None => true,
                    Some(next) => self.dawg.node_is_final(next),
                }
            };
            if self.is_resumable {
                let cursor = NavState {
                    prefix: state.prefix[j..].to_vec(),
                    next_node: state.next_node,
                };
                navigator.accept(matched, is_final, Some(&cursor));
            } else {
                navigator.accept(matched, is_final, None);
            }
        }
        if j >= len_p && navigator.is_accepting() {
            if let Some(next) = state.next_node {
                // Completed a whole prefix and still the navigator has
                // appetite: continue to the following node
                self.from_node(navigator, next, matched);
            }
        }
        matched.truncate(mark);
    }
}

#[inline(always)]
pub(crate) fn contains_rune(s: &[char], r: char) -> bool {
    s.contains(&r)
}

// Removes the first occurrence of a rune, if present.
pub(crate) fn remove_rune(s: &mut Vec<char>, r: char) {
    if let Some(pos) = s.iter().position(|&c| c == r) {
        s.remove(pos);
    }
}

// Plain word search: did the exact word navigate to a final state?
pub struct FindNavigator {
    word: Vec<char>,
    index: usize,
    found: bool,
}

impl FindNavigator {
    pub fn new(word: &str) -> FindNavigator {
        FindNavigator {
            word: word.chars().collect(),
            index: 0,
            found: false,
        }
    }

    #[inline(always)]
    pub fn is_found(&self) -> bool {
        self.found
    }
}

impl Navigator for FindNavigator {
    fn push_edge(&mut self, chr: char) -> bool {
        // Enter the edge only if it matches our place in the sought word
        self.word.get(self.index) == Some(&chr)
    }

    fn pop_edge(&mut self) -> bool {
        // There can only be one correct outgoing edge, so there is no
        // need to visit the siblings
        false
    }

    fn is_accepting(&self) -> bool {
        self.index < self.word.len()
    }

    fn accepts(&mut self, _chr: char) -> bool {
        // We never enter an edge without the correct rune, so simply
        // advance the index
        self.index += 1;
        true
    }

    fn accept(&mut self, _matched: &[char], is_final: bool, _state: Option<&NavState>) {
        if is_final && self.index == self.word.len() {
            self.found = true;
        }
    }
}

// Pattern matching navigation, where '?' matches any single rune.
pub struct MatchNavigator {
    pattern: Vec<char>,
    index: usize,
    ch_match: char,
    is_wildcard: bool,
    stack: Vec<(usize, char, bool)>,
    results: Vec<String>,
}

impl MatchNavigator {
    pub fn new(pattern: &[char]) -> MatchNavigator {
        let pattern = pattern.to_vec();
        let ch_match = pattern.first().copied().unwrap_or(BLANK);
        MatchNavigator {
            is_wildcard: ch_match == BLANK,
            pattern,
            index: 0,
            ch_match,
            stack: Vec::with_capacity(8),
            results: Vec::with_capacity(16),
        }
    }

    #[inline(always)]
    pub fn into_results(self) -> Vec<String> {
        self.results
    }
}

impl Navigator for MatchNavigator {
    fn push_edge(&mut self, chr: char) -> bool {
        if chr != self.ch_match && !self.is_wildcard {
            return false;
        }
        self.stack.push((self.index, self.ch_match, self.is_wildcard));
        true
    }

    fn pop_edge(&mut self) -> bool {
        let (index, ch_match, is_wildcard) = self.stack.pop().unwrap_or((0, BLANK, false));
        self.index = index;
        self.ch_match = ch_match;
        self.is_wildcard = is_wildcard;
        // Only a wildcard can match more than one outgoing edge
        self.is_wildcard
    }

    fn is_accepting(&self) -> bool {
        self.index < self.pattern.len()
    }

    fn accepts(&mut self, chr: char) -> bool {
        if chr != self.ch_match && !self.is_wildcard {
            return false;
        }
        self.index += 1;
        if self.index < self.pattern.len() {
            self.ch_match = self.pattern[self.index];
            self.is_wildcard = self.ch_match == BLANK;
        }
        true
    }

    fn accept(&mut self, matched: &[char], is_final: bool, _state: Option<&NavState>) {
        if is_final && self.index == self.pattern.len() {
            // Entire pattern match
            self.results.push(matched.iter().collect());
        }
    }
}

// Finds all words that can be laid from a rack, where '?' in the rack is
// a wildcard. Results come out in the graph's (alphabetical) edge order.
pub struct PermutationNavigator {
    rack: Vec<char>,
    stack: Vec<Vec<char>>,
    results: Vec<String>,
    min_len: usize,
}

impl PermutationNavigator {
    pub fn new(rack: &str, min_len: usize) -> PermutationNavigator {
        PermutationNavigator {
            rack: rack.chars().collect(),
            stack: Vec::with_capacity(8),
            results: Vec::new(),
            min_len,
        }
    }

    #[inline(always)]
    pub fn into_results(self) -> Vec<String> {
        self.results
    }
}

impl Navigator for PermutationNavigator {
    fn push_edge(&mut self, chr: char) -> bool {
        if !contains_rune(&self.rack, chr) && !contains_rune(&self.rack, BLANK) {
            return false;
        }
        self.stack.push(self.rack.clone());
        true
    }

    fn pop_edge(&mut self) -> bool {
        if let Some(rack) = self.stack.pop() {
            self.rack = rack;
        }
        true
    }

    fn is_accepting(&self) -> bool {
        !self.rack.is_empty()
    }

    fn accepts(&mut self, chr: char) -> bool {
        let exact_match = contains_rune(&self.rack, chr);
        if !exact_match && !contains_rune(&self.rack, BLANK) {
            return false;
        }
        if exact_match {
            remove_rune(&mut self.rack, chr);
        } else {
            remove_rune(&mut self.rack, BLANK);
        }
        true
    }

    fn accept(&mut self, matched: &[char], is_final: bool, _state: Option<&NavState>) {
        if is_final && matched.len() >= self.min_len {
            self.results.push(matched.iter().collect());
        }
    }
}
