// Copyright (C) 2025 Andy Kurnia.

// The Directed Acyclic Word Graph encoding the dictionary of valid
// words, as an immutable byte buffer. Letters are represented in the
// buffer as indices into the alphabet that ships with the buffer. Node
// decodings are cached on first traversal; in practice many nodes are
// never visited.

use super::alphabet::{Alphabet, LetterSet, BLANK, ENGLISH_ALPHABET};
use super::alphabet::{ICELANDIC_ALPHABET, NORWEGIAN_ALPHABET, POLISH_ALPHABET};
use super::cache::{FastHashMap, FastHashSet, LruCache};
use super::error;
use super::navigators::{
    FindNavigator, MatchNavigator, Navigation, Navigator, PermutationNavigator,
};
use std::sync::{Arc, Mutex};

// Virtual rune marking a word boundary inside a decoded edge prefix.
pub const SEPARATOR: char = '|';

const CROSS_CACHE_SIZE: usize = 2048;

// A navigation state: an edge where a prefix leads to an optional next
// node. Kept as a value type so saved cursors outlive the traversal that
// produced them.
#[derive(Clone)]
pub struct NavState {
    pub prefix: Vec<char>,
    pub next_node: Option<u32>,
}

pub struct Dawg {
    // The compressed word graph
    b: Box<[u8]>,
    // Maps an encoded byte, possibly carrying the 0x80 finality bit, to
    // the decoded rune sequence (the rune alone, or rune plus separator)
    coding: Box<[Box<[char]>]>,
    alphabet: Alphabet,
    // Decoded edge lists by node offset, built on the fly
    iter_node_cache: Mutex<FastHashMap<u32, Arc<[NavState]>>>,
    // Cached map of cross-check patterns to bitmapped rune sets
    cross_cache: Mutex<LruCache<String, LetterSet>>,
}

impl Dawg {
    // Takes ownership of a graph buffer, walking every reachable node
    // once to reject truncated or malformed encodings up front. After
    // this, traversal never fails.
    pub fn from_bytes(b: Vec<u8>, alphabet: Alphabet) -> error::Returns<Dawg> {
        validate(&b, alphabet.len())?;
        let mut coding: Vec<Box<[char]>> = vec![Box::from([]); 256];
        for (i, &chr) in alphabet.runes().iter().enumerate() {
            coding[i] = Box::from([chr]);
            coding[i | 0x80] = Box::from([chr, SEPARATOR]);
        }
        log::debug!("dawg loaded, {} bytes", b.len());
        Ok(Dawg {
            b: b.into_boxed_slice(),
            coding: coding.into_boxed_slice(),
            alphabet,
            iter_node_cache: Mutex::new(FastHashMap::default()),
            cross_cache: Mutex::new(LruCache::new(CROSS_CACHE_SIZE)),
        })
    }

    pub fn load_file<P: AsRef<std::path::Path>>(
        path: P,
        alphabet: Alphabet,
    ) -> error::Returns<Dawg> {
        Dawg::from_bytes(std::fs::read(path)?, alphabet)
    }

    #[inline(always)]
    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    #[inline(always)]
    pub(crate) fn node_is_final(&self, offset: u32) -> bool {
        self.b[offset as usize] & 0x80 != 0
    }

    // Returns the decoded outgoing edges of a node. The shared cache is
    // locked only for the lookup and the insertion.
    pub(crate) fn iter_node(&self, offset: u32) -> Arc<[NavState]> {
        if let Some(result) = self.iter_node_cache.lock().unwrap().get(&offset) {
            return Arc::clone(result);
        }
        // Not previously iterated: decode outside the lock. A racing
        // decode of the same node produces identical data.
        let result: Arc<[NavState]> = self.decode_node(offset).into();
        self.iter_node_cache
            .lock()
            .unwrap()
            .insert(offset, Arc::clone(&result));
        result
    }

    fn decode_node(&self, offset: u32) -> Vec<NavState> {
        let b = &self.b;
        let mut offset = offset as usize;
        let num_edges = (b[offset] & 0x7f) as usize;
        offset += 1;
        let mut result = Vec::with_capacity(num_edges);
        for _ in 0..num_edges {
            let len_byte = b[offset];
            offset += 1;
            let mut prefix: Vec<char> = Vec::with_capacity(2);
            if len_byte & 0x40 != 0 {
                // Single-rune prefix, rune index in the low six bits
                prefix.extend_from_slice(&self.coding[(len_byte & 0x3f) as usize]);
            } else {
                // Multi-rune prefix; each buffer byte decodes to one or
                // two runes ('a' or 'a|')
                let len = (len_byte & 0x3f) as usize;
                for j in 0..len {
                    prefix.extend_from_slice(&self.coding[b[offset + j] as usize]);
                }
                offset += len;
            }
            let next_node = if b[offset - 1] & 0x80 == 0 {
                // Not a final state: a little-endian node pointer follows
                let next = u32::from_le_bytes([
                    b[offset],
                    b[offset + 1],
                    b[offset + 2],
                    b[offset + 3],
                ]);
                offset += 4;
                Some(next)
            } else {
                None
            };
            result.push(NavState { prefix, next_node });
        }
        result
    }

    // Performs a navigation through the graph under the control of a
    // navigator.
    pub fn navigate<N: Navigator>(&self, navigator: &mut N) {
        Navigation::new(self).go(navigator);
    }

    // As navigate(), but accept() callbacks receive resumable cursors.
    pub fn navigate_resumable<N: Navigator>(&self, navigator: &mut N) {
        Navigation::resumable(self).go(navigator);
    }

    // Continues a navigation from a previously saved state.
    pub fn resume<N: Navigator>(&self, navigator: &mut N, state: &NavState, matched: &[char]) {
        Navigation::new(self).resume(navigator, state, matched);
    }

    // Attempts to find a word, returning true if it is in the graph.
    pub fn find(&self, word: &str) -> bool {
        let mut fn_ = FindNavigator::new(word);
        self.navigate(&mut fn_);
        fn_.is_found()
    }

    // Returns all words matching a pattern, where '?' matches any single
    // rune. The result is in the graph's (alphabetical) order.
    pub fn match_pattern(&self, pattern: &str) -> Vec<String> {
        let pattern: Vec<char> = pattern.chars().collect();
        self.match_runes(&pattern)
    }

    pub fn match_runes(&self, pattern: &[char]) -> Vec<String> {
        let mut mn = MatchNavigator::new(pattern);
        self.navigate(&mut mn);
        mn.into_results()
    }

    // Finds all words that can be laid from the rack, at least min_len
    // runes long. '?' in the rack is a wildcard.
    pub fn permute(&self, rack: &str, min_len: usize) -> Vec<String> {
        let mut pn = PermutationNavigator::new(rack, min_len);
        self.navigate(&mut pn);
        pn.into_results()
    }

    // Calculates the bit-mapped set of runes x such that left·x·right is
    // a word. Asking for 'f' and 'lt' matches 'f?lt', say { falt, filt,
    // fúlt }, giving the set { a, i, ú }. Results are cached by pattern.
    pub fn cross_set(&self, left: &[char], right: &[char]) -> LetterSet {
        let len_left = left.len();
        let mut key = String::with_capacity(len_left + right.len() + 1);
        key.extend(left.iter());
        key.push(BLANK);
        key.extend(right.iter());
        if let Some(set) = self.cross_cache.lock().unwrap().get(&key) {
            return set;
        }
        // Compute outside the lock; a racing computation of the same key
        // inserts the same value
        let matches = self.match_pattern(&key);
        let mut middle = Vec::with_capacity(matches.len());
        for word in &matches {
            if let Some(r) = word.chars().nth(len_left) {
                middle.push(r);
            }
        }
        let set = self.alphabet.set_of(&middle);
        self.cross_cache.lock().unwrap().put(key, set);
        set
    }
}

// Walks every node reachable from the root, checking the §"node layout"
// encoding rules and all buffer bounds.
fn validate(b: &[u8], alphabet_len: usize) -> error::Returns<()> {
    if b.is_empty() {
        return Err(error::invalid_format("empty dawg buffer").into());
    }
    let mut visited = FastHashSet::default();
    let mut pending = vec![0u32];
    while let Some(node) = pending.pop() {
        if !visited.insert(node) {
            continue;
        }
        let mut offset = node as usize;
        let header = *b
            .get(offset)
            .ok_or_else(|| error::invalid_format("node offset out of range"))?;
        offset += 1;
        for _ in 0..(header & 0x7f) {
            let len_byte = *b
                .get(offset)
                .ok_or_else(|| error::invalid_format("truncated edge"))?;
            offset += 1;
            let terminal;
            if len_byte & 0x40 != 0 {
                if ((len_byte & 0x3f) as usize) >= alphabet_len {
                    return Err(error::invalid_format("rune index out of range").into());
                }
                terminal = len_byte & 0x80 != 0;
            } else {
                let len = (len_byte & 0x3f) as usize;
                if len == 0 {
                    return Err(error::invalid_format("empty edge prefix").into());
                }
                if offset + len > b.len() {
                    return Err(error::invalid_format("edge prefix out of range").into());
                }
                for j in 0..len {
                    if ((b[offset + j] & 0x7f) as usize) >= alphabet_len {
                        return Err(error::invalid_format("rune index out of range").into());
                    }
                }
                terminal = b[offset + len - 1] & 0x80 != 0;
                offset += len;
            }
            if !terminal {
                if offset + 4 > b.len() {
                    return Err(error::invalid_format("truncated node pointer").into());
                }
                let next = u32::from_le_bytes([
                    b[offset],
                    b[offset + 1],
                    b[offset + 2],
                    b[offset + 3],
                ]);
                offset += 4;
                if next as usize >= b.len() {
                    return Err(error::invalid_format("node pointer out of range").into());
                }
                pending.push(next);
            }
        }
    }
    Ok(())
}

// Logical names of the dictionaries an embedder may ship. Each pairs a
// graph file with the alphabet string whose ordering defines the byte
// encoding in that file.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Lexicon {
    Ice,
    Otcwl,
    Sowpods,
    Osps,
    Nsf,
    Nynorsk,
}

impl Lexicon {
    pub fn from_name(name: &str) -> error::Returns<Lexicon> {
        Ok(match name {
            "ice" => Lexicon::Ice,
            "otcwl" => Lexicon::Otcwl,
            "sowpods" => Lexicon::Sowpods,
            "osps" => Lexicon::Osps,
            "nsf" => Lexicon::Nsf,
            "nynorsk" => Lexicon::Nynorsk,
            _ => return Err(error::invalid_input("lexicon", name).into()),
        })
    }

    pub fn file_name(self) -> &'static str {
        match self {
            Lexicon::Ice => "ordalisti.bin.dawg",
            Lexicon::Otcwl => "otcwl2014.bin.dawg",
            Lexicon::Sowpods => "sowpods.bin.dawg",
            Lexicon::Osps => "osps37.bin.dawg",
            Lexicon::Nsf => "nsf2023.bin.dawg",
            Lexicon::Nynorsk => "nynorsk2024.bin.dawg",
        }
    }

    pub fn alphabet_str(self) -> &'static str {
        match self {
            Lexicon::Ice => ICELANDIC_ALPHABET,
            Lexicon::Otcwl | Lexicon::Sowpods => ENGLISH_ALPHABET,
            Lexicon::Osps => POLISH_ALPHABET,
            Lexicon::Nsf | Lexicon::Nynorsk => NORWEGIAN_ALPHABET,
        }
    }

    // Loads this lexicon's graph from a dictionary directory.
    pub fn load_from_dir<P: AsRef<std::path::Path>>(self, dir: P) -> error::Returns<Dawg> {
        Dawg::load_file(
            dir.as_ref().join(self.file_name()),
            Alphabet::new(self.alphabet_str())?,
        )
    }
}
