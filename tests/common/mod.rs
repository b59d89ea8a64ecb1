// Copyright (C) 2025 Andy Kurnia.

//! Shared test fixtures: a small English lexicon and an encoder that
//! lays a word list out in the binary word-graph format (trie shaped,
//! single-rune edges in alphabetical order, compact terminal edges).

use skrafl::alphabet::Alphabet;
use skrafl::dawg::Dawg;
use std::collections::BTreeMap;

struct TrieNode {
    children: BTreeMap<usize, usize>,
    is_word: bool,
}

impl TrieNode {
    fn new() -> TrieNode {
        TrieNode {
            children: BTreeMap::new(),
            is_word: false,
        }
    }
}

// Encodes the words as a graph buffer over the given alphabet. Each
// edge carries a single rune; an edge to a leaf is terminal (no node
// pointer), and interior word ends set the final bit on the destination
// node's header.
pub fn encode_word_graph(words: &[&str], alphabet: &str) -> Vec<u8> {
    let index_of: BTreeMap<char, usize> = alphabet.chars().enumerate().map(|(i, r)| (r, i)).collect();
    let mut arena = vec![TrieNode::new()];
    for word in words {
        let mut node = 0;
        for chr in word.chars() {
            let idx = *index_of
                .get(&chr)
                .unwrap_or_else(|| panic!("'{chr}' is not in the test alphabet"));
            node = match arena[node].children.get(&idx).copied() {
                Some(child) => child,
                None => {
                    arena.push(TrieNode::new());
                    let child = arena.len() - 1;
                    arena[node].children.insert(idx, child);
                    child
                }
            };
        }
        arena[node].is_word = true;
    }

    // Only nodes with outgoing edges are emitted; leaves fold into
    // terminal edges. Offsets are assigned in preorder.
    fn emitted_size(arena: &[TrieNode], node: usize) -> usize {
        1 + arena[node]
            .children
            .values()
            .map(|&child| {
                if arena[child].children.is_empty() {
                    1
                } else {
                    5
                }
            })
            .sum::<usize>()
    }
    let mut offsets = vec![0u32; arena.len()];
    let mut next_free = 0u32;
    let mut stack = vec![0usize];
    let mut preorder = Vec::new();
    while let Some(node) = stack.pop() {
        offsets[node] = next_free;
        next_free += emitted_size(&arena, node) as u32;
        preorder.push(node);
        for &child in arena[node].children.values().rev() {
            if !arena[child].children.is_empty() {
                stack.push(child);
            }
        }
    }

    let mut out = Vec::with_capacity(next_free as usize);
    for &node in &preorder {
        debug_assert_eq!(out.len(), offsets[node] as usize);
        let mut header = arena[node].children.len() as u8;
        if arena[node].is_word {
            header |= 0x80;
        }
        out.push(header);
        for (&idx, &child) in &arena[node].children {
            if arena[child].children.is_empty() {
                out.push(0x40 | 0x80 | idx as u8);
            } else {
                out.push(0x40 | idx as u8);
                out.extend_from_slice(&offsets[child].to_le_bytes());
            }
        }
    }
    out
}

pub fn make_dawg(words: &[&str], alphabet: &str) -> Dawg {
    Dawg::from_bytes(
        encode_word_graph(words, alphabet),
        Alphabet::new(alphabet).unwrap(),
    )
    .unwrap()
}

// A small English test lexicon. Enough two- and three-letter words for
// mid-game traffic, a handful of longer ones for bingos.
pub static WORDS: &[&str] = &[
    "ad", "am", "an", "as", "at", "ax", "be", "by", "do", "go", "he", "hi", "if", "in", "is",
    "it", "la", "lo", "ma", "me", "my", "no", "of", "on", "or", "ox", "pa", "so", "to", "up",
    "us", "we", "and", "ant", "art", "ate", "bag", "bat", "bed", "big", "bog", "box", "boy",
    "but", "can", "car", "cat", "cog", "cot", "dig", "dog", "dot", "ear", "eat", "egg", "end",
    "fan", "far", "fat", "fig", "fit", "fix", "fog", "fun", "gas", "gem", "get", "got", "gut",
    "hat", "hen", "hit", "hot", "ice", "ink", "jam", "jet", "job", "joy", "keg", "key", "kid",
    "kit", "lab", "lap", "law", "lay", "leg", "let", "lid", "lip", "log", "lot", "map", "mat",
    "men", "met", "mix", "mud", "net", "new", "nod", "not", "nut", "oak", "oar", "odd", "off",
    "oil", "old", "one", "our", "out", "owl", "own", "pan", "pat", "pay", "pen", "pet", "pig",
    "pin", "pit", "ply", "pod", "pot", "rag", "ran", "rat", "raw", "red", "rib", "rid", "rim",
    "rip", "rod", "rot", "rug", "run", "sad", "sat", "saw", "sea", "set", "sit", "six", "sky",
    "sly", "son", "sun", "tan", "tap", "tar", "tax", "tea", "ten", "tin", "tip", "toe", "ton",
    "top", "toy", "tub", "two", "use", "van", "wax", "way", "web", "wet", "win", "won", "yes",
    "yet", "zip", "camp", "card", "care", "cart", "cast", "cats", "coal", "coat", "code",
    "cold", "corn", "cost", "dark", "data", "date", "dawn", "days", "dead", "deal", "dear",
    "deep", "desk", "dogs", "done", "door", "down", "drag", "draw", "drop", "drum", "dust",
    "duty", "east", "easy", "edge", "face", "fact", "fail", "fair", "fall", "farm", "fast",
    "fear", "feed", "feel", "feet", "fine", "fire", "firm", "fish", "five", "flat", "flow",
    "food", "foot", "form", "fort", "four", "free", "from", "fuel", "full", "fund", "gain",
    "game", "gate", "gave", "gift", "girl", "give", "glad", "goal", "goes", "gold", "gone",
    "good", "grew", "grow", "hair", "half", "hall", "hand", "hang", "hard", "harm", "hate",
    "have", "head", "hear", "heat", "held", "help", "here", "hero", "hide", "high", "hill",
    "hire", "hold", "hole", "holy", "home", "hope", "horn", "host", "hour", "huge", "hung",
    "hunt", "hurt", "idea", "inch", "into", "iron", "item", "join", "jump", "jury", "just",
    "keen", "keep", "kept", "kick", "kind", "king", "knee", "knew", "know", "lack", "lady",
    "laid", "lake", "land", "lane", "last", "late", "lead", "left", "less", "life", "lift",
    "like", "line", "link", "list", "live", "load", "loan", "lock", "long", "look", "lord",
    "lose", "loss", "lost", "loud", "love", "luck", "made", "mail", "main", "make", "male",
    "many", "mark", "mass", "meal", "mean", "meat", "meet", "menu", "mere", "mild", "mile",
    "milk", "mind", "mine", "miss", "mode", "mood", "moon", "more", "most", "move", "much",
    "must", "name", "navy", "near", "neck", "need", "news", "next", "nice", "nine", "none",
    "nose", "note", "play", "pays", "lets", "painter", "parents", "letters",
];

pub const TEST_ALPHABET: &str = skrafl::alphabet::ENGLISH_ALPHABET;

pub fn small_lexicon() -> Dawg {
    make_dawg(WORDS, TEST_ALPHABET)
}
