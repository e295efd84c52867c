//! Text diff and patch engine backing `jsondiffpatch` text deltas.
//!
//! This is a deliberately simplified engine: a diff is the common prefix, the
//! common suffix, and a single delete/insert pair for whatever lies between.
//! It is *not* a Myers-style minimal diff and its patch text is not expected
//! to be bit-compatible with diff-match-patch implementations. The contract
//! it does guarantee is
//!
//! ```text
//! apply_patches(&create_patches(a, b), a) == (b, all-success)
//! ```
//!
//! and, via [`invert`], the symmetric reverse direction.
//!
//! All diff boundaries are computed on `char`s, so patch text never splits a
//! UTF-8 sequence.

mod patch;

pub use patch::{
    apply_patches, create_patches, invert, patches_from_text, patches_to_text, TextPatch,
    TextPatchError,
};

// ── Operations ────────────────────────────────────────────────────────────

/// A single diff run: delete from the source, keep, or insert into the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatchOpType {
    Del,
    Eql,
    Ins,
}

pub type PatchOperation = (PatchOpType, String);
pub type Patch = Vec<PatchOperation>;

// ── Diff ──────────────────────────────────────────────────────────────────

/// Compute the diff between `src` and `dst` as a flat operation list.
///
/// Equal inputs produce a single `Eql` run (or nothing for empty strings).
/// Unequal inputs produce `[Eql prefix] [Del middle1] [Ins middle2]
/// [Eql suffix]`, with empty runs omitted.
pub fn diff(src: &str, dst: &str) -> Patch {
    if src == dst {
        if src.is_empty() {
            return Vec::new();
        }
        return vec![(PatchOpType::Eql, src.to_string())];
    }

    let src_chars: Vec<char> = src.chars().collect();
    let dst_chars: Vec<char> = dst.chars().collect();
    let prefix = common_prefix(&src_chars, &dst_chars);
    let suffix = common_suffix(&src_chars[prefix..], &dst_chars[prefix..]);

    let mut patch = Patch::new();
    if prefix > 0 {
        patch.push((PatchOpType::Eql, collect(&src_chars[..prefix])));
    }
    let src_mid = &src_chars[prefix..src_chars.len() - suffix];
    let dst_mid = &dst_chars[prefix..dst_chars.len() - suffix];
    if !src_mid.is_empty() {
        patch.push((PatchOpType::Del, collect(src_mid)));
    }
    if !dst_mid.is_empty() {
        patch.push((PatchOpType::Ins, collect(dst_mid)));
    }
    if suffix > 0 {
        patch.push((PatchOpType::Eql, collect(&src_chars[src_chars.len() - suffix..])));
    }
    patch
}

fn collect(chars: &[char]) -> String {
    chars.iter().collect()
}

fn common_prefix(a: &[char], b: &[char]) -> usize {
    a.iter().zip(b).take_while(|(x, y)| x == y).count()
}

fn common_suffix(a: &[char], b: &[char]) -> usize {
    a.iter().rev().zip(b.iter().rev()).take_while(|(x, y)| x == y).count()
}

// ── Escaping ──────────────────────────────────────────────────────────────

/// Escape `%`, `\n` and `\r` as `%25`, `%0A`, `%0D` for use in patch lines.
pub fn encode_component(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '%' => out.push_str("%25"),
            '\n' => out.push_str("%0A"),
            '\r' => out.push_str("%0D"),
            _ => out.push(ch),
        }
    }
    out
}

/// Reverse [`encode_component`]. A `%` not followed by two hex digits is kept
/// literally.
pub fn decode_component(text: &str) -> String {
    let bytes = text.as_bytes();
    let mut out = String::with_capacity(text.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' && i + 2 < bytes.len() {
            if let Some(code) = text
                .get(i + 1..i + 3)
                .and_then(|hex| u8::from_str_radix(hex, 16).ok())
            {
                out.push(code as char);
                i += 3;
                continue;
            }
        }
        // Multi-byte chars never start with b'%', so only advance over ASCII
        // here; non-ASCII is appended via the char iterator below.
        let ch = text[i..].chars().next().unwrap_or('\u{FFFD}');
        out.push(ch);
        i += ch.len_utf8();
    }
    out
}
