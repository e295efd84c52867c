//! Patch records and their text serialization.
//!
//! A patch is the `@@ -start1,len1 +start2,len2 @@` header followed by one
//! line per diff run, prefixed with ` ` (context), `+` (insert) or `-`
//! (delete). Run text is percent-escaped so a run never spans lines.

use thiserror::Error;

use crate::{decode_component, diff, encode_component, Patch, PatchOpType};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TextPatchError {
    #[error("malformed patch header: {0:?}")]
    MalformedHeader(String),
    #[error("unrecognized patch line: {0:?}")]
    UnrecognizedLine(String),
}

/// One hunk of a text patch.
///
/// `start1`/`length1` describe the source span, `start2`/`length2` the target
/// span, in chars. The simplified engine always emits a single whole-string
/// hunk, so the spans are informational; application works off the op lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextPatch {
    pub ops: Patch,
    pub start1: usize,
    pub start2: usize,
    pub length1: usize,
    pub length2: usize,
}

impl TextPatch {
    /// Serialize this hunk, header line included.
    pub fn to_text(&self) -> String {
        let mut out = format!(
            "@@ -{},{} +{},{} @@\n",
            self.start1 + 1,
            self.length1,
            self.start2 + 1,
            self.length2
        );
        for (op, text) in &self.ops {
            out.push(match op {
                PatchOpType::Ins => '+',
                PatchOpType::Del => '-',
                PatchOpType::Eql => ' ',
            });
            out.push_str(&encode_component(text));
            out.push('\n');
        }
        out
    }
}

// ── Create / serialize ────────────────────────────────────────────────────

/// Diff `src` against `dst` and wrap the result in a single whole-string
/// patch. Returns no patches when the inputs are both empty.
pub fn create_patches(src: &str, dst: &str) -> Vec<TextPatch> {
    let ops = diff(src, dst);
    if ops.is_empty() {
        return Vec::new();
    }
    vec![TextPatch {
        ops,
        start1: 0,
        start2: 0,
        length1: src.chars().count(),
        length2: dst.chars().count(),
    }]
}

pub fn patches_to_text(patches: &[TextPatch]) -> String {
    patches.iter().map(TextPatch::to_text).collect()
}

// ── Parse ─────────────────────────────────────────────────────────────────

/// Parse patch text back into hunks.
///
/// Headers are validated, including their numeric fields; an op line outside
/// any hunk or with an unknown sigil is an error. Blank lines are skipped.
pub fn patches_from_text(text: &str) -> Result<Vec<TextPatch>, TextPatchError> {
    let mut patches = Vec::new();
    let mut current: Option<TextPatch> = None;

    for line in text.lines() {
        if line.is_empty() {
            continue;
        }
        if line.starts_with("@@") {
            if let Some(done) = current.take() {
                patches.push(done);
            }
            current = Some(parse_header(line)?);
            continue;
        }
        let hunk = current
            .as_mut()
            .ok_or_else(|| TextPatchError::UnrecognizedLine(line.to_string()))?;
        let op = match line.as_bytes()[0] {
            b'+' => PatchOpType::Ins,
            b'-' => PatchOpType::Del,
            b' ' => PatchOpType::Eql,
            _ => return Err(TextPatchError::UnrecognizedLine(line.to_string())),
        };
        hunk.ops.push((op, decode_component(&line[1..])));
    }

    if let Some(done) = current.take() {
        patches.push(done);
    }
    Ok(patches)
}

fn parse_header(line: &str) -> Result<TextPatch, TextPatchError> {
    let malformed = || TextPatchError::MalformedHeader(line.to_string());
    let inner = line
        .strip_prefix("@@ -")
        .and_then(|rest| rest.strip_suffix(" @@"))
        .ok_or_else(malformed)?;
    let (src_span, dst_span) = inner.split_once(" +").ok_or_else(malformed)?;
    let (start1, length1) = parse_span(src_span).ok_or_else(malformed)?;
    let (start2, length2) = parse_span(dst_span).ok_or_else(malformed)?;
    Ok(TextPatch {
        ops: Vec::new(),
        // Headers are 1-based on the wire.
        start1: start1.saturating_sub(1),
        start2: start2.saturating_sub(1),
        length1,
        length2,
    })
}

fn parse_span(span: &str) -> Option<(usize, usize)> {
    let (start, length) = span.split_once(',')?;
    Some((start.parse().ok()?, length.parse().ok()?))
}

// ── Apply / invert ────────────────────────────────────────────────────────

/// Apply `patches` to `base`, rebuilding each hunk's target from its `Ins`
/// and `Eql` runs.
///
/// The per-patch flag reports whether the hunk's source side (`Eql` + `Del`
/// runs) matched the text it was applied to; the rebuilt target is returned
/// either way.
pub fn apply_patches(patches: &[TextPatch], base: &str) -> (String, Vec<bool>) {
    let mut result = base.to_string();
    let mut flags = Vec::with_capacity(patches.len());
    for patch in patches {
        let mut source = String::new();
        let mut target = String::new();
        for (op, text) in &patch.ops {
            match op {
                PatchOpType::Eql => {
                    source.push_str(text);
                    target.push_str(text);
                }
                PatchOpType::Del => source.push_str(text),
                PatchOpType::Ins => target.push_str(text),
            }
        }
        flags.push(source == result);
        result = target;
    }
    (result, flags)
}

/// Swap every hunk's insert and delete runs (and its spans), producing the
/// patch that undoes the original.
pub fn invert(patches: &[TextPatch]) -> Vec<TextPatch> {
    patches
        .iter()
        .map(|patch| TextPatch {
            ops: patch
                .ops
                .iter()
                .map(|(op, text)| {
                    let op = match op {
                        PatchOpType::Ins => PatchOpType::Del,
                        PatchOpType::Del => PatchOpType::Ins,
                        PatchOpType::Eql => PatchOpType::Eql,
                    };
                    (op, text.clone())
                })
                .collect(),
            start1: patch.start2,
            start2: patch.start1,
            length1: patch.length2,
            length2: patch.length1,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_and_apply_round_trip() {
        let src = "The quick brown fox jumps over the lazy dog";
        let dst = "The quick red fox walks over the lazy dog";
        let patches = create_patches(src, dst);
        assert_eq!(patches.len(), 1);
        let (result, flags) = apply_patches(&patches, src);
        assert_eq!(result, dst);
        assert_eq!(flags, vec![true]);
    }

    #[test]
    fn invert_round_trip() {
        let src = "one two three";
        let dst = "one 2 three four";
        let patches = create_patches(src, dst);
        let (back, flags) = apply_patches(&invert(&patches), dst);
        assert_eq!(back, src);
        assert_eq!(flags, vec![true]);
    }

    #[test]
    fn text_serialization_round_trip() {
        let patches = create_patches("hello\nworld", "hello\nrust 100%");
        let text = patches_to_text(&patches);
        assert!(text.starts_with("@@ -1,"));
        let parsed = patches_from_text(&text).unwrap();
        assert_eq!(parsed, patches);
    }

    #[test]
    fn escapes_survive_the_wire() {
        let patches = create_patches("a%b", "a%b\r\nc");
        let text = patches_to_text(&patches);
        assert!(text.contains("%25"));
        assert!(text.contains("%0D%0Ac"));
        let (result, _) = apply_patches(&patches_from_text(&text).unwrap(), "a%b");
        assert_eq!(result, "a%b\r\nc");
    }

    #[test]
    fn mismatched_base_reports_failure() {
        let patches = create_patches("alpha", "alphabet");
        let (result, flags) = apply_patches(&patches, "something else");
        // Target is rebuilt regardless, but the source check fails.
        assert_eq!(result, "alphabet");
        assert_eq!(flags, vec![false]);
    }

    #[test]
    fn empty_patch_list_is_identity() {
        let (result, flags) = apply_patches(&[], "unchanged");
        assert_eq!(result, "unchanged");
        assert!(flags.is_empty());
    }

    #[test]
    fn malformed_header_is_an_error() {
        let err = patches_from_text("@@ bogus @@\n x").unwrap_err();
        assert!(matches!(err, TextPatchError::MalformedHeader(_)));

        let err = patches_from_text("@@ -x,1 +1,1 @@\n x").unwrap_err();
        assert!(matches!(err, TextPatchError::MalformedHeader(_)));
    }

    #[test]
    fn unknown_sigil_is_an_error() {
        let err = patches_from_text("@@ -1,1 +1,1 @@\n*boom").unwrap_err();
        assert_eq!(
            err,
            TextPatchError::UnrecognizedLine("*boom".to_string())
        );
    }

    #[test]
    fn line_before_any_header_is_an_error() {
        let err = patches_from_text("+floating").unwrap_err();
        assert!(matches!(err, TextPatchError::UnrecognizedLine(_)));
    }

    #[test]
    fn header_numbers_are_parsed_back() {
        let patches = create_patches("abcdef", "abXdef");
        let parsed = patches_from_text(&patches_to_text(&patches)).unwrap();
        assert_eq!(parsed[0].length1, 6);
        assert_eq!(parsed[0].length2, 6);
        assert_eq!(parsed[0].start1, 0);
    }
}
