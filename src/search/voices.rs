//! Voice splitting
//!
//! Splits a multi-spine score into one text per `**kern` spine, so a pattern
//! can be matched against each voice on its own. The slice runs from the
//! line holding the first `**kern` to the last `*-` terminator; columns are
//! taken from that first line, and tokens in columns beyond it (after spine
//! splits) are dropped.

/// Exclusive interpretation starting a kern spine
pub const KERN_SPINE: &str = "**kern";

/// Spine terminator
pub const SPINE_TERMINATOR: &str = "*-";

/// One newline-terminated text per `**kern` spine
pub fn split_voices(score: &str) -> Vec<String> {
    let Some(kern_at) = score.find(KERN_SPINE) else {
        return Vec::new();
    };
    let start = score[..kern_at].rfind('\n').map_or(0, |i| i + 1);
    let end = score
        .rfind(SPINE_TERMINATOR)
        .map(|i| i + SPINE_TERMINATOR.len())
        .filter(|&end| end > start)
        .unwrap_or(score.len());

    let data = &score[start..end];
    let columns = data
        .split('\n')
        .next()
        .map_or(0, |header| header.split('\t').count());

    let mut voices = vec![String::new(); columns];
    for line in data.split('\n') {
        for (column, token) in line.split('\t').enumerate() {
            if let Some(voice) = voices.get_mut(column) {
                voice.push_str(token);
                voice.push('\n');
            }
        }
    }

    voices
        .into_iter()
        .filter(|voice| voice.starts_with(KERN_SPINE))
        .collect()
}
