//! Deterministic pseudo-name synthesis.
//!
//! Unidentified scroll labels, artifact names and unique-monster names are
//! generated from a 32-bit seed stored on the item. Saves persist the seed,
//! not the string, so [`make_name`] must keep producing byte-identical
//! output for a given seed forever. The mixing table, letter pools and
//! cluster table below are part of the save format: do not reorder, resize
//! or renumber them.

/// Replacement name when generation collapses below four letters.
const FALLBACK_NAME: &str = "plog";

/// Absolute cap on the target length, independent of the caller's limit.
const MAX_NAME_LEN: usize = 200;

/// Iteration budget for one synthesis: nine full passes over the mixing
/// table. Generation that is still short of its target after this many
/// attempts is cut off where it stands.
const MAX_ROUNDS: u32 = 9 * 17;

// ============================================================================
// Letter pools
// ============================================================================

/// Weighted vowel pool: plain vowels three times each, 'y' and the
/// interior space once each.
const VOWEL_POOL: &[u8] = b"aeiouaeiouaeiouy  ";

/// Weighted consonant pool for single picks away from position 0.
const CONSONANT_POOL: &[u8] = b"bcdfghjklmnpqrstvwxzcdfghlmnrstlmnrst";

/// Consonant clusters, partitioned by where in a word they may appear:
/// indices 0..14 start a word or sit in the middle, 14..27 go anywhere,
/// 27..67 sit in the middle or end a word.
const CLUSTERS: [&str; 67] = [
    // start or middle
    "kl", "gr", "cl", "cr", "fr", "pr", "tr", "tw", "br", "pl", "bl", "str", "shr", "thr",
    // anywhere
    "sm", "sh", "ch", "th", "ph", "pn", "kh", "gh", "mn", "ps", "st", "sk", "sch",
    // middle or end
    "ts", "cs", "xt", "nt", "ll", "rr", "ss", "wk", "wn", "ng", "cw", "mp", "ck", "nk",
    "dd", "tt", "bb", "pp", "nn", "mm", "kk", "gg", "ff", "pt", "tz", "dgh", "rgh", "rph",
    "rch", "nth", "lth", "rth", "lsh", "rsh", "lph", "nch", "lch", "rk", "lk", "lm",
];

/// First index of the "anywhere" zone.
const ANYWHERE_ZONE: usize = 14;
/// Number of clusters allowed at a word start (start-or-middle + anywhere).
const START_SET: usize = 27;
/// Number of clusters allowed at a word end (anywhere + middle-or-end).
const END_SET: usize = 53;

// ============================================================================
// Seed mixing
// ============================================================================

/// Fixed mixing table: `numb[k]` is the dot product of row `k` with the
/// four seed bytes (low byte first). The multipliers are load-bearing:
/// stored seeds must keep producing identical strings across versions.
const MIX: [[u32; 4]; 17] = [
    [373, 409, 281, 0],
    [0, 277, 317, 163],
    [257, 0, 83, 179],
    [61, 229, 0, 241],
    [79, 263, 149, 0],
    [0, 383, 311, 233],
    [199, 0, 103, 211],
    [139, 109, 0, 349],
    [43, 389, 359, 0],
    [0, 101, 251, 367],
    [293, 0, 151, 59],
    [331, 107, 0, 307],
    [73, 157, 347, 0],
    [0, 353, 227, 379],
    [181, 0, 193, 173],
    [131, 167, 0, 97],
    [313, 127, 401, 337],
];

const fn is_vowel(c: u8) -> bool {
    matches!(c, b'a' | b'e' | b'i' | b'o' | b'u')
}

/// Synthesize a pronounceable pseudo-name from `seed`.
///
/// Pure function of its four arguments: the same inputs always yield the
/// same string. `all_caps` lengthens the target by six and uppercases the
/// whole result (scroll labels); otherwise each word is title-cased.
/// `max_len` clamps the target length, though consonant clusters may
/// overshoot it by up to half again. `leading`, when it is an ASCII
/// letter, claims the first position.
///
/// Never fails and never returns fewer than four characters: degenerate
/// walks collapse to a fixed placeholder word instead.
pub fn make_name(seed: u32, all_caps: bool, max_len: Option<usize>, leading: Option<char>) -> String {
    let bytes = seed.to_le_bytes();
    let mut numb = [0u32; 17];
    for (n, row) in numb.iter_mut().zip(MIX.iter()) {
        *n = row
            .iter()
            .zip(bytes.iter())
            .map(|(&w, &b)| w * b as u32)
            .sum();
    }

    let mut len = 3 + (numb[0] % 5) as usize + (numb[1] % 6) as usize;
    if all_caps {
        len += 6;
    }
    if let Some(limit) = max_len {
        len = len.min(limit);
    }
    len = len.min(MAX_NAME_LEN);

    // Rotating draw cursor over the mixed values.
    let mut j = (numb[16] % 17) as usize;
    let mut next = || {
        let v = numb[j];
        j = (j + 3) % 17;
        v
    };

    let leading = leading.filter(|c| c.is_ascii_alphabetic());

    let mut buf: Vec<u8> = Vec::with_capacity(len + 4);
    let mut want_vowel = next() % 2 != 0;
    let mut has_space = false;
    let mut escape = false;
    let mut rounds = 0u32;

    while buf.len() < len {
        rounds += 1;
        if rounds > MAX_ROUNDS {
            escape = true;
            break;
        }
        let i = buf.len();
        let prev = buf.last().copied();

        // A requested leading letter claims position 0.
        if i == 0 {
            if let Some(c) = leading {
                let c = c.to_ascii_lowercase() as u8;
                buf.push(c);
                want_vowel = !is_vowel(c);
                continue;
            }
        }

        // One interior space per name, three letters guaranteed on each
        // side, placed at the first eligible position four times in five.
        if !has_space && i >= 3 && i + 4 <= len && next() % 5 != 0 {
            buf.push(b' ');
            has_space = true;
            want_vowel = true;
            continue;
        }

        // A vowel is due either on request or after a vowel-vowel-consonant
        // run, the latter four times in five.
        let vowel_turn = want_vowel
            || (i >= 3
                && is_vowel(buf[i - 3])
                && is_vowel(buf[i - 2])
                && !is_vowel(buf[i - 1])
                && next() % 5 != 0);

        if vowel_turn {
            let v = VOWEL_POOL[(next() % 18) as usize];
            if v == b' ' {
                // The pool's space slots obey the same placement rules as
                // the dedicated branch, plus: never straight after two
                // consonants.
                if has_space
                    || i < 3
                    || i + 4 > len
                    || prev == Some(b' ')
                    || (i >= 2 && !is_vowel(buf[i - 1]) && !is_vowel(buf[i - 2]))
                {
                    continue;
                }
                buf.push(b' ');
                has_space = true;
                want_vowel = false;
                continue;
            }
            // Avoid stuttering the same vowel; 'y' never doubles.
            if Some(v) == prev && (v == b'y' || next() % 3 == 0) {
                continue;
            }
            buf.push(v);
            want_vowel = false;
            continue;
        }

        // Consonant slot: one time in four, a cluster picked from the zone
        // the cursor sits in.
        if next() % 4 == 0 {
            let at_word_start = i == 0 || prev == Some(b' ');
            let near_end = i + 2 >= len;
            let pick = next() as usize;
            let cluster = if at_word_start {
                CLUSTERS[pick % START_SET]
            } else if near_end {
                CLUSTERS[ANYWHERE_ZONE + pick % END_SET]
            } else {
                CLUSTERS[pick % CLUSTERS.len()]
            };
            buf.extend_from_slice(cluster.as_bytes());
            want_vowel = true;
            continue;
        }

        // Single consonant. Position 0 draws from the whole alphabet so
        // names can open with any letter.
        let c = if i == 0 {
            b'a' + (next() % 26) as u8
        } else {
            CONSONANT_POOL[(next() % 37) as usize]
        };
        buf.push(c);
        want_vowel = !is_vowel(c);
    }

    // A name left hanging on a bare vowel usually gets one closing
    // consonant; always, if the walk was cut off.
    if let Some(&last) = buf.last() {
        if last != b'y' && is_vowel(last) && (escape || next() % 3 != 0) {
            buf.push(CONSONANT_POOL[(next() % 37) as usize]);
        }
    }

    while buf.last() == Some(&b' ') {
        buf.pop();
    }

    if buf.len() < 4 {
        buf.clear();
        buf.extend_from_slice(FALLBACK_NAME.as_bytes());
    }

    let mut out = String::with_capacity(buf.len());
    let mut word_start = true;
    for &b in &buf {
        if all_caps || word_start {
            out.push(b.to_ascii_uppercase() as char);
        } else {
            out.push(b as char);
        }
        word_start = b == b' ';
    }
    out
}
