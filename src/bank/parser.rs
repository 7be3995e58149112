//! Question-bank text parser.
//!
//! Converts the flat exam dump format into [`Question`] records:
//!
//! ```text
//! QUESTION 12
//! <prompt, one or more lines>
//! A. <option text>
//! B. <option text>
//! Correct Answer: B
//! ```
//!
//! Blocks are located in two passes: first the outer markers
//! (`QUESTION <n>` through the nearest following `Correct Answer:
//! <letters>`, both matched ASCII-case-insensitively), then the
//! line-anchored `A.` option markers inside each block. Fields degrade
//! individually: a missing number becomes `0`, a missing key an empty
//! string, and a block with no option line keeps its whole body as
//! prompt text. Text outside any block is ignored.

use crate::models::Question;

const QUESTION_MARKER: &str = "QUESTION ";
const ANSWER_MARKER: &str = "Correct Answer: ";

/// Parse raw bank text into questions, in document order.
///
/// Pure and deterministic: the same input always yields the same
/// sequence. Malformed blocks are kept with defaulted fields rather
/// than dropped; only a block whose outer markers never match is
/// absent from the output.
pub fn parse(raw: &str) -> Vec<Question> {
    let mut questions = Vec::new();
    let mut cursor = 0;

    while let Some((start, end)) = next_block(raw, cursor) {
        questions.push(parse_block(&raw[start..end]));
        cursor = end;
    }

    questions
}

/// Locate the next `QUESTION <n> ... Correct Answer: <letters>` span at
/// or after `from`. The terminator is the first answer marker after the
/// start marker, so blocks never overlap or nest.
fn next_block(raw: &str, from: usize) -> Option<(usize, usize)> {
    let start = find_marker(raw, QUESTION_MARKER, from, |b| b.is_ascii_digit())?;
    let end = answer_end(raw, start + QUESTION_MARKER.len())?;
    Some((start, end))
}

/// End offset (exclusive) of the first `Correct Answer: <letters>`
/// terminator at or after `from`, letter run included. An occurrence
/// with no letter directly after the marker does not terminate a block.
fn answer_end(raw: &str, from: usize) -> Option<usize> {
    let at = find_marker(raw, ANSWER_MARKER, from, |b| b.is_ascii_alphabetic())?;
    let bytes = raw.as_bytes();
    let mut end = at + ANSWER_MARKER.len();
    while end < bytes.len() && bytes[end].is_ascii_alphabetic() {
        end += 1;
    }
    Some(end)
}

/// ASCII-case-insensitive search for `needle` at or after `from`, where
/// the byte directly following the match satisfies `followed_by`.
///
/// Both markers are ASCII, so a match always starts and ends on a char
/// boundary even in non-ASCII prose.
fn find_marker(
    raw: &str,
    needle: &str,
    from: usize,
    followed_by: impl Fn(u8) -> bool,
) -> Option<usize> {
    let hay = raw.as_bytes();
    let ned = needle.as_bytes();
    let mut i = from;
    while i + ned.len() < hay.len() {
        if hay[i..i + ned.len()].eq_ignore_ascii_case(ned) && followed_by(hay[i + ned.len()]) {
            return Some(i);
        }
        i += 1;
    }
    None
}

/// Extract the fields of one matched block.
fn parse_block(block: &str) -> Question {
    let number = parse_number(block);
    let answer = parse_answer(block);
    let body = strip_markers(block);
    let (text, options) = split_options(&body);

    Question {
        number,
        text,
        options,
        answer,
    }
}

/// Leading integer of the `QUESTION <n>` label, `0` when absent.
fn parse_number(block: &str) -> u32 {
    let Some(at) = find_marker(block, QUESTION_MARKER, 0, |b| b.is_ascii_digit()) else {
        return 0;
    };
    let rest = &block[at + QUESTION_MARKER.len()..];
    let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
    rest[..digits].parse().unwrap_or(0)
}

/// Letter run of the `Correct Answer:` key, uppercased; empty when absent.
fn parse_answer(block: &str) -> String {
    let Some(at) = find_marker(block, ANSWER_MARKER, 0, |b| b.is_ascii_alphabetic()) else {
        return String::new();
    };
    let rest = &block[at + ANSWER_MARKER.len()..];
    let letters = rest.bytes().take_while(u8::is_ascii_alphabetic).count();
    rest[..letters].to_ascii_uppercase()
}

/// Remove the answer-key marker with its letters, then the
/// block-leading `QUESTION <n>` label, trimming at each step.
///
/// Only the leading label is stripped; a `QUESTION <n>` embedded in
/// prose stays part of the prompt.
fn strip_markers(block: &str) -> String {
    let without_key = match find_marker(block, ANSWER_MARKER, 0, |b| b.is_ascii_alphabetic()) {
        Some(at) => {
            let bytes = block.as_bytes();
            let mut end = at + ANSWER_MARKER.len();
            while end < bytes.len() && bytes[end].is_ascii_alphabetic() {
                end += 1;
            }
            format!("{}{}", &block[..at], &block[end..])
        }
        None => block.to_string(),
    };

    strip_leading_label(without_key.trim()).trim().to_string()
}

fn strip_leading_label(body: &str) -> &str {
    let bytes = body.as_bytes();
    let marker = QUESTION_MARKER.as_bytes();
    if bytes.len() > marker.len()
        && bytes[..marker.len()].eq_ignore_ascii_case(marker)
        && bytes[marker.len()].is_ascii_digit()
    {
        let digits = bytes[marker.len()..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count();
        body[marker.len() + digits..].trim_start()
    } else {
        body
    }
}

/// Split the cleaned block body into prompt text and option entries.
///
/// The first line whose first two bytes are an uppercase ASCII letter
/// and a period starts the options region; the region is then cut again
/// at every such line. Segments that are empty after trimming are
/// discarded. No matching line means the whole body is prompt text.
fn split_options(body: &str) -> (String, Vec<String>) {
    let Some(&first) = option_line_offsets(body).first() else {
        return (body.trim().to_string(), Vec::new());
    };

    let text = body[..first].trim().to_string();
    let region = body[first..].trim();

    let mut cuts = option_line_offsets(region);
    cuts.push(region.len());
    let options = cuts
        .windows(2)
        .map(|pair| region[pair[0]..pair[1]].trim())
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .collect();

    (text, options)
}

/// Byte offsets of every line start shaped like an option marker
/// (uppercase ASCII letter followed by a period). Case-sensitive, no
/// leading-whitespace tolerance.
fn option_line_offsets(text: &str) -> Vec<usize> {
    let bytes = text.as_bytes();
    let mut offsets = Vec::new();
    let mut line_start = 0;

    loop {
        let line = &bytes[line_start..];
        if line.len() >= 2 && line[0].is_ascii_uppercase() && line[1] == b'.' {
            offsets.push(line_start);
        }
        match line.iter().position(|&b| b == b'\n') {
            Some(nl) => line_start += nl + 1,
            None => break,
        }
    }

    offsets
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_BLOCKS: &str = "QUESTION 1\nWhat is S3?\nA. A compute service\nB. A storage service\nCorrect Answer: B\nQUESTION 2\nWhich are durable? (Choose two)\nA. EBS\nB. S3\nC. Instance Store\nCorrect Answer: AB";

    #[test]
    fn test_parses_well_formed_blocks_in_order() {
        let questions = parse(TWO_BLOCKS);
        assert_eq!(questions.len(), 2);

        assert_eq!(questions[0].number, 1);
        assert_eq!(questions[0].text, "What is S3?");
        assert_eq!(
            questions[0].options,
            vec!["A. A compute service", "B. A storage service"]
        );
        assert_eq!(questions[0].answer, "B");
        assert!(!questions[0].is_multi_select());

        assert_eq!(questions[1].number, 2);
        assert_eq!(questions[1].text, "Which are durable? (Choose two)");
        assert_eq!(
            questions[1].options,
            vec!["A. EBS", "B. S3", "C. Instance Store"]
        );
        assert_eq!(questions[1].answer, "AB");
        assert!(questions[1].is_multi_select());
    }

    #[test]
    fn test_parsing_is_idempotent() {
        assert_eq!(parse(TWO_BLOCKS), parse(TWO_BLOCKS));
    }

    #[test]
    fn test_empty_input_yields_no_questions() {
        assert!(parse("").is_empty());
        assert!(parse("no markers anywhere").is_empty());
    }

    #[test]
    fn test_markers_match_case_insensitively() {
        let questions = parse("question 7\nPick one.\nA. Yes\nB. No\ncorrect answer: b");
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].number, 7);
        assert_eq!(questions[0].answer, "B");
        assert_eq!(questions[0].options, vec!["A. Yes", "B. No"]);
    }

    #[test]
    fn test_optionless_block_keeps_full_text() {
        let questions = parse("QUESTION 3\nDescribe the shared\nresponsibility model.\nCorrect Answer: A");
        assert_eq!(questions.len(), 1);
        assert_eq!(
            questions[0].text,
            "Describe the shared\nresponsibility model."
        );
        assert!(questions[0].options.is_empty());
    }

    #[test]
    fn test_multi_line_prompt_before_options() {
        let raw = "QUESTION 4\nAn application stores logs.\nIt needs lifecycle rules.\nWhat should it use?\nA. S3\nB. EBS\nCorrect Answer: A";
        let questions = parse(raw);
        assert_eq!(
            questions[0].text,
            "An application stores logs.\nIt needs lifecycle rules.\nWhat should it use?"
        );
        assert_eq!(questions[0].options, vec!["A. S3", "B. EBS"]);
    }

    #[test]
    fn test_option_spanning_multiple_lines_stays_one_segment() {
        let raw = "QUESTION 5\nPick.\nA. First option\n   continued on a second line\nB. Second option\nCorrect Answer: B";
        let questions = parse(raw);
        assert_eq!(
            questions[0].options,
            vec![
                "A. First option\n   continued on a second line",
                "B. Second option"
            ]
        );
    }

    #[test]
    fn test_block_without_start_marker_defaults_number_to_zero() {
        let question = parse_block("Pick one.\nA. Yes\nB. No\nCorrect Answer: A");
        assert_eq!(question.number, 0);
        assert_eq!(question.answer, "A");
        assert_eq!(question.options, vec!["A. Yes", "B. No"]);
    }

    #[test]
    fn test_block_without_key_defaults_answer_to_empty() {
        let question = parse_block("QUESTION 9\nPick one.\nA. Yes\nB. No");
        assert_eq!(question.number, 9);
        assert_eq!(question.answer, "");
        assert_eq!(question.options, vec!["A. Yes", "B. No"]);
    }

    #[test]
    fn test_block_without_terminator_is_not_discovered() {
        assert!(parse("QUESTION 1\nPick one.\nA. Yes\nB. No").is_empty());
    }

    #[test]
    fn test_key_without_letters_does_not_terminate_a_block() {
        // The empty key is skipped; the block runs to the next real key.
        let questions = parse("QUESTION 1\nPick.\nCorrect Answer: \nStill the same block.\nCorrect Answer: C");
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].answer, "C");
        assert!(questions[0].text.contains("Still the same block."));
    }

    #[test]
    fn test_question_label_in_prose_stays_in_text() {
        let questions = parse("QUESTION 1\nSee QUESTION 99 for context.\nA. Yes\nCorrect Answer: A");
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].number, 1);
        assert_eq!(questions[0].text, "See QUESTION 99 for context.");
    }

    #[test]
    fn test_prose_line_shaped_like_marker_is_split() {
        // Accepted source behavior: "E.g." at a line start reads as an
        // option marker and cuts the prompt there.
        let questions = parse("QUESTION 6\nWhat applies?\nE.g. consider limits\nA. Yes\nCorrect Answer: A");
        assert_eq!(questions[0].text, "What applies?");
        assert_eq!(
            questions[0].options,
            vec!["E.g. consider limits", "A. Yes"]
        );
    }

    #[test]
    fn test_text_between_blocks_is_ignored() {
        let raw = "intro chatter\nQUESTION 1\nPick.\nA. Yes\nCorrect Answer: A\nstray notes\nQUESTION 2\nPick again.\nB. No\nCorrect Answer: B\ntrailing junk";
        let questions = parse(raw);
        assert_eq!(questions.len(), 2);
        assert_eq!(questions[0].number, 1);
        assert_eq!(questions[1].number, 2);
        assert_eq!(questions[0].text, "Pick.");
        assert_eq!(questions[1].text, "Pick again.");
    }

    #[test]
    fn test_numbers_are_taken_literally_not_reindexed() {
        let raw = "QUESTION 40\nFirst.\nA. x\nCorrect Answer: A\nQUESTION 12\nSecond.\nB. y\nCorrect Answer: B";
        let questions = parse(raw);
        assert_eq!(questions[0].number, 40);
        assert_eq!(questions[1].number, 12);
    }

    #[test]
    fn test_non_ascii_prompt_survives() {
        let raw = "QUESTION 1\n애플리케이션이 로그를 저장합니다. 무엇을 사용해야 합니까?\nA. S3\nB. EBS\nCorrect Answer: A";
        let questions = parse(raw);
        assert_eq!(
            questions[0].text,
            "애플리케이션이 로그를 저장합니다. 무엇을 사용해야 합니까?"
        );
        assert_eq!(questions[0].options, vec!["A. S3", "B. EBS"]);
    }

    #[test]
    fn test_lowercase_key_letters_are_uppercased() {
        let questions = parse("QUESTION 2\nPick two.\nA. x\nB. y\nC. z\nCorrect Answer: ac");
        assert_eq!(questions[0].answer, "AC");
        assert!(questions[0].is_multi_select());
    }

    #[test]
    fn test_indented_option_lookalike_is_not_a_marker() {
        let questions = parse("QUESTION 8\nRead this:\n  A. indented, part of prose\nB. real option\nCorrect Answer: B");
        assert_eq!(
            questions[0].text,
            "Read this:\n  A. indented, part of prose"
        );
        assert_eq!(questions[0].options, vec!["B. real option"]);
    }
}
