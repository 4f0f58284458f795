//! Response parser — recovers records from the loosely formatted text the model returns.
//!
//! The formats requested in `creative::prompts` are conventions, not guarantees.
//! Every field degrades to absent/empty when it is missing or malformed; nothing
//! here returns an error.

use crate::creative::ranking::mark_recommended;
use crate::models::caption::{CaptionAnalysis, CaptionVariation, IdeationResult, ImageSuggestion};
use crate::models::localization::LocalizationResult;

const ENGAGEMENT_MARKER: &str = "Engagement:";
const WHY_MARKER: &str = "Why:";

const QUOTES: &[char] = &['"', '\u{201C}', '\u{201D}'];

// ────────────────────────────────────────────────────────────────────────────
// Ideation list
// ────────────────────────────────────────────────────────────────────────────

/// Parses a brainstorm response of the form
/// `1. "Slogan" (Engagement: 8.5/10) Why: reason`.
///
/// Lines with a parenthesised tail become variations (and ideas); other dotted
/// lines become plain ideas. Missing scores stay absent for the A/B simulation to
/// fill. The top-scoring variation is marked recommended.
pub fn parse_ideation(text: &str) -> IdeationResult {
    let mut result = IdeationResult::default();

    for line in text.trim().lines() {
        let Some((_ordinal, remainder)) = line.split_once('.') else {
            continue;
        };
        let idea = strip_quotes(remainder);

        match split_metadata(idea) {
            Some((caption, meta)) => {
                let caption = strip_quotes(caption);
                if caption.is_empty() {
                    continue;
                }
                result.ideas.push(caption.to_string());
                result.variations.push(CaptionVariation {
                    caption: caption.to_string(),
                    score: meta
                        .split(ENGAGEMENT_MARKER)
                        .nth(1)
                        .and_then(parse_score),
                    why: meta.split(WHY_MARKER).nth(1).map(clean_rationale).unwrap_or_default(),
                    recommended: false,
                });
            }
            None if !idea.is_empty() => result.ideas.push(idea.to_string()),
            None => {}
        }
    }

    mark_recommended(&mut result.variations);
    result
}

/// Splits `caption (metadata...` at an opening parenthesis.
///
/// When an engagement or rationale marker is present, the split uses the last `(`
/// before the first marker so parentheses inside the caption survive. Without a
/// marker the first `(` starts the metadata.
fn split_metadata(idea: &str) -> Option<(&str, &str)> {
    let marker_at = [ENGAGEMENT_MARKER, WHY_MARKER]
        .iter()
        .filter_map(|marker| idea.find(marker))
        .min();
    let open = marker_at
        .and_then(|at| idea[..at].rfind('('))
        .or_else(|| idea.find('('))?;
    Some((&idea[..open], &idea[open + 1..]))
}

fn clean_rationale(raw: &str) -> String {
    let why = raw.trim();
    if let Some(inner) = why.strip_prefix('(').and_then(|w| w.strip_suffix(')')) {
        return inner.trim().to_string();
    }
    why.trim_end_matches(')').trim().to_string()
}

// ────────────────────────────────────────────────────────────────────────────
// Caption analysis / image suggestion
// ────────────────────────────────────────────────────────────────────────────

/// Which labelled-line response is being read. The two shapes differ only in the
/// top-level `Caption:` line and the header above the numbered alternates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AnalysisShape {
    CaptionAnalysis,
    ImageSuggestion,
}

impl AnalysisShape {
    fn alternates_header(&self) -> &'static str {
        match self {
            AnalysisShape::CaptionAnalysis => "suggested captions:",
            AnalysisShape::ImageSuggestion => "alternate captions:",
        }
    }

    fn has_caption_line(&self) -> bool {
        matches!(self, AnalysisShape::ImageSuggestion)
    }
}

/// Parses the response to a caption + image analysis request.
pub fn parse_caption_analysis(text: &str) -> CaptionAnalysis {
    parse_labelled(text, AnalysisShape::CaptionAnalysis).1
}

/// Parses the response to an image-only caption suggestion request.
pub fn parse_image_suggestion(text: &str) -> ImageSuggestion {
    let (caption, analysis) = parse_labelled(text, AnalysisShape::ImageSuggestion);
    ImageSuggestion { caption, analysis }
}

fn parse_labelled(text: &str, shape: AnalysisShape) -> (String, CaptionAnalysis) {
    let mut caption = String::new();
    let mut analysis = CaptionAnalysis::default();

    for line in text.trim().lines().map(str::trim) {
        if shape.has_caption_line() {
            if let Some(value) = strip_label(line, "caption:") {
                caption = strip_quotes(value).to_string();
                continue;
            }
        }

        if let Some(value) = strip_label(line, "engagement score:") {
            // The score sits between the label and any further colon, before the `/10`.
            analysis.engagement_score = value.split(':').next().and_then(parse_score);
        } else if let Some(value) = strip_label(line, "why:") {
            analysis.rationale = value.trim().to_string();
        } else if let Some(value) = strip_label(line, "brand voice:") {
            analysis.brand_voice = value.trim().to_string();
        } else if let Some(value) = strip_label(line, "compliance:") {
            analysis.compliance = value.trim().to_string();
        } else if strip_label(line, shape.alternates_header()).is_some() {
            continue;
        } else if let Some(alternate) = numbered_caption(line) {
            analysis
                .caption_variations
                .push(CaptionVariation::unscored(alternate));
        }
    }

    (caption, analysis)
}

/// `2. "Alt caption"` → `Alt caption`. Requires a leading 1–9 and a period.
fn numbered_caption(line: &str) -> Option<&str> {
    if !matches!(line.chars().next(), Some('1'..='9')) {
        return None;
    }
    let (_ordinal, rest) = line.split_once('.')?;
    Some(strip_quotes(rest)).filter(|c| !c.is_empty())
}

// ────────────────────────────────────────────────────────────────────────────
// Localization
// ────────────────────────────────────────────────────────────────────────────

/// Parses `Localized Caption: "..."` and `Note: ...` lines.
pub fn parse_localization(text: &str) -> LocalizationResult {
    let mut result = LocalizationResult::default();

    for line in text.trim().lines().map(str::trim) {
        if let Some(value) = strip_label(line, "localized caption:") {
            result.localized_caption = strip_quotes(value).to_string();
        } else if let Some(value) = strip_label(line, "note:") {
            result.notes = value.trim().to_string();
        }
    }

    result
}

// ────────────────────────────────────────────────────────────────────────────
// Shared helpers
// ────────────────────────────────────────────────────────────────────────────

/// Case-insensitive prefix match; returns the text after the label.
fn strip_label<'a>(line: &'a str, label: &str) -> Option<&'a str> {
    let head = line.get(..label.len())?;
    if head.eq_ignore_ascii_case(label) {
        Some(&line[label.len()..])
    } else {
        None
    }
}

fn strip_quotes(s: &str) -> &str {
    s.trim().trim_matches(QUOTES).trim()
}

/// Reads the decimal before an optional `/` (e.g. ` 8.5/10`). Anything that is
/// not a finite number in 0–10 is treated as no score.
fn parse_score(raw: &str) -> Option<f64> {
    let number = raw.split('/').next()?.trim();
    number
        .parse::<f64>()
        .ok()
        .filter(|score| score.is_finite() && (0.0..=10.0).contains(score))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::creative::composer::compose_ideation;
    use crate::creative::ranking::{run_ab_simulation, FixedScores};
    use crate::models::style::Style;

    const IDEATION_RESPONSE: &str = r#"
1. "Spin Into the Weekend" (Engagement: 8.5/10) Why: Playful and time-bound.
2. "Deal Me In" (Engagement: 7.2/10) Why: Short, punchy and inviting.
3. "Night of Aces" (Engagement: 9.1/10) Why: Evokes winning moments.
"#;

    #[test]
    fn test_ideation_well_formed_lines() {
        let result = parse_ideation(IDEATION_RESPONSE);

        assert_eq!(result.variations.len(), 3);
        assert_eq!(
            result.ideas,
            vec!["Spin Into the Weekend", "Deal Me In", "Night of Aces"]
        );
        let v = &result.variations[0];
        assert_eq!(v.caption, "Spin Into the Weekend");
        assert!((v.score.unwrap() - 8.5).abs() < 1e-9);
        assert_eq!(v.why, "Playful and time-bound.");
        assert_eq!(result.variations[1].why, "Short, punchy and inviting.");
    }

    #[test]
    fn test_ideation_marks_highest_score_recommended() {
        let result = parse_ideation(IDEATION_RESPONSE);
        let flags: Vec<bool> = result.variations.iter().map(|v| v.recommended).collect();
        assert_eq!(flags, vec![false, false, true]);
    }

    #[test]
    fn test_ideation_plain_lines_have_no_variation() {
        let text = "Here are some ideas.\n1. Jackpot Fridays\n2. \"Roll With It\" (Engagement: 6/10) Why: Fun pun\n";
        let result = parse_ideation(text);

        assert_eq!(result.ideas, vec!["Jackpot Fridays", "Roll With It"]);
        assert_eq!(result.variations.len(), 1);
        assert!(result.ideas.len() >= result.variations.len());
        assert!(result.variations[0].recommended);
    }

    #[test]
    fn test_ideation_parenthesis_without_markers_is_unscored_variation() {
        let result = parse_ideation("1. Spin (and win)\n2. Roll (fast)");
        assert_eq!(result.ideas, vec!["Spin", "Roll"]);
        assert_eq!(result.variations.len(), 2);
        assert!(result.variations.iter().all(|v| v.score.is_none() && v.why.is_empty()));
        assert!(result.variations[0].recommended);
        assert!(!result.variations[1].recommended);
    }

    #[test]
    fn test_ideation_caption_keeps_inner_parenthesis_before_metadata() {
        let result =
            parse_ideation("1. \"Spin (and Win) Fridays\" (Engagement: 8.4/10) Why: Playful.");
        assert_eq!(result.ideas, vec!["Spin (and Win) Fridays"]);
        let v = &result.variations[0];
        assert_eq!(v.caption, "Spin (and Win) Fridays");
        assert_eq!(v.score, Some(8.4));
        assert_eq!(v.why, "Playful.");
    }

    #[test]
    fn test_ideation_bad_score_is_absent() {
        let result = parse_ideation("1. \"Lucky Streak\" (Engagement: high/10) Why: Memorable");
        assert_eq!(result.variations.len(), 1);
        assert_eq!(result.variations[0].score, None);
        assert_eq!(result.variations[0].why, "Memorable");
        assert!(result.variations[0].recommended);
    }

    #[test]
    fn test_ideation_parenthesised_rationale_unwrapped() {
        let result =
            parse_ideation("1. \"All In\" (Engagement: 7/10) Why: (Bold call to action)");
        assert_eq!(result.variations[0].why, "Bold call to action");
    }

    #[test]
    fn test_ideation_rationale_inside_parenthesis_trimmed() {
        let result = parse_ideation("1. All In (Engagement: 7/10, Why: Bold call to action)");
        assert_eq!(result.variations[0].caption, "All In");
        assert_eq!(result.variations[0].score, Some(7.0));
        assert_eq!(result.variations[0].why, "Bold call to action");
    }

    #[test]
    fn test_ideation_empty_text() {
        assert_eq!(parse_ideation(""), IdeationResult::default());
    }

    #[test]
    fn test_compose_then_parse_recovers_variations_in_order() {
        let prompt = compose_ideation("Give me 2 taglines for a poker night", Style::Witty).unwrap();
        assert!(prompt.contains("brainstorm 2 unique"));
        assert!(prompt.contains("Make the ideas Witty"));

        let response = "1. \"Bluff Responsibly\" (Engagement: 7.9/10) Why: Witty twist.\n\
                        2. \"Full House Party\" (Engagement: 8.1/10) Why: Social and upbeat.";
        let result = parse_ideation(response);
        let captions: Vec<&str> = result.variations.iter().map(|v| v.caption.as_str()).collect();
        assert_eq!(captions, vec!["Bluff Responsibly", "Full House Party"]);
    }

    const ANALYSIS_RESPONSE: &str = r#"Engagement Score: 7.5/10
Why: Clear offer, but generic wording.
Brand Voice: Yes, energetic and friendly.
Compliance: No issues; includes a play-responsibly cue.
Suggested Captions:
1. "Spin Smart, Win Big"
2. "Your Lucky Night Starts Here"
"#;

    #[test]
    fn test_caption_analysis_all_fields() {
        let analysis = parse_caption_analysis(ANALYSIS_RESPONSE);

        assert_eq!(analysis.engagement_score, Some(7.5));
        assert_eq!(analysis.rationale, "Clear offer, but generic wording.");
        assert_eq!(analysis.brand_voice, "Yes, energetic and friendly.");
        assert_eq!(analysis.compliance, "No issues; includes a play-responsibly cue.");
        assert_eq!(
            analysis.caption_variations,
            vec![
                CaptionVariation::unscored("Spin Smart, Win Big"),
                CaptionVariation::unscored("Your Lucky Night Starts Here"),
            ]
        );
    }

    #[test]
    fn test_caption_analysis_labels_case_insensitive() {
        let analysis =
            parse_caption_analysis("ENGAGEMENT SCORE: 9/10\nbrand voice: On brand\nCOMPLIANCE: ok");
        assert_eq!(analysis.engagement_score, Some(9.0));
        assert_eq!(analysis.brand_voice, "On brand");
        assert_eq!(analysis.compliance, "ok");
    }

    #[test]
    fn test_malformed_engagement_score_is_absent_and_still_ranks() {
        let text = "Engagement Score: N/A/10\nSuggested Captions:\n1. \"A\"\n2. \"B\"";
        let analysis = parse_caption_analysis(text);
        assert_eq!(analysis.engagement_score, None);

        let ranked = run_ab_simulation(analysis.caption_variations, &FixedScores(8.0));
        assert_eq!(ranked.iter().filter(|v| v.recommended).count(), 1);
        assert!(ranked.iter().all(|v| v.score.is_some()));
    }

    #[test]
    fn test_caption_analysis_missing_fields_default() {
        let analysis = parse_caption_analysis("Nothing useful here");
        assert_eq!(analysis, CaptionAnalysis::default());
    }

    #[test]
    fn test_numbered_line_without_period_is_ignored() {
        let analysis = parse_caption_analysis("Suggested Captions:\n2024 vibes only\n1. Keep it");
        assert_eq!(
            analysis.caption_variations,
            vec![CaptionVariation::unscored("Keep it")]
        );
    }

    #[test]
    fn test_caption_line_ignored_in_analysis_mode() {
        let analysis = parse_caption_analysis("Caption: \"Not expected\"\nBrand Voice: fine");
        assert_eq!(analysis.brand_voice, "fine");
        assert!(analysis.caption_variations.is_empty());
    }

    #[test]
    fn test_image_suggestion_parses_caption_and_alternates() {
        let text = r#"Caption: "Fortune Favours the Bold"
Engagement Score: 8.2/10
Why: Confident and aspirational.
Brand Voice: Matches a premium tone.
Compliance: Consider adding 18+ messaging.
Alternate Captions:
1. "Bold Moves, Big Nights"
2. "Play Bold, Play Smart"
"#;
        let suggestion = parse_image_suggestion(text);

        assert_eq!(suggestion.caption, "Fortune Favours the Bold");
        assert_eq!(suggestion.analysis.engagement_score, Some(8.2));
        assert_eq!(suggestion.analysis.compliance, "Consider adding 18+ messaging.");
        assert_eq!(suggestion.analysis.caption_variations.len(), 2);
        assert_eq!(
            suggestion.analysis.caption_variations[1].caption,
            "Play Bold, Play Smart"
        );
    }

    #[test]
    fn test_localization_strips_quotes() {
        let result = parse_localization("Localized Caption: \"Bonjour le monde\"");
        assert_eq!(result.localized_caption, "Bonjour le monde");
        assert_eq!(result.notes, "");
    }

    #[test]
    fn test_localization_with_note() {
        let text = "Localized Caption: \"¡Gira y gana!\"\nNote: Exclamation marks are expected in Spanish.";
        let result = parse_localization(text);
        assert_eq!(result.localized_caption, "¡Gira y gana!");
        assert_eq!(result.notes, "Exclamation marks are expected in Spanish.");
    }

    #[test]
    fn test_localization_blank_note() {
        let result = parse_localization("Localized Caption: Hallo\nNote:");
        assert_eq!(result.localized_caption, "Hallo");
        assert_eq!(result.notes, "");
    }

    #[test]
    fn test_strip_label_handles_multibyte_prefix() {
        assert_eq!(strip_label("é", "note:"), None);
        assert_eq!(strip_label("Note: x", "note:"), Some(" x"));
    }

    #[test]
    fn test_parse_score_rejects_out_of_range() {
        assert_eq!(parse_score(" 8.5/10"), Some(8.5));
        assert_eq!(parse_score("85/10"), None);
        assert_eq!(parse_score("NaN/10"), None);
        assert_eq!(parse_score(""), None);
    }
}
