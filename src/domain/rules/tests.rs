// Unit tests for business rules

use crate::domain::model::*;
use crate::domain::rules::*;

fn chunk_of(texts: &[&str]) -> Chunk {
    let words: Vec<Word> = texts
        .iter()
        .enumerate()
        .map(|(i, t)| Word::new(*t, i as f64 * 0.3, i as f64 * 0.3 + 0.3))
        .collect();
    let windows = words
        .iter()
        .map(|w| ActiveWindow {
            start: w.start,
            end: w.end,
        })
        .collect();
    Chunk {
        index: 0,
        start: 0.0,
        end: words.last().map(|w| w.end).unwrap_or(0.0),
        words,
        windows,
        close_reason: CloseReason::EndOfTranscript,
    }
}

#[test]
fn test_total_chars_counts_inter_word_spaces() {
    assert_eq!(AutoFitSizer::total_chars(&["THIS", "IS", "VIRAL"]), 13);
    assert_eq!(AutoFitSizer::total_chars(&[" padded  "]), 6);
    assert_eq!(AutoFitSizer::total_chars::<&str>(&[]), 0);
}

#[test]
fn test_auto_fit_short_chunks_keep_full_size() {
    assert_eq!(AutoFitSizer::scale_for_chars(0), 100);
    assert_eq!(AutoFitSizer::scale_for_chars(13), 100);
    assert_eq!(AutoFitSizer::scale_for_chars(20), 100);
}

#[test]
fn test_auto_fit_thirty_three_chars() {
    assert_eq!(AutoFitSizer::scale_for_chars(33), 60);
}

#[test]
fn test_auto_fit_long_word_pair() {
    let chunk = chunk_of(&["SUPERCALIFRAGILISTIC", "EXPIALIDOCIOUS"]);
    assert_eq!(AutoFitSizer::total_chars(&chunk.display_words(true)), 35);
    assert_eq!(AutoFitSizer::scale_for_chunk(&chunk, true), 57);
}

#[test]
fn test_auto_fit_is_monotonic() {
    let mut previous = AutoFitSizer::scale_for_chars(21);
    assert!(previous < 100);

    // Integer percentages strictly decrease while 20/n shrinks by more than 1%
    for total in 22..=40 {
        let scale = AutoFitSizer::scale_for_chars(total);
        assert!(scale < previous, "scale({}) = {} not below {}", total, scale, previous);
        previous = scale;
    }
    for total in 41..=500 {
        let scale = AutoFitSizer::scale_for_chars(total);
        assert!(scale <= previous);
        assert!(scale >= 1);
        previous = scale;
    }
}

#[test]
fn test_highlight_color_resolution() {
    let style = StyleConfig {
        highlight_color: HighlightColor::Cyan,
        ..StyleConfig::default()
    };
    let resolved = StyleResolver::resolve(&style, 70);
    assert_eq!(resolved.highlight_hex(), "#00FFFF");
    assert_eq!(resolved.base, Rgb::WHITE);
    assert_eq!(resolved.font_size, 84);
}

#[test]
fn test_background_treatments_are_exclusive() {
    let (outline, background) = StyleResolver::background(BackgroundStyle::Outline);
    assert_eq!(outline.width_px, 5.0);
    assert!(matches!(background, BackgroundSpec::OutlineStack { .. }));

    let (outline, background) = StyleResolver::background(BackgroundStyle::Box);
    assert_eq!(outline.width_px, 0.0);
    assert!(matches!(background, BackgroundSpec::Box { padding_px, .. } if padding_px == 12.0));

    let (outline, background) = StyleResolver::background(BackgroundStyle::Shadow);
    assert_eq!(outline.width_px, 0.0);
    assert!(matches!(background, BackgroundSpec::SoftShadow { .. }));

    let (_, background) = StyleResolver::background(BackgroundStyle::ThreeD);
    assert!(matches!(background, BackgroundSpec::HardShadow { .. }));
}

#[test]
fn test_entrance_curves_per_animation() {
    assert!(matches!(
        StyleResolver::entrance(AnimationStyle::Pop).easing,
        Easing::Spring { .. }
    ));
    assert!(matches!(
        StyleResolver::entrance(AnimationStyle::Bounce).easing,
        Easing::Spring { .. }
    ));
    assert!(matches!(
        StyleResolver::entrance(AnimationStyle::Fade).easing,
        Easing::Linear { .. }
    ));

    let slide = StyleResolver::entrance(AnimationStyle::Slide);
    assert_eq!(slide.from_opacity, 0.0);
    assert!(slide.from_offset_y > 0.0);
}

#[test]
fn test_blank_font_falls_back() {
    let style = StyleConfig {
        font: "   ".to_string(),
        ..StyleConfig::default()
    };
    assert_eq!(StyleResolver::resolve(&style, 70).font_family, "Impact");
}

#[test]
fn test_resolved_style_serializes_hex_colors() {
    let resolved = StyleResolver::resolve(&StyleConfig::default(), 70);
    let json = serde_json::to_value(&resolved).unwrap();
    assert_eq!(json["highlight"], "#FFFF00");
    assert_eq!(json["background"]["kind"], "outline-stack");

    let back: ResolvedStyle = serde_json::from_value(json).unwrap();
    assert_eq!(back, resolved);
}
