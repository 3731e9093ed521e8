//! Caption timing and styling.
//!
//! [`compose_overlays`] is the heart of the crate: a pure, single-pass
//! transform from recognized word timings to timed, styled overlay elements.
//! [`render_ass`] then serializes those elements to an ASS subtitle document
//! for ffmpeg's `subtitles` filter.

use serde::Serialize;

use crate::types::WordTiming;

/// A named bundle of visual attributes for one caption word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CaptionStyle {
    pub font: &'static str,
    pub font_size: u32,
    /// Fill color, `#RRGGBB`.
    pub fill: &'static str,
    /// Outline color, `#RRGGBB`.
    pub outline: &'static str,
    pub outline_width: u32,
}

/// Flashier look for the intro words.
pub const INTRO_STYLE: CaptionStyle = CaptionStyle {
    font: "Impact",
    font_size: 54,
    fill: "#FF6B6B",
    outline: "#4ECDC4",
    outline_width: 2,
};

/// Regular look for the summary content.
pub const CONTENT_STYLE: CaptionStyle = CaptionStyle {
    font: "Arial Bold",
    font_size: 48,
    fill: "#FFFFFF",
    outline: "#000000",
    outline_width: 2,
};

/// One positioned, timed, styled caption, derived from exactly one
/// [`WordTiming`]. Anchored to the frame center; there is no per-word layout.
#[derive(Debug, Clone, PartialEq)]
pub struct CaptionOverlayElement {
    pub text: String,
    pub style: CaptionStyle,
    /// Seconds into the track at which the word appears.
    pub visible_from: f64,
    /// How long it stays on screen.
    pub visible_duration: f64,
}

/// Map word timings onto styled overlay elements.
///
/// The style boundary is the intro phrase's whitespace-token count K: words
/// at index < K get [`INTRO_STYLE`], the rest [`CONTENT_STYLE`]. K is
/// computed once, up front — it does not depend on the recognized words, so
/// if the recognizer's segmentation diverges from the phrase's own token
/// count the boundary can land mid-intro or mid-content.
///
/// Output has the same length and order as the input. Timings are passed
/// through unvalidated; an empty input yields an empty output.
pub fn compose_overlays(
    word_timings: &[WordTiming],
    intro_phrase: &str,
) -> Vec<CaptionOverlayElement> {
    let intro_word_count = intro_phrase.split_whitespace().count();

    word_timings
        .iter()
        .enumerate()
        .map(|(index, timing)| CaptionOverlayElement {
            text: timing.text.clone(),
            style: if index < intro_word_count {
                INTRO_STYLE
            } else {
                CONTENT_STYLE
            },
            visible_from: timing.start,
            visible_duration: timing.duration(),
        })
        .collect()
}

/// Serialize overlay elements to an ASS document sized to the output frame.
///
/// One `Dialogue` line per element, centered with `\pos`, style carried in
/// per-line override tags since the two styles alternate within one event
/// stream.
pub fn render_ass(elements: &[CaptionOverlayElement], frame_w: u32, frame_h: u32) -> String {
    let mut out = format!(
        "[Script Info]\n\
         ScriptType: v4.00+\n\
         PlayResX: {frame_w}\n\
         PlayResY: {frame_h}\n\
         ScaledBorderAndShadow: yes\n\
         \n\
         [V4+ Styles]\n\
         Format: Name,Fontname,Fontsize,PrimaryColour,SecondaryColour,OutlineColour,BackColour,Bold,Italic,Underline,StrikeOut,ScaleX,ScaleY,Spacing,Angle,BorderStyle,Outline,Shadow,Alignment,MarginL,MarginR,MarginV,Encoding\n\
         Style: Caption,{font},{size},&H00FFFFFF,&H00FFFFFF,&H00000000,&H64000000,0,0,0,0,100,100,0,0,1,2,0,5,10,10,10,1\n\
         \n\
         [Events]\n\
         Format: Layer,Start,End,Style,Name,MarginL,MarginR,MarginV,Effect,Text\n",
        font = CONTENT_STYLE.font,
        size = CONTENT_STYLE.font_size,
    );

    let (cx, cy) = (frame_w / 2, frame_h / 2);

    for element in elements {
        let start_cs = to_centiseconds(element.visible_from);
        // At least one centisecond on screen, so zero-duration words still render
        let end_cs = to_centiseconds(element.visible_from + element.visible_duration)
            .max(start_cs + 1);

        let style = &element.style;
        out.push_str(&format!(
            "Dialogue: 0,{start},{end},Caption,,0,0,0,,{{\\an5\\pos({cx},{cy})\\fn{font}\\fs{size}\\1c{fill}&\\3c{outline}&\\bord{bord}}}{text}\n",
            start = format_ass_time(start_cs),
            end = format_ass_time(end_cs),
            font = style.font,
            size = style.font_size,
            fill = ass_color(style.fill),
            outline = ass_color(style.outline),
            bord = style.outline_width,
            text = escape_ass(&element.text),
        ));
    }

    out
}

fn to_centiseconds(seconds: f64) -> i64 {
    (seconds * 100.0).round().max(0.0) as i64
}

/// Format centiseconds as an ASS timestamp: H:MM:SS.cc
fn format_ass_time(cs: i64) -> String {
    let total = cs.max(0);
    let h = total / 360_000;
    let m = (total % 360_000) / 6_000;
    let s = (total % 6_000) / 100;
    let c = total % 100;
    format!("{h}:{m:02}:{s:02}.{c:02}")
}

/// Convert `#RRGGBB` to ASS `&HAABBGGRR` (alpha 00 = opaque).
fn ass_color(hex: &str) -> String {
    let hex = hex.trim_start_matches('#');
    if hex.len() == 6 {
        let r = &hex[0..2];
        let g = &hex[2..4];
        let b = &hex[4..6];
        format!("&H00{b}{g}{r}")
    } else {
        "&H00FFFFFF".into()
    }
}

/// Escape ASS control characters in caption text.
fn escape_ass(text: &str) -> String {
    text.replace('\\', r"\\")
        .replace('{', r"\{")
        .replace('}', r"\}")
}
