//! Printable HTML rendering of card sheets.
//!
//! Produces one self-contained document with A4 pages, a three column card
//! grid and a page break after every sheet. An external HTML-to-PDF tool
//! turns it into the final print file.

use cardsheet_core::{CardRecord, CardType, ClassRegistry, EditorSession, Sheet, StoredCard};
use maud::{html, Markup, PreEscaped, DOCTYPE};
use serde::Serialize;

const STYLE: &str = r#"
@page { size: A4 portrait; margin: 0; }
body { margin: 0; font-family: Georgia, serif; }
.sheet { width: 210mm; height: 297mm; padding: 8mm; box-sizing: border-box;
  display: grid; grid-template-columns: repeat(3, 1fr); grid-auto-rows: 92mm;
  gap: 3mm; page-break-after: always; break-after: page; }
.card { border: 3mm solid #3a2f2f; border-radius: 3mm; padding: 2mm;
  box-sizing: border-box; overflow: hidden; font-size: 7pt; background: #fff; }
.title { font-size: 10pt; font-weight: bold; text-align: center; }
.badges { text-align: center; }
.badge { display: inline-block; margin: 0 1px; padding: 0 3px; border-radius: 2px;
  background: #3a2f2f; color: #fff; font-size: 6pt; }
.class-line { text-align: center; font-style: italic; margin: 1mm 0; }
.section-label { font-weight: bold; margin-top: 1mm; }
.text { text-align: justify; }
.backing-card { border: none; padding: 0; }
"#;

/// Subtitle line shown under a card's title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Subtitle {
    pub heading: String,
    pub detail: String,
}

/// Level label used for spells and the level filter.
pub fn level_label(level: u8) -> String {
    if level == 0 {
        "Cantrip".to_string()
    } else {
        format!("Level {}", level)
    }
}

pub fn card_subtitle(card: &CardRecord) -> Subtitle {
    let text = |key: &str| card.field_text(key).unwrap_or_default();
    let text_or = |key: &str, fallback: &str| {
        card.field_text(key)
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| fallback.to_string())
    };

    match card.card_type {
        CardType::Spell => Subtitle {
            heading: level_label(card.effective_level()),
            detail: text("school"),
        },
        CardType::Weapon => Subtitle {
            heading: text_or("type", "Weapon"),
            detail: text("damage"),
        },
        CardType::Armor => Subtitle {
            heading: text_or("type", "Armor"),
            detail: format!("AC {}", text("armorClass")),
        },
    }
}

/// Render the session's sheets as a printable document.
pub fn render_document(session: &EditorSession) -> Markup {
    html! {
        (DOCTYPE)
        html {
            head {
                meta charset="utf-8";
                title { "Cards" }
                style { (PreEscaped(STYLE)) }
            }
            body {
                @for sheet in session.sheets() {
                    @match sheet {
                        Sheet::Front { cards } => {
                            div class="sheet" {
                                @for card in cards.iter().filter_map(|id| session.card(*id)) {
                                    (render_card(card, session.registry()))
                                }
                            }
                        }
                        Sheet::Backing { slots, .. } => {
                            (render_backing(*slots, session.layout().backing_image(), session.mirror_backing()))
                        }
                    }
                }
            }
        }
    }
}

/// Render a single card face.
pub fn render_card(card: &StoredCard, registry: &ClassRegistry) -> Markup {
    let record = &card.record;
    let border = cardsheet_core::border_color(record, registry);
    let title = if record.name.trim().is_empty() {
        "Unnamed"
    } else {
        record.name.as_str()
    };
    let subtitle = card_subtitle(record);

    html! {
        div class="card" data-id=(card.id.to_string()) style={ "border-color: " (border) } {
            div class="title" { (title) }
            div class="badges" {
                @for class in &record.classes {
                    span class="badge" { (registry.badge(class)) }
                }
            }
            div class="class-line" {
                strong { (subtitle.heading) }
                " \u{2022} "
                (subtitle.detail)
            }
            @for field in record.card_type.fields() {
                @let value = record.field_text(field.key).unwrap_or_default();
                @if field.long_text {
                    div class="section-label" { (field.label) }
                    div class="text" { (long_text(&value)) }
                } @else if !value.trim().is_empty() {
                    div class="section-label" { (field.label) }
                    div { (value) }
                }
            }
        }
    }
}

fn render_backing(slots: usize, image: Option<&str>, mirror: bool) -> Markup {
    let background = match image {
        Some(url) => format!("background: url(\"{}\") center/cover no-repeat", url),
        None => "background: #f0f0f0".to_string(),
    };

    html! {
        div class="sheet backing-sheet" style=[mirror.then_some("transform: scaleX(-1)")] {
            @for _ in 0..slots {
                div class="card backing-card" style=(background) {}
            }
        }
    }
}

/// Long text with line breaks (real or a literal `\n`) shown as `<br>`.
fn long_text(value: &str) -> Markup {
    let text = value.replace("\\n", "\n");
    html! {
        @for (i, line) in text.split('\n').enumerate() {
            @if i > 0 {
                br;
            }
            (line)
        }
    }
}
