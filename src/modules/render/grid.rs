//! Responsive card grid followed by the loading sentinel and spinner.

use super::card::AnimeCard;
use std::fmt::Write as _;

pub const SENTINEL_TEXT: &str = "Loading more...";
pub const SPINNER_SRC: &str = "./spinner.svg";
pub const SPINNER_SIZE: u32 = 56;

/// Keyframes name shared by every card's entrance animation
pub const FADE_KEYFRAMES: &str = "card-fade-in";

/// Column count by viewport width (px). Breakpoints are min-widths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridLayout {
    pub sm: u32,
    pub md: u32,
    pub lg: u32,
}

impl Default for GridLayout {
    fn default() -> Self {
        Self {
            sm: 640,
            md: 768,
            lg: 1024,
        }
    }
}

impl GridLayout {
    pub fn columns_for_width(&self, width: u32) -> usize {
        if width >= self.lg {
            4
        } else if width >= self.md {
            3
        } else if width >= self.sm {
            2
        } else {
            1
        }
    }
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, Copy)]
pub struct GridFrame<'a> {
    pub cards: &'a [AnimeCard],
    /// Whether the sentinel is still rendered and observed
    pub observing: bool,
    pub viewport_width: u32,
}

pub trait GridRenderer: Send + Sync {
    fn render(&self, frame: &GridFrame<'_>) -> String;
}

/// Fixed-width text cells laid out in rows, for terminals
#[derive(Debug, Clone)]
pub struct TextGridRenderer {
    layout: GridLayout,
    cell_width: usize,
}

impl Default for TextGridRenderer {
    fn default() -> Self {
        Self {
            layout: GridLayout::default(),
            cell_width: 30,
        }
    }
}

impl TextGridRenderer {
    pub fn new(layout: GridLayout, cell_width: usize) -> Self {
        Self {
            layout,
            cell_width: cell_width.max(8),
        }
    }

    fn cell_lines(&self, card: &AnimeCard) -> [String; 4] {
        [
            format!("#{}", card.key),
            card.title().to_string(),
            card.caption(),
            card.record.poster_url().unwrap_or("(no image)").to_string(),
        ]
    }

    fn fit(&self, text: &str) -> String {
        let inner = self.cell_width - 2;
        let count = text.chars().count();
        if count <= inner {
            format!("{}{}", text, " ".repeat(inner - count))
        } else {
            let mut cut: String = text.chars().take(inner - 1).collect();
            cut.push('…');
            cut
        }
    }
}

impl GridRenderer for TextGridRenderer {
    fn render(&self, frame: &GridFrame<'_>) -> String {
        let columns = self.layout.columns_for_width(frame.viewport_width);
        let mut out = String::new();

        for row in frame.cards.chunks(columns) {
            let cells: Vec<[String; 4]> = row.iter().map(|c| self.cell_lines(c)).collect();
            for line in 0..4 {
                let joined = cells
                    .iter()
                    .map(|cell| format!("| {}", self.fit(&cell[line])))
                    .collect::<String>();
                let _ = writeln!(out, "{}|", joined);
            }
            let _ = writeln!(out);
        }

        if frame.observing {
            let _ = writeln!(out, "{}", SENTINEL_TEXT);
            let _ = writeln!(out, "[spinner {}]", SPINNER_SRC);
        }
        out
    }
}

/// HTML fragment mirroring the web layout
#[derive(Debug, Clone, Default)]
pub struct HtmlGridRenderer;

impl HtmlGridRenderer {
    fn card_html(card: &AnimeCard) -> String {
        let fade = &card.transition;
        let mut html = format!(
            "<div class=\"max-w-sm rounded relative w-full\" data-key=\"{}\" \
             style=\"animation: {} {}ms {} {}ms both;\">",
            card.key,
            FADE_KEYFRAMES,
            fade.duration.as_millis(),
            fade.easing.css_name(),
            fade.delay.as_millis()
        );
        if let Some(poster) = card.record.poster_url() {
            let _ = write!(
                html,
                "<img src=\"{}\" alt=\"{}\" />",
                escape_html(poster),
                escape_html(card.title())
            );
        }
        let _ = write!(
            html,
            "<h2>{}</h2><p>{}</p></div>",
            escape_html(card.title()),
            escape_html(&card.caption())
        );
        html
    }
}

impl GridRenderer for HtmlGridRenderer {
    fn render(&self, frame: &GridFrame<'_>) -> String {
        let mut out = format!(
            "<style>@keyframes {} {{ from {{ opacity: 0; }} to {{ opacity: 1; }} }}</style>\n",
            FADE_KEYFRAMES
        );
        out.push_str(
            "<div class=\"grid lg:grid-cols-4 md:grid-cols-3 sm:grid-cols-2 grid-cols-1 gap-10\">\n",
        );
        for card in frame.cards {
            let _ = writeln!(out, "  {}", Self::card_html(card));
        }
        if frame.observing {
            let _ = writeln!(out, "  <div data-sentinel=\"true\">{}</div>", SENTINEL_TEXT);
        }
        out.push_str("</div>\n");
        if frame.observing {
            let _ = writeln!(
                out,
                "<section class=\"flex justify-center items-center w-full\"><div>\
                 <img src=\"{}\" alt=\"spinner\" width=\"{}\" height=\"{}\" class=\"object-contain\" />\
                 </div></section>",
                SPINNER_SRC, SPINNER_SIZE, SPINNER_SIZE
            );
        }
        out
    }
}

fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
