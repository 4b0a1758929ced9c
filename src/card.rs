//! Open Graph preview card rendering.
//!
//! Fixed 1200x630 template: brand bar, amount headline, description line.
//! Every parameter is optional; absent values fall back to default text.

use anyhow::Result;
use plotters::prelude::*;
use std::path::Path;

pub const CARD_WIDTH: u32 = 1200;
pub const CARD_HEIGHT: u32 = 630;

const MAX_DESCRIPTION_CHARS: usize = 64;

const BACKGROUND: RGBColor = RGBColor(16, 24, 48);
const BRAND_BAR: RGBColor = RGBColor(79, 140, 255);
const MUTED: RGBColor = RGBColor(168, 178, 204);

#[derive(Debug, Clone, PartialEq)]
pub struct CardContent {
    pub amount: String,
    pub currency: String,
    pub description: String,
}

impl CardContent {
    pub fn from_params(
        amount: Option<String>,
        currency: Option<String>,
        description: Option<String>,
    ) -> Self {
        Self {
            amount: non_empty(amount).unwrap_or_else(|| "0.00".to_string()),
            currency: non_empty(currency).unwrap_or_else(|| "USDC".to_string()),
            description: non_empty(description).unwrap_or_else(|| "Payment request".to_string()),
        }
    }

    pub fn headline(&self) -> String {
        format!("{} {}", self.amount, self.currency)
    }

    pub fn description_line(&self) -> String {
        truncate_label(&self.description, MAX_DESCRIPTION_CHARS)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn truncate_label(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let kept: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    format!("{}\u{2026}", kept.trim_end())
}

/// Render the card to `path` as PNG.
pub fn render_png(app_name: &str, content: &CardContent, path: &Path) -> Result<()> {
    let root = BitMapBackend::new(path, (CARD_WIDTH, CARD_HEIGHT)).into_drawing_area();
    root.fill(&BACKGROUND)?;

    root.draw(&Rectangle::new(
        [(0, 0), (CARD_WIDTH as i32, 12)],
        BRAND_BAR.filled(),
    ))?;

    root.draw(&Text::new(
        app_name.to_string(),
        (64, 72),
        ("sans-serif", 44).into_font().color(&BRAND_BAR),
    ))?;

    root.draw(&Text::new(
        content.headline(),
        (64, 240),
        ("sans-serif", 112).into_font().color(&WHITE),
    ))?;

    root.draw(&Text::new(
        content.description_line(),
        (64, 420),
        ("sans-serif", 42).into_font().color(&MUTED),
    ))?;

    root.present()?;
    Ok(())
}
