// Per-container configuration read from data attributes at construction.
// Parsing never fails: anything missing or malformed falls back to the
// documented default.

use web_sys::Element;

pub const DEFAULT_COLORS: [&str; 3] = ["#00d76c", "#a8e2ff", "#ffffff"];
pub const DEFAULT_PARTICLE_COUNT: u32 = 60;
pub const DEFAULT_SPEED_MULTIPLIER: f64 = 1.0;

// data-color-1 through data-color-5
const COLOR_SLOTS: usize = 5;

pub struct BackgroundConfig {
    pub colors: Vec<String>,
    pub particle_count: u32,
    pub speed_multiplier: f64,
}

impl BackgroundConfig {
    pub fn from_element(element: &Element) -> BackgroundConfig {
        BackgroundConfig::from_attributes(|name| element.get_attribute(name))
    }

    // Same extraction logic over any attribute source, so it can be
    // exercised without a DOM.
    pub fn from_attributes<F>(attribute: F) -> BackgroundConfig
    where
        F: Fn(&str) -> Option<String>,
    {
        let particle_count = attribute("data-count")
            .and_then(|raw| raw.trim().parse().ok())
            .unwrap_or(DEFAULT_PARTICLE_COUNT);
        let speed_multiplier = attribute("data-speed")
            .and_then(|raw| raw.trim().parse().ok())
            .unwrap_or(DEFAULT_SPEED_MULTIPLIER);

        // Both spellings are accepted per slot; the undashed one wins.
        // Empty slots are skipped, so the palette keeps slot order.
        let mut colors = Vec::new();
        for slot in 1..=COLOR_SLOTS {
            let color = attribute(&format!("data-color{}", slot))
                .or_else(|| attribute(&format!("data-color-{}", slot)));
            if let Some(color) = color {
                colors.push(color);
            }
        }
        if colors.is_empty() {
            colors = DEFAULT_COLORS.iter().map(|c| c.to_string()).collect();
        }

        BackgroundConfig {
            colors,
            particle_count,
            speed_multiplier,
        }
    }
}
