use std::io::IsTerminal;

use ansi_term::Colour;

use crate::{analysis::counts::ChartSummary, data::color::Color};

const BAR_WIDTH: usize = 30;
const BAR_CHAR: &str = "█";

pub fn use_colors() -> bool {
    std::io::stdout().is_terminal()
}

fn paint(color: Color, text: &str, colored: bool) -> String {
    if colored {
        Colour::RGB(color.r, color.g, color.b).paint(text).to_string()
    } else {
        text.to_string()
    }
}

/// Horizontal bar chart of reason counts followed by a short summary.
pub fn render_chart(summary: &ChartSummary, colored: bool) -> String {
    if summary.counts.is_empty() {
        return format!("No data for this period ({})\n", summary.period);
    }

    let name_width = summary
        .counts
        .iter()
        .map(|c| c.display_name.chars().count())
        .max()
        .unwrap_or(0);
    let max_count = summary.max_count().max(1);

    let mut output = String::new();
    for count in &summary.counts {
        // Every non-zero count gets at least one block.
        let length = (count.count * BAR_WIDTH).div_ceil(max_count);
        let bar = BAR_CHAR.repeat(length);
        output += &format!(
            "{:<name_width$}  {} {}\n",
            count.display_name,
            paint(count.color, &bar, colored),
            count.count
        );
    }

    output += &format!("\nTotal wake-ups: {}\n", summary.total_entries);
    if let Some(top) = summary.most_common() {
        output += &format!("Most common: {} ({})\n", top.display_name, top.count);
    }
    output
}
