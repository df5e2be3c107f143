//! Participant colours

const PARTICIPANT_COLORS: [&str; 10] = [
    "#3b82f6", // blue
    "#10b981", // emerald
    "#f59e0b", // amber
    "#ef4444", // red
    "#8b5cf6", // violet
    "#ec4899", // pink
    "#06b6d4", // cyan
    "#84cc16", // lime
    "#f97316", // orange
    "#6366f1", // indigo
];

/// Colour for the participant who joined `index`-th; wraps after ten.
pub fn participant_color(index: usize) -> &'static str {
    PARTICIPANT_COLORS[index % PARTICIPANT_COLORS.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_wraps() {
        assert_eq!(participant_color(0), "#3b82f6");
        assert_eq!(participant_color(3), "#ef4444");
        assert_eq!(participant_color(10), participant_color(0));
        assert_eq!(participant_color(19), "#6366f1");
    }
}
