/// Measured widths of the thumbnail strip and its visible viewport, in px.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StripLayout {
    pub strip_width: f64,
    pub viewport_width: f64,
}

/// Horizontal offset (the list's `left`) that keeps thumbnail `index`
/// (0-based) inside the viewport.
///
/// Centers the thumbnail when there is room on both sides, pins the strip's
/// end edge to the viewport when near the end, and otherwise pins the start
/// edge at 0.
pub fn offset(layout: StripLayout, count: usize, index: usize) -> f64 {
    if count == 0 {
        return 0.0;
    }
    let StripLayout {
        strip_width: w,
        viewport_width: vw,
    } = layout;
    let slide = w / count as f64;
    let center = index as f64 * slide + slide / 2.0;
    let half = vw / 2.0;

    if center > half && (w - center) > half {
        -(center - half)
    } else if (w - center) < half {
        -(w - vw)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LAYOUT: StripLayout = StripLayout {
        strip_width: 1000.0,
        viewport_width: 200.0,
    };

    #[test]
    fn centers_thumbnail_with_room_on_both_sides() {
        // s = 100, c = 550, (W - c) = 450 > 100
        assert_eq!(offset(LAYOUT, 10, 5), -450.0);
    }

    #[test]
    fn pins_end_edge_near_the_end() {
        // c = 950, (W - c) = 50 < 100
        assert_eq!(offset(LAYOUT, 10, 9), -800.0);
    }

    #[test]
    fn pins_start_edge_near_the_start() {
        // c = 50 < 100
        assert_eq!(offset(LAYOUT, 10, 0), 0.0);
    }

    #[test]
    fn exact_half_viewport_from_end_keeps_start_pin() {
        // Vw/2 = 150, c = 850, (W - c) = 150 is neither > nor < Vw/2
        let layout = StripLayout {
            strip_width: 1000.0,
            viewport_width: 300.0,
        };
        assert_eq!(offset(layout, 10, 8), 0.0);
    }

    #[test]
    fn empty_strip_has_no_offset() {
        assert_eq!(offset(LAYOUT, 0, 0), 0.0);
    }
}
