//! Terminal spectrum bars.

/// Block glyphs from empty to full.
const LEVELS: [char; 9] = [' ', '▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Group the lowest `max_bins` frequency bytes into `bars` bar heights in `0..=1`.
///
/// Bar `i` starts at bin `i * visible / bars` and averages `visible / bars`
/// bins (at least one). Bars past the end of the data are zero.
pub fn group_bins(bytes: &[u8], max_bins: usize, bars: usize) -> Vec<f32> {
    let visible = bytes.len().min(max_bins);
    if bars == 0 {
        return Vec::new();
    }
    let per_bar = (visible / bars).max(1);

    (0..bars)
        .map(|i| {
            let start = i * visible / bars;
            let end = (start + per_bar).min(visible);
            if start >= end {
                return 0.0;
            }
            let sum: f32 = bytes[start..end].iter().map(|&b| f32::from(b) / 255.0).sum();
            sum / (end - start) as f32
        })
        .collect()
}

/// Render bar heights as one line of block glyphs.
pub fn render(heights: &[f32]) -> String {
    heights
        .iter()
        .map(|h| {
            let level = (h.clamp(0.0, 1.0) * 8.0).round() as usize;
            LEVELS[level]
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_even_split() {
        let bytes: Vec<u8> = vec![0, 255, 51, 51, 255, 255, 0, 0];
        let heights = group_bins(&bytes, 8, 4);
        assert_eq!(heights.len(), 4);
        assert!((heights[0] - 0.5).abs() < 1e-6);
        assert!((heights[1] - 0.2).abs() < 1e-6);
        assert!((heights[2] - 1.0).abs() < 1e-6);
        assert_eq!(heights[3], 0.0);
    }

    #[test]
    fn test_group_ignores_bins_above_max() {
        let mut bytes = vec![0u8; 16];
        bytes[8..].fill(255);
        let heights = group_bins(&bytes, 8, 2);
        assert!(heights.iter().all(|&h| h == 0.0));
    }

    #[test]
    fn test_group_more_bars_than_bins() {
        let bytes = vec![255u8; 4];
        let heights = group_bins(&bytes, 512, 8);
        assert_eq!(heights.len(), 8);
        assert!(heights.iter().all(|&h| h == 1.0));
    }

    #[test]
    fn test_group_empty() {
        assert_eq!(group_bins(&[], 512, 4), vec![0.0; 4]);
        assert!(group_bins(&[1, 2], 512, 0).is_empty());
    }

    #[test]
    fn test_render() {
        assert_eq!(render(&[0.0, 0.5, 1.0, 2.0]), " ▄██");
    }
}
