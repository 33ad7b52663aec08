//! Deterministic layout: id digests, id-derived positions, stored-position
//! scaling and nearest-neighbour topology.

use glam::Vec2;

/// Sum of the UTF-16 code units of `id`.
pub fn digest(id: &str) -> u64 {
    id.encode_utf16().map(u64::from).sum()
}

/// Reproducible canvas position for an id without stored coordinates.
///
/// Pure in `(id, width, height, margin)`. An empty id lands on the top-left
/// inset corner `(margin, margin)`.
pub fn position(id: &str, width: f32, height: f32, margin: f32) -> Vec2 {
    let s = digest(id);
    let fx = (s % 100) as f32 / 100.0;
    let fy = (s.wrapping_mul(13) % 100) as f32 / 100.0;
    Vec2::new(
        fx * (width - 2.0 * margin) + margin,
        fy * (height - 2.0 * margin) + margin,
    )
}

/// Scale a percentage-space position (`[0, 100]²`) into the inset canvas.
pub fn scale_percent(percent: Vec2, width: f32, height: f32, margin: f32) -> Vec2 {
    let inner = Vec2::new(width - 2.0 * margin, height - 2.0 * margin);
    percent / 100.0 * inner + Vec2::splat(margin)
}

/// For every point, directed links to its `k` nearest other points.
///
/// Ties keep list order, so the first encountered neighbour wins.
pub fn nearest_links(points: &[Vec2], k: usize) -> Vec<(usize, usize)> {
    let mut links = Vec::with_capacity(points.len() * k);
    for (i, p) in points.iter().enumerate() {
        let mut others: Vec<(usize, f32)> = points
            .iter()
            .enumerate()
            .filter(|(j, _)| *j != i)
            .map(|(j, q)| (j, p.distance_squared(*q)))
            .collect();
        // sort_by is stable
        others.sort_by(|a, b| a.1.total_cmp(&b.1));
        links.extend(others.into_iter().take(k).map(|(j, _)| (i, j)));
    }
    links
}
