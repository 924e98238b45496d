//! Printing the map scene

use std::fmt::Write;

use application::MapSession;
use clap::ValueEnum;
use infrastructure::{HeadlessSurface, Viewport};

/// How the resulting scene is printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable listing
    #[default]
    Summary,
    /// GeoJSON FeatureCollection
    Geojson,
}

/// Render the session's scene in the requested format
pub fn render(session: &MapSession<HeadlessSurface>, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Summary => Ok(summary(session)),
        OutputFormat::Geojson => Ok(serde_json::to_string_pretty(
            &session.surface().to_geojson(),
        )?),
    }
}

/// Markers, lines, viewport and the current notice as plain text
pub fn summary(session: &MapSession<HeadlessSurface>) -> String {
    let surface = session.surface();
    let mut out = String::new();

    let _ = writeln!(out, "Markers ({}):", surface.marker_count());
    for marker in surface.markers() {
        let _ = writeln!(
            out,
            "  {:<8} {}  {}",
            marker.title,
            marker.position,
            marker.popup.replace('\n', " | ")
        );
    }

    let _ = writeln!(out, "Lines ({}):", surface.line_count());
    for line in surface.lines() {
        let _ = writeln!(
            out,
            "  {:<8} {} points",
            line.style.color,
            line.points.len()
        );
    }

    match surface.viewport() {
        Some(Viewport::Centered { center, zoom }) => {
            let _ = writeln!(out, "Viewport: {center} (zoom {zoom})");
        },
        Some(Viewport::Fitted { bounds }) => {
            let _ = writeln!(
                out,
                "Viewport: {} to {}",
                bounds.south_west(),
                bounds.north_east()
            );
        },
        None => {},
    }

    if let Some(notice) = session.notice() {
        let _ = writeln!(out, "Notice: {}", notice.message);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use application::SessionConfig;
    use domain::GeoPoint;

    fn session() -> MapSession<HeadlessSurface> {
        MapSession::new(HeadlessSurface::new(), SessionConfig::default())
    }

    #[test]
    fn empty_session_shows_default_view() {
        let text = summary(&session());
        assert!(text.starts_with("Markers (0):\nLines (0):\n"));
        assert!(text.contains("(zoom 13)"));
        assert!(!text.contains("Notice"));
    }

    #[test]
    fn markers_and_preview_are_listed() {
        let mut session = session();
        session.handle_click(GeoPoint::new(51.109, 17.041).unwrap());
        session.handle_click(GeoPoint::new(51.1045, 17.0285).unwrap());

        let text = summary(&session);
        assert!(text.contains("Markers (2):"));
        assert!(text.contains("  start "));
        assert!(text.contains("  end "));
        assert!(text.contains("Lines (1):\n  blue     2 points"));
        assert!(text.contains("Viewport: "));
    }

    #[test]
    fn geojson_output_is_valid_json() {
        let rendered = render(&session(), OutputFormat::Geojson).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(parsed["type"], "FeatureCollection");
    }
}
