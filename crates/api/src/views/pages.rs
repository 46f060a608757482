//! HTML page rendering.
//!
//! Pages are self-contained: inline CSS and inline SVG charts, no scripts.

use analytics::{AggregateView, Dashboard, Tile, VideoDrilldown, VideoSummary};

use super::charts::{audience_chart, trajectory_chart};
use super::format::{html_escape, number, percent, sign_class};

/// Sidebar entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Aggregate,
    Video,
}

impl View {
    fn href(&self) -> &'static str {
        match self {
            Self::Aggregate => "/aggregate",
            Self::Video => "/videos",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Self::Aggregate => "Aggregate Metrics",
            Self::Video => "Individual Video Analysis",
        }
    }
}

fn layout(active: View, body: &str) -> String {
    let nav: String = [View::Aggregate, View::Video]
        .iter()
        .map(|view| {
            format!(
                r#"<li><a href="{href}" class="{class}">{label}</a></li>"#,
                href = view.href(),
                class = if *view == active { "active" } else { "" },
                label = view.label(),
            )
        })
        .collect();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title} - Channel Dashboard</title>
    <style>{css}</style>
</head>
<body>
    <nav class="sidebar">
        <h1>Channel Dashboard</h1>
        <ul>{nav}</ul>
    </nav>
    <main>
        {body}
    </main>
</body>
</html>"#,
        title = active.label(),
        css = inline_css(),
        nav = nav,
        body = body,
    )
}

fn render_tile(tile: &Tile) -> String {
    format!(
        r#"<div class="tile">
    <div class="tile-label">{label}</div>
    <div class="tile-value">{value}</div>
    <div class="tile-delta {class}">{delta}</div>
</div>"#,
        label = html_escape(tile.label),
        value = number(tile.recent_median),
        class = sign_class(tile.change),
        delta = percent(tile.change),
    )
}

fn render_tiles(view: &AggregateView) -> String {
    let columns: String = view
        .layout
        .slots
        .iter()
        .map(|slot| {
            let tiles: String = slot.iter().map(render_tile).collect();
            format!(r#"<div class="tile-column">{}</div>"#, tiles)
        })
        .collect();

    format!(r#"<section class="tiles">{}</section>"#, columns)
}

fn render_table(view: &AggregateView) -> String {
    let headers: String = view
        .metrics
        .iter()
        .map(|m| format!("<th>{}</th>", html_escape(m)))
        .collect();

    let rows: String = view
        .rows
        .iter()
        .map(|row| {
            let cells: String = row
                .values
                .iter()
                .map(|&v| format!(r#"<td class="{}">{}</td>"#, sign_class(v), percent(v)))
                .collect();
            format!(
                "<tr><td>{title}</td><td>{published}</td>{cells}</tr>",
                title = html_escape(&row.title),
                published = row.published.format("%Y-%m-%d"),
                cells = cells,
            )
        })
        .collect();

    format!(
        r#"<section class="section">
    <h2>Individual Video Performance</h2>
    <p class="hint">Each value is the change relative to the 12-month median.</p>
    <table>
        <thead><tr><th>Video title</th><th>Publish date</th>{headers}</tr></thead>
        <tbody>{rows}</tbody>
    </table>
</section>"#
    )
}

/// Aggregate metrics page.
pub fn render_aggregate(dashboard: &Dashboard) -> String {
    let view = &dashboard.aggregate;
    let body = format!(
        r#"<h2>Aggregate Metrics</h2>
<p class="hint">6-month median, change against the 12-month median.</p>
{tiles}
{table}"#,
        tiles = render_tiles(view),
        table = render_table(view),
    );
    layout(View::Aggregate, &body)
}

fn render_selector(videos: &[VideoSummary], selected_id: &str) -> String {
    let options: String = videos
        .iter()
        .map(|v| {
            format!(
                r#"<option value="{value}"{selected}>{label}</option>"#,
                value = html_escape(&v.title),
                selected = if v.video_id == selected_id { " selected" } else { "" },
                label = html_escape(&v.title),
            )
        })
        .collect();

    format!(
        r#"<form method="get" action="/videos" class="selector">
    <label for="title">Pick a video</label>
    <select id="title" name="title">{options}</select>
    <button type="submit">Show</button>
</form>"#
    )
}

/// Per-video drill-down page.
pub fn render_video(videos: &[VideoSummary], drilldown: &VideoDrilldown) -> String {
    let audience = if drilldown.audience.is_empty() {
        r#"<p class="hint">No audience breakdown for this video.</p>"#.to_string()
    } else {
        audience_chart(&drilldown.audience)
    };

    let trajectory = if drilldown.trajectory.is_empty() && drilldown.envelope.is_empty() {
        r#"<p class="hint">No daily views for this video.</p>"#.to_string()
    } else {
        trajectory_chart(&drilldown.trajectory, &drilldown.envelope)
    };

    let body = format!(
        r#"<h2>Individual Video Analysis</h2>
{selector}
<section class="section">
    <h3>{title}</h3>
    <p class="hint">Published {published} &middot; {comments} comments</p>
</section>
<section class="section chart">
    <h3>Views by subscription status and country</h3>
    {audience}
</section>
<section class="section chart">
    <h3>View count over the first 30 days</h3>
    {trajectory}
</section>"#,
        selector = render_selector(videos, &drilldown.video_id),
        title = html_escape(&drilldown.title),
        published = drilldown.published.format("%Y-%m-%d"),
        comments = drilldown.comment_count,
        audience = audience,
        trajectory = trajectory,
    );
    layout(View::Video, &body)
}

fn inline_css() -> &'static str {
    r#"
* { box-sizing: border-box; }
body { margin: 0; display: flex; font-family: -apple-system, "Segoe UI", Roboto, sans-serif; color: #333; }
.sidebar { width: 240px; min-height: 100vh; padding: 1.5rem 1rem; background: #f0f2f6; }
.sidebar h1 { font-size: 1.1rem; }
.sidebar ul { list-style: none; padding: 0; }
.sidebar a { display: block; padding: 0.5rem; color: #333; text-decoration: none; border-radius: 4px; }
.sidebar a.active { background: #ff4b4b; color: #fff; }
main { flex: 1; padding: 1.5rem 2rem; overflow-x: auto; }
.tiles { display: grid; grid-template-columns: repeat(5, 1fr); gap: 1rem; }
.tile { padding: 0.75rem; margin-bottom: 1rem; border: 1px solid #e6e6e6; border-radius: 6px; }
.tile-label { font-size: 0.85rem; color: #666; }
.tile-value { font-size: 1.6rem; font-weight: 600; }
.tile-delta { font-size: 0.9rem; }
.neg { color: #d62728; }
.pos { color: #2ca02c; }
.section { margin-top: 1.5rem; }
.hint { color: #777; font-size: 0.9rem; }
table { border-collapse: collapse; font-size: 0.85rem; }
th, td { padding: 0.35rem 0.6rem; border-bottom: 1px solid #eee; text-align: right; }
th:first-child, td:first-child { text-align: left; }
.chart svg { max-width: 900px; }
.selector select { min-width: 420px; padding: 0.3rem; }
"#
}
