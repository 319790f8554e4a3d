//! Example: render a short game to a PNG
//!
//! ```sh
//! RUST_LOG=goban=trace cargo run -p goban-engine --example render_board -- board.png
//! ```

use anyhow::Context;
use goban_engine::board::Vertex;
use goban_engine::geometry::Rect;
use goban_engine::render::Theme;
use goban_engine::{BoardView, Config};

const MOVES: &[&str] = &["Q16", "D4", "Q3", "D16", "C14", "R5", "O3"];

fn main() -> anyhow::Result<()> {
    goban_engine::init_logging(true);

    let output = std::env::args().nth(1).unwrap_or_else(|| "board.png".to_string());

    let mut view = BoardView::new(Config::default()).context("creating board view")?;
    let canvas = view.canvas_size();
    view.set_viewport(Rect::new(0.0, 0.0, canvas.width, canvas.height))?;

    for notation in MOVES {
        let point: Vertex = notation.parse()?;
        view.play(point).with_context(|| format!("playing {notation}"))?;
        let stats = view.render();
        tracing::info!("{}: {} tiles, {} layers repainted", notation, stats.tiles_painted, stats.layers_painted);
    }

    view.set_cross_hair(Some("K10".parse()?))?;
    view.set_theme(Theme::high_contrast());
    let stats = view.render();
    tracing::info!("Theme change: {} tiles, {} layers repainted", stats.tiles_painted, stats.layers_painted);

    let image = view.snapshot()?;
    image.save_png(&output).with_context(|| format!("writing {output}"))?;

    println!("goban-engine v{}: wrote {}x{} board to {}", goban_engine::VERSION, image.width(), image.height(), output);
    Ok(())
}
