//! Example: Basic usage of the Tessel layout engine
//!
//! Run with `RUST_LOG=tessel_layout=trace` to see every solve and cache hit.

use tessel_layout::{Align, EdgeSizes, Justify, LayoutEngine, NodeId, Size, Style};

fn print_tree(engine: &LayoutEngine, node: NodeId, depth: usize) {
    let rect = engine.rect(node);
    println!(
        "{:indent$}{node}: {}x{} at ({}, {})",
        "",
        rect.width,
        rect.height,
        rect.x,
        rect.y,
        indent = depth * 2
    );
    for child in engine.children(node) {
        print_tree(engine, child, depth + 1);
    }
}

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let mut engine = LayoutEngine::with_capacity(256)?;

    // Toolbar over a sidebar + content split
    let window = engine.add(None, Style::column().with_gap(4.0))?;
    let toolbar = engine.add(
        Some(window),
        Style::row()
            .with_height(32.0)
            .with_justify(Justify::SpaceBetween)
            .with_align(Align::Center)
            .with_padding(EdgeSizes::new(0.0, 8.0, 0.0, 8.0)),
    )?;
    let title = engine.add(Some(toolbar), Style::default())?;
    engine.set_measure(title, Some(Box::new(|_, _| Size::new(96.0, 16.0))))?;
    for _ in 0..3 {
        engine.add(Some(toolbar), Style::default().with_size(24.0, 24.0))?;
    }

    let split = engine.add(Some(window), Style::row().with_grow(1.0).with_align(Align::Stretch))?;
    let sidebar = engine.add(Some(split), Style::column().with_width(180.0).with_gap(2.0))?;
    for _ in 0..5 {
        engine.add(Some(sidebar), Style::default().with_height(20.0).with_min_size(180.0, 0.0))?;
    }
    engine.add(Some(split), Style::default().with_grow(1.0))?;

    engine.compute(1024.0, 768.0);
    print_tree(&engine, window, 0);

    // Resize only the sidebar; everything else is served from the cache
    engine.reset_stats();
    engine.set_style(sidebar, Style::column().with_width(240.0).with_gap(2.0))?;
    engine.compute(1024.0, 768.0);

    let stats = engine.stats();
    println!(
        "Relayout: {} solved, {} moved, {:.0}% cache hits",
        stats.nodes_solved,
        stats.subtrees_translated,
        engine.cache_hit_rate() * 100.0
    );

    Ok(())
}
