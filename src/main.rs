//! Ink-Paginator CLI (headless demo)
//! The main interface is through WASM bindings.

use ink_paginator::{MemorySurface, Paginator, PaginatorError, PaginatorOptions};

fn main() -> Result<(), PaginatorError> {
    let mut surface = MemorySurface::new().with_origin(48.0);
    for section in 0..12 {
        surface.push_breakable(40.0); // heading
        surface.push_content(180.0 + (section % 5) as f32 * 60.0);
    }

    let options = PaginatorOptions::from_json(
        r#"{"pageWidth": "8.5in", "pageHeight": "11in", "pageInset": "0.5in", "pageGap": 0}"#,
    )?;
    let engine = Paginator::new(surface, options)?;

    println!("Ink-Paginator headless demo");
    println!("===========================");
    println!("pages: {}", engine.page_count());
    for (index, boundary) in engine.page_boundaries().iter().enumerate() {
        println!(
            "  page {}: content {:.0}px .. {:.0}px",
            index, boundary.top, boundary.bottom
        );
    }
    println!(
        "spacers inserted: {}",
        engine.surface().spacer_layout().len()
    );
    Ok(())
}
